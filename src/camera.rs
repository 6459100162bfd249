use log::{ debug, info };

use crate::vector::Vector3;
use crate::ray::Ray;
use crate::scene::Setup;
use crate::tracer::RayTracer;
use crate::canvas::Canvas;

/// A camera record for generating a canvas.
///
/// The camera looks down `-z` from `eye`. The view plane sits `near` units in
/// front of the eye and spans `left..right` horizontally and `bottom..top`
/// vertically; it is divided evenly into `hsize` by `vsize` pixels.
///
/// Framing comes from those bounds alone. There is no fixed field of view,
/// the horizontal extent is not derived from `top`, and pixel row 0 is the
/// top of the image, so renders can be framed differently from tracers that
/// widen the view or flip rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    /// The position rays are cast from.
    pub eye: Vector3,

    pub near: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Camera {
    /// Builds a camera from a scene's setup, looking from `eye`.
    pub fn new(setup: &Setup, eye: Vector3) -> Camera {
        let (hsize, vsize) = setup.resolution;

        Camera {
            hsize,
            vsize,
            eye,
            near: setup.near,
            left: setup.left,
            right: setup.right,
            top: setup.top,
            bottom: setup.bottom,
        }
    }

    /// The width of one pixel on the view plane.
    pub fn pixel_width(&self) -> f64 {
        (self.right - self.left) / self.hsize as f64
    }

    /// The height of one pixel on the view plane.
    pub fn pixel_height(&self) -> f64 {
        (self.top - self.bottom) / self.vsize as f64
    }

    /// Creates the primary ray through the center of pixel `(px, py)`.
    ///
    /// Column 0 is at `left`, row 0 is at `top`, so rows run top to bottom
    /// like the rows of the output image.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        // Offsets from the edge of the view plane to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_width();
        let yoffset = (py as f64 + 0.5) * self.pixel_height();

        let pixel = self.eye + Vector3::new(
            self.left + xoffset,
            self.top - yoffset,
            -self.near,
        );

        Ray::new(self.eye, (pixel - self.eye).normalize())
    }

    /// Renders a scene onto a new canvas, one primary ray per pixel.
    pub fn render(&self, tracer: &RayTracer) -> Canvas {
        let mut image = Canvas::new(self.hsize, self.vsize);

        info!("Rendering {}x{} pixels...", self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y);
                let color = tracer.trace(&ray, 0);
                image.write_pixel(x, y, &color);
            }

            if self.vsize >= 10 && (y + 1) % (self.vsize / 10) == 0 {
                debug!("...{} of {} rows", y + 1, self.vsize);
            }
        }
        info!("...done.");

        image
    }
}

#[cfg(test)]
fn square_setup(size: usize) -> Setup {
    Setup { resolution: (size, size), ..Default::default() }
}

#[test]
fn ray_through_center() {
    let c = Camera::new(&square_setup(3), Vector3::zero());
    let r = c.ray_for_pixel(1, 1);

    assert_eq!(r.origin, Vector3::zero());
    assert!(r.direction.approx_eq(&Vector3::new(0.0, 0.0, -1.0)));
}

#[test]
fn ray_through_top_left_corner() {
    let c = Camera::new(&square_setup(2), Vector3::zero());
    let r = c.ray_for_pixel(0, 0);

    // The top left pixel center is at (-0.5, 0.5, -1).
    let expected = Vector3::new(-0.5, 0.5, -1.0).normalize();
    assert!(r.direction.approx_eq(&expected));
}

#[test]
fn rays_follow_the_eye() {
    let eye = Vector3::new(1.0, 2.0, 3.0);
    let c = Camera::new(&square_setup(3), eye);
    let r = c.ray_for_pixel(1, 1);

    assert_eq!(r.origin, eye);
    assert!(r.direction.approx_eq(&Vector3::new(0.0, 0.0, -1.0)));
}

#[test]
fn asymmetric_frustum() {
    let setup = Setup {
        near: 2.0,
        left: 0.0,
        right: 4.0,
        top: 1.0,
        bottom: -1.0,
        resolution: (4, 2),
        ..Default::default()
    };
    let c = Camera::new(&setup, Vector3::zero());

    assert_eq!(c.pixel_width(), 1.0);
    assert_eq!(c.pixel_height(), 1.0);

    let r = c.ray_for_pixel(3, 1);
    let expected = Vector3::new(3.5, -0.5, -2.0).normalize();
    assert!(r.direction.approx_eq(&expected));
}

#[test]
fn wide_frustum_keeps_its_own_width() {
    let setup = Setup {
        near: 1.0,
        left: -2.0,
        right: 2.0,
        top: 0.5,
        bottom: -0.5,
        resolution: (4, 1),
        ..Default::default()
    };
    let c = Camera::new(&setup, Vector3::zero());

    // Columns span left..right, not -top..top.
    let r = c.ray_for_pixel(0, 0);
    assert!(r.direction.approx_eq(&Vector3::new(-1.5, 0.0, -1.0).normalize()));

    let r = c.ray_for_pixel(3, 0);
    assert!(r.direction.approx_eq(&Vector3::new(1.5, 0.0, -1.0).normalize()));
}

#[test]
fn render_scene_with_camera() {
    use crate::color::Color;
    use crate::geometry::Sphere;
    use crate::light::Light;

    let setup = Setup {
        background: Color::rgb(0.0, 0.0, 1.0),
        ambient: Color::white(),
        ..square_setup(3)
    };

    // A sphere fills the middle pixel but misses the corners.
    let mut s = Sphere::new("s", Vector3::new(0.0, 0.0, -10.0),
        Vector3::new(1.0, 1.0, 1.0));
    s.color = Color::rgb(1.0, 0.0, 0.0);
    s.material.ambient = 1.0;
    s.material.diffuse = 0.0;
    s.material.specular = 0.0;
    let spheres = vec![s];
    let lights: Vec<Light> = Vec::new();

    let tracer = RayTracer::new(&setup, &spheres, &lights);
    let image = Camera::new(&setup, Vector3::zero()).render(&tracer);

    assert_eq!(image.read_pixel(1, 1).unwrap(), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(image.read_pixel(0, 0).unwrap(), setup.background);
}
