use crate::vector::Vector3;

/// A ray with an origin and a direction.
///
/// The direction is not normalized by the type itself, but every ray the
/// tracer builds has a unit direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Ray {
        Ray { origin, direction }
    }

    pub fn position(&self, t: f64) -> Vector3 {
        self.origin + (t * self.direction)
    }

    /// Spawns the mirror reflection of this ray at point `at`.
    ///
    /// The reflected direction is `d - 2(d·n)n`. If both the direction and
    /// the normal are unit length, so is the result.
    pub fn reflect(&self, at: Vector3, normal: &Vector3) -> Ray {
        Ray {
            origin: at,
            direction: self.direction.reflect(normal),
        }
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Vector3::new(2.0, 3.0, 4.0),
                Vector3::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Vector3::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Vector3::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Vector3::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Vector3::new(4.5, 3.0, 4.0));
}

#[test]
fn reflect_off_slanted_surface() {
    let r = Ray::new(
        Vector3::new(0.0, 1.0, -1.0),
        Vector3::new(0.0, -1.0, 0.0),
    );
    let half = 2.0f64.sqrt() / 2.0;
    let n = Vector3::new(0.0, half, -half);
    let at = Vector3::new(0.0, 0.0, -1.0);

    let reflected = r.reflect(at, &n);

    assert_eq!(reflected.origin, at);
    assert!(reflected.direction.approx_eq(&Vector3::new(0.0, 0.0, -1.0)));
    assert!(crate::feq(reflected.direction.magnitude(), 1.0));
}
