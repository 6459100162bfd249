use crate::consts::MAX_DEPTH;
use crate::vector::Vector3;
use crate::color::Color;
use crate::ray::Ray;
use crate::geometry::Sphere;
use crate::light::{ self, Light };
use crate::intersect::{ Hit, closest_hit };
use crate::scene::Setup;

/// A recursive ray tracer over a borrowed scene.
///
/// The tracer only holds shared references to the setup, spheres and lights,
/// and has no state of its own. Tracing one ray never affects another, so a
/// single tracer can be reused for every pixel of a render.
#[derive(Copy, Clone, Debug)]
pub struct RayTracer<'a> {
    pub setup: &'a Setup,
    pub spheres: &'a [Sphere],
    pub lights: &'a [Light],
}

impl<'a> RayTracer<'a> {
    pub fn new(setup: &'a Setup, spheres: &'a [Sphere], lights: &'a [Light])
        -> RayTracer<'a> {
        RayTracer { setup, spheres, lights }
    }

    /// Finds the closest sphere hit by a ray among `spheres`.
    pub fn closest_intersection(&self, ray: &Ray, spheres: &'a [Sphere])
        -> Option<Hit<'a>> {
        closest_hit(ray, spheres)
    }

    /// Determines whether `light` is blocked from `point`.
    ///
    /// A shadow ray is cast from `point` towards the light. The light is
    /// occluded if something is hit strictly closer than the light itself.
    /// Shadows are binary; there is no partial attenuation.
    pub fn is_shadowed(&self, point: Vector3, light: &Light) -> bool {
        let distance = light.distance_from(point);
        let shadow_ray = Ray::new(point, light.direction_from(point));

        match self.closest_intersection(&shadow_ray, self.spheres) {
            Some(blocker) => blocker.distance < distance,
            None => false,
        }
    }

    /// Calculates the color for a hit, based on shadows, light and
    /// reflection.
    ///
    /// Ambient light is always applied. Each unshadowed light adds a diffuse
    /// and a specular term. Reflective spheres add `Kr` times the color seen
    /// along the mirrored ray, traced one level deeper. Nothing is clamped.
    pub fn shade_hit(&self, ray: &Ray, hit: &Hit, depth: usize) -> Color {
        let sphere = hit.what;
        let m = &sphere.material;
        let normalv = sphere.normal_at(hit.point);
        let eyev = -ray.direction;

        let mut color = light::ambient(m, sphere.color, self.setup.ambient);

        for l in self.lights.iter() {
            if self.is_shadowed(hit.point, l) {
                continue;
            }

            let lightv = l.direction_from(hit.point);
            color += light::diffuse(m, sphere.color, l, lightv, normalv);
            color += light::specular(m, l, lightv, normalv, eyev);
        }

        color + m.reflective * self.reflected_color(ray, hit, normalv, depth)
    }

    /// Determines the color seen along the reflection of `ray` at a hit.
    ///
    /// Non-reflective spheres see the background.
    pub fn reflected_color(&self, ray: &Ray, hit: &Hit, normalv: Vector3,
        depth: usize) -> Color {
        if hit.what.material.reflective > 0.0 {
            let reflected = ray.reflect(hit.point, &normalv);
            self.trace(&reflected, depth + 1)
        } else {
            self.setup.background
        }
    }

    /// Traces a ray into the scene and returns the color it sees.
    ///
    /// Depths `0..=MAX_DEPTH` are shaded; deeper calls, and rays that hit
    /// nothing, return the background color. Primary rays start at depth 0,
    /// so each primary ray is followed through at most `MAX_DEPTH` bounces.
    pub fn trace(&self, ray: &Ray, depth: usize) -> Color {
        if depth > MAX_DEPTH {
            return self.setup.background;
        }

        match self.closest_intersection(ray, self.spheres) {
            None => self.setup.background,
            Some(hit) => self.shade_hit(ray, &hit, depth),
        }
    }
}

#[cfg(test)]
fn test_setup() -> Setup {
    Setup {
        background: Color::rgb(0.1, 0.2, 0.3),
        ambient: Color::rgb(0.5, 0.5, 0.5),
        ..Default::default()
    }
}

#[cfg(test)]
fn flat_sphere(name: &str, position: Vector3, color: Color) -> Sphere {
    use crate::light::Material;

    let mut s = Sphere::new(name, position, Vector3::new(1.0, 1.0, 1.0));
    s.color = color;
    s.material = Material {
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        reflective: 0.0,
        exponent: 1,
    };

    s
}

#[test]
fn missed_ray_sees_background() {
    let setup = test_setup();
    let spheres = vec![Sphere::new("s", Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(1.0, 1.0, 1.0))];
    let lights = vec![Light::new("l", Vector3::new(0.0, 10.0, 0.0),
        Color::white())];
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));

    assert_eq!(tracer.trace(&r, 0), setup.background);
}

#[test]
fn unlit_sphere_is_only_ambient() {
    let setup = test_setup();
    let mut s = Sphere::new("s", Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(1.0, 1.0, 1.0));
    s.color = Color::rgb(1.0, 0.5, 0.25);
    s.material.ambient = 0.4;
    s.material.reflective = 0.0;
    let spheres = vec![s];
    let lights = vec![Light::new("dark", Vector3::new(0.0, 0.0, 0.0),
        Color::black())];
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));
    let expected = 0.4 * setup.ambient * spheres[0].color;

    assert_eq!(tracer.trace(&r, 0), expected);
}

#[test]
fn lit_sphere_adds_diffuse_and_specular() {
    let setup = Setup { ambient: Color::black(), ..test_setup() };
    let mut s = Sphere::new("s", Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(1.0, 1.0, 1.0));
    s.material.diffuse = 0.5;
    s.material.specular = 0.25;
    s.material.exponent = 10;
    let spheres = vec![s];

    // Light straight behind the eye: N·L = 1 and R·V = 1 at the hit.
    let lights = vec![Light::new("key", Vector3::new(0.0, 0.0, 0.0),
        Color::white())];
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(tracer.trace(&r, 0), Color::rgb(0.75, 0.75, 0.75));
}

#[test]
fn occluder_between_hit_and_light_casts_shadow() {
    let setup = Setup { ambient: Color::black(), ..test_setup() };
    let mut target = Sphere::new("target", Vector3::new(0.0, 0.0, -10.0),
        Vector3::new(1.0, 1.0, 1.0));
    target.material.diffuse = 1.0;
    target.material.specular = 0.0;
    let occluder = Sphere::new("occluder", Vector3::new(0.0, 5.0, -9.0),
        Vector3::new(1.0, 1.0, 1.0));

    // The eye sees the upper half of the target; the light is above it.
    let lights = vec![Light::new("sun", Vector3::new(0.0, 20.0, -9.0),
        Color::white())];
    let r = Ray::new(Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.5, -9.0).normalize());

    let with_occluder = vec![target.clone(), occluder];
    let tracer = RayTracer::new(&setup, &with_occluder, &lights);
    let hit = tracer.closest_intersection(&r, tracer.spheres)
        .expect("ray should hit the target");
    assert_eq!(hit.what.name, "target");
    assert!(tracer.is_shadowed(hit.point, &lights[0]));
    assert_eq!(tracer.trace(&r, 0), Color::black());

    let without_occluder = vec![target];
    let tracer = RayTracer::new(&setup, &without_occluder, &lights);
    assert!(!tracer.is_shadowed(hit.point, &lights[0]));

    let lit = tracer.trace(&r, 0);
    assert!(lit.r > 0.0 && lit.g > 0.0 && lit.b > 0.0);
}

#[test]
fn object_behind_light_does_not_shadow() {
    let setup = test_setup();
    let spheres = vec![Sphere::new("far", Vector3::new(0.0, 0.0, -20.0),
        Vector3::new(1.0, 1.0, 1.0))];
    let lights = vec![Light::new("l", Vector3::new(0.0, 0.0, -10.0),
        Color::white())];
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    assert!(!tracer.is_shadowed(Vector3::zero(), &lights[0]));
}

#[test]
fn mirror_reflects_ambient_of_other_sphere() {
    let setup = Setup {
        ambient: Color::white(),
        background: Color::black(),
        ..Default::default()
    };

    let mut mirror = Sphere::new("mirror", Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(1.0, 1.0, 1.0));
    mirror.material = crate::light::Material {
        ambient: 0.0,
        diffuse: 0.0,
        specular: 0.0,
        reflective: 1.0,
        exponent: 1,
    };

    // The mirror sends the primary ray straight back towards +z, where the
    // second sphere waits behind the eye.
    let behind = flat_sphere("behind", Vector3::new(0.0, 0.0, 5.0),
        Color::rgb(0.2, 0.6, 0.4));
    let spheres = vec![mirror, behind];
    let lights: Vec<Light> = Vec::new();
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(tracer.trace(&r, 0), Color::rgb(0.2, 0.6, 0.4));
}

#[test]
fn non_reflective_sphere_sees_background_in_reflection() {
    let setup = test_setup();
    let spheres = vec![flat_sphere("s", Vector3::new(0.0, 0.0, -5.0),
        Color::white())];
    let lights: Vec<Light> = Vec::new();
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));
    let hit = tracer.closest_intersection(&r, tracer.spheres)
        .expect("ray should hit the sphere");
    let normalv = hit.what.normal_at(hit.point);

    assert_eq!(tracer.reflected_color(&r, &hit, normalv, 0),
        setup.background);
}

#[test]
fn beyond_max_depth_returns_background() {
    let setup = test_setup();
    let spheres = vec![flat_sphere("s", Vector3::new(0.0, 0.0, -5.0),
        Color::white())];
    let lights = vec![Light::new("l", Vector3::zero(), Color::white())];
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_ne!(tracer.trace(&r, MAX_DEPTH), setup.background);
    assert_eq!(tracer.trace(&r, MAX_DEPTH + 1), setup.background);
    assert_eq!(tracer.trace(&r, 4), setup.background);
}

#[test]
fn partial_mirror_blends_two_lights_and_reflection() {
    let setup = Setup {
        ambient: Color::white(),
        background: Color::black(),
        ..Default::default()
    };

    let mut mirror = Sphere::new("mirror", Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(1.0, 1.0, 1.0));
    mirror.color = Color::rgb(0.5, 0.5, 1.0);
    mirror.material = crate::light::Material {
        ambient: 0.2,
        diffuse: 0.5,
        specular: 0.5,
        reflective: 0.5,
        exponent: 2,
    };
    let behind = flat_sphere("behind", Vector3::new(0.0, 0.0, 5.0),
        Color::rgb(0.2, 0.6, 0.4));
    let spheres = vec![mirror, behind];

    // The hit is at (0, 0, -4) with N = V = +z. The key light gives
    // N·L = R·V = 1; the fill light gives N·L = R·V = 0.8.
    let lights = vec![
        Light::new("key", Vector3::zero(), Color::rgb(0.4, 0.4, 0.4)),
        Light::new("fill", Vector3::new(0.0, 3.0, 0.0),
            Color::rgb(1.0, 0.5, 0.0)),
    ];
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    // ambient   (0.1, 0.1, 0.2)
    // diffuse   (0.1, 0.1, 0.2) + (0.2, 0.1, 0.0)
    // specular  (0.2, 0.2, 0.2) + (0.32, 0.16, 0.0)
    // reflected 0.5 * (0.2, 0.6, 0.4)
    assert_eq!(tracer.trace(&r, 0), Color::rgb(1.02, 0.96, 0.8));
}

#[test]
fn mutually_reflective_spheres_terminate() {
    let setup = Setup {
        ambient: Color::white(),
        background: Color::black(),
        ..Default::default()
    };

    let mut a = flat_sphere("a", Vector3::new(0.0, 0.0, -5.0), Color::white());
    a.material.ambient = 0.1;
    a.material.reflective = 1.0;
    let mut b = flat_sphere("b", Vector3::new(0.0, 0.0, 5.0), Color::white());
    b.material.ambient = 0.1;
    b.material.reflective = 1.0;
    let spheres = vec![a, b];
    let lights: Vec<Light> = Vec::new();
    let tracer = RayTracer::new(&setup, &spheres, &lights);

    // Primary hit plus three bounces, each adding 0.1 of ambient light.
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(tracer.trace(&r, 0), Color::rgb(0.4, 0.4, 0.4));
}
