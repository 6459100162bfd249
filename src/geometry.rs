use crate::color::Color;
use crate::vector::Vector3;
use crate::ray::Ray;
use crate::light::Material;

/// A sphere, possibly stretched into an ellipsoid.
///
/// The sphere is the unit sphere around `position`, seen through the diagonal
/// scale transform `diag(scale)`. A point `p` is on the surface iff
/// `to_local_scale(p) - to_local_scale(position)` has unit length. The scale
/// is anisotropic only; spheres are never rotated.
///
/// Every component of `scale` must be nonzero. A zero component divides by
/// zero in local space and poisons the intersection math with NaN/inf; scene
/// loading rejects such spheres before they reach the tracer.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub name: String,
    pub position: Vector3,
    pub scale: Vector3,
    pub color: Color,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere {
            name: String::new(),
            position: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: Color::white(),
            material: Default::default(),
        }
    }
}

impl Sphere {
    /// Creates a white sphere with the default material.
    pub fn new(name: &str, position: Vector3, scale: Vector3) -> Sphere {
        Sphere {
            name: name.into(),
            position,
            scale,
            ..Default::default()
        }
    }

    /// Maps a local (de-scaled) vector back into world space.
    pub fn to_world_scale(&self, local: Vector3) -> Vector3 {
        Vector3 {
            x: local.x * self.scale.x,
            y: local.y * self.scale.y,
            z: local.z * self.scale.z,
        }
    }

    /// Maps a world vector into the local space of this sphere.
    pub fn to_local_scale(&self, world: Vector3) -> Vector3 {
        Vector3 {
            x: world.x / self.scale.x,
            y: world.y / self.scale.y,
            z: world.z / self.scale.z,
        }
    }

    /// Computes the surface normal at a world-space point.
    ///
    /// Both the point and the center are moved into local space and the
    /// normalized displacement between them is returned. For non-uniform
    /// scales this is not the true ellipsoid normal (that would need the
    /// inverse transpose of the scale), but rendered output depends on this
    /// exact formula, so it is kept.
    pub fn normal_at(&self, world_point: Vector3) -> Vector3 {
        let point = self.to_local_scale(world_point);
        let center = self.to_local_scale(self.position);

        (point - center).normalize()
    }

    /// Intersects a ray with this sphere.
    ///
    /// The ray origin, direction and sphere center are moved into local space,
    /// where the sphere is a unit sphere. The direction is *not* normalized
    /// again, so `t` is measured in local units; only the hit point is
    /// returned, in world space. Callers recover distances from it.
    ///
    /// The nearer root is always taken. If it is at or behind the ray origin
    /// (`t <= 0`), the ray misses, even if the farther root is in front.
    pub fn intersect(&self, ray: &Ray) -> Option<Vector3> {
        let origin = self.to_local_scale(ray.origin);
        let direction = self.to_local_scale(ray.direction);
        let center = self.to_local_scale(self.position);
        let sphere_to_ray = origin - center;

        let a = direction.dot(&direction);
        let b = 2.0 * direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant < 0.0 {
            return None;
        }

        let t1 = (-b + discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t = t1.min(t2);

        if t <= 0.0 {
            return None;
        }

        Some(self.to_world_scale(origin + t * direction))
    }
}

#[test]
fn scale_round_trip() {
    let s = Sphere::new("s", Vector3::zero(), Vector3::new(2.0, 4.0, 0.5));
    let v = Vector3::new(3.0, -1.0, 7.0);

    assert!(s.to_world_scale(s.to_local_scale(v)).approx_eq(&v));
    assert_eq!(s.to_local_scale(v), Vector3::new(1.5, -0.25, 14.0));
    assert_eq!(s.to_world_scale(v), Vector3::new(6.0, -4.0, 3.5));
}

#[test]
fn ray_intersects_unit_sphere() {
    let s = Sphere::new("s", Vector3::zero(), Vector3::new(1.0, 1.0, 1.0));
    let r = Ray::new(
        Vector3::new(0.0, 0.0, -5.0),
        Vector3::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), Some(Vector3::new(0.0, 0.0, -1.0)));
}

#[test]
fn ray_misses_sphere() {
    let s = Sphere::new("s", Vector3::zero(), Vector3::new(1.0, 1.0, 1.0));
    let r = Ray::new(
        Vector3::new(0.0, 2.0, -5.0),
        Vector3::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn sphere_behind_ray() {
    let s = Sphere::new("s", Vector3::zero(), Vector3::new(1.0, 1.0, 1.0));
    let r = Ray::new(
        Vector3::new(0.0, 0.0, 5.0),
        Vector3::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_from_inside_sphere_misses() {
    // The nearer root is behind the origin, so the far side is not reported.
    let s = Sphere::new("s", Vector3::zero(), Vector3::new(1.0, 1.0, 1.0));
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_intersects_scaled_translated_sphere() {
    let s = Sphere::new("s",
        Vector3::new(0.0, 0.0, -10.0),
        Vector3::new(2.0, 3.0, 4.0));

    // Along z the surface sits 4 units in front of the center.
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));
    let hit = s.intersect(&r).expect("ray should hit the ellipsoid");
    assert!(hit.approx_eq(&Vector3::new(0.0, 0.0, -6.0)));

    // Along x the surface sits 2 units beside the center.
    let r = Ray::new(Vector3::new(-10.0, 0.0, -10.0),
        Vector3::new(1.0, 0.0, 0.0));
    let hit = s.intersect(&r).expect("ray should hit the ellipsoid");
    assert!(hit.approx_eq(&Vector3::new(-2.0, 0.0, -10.0)));
}

#[test]
fn ray_from_center_towards_known_surface_point() {
    let s = Sphere::new("s",
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(2.0, 0.5, 1.0));
    let surface = s.position + Vector3::new(0.0, 0.5, 0.0);

    // Start outside the ellipsoid on the same line through the center.
    let origin = s.position + Vector3::new(0.0, 5.0, 0.0);
    let r = Ray::new(origin, (surface - origin).normalize());
    let hit = s.intersect(&r).expect("ray should hit the ellipsoid");

    assert!(hit.approx_eq(&surface));
}

#[test]
fn normal_on_unit_sphere() {
    let s = Sphere::new("s", Vector3::zero(), Vector3::new(1.0, 1.0, 1.0));
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.normal_at(Vector3::new(1.0, 0.0, 0.0)),
        Vector3::new(1.0, 0.0, 0.0));
    assert!(s.normal_at(Vector3::new(k, k, k))
        .approx_eq(&Vector3::new(k, k, k)));
}

#[test]
fn normal_on_scaled_sphere_uses_local_displacement() {
    let s = Sphere::new("s",
        Vector3::new(0.0, 0.0, -10.0),
        Vector3::new(2.0, 1.0, 1.0));

    // (2, 1, -10) maps to (1, 1, -10) locally; the center maps to (0, 0, -10).
    let n = s.normal_at(Vector3::new(2.0, 1.0, -10.0));
    let k = 2.0f64.sqrt() / 2.0;

    assert!(n.approx_eq(&Vector3::new(k, k, 0.0)));
}
