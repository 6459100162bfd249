use crate::consts::HIT_EPSILON;
use crate::vector::Vector3;
use crate::ray::Ray;
use crate::geometry::Sphere;

/// A hit.
///
/// Produced when some ray intersects a sphere. `point` is the world-space hit
/// point and `distance` is its distance from the ray origin.
///
/// The `what` field borrows the sphere that was hit from the scene.
#[derive(Copy, Clone, Debug)]
pub struct Hit<'a> {
    pub what: &'a Sphere,
    pub point: Vector3,
    pub distance: f64,
}

/// Implements partial equality on a Hit.
///
/// Two hits are equal if their points are equal and they refer to the very
/// same sphere (pointer equality, not value equality).
impl<'a> PartialEq for Hit<'a> {
    fn eq(&self, other: &Hit<'a>) -> bool {
        self.point == other.point && std::ptr::eq(self.what, other.what)
    }
}

/// Finds the sphere a ray hits first.
///
/// Every sphere is tested in order. A candidate only replaces the current best
/// hit when it is closer by more than `HIT_EPSILON`, so of two hits at nearly
/// the same distance the earlier sphere wins. Returns `None` if no sphere is
/// hit.
pub fn closest_hit<'a>(ray: &Ray, spheres: &'a [Sphere]) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;
    let mut min_distance = f64::INFINITY;

    for sphere in spheres.iter() {
        if let Some(point) = sphere.intersect(ray) {
            let distance = (point - ray.origin).magnitude();

            if distance + HIT_EPSILON < min_distance {
                min_distance = distance;
                closest = Some(Hit { what: sphere, point, distance });
            }
        }
    }

    closest
}

#[test]
fn closest_of_two_spheres() {
    let spheres = vec![
        Sphere::new("far", Vector3::new(0.0, 0.0, -10.0),
            Vector3::new(1.0, 1.0, 1.0)),
        Sphere::new("near", Vector3::new(0.0, 0.0, -5.0),
            Vector3::new(1.0, 1.0, 1.0)),
    ];
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let hit = closest_hit(&r, &spheres).expect("ray should hit a sphere");

    assert!(std::ptr::eq(hit.what, &spheres[1]));
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, -4.0));
    assert_eq!(hit.distance, 4.0);
}

#[test]
fn no_spheres_hit() {
    let spheres = vec![
        Sphere::new("aside", Vector3::new(5.0, 0.0, -10.0),
            Vector3::new(1.0, 1.0, 1.0)),
    ];
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    assert_eq!(closest_hit(&r, &spheres), None);
    assert_eq!(closest_hit(&r, &[]), None);
}

#[test]
fn near_tie_keeps_first_sphere() {
    // The second sphere's surface is closer, but by less than the margin.
    let spheres = vec![
        Sphere::new("first", Vector3::new(0.0, 0.0, -5.0),
            Vector3::new(1.0, 1.0, 1.0)),
        Sphere::new("second", Vector3::new(0.0, 0.0, -5.00005),
            Vector3::new(1.0001, 1.0001, 1.0001)),
    ];
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let hit = closest_hit(&r, &spheres).expect("ray should hit a sphere");

    assert!(std::ptr::eq(hit.what, &spheres[0]));
}

#[test]
fn clear_winner_replaces_earlier_sphere() {
    let spheres = vec![
        Sphere::new("first", Vector3::new(0.0, 0.0, -5.0),
            Vector3::new(1.0, 1.0, 1.0)),
        Sphere::new("second", Vector3::new(0.0, 0.0, -5.0),
            Vector3::new(1.5, 1.5, 1.5)),
    ];
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let hit = closest_hit(&r, &spheres).expect("ray should hit a sphere");

    assert!(std::ptr::eq(hit.what, &spheres[1]));
    assert!(hit.point.approx_eq(&Vector3::new(0.0, 0.0, -3.5)));
}
