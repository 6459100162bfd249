use crate::color::Color;
use crate::vector::Vector3;

/// A point light.
///
/// A very simple light source. Provides an intensity and a position where
/// light is produced from. The intensity is radiant, not a displayable color,
/// so channels above 1.0 are allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Light {
    pub name: String,
    pub position: Vector3,
    pub intensity: Color,
}

impl Light {
    pub fn new(name: &str, position: Vector3, intensity: Color) -> Light {
        Light { name: name.into(), position, intensity }
    }

    /// The unit vector pointing from `point` towards this light.
    pub fn direction_from(&self, point: Vector3) -> Vector3 {
        (self.position - point).normalize()
    }

    /// The distance between `point` and this light.
    pub fn distance_from(&self, point: Vector3) -> f64 {
        (self.position - point).magnitude()
    }
}

/// A material record.
///
/// Materials use the coefficients of the Phong reflection model, plus a
/// weight for mirror reflection. Conventionally each weight is in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    /// Ambient weight (`Ka`).
    pub ambient: f64,
    /// Diffuse weight (`Kd`).
    pub diffuse: f64,
    /// Specular weight (`Ks`).
    pub specular: f64,
    /// Mirror reflection weight (`Kr`). Zero disables reflected rays.
    pub reflective: f64,
    /// Specular exponent (`n`).
    pub exponent: u32,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            reflective: 0.0,
            exponent: 200,
        }
    }
}

/// Computes the ambient term `Ka * Ia * Oc`.
pub fn ambient(m: &Material, color: Color, ambient_light: Color) -> Color {
    m.ambient * ambient_light * color
}

/// Computes the diffuse term `Kd * I * max(N·L, 0) * Oc`.
///
/// `lightv` and `normalv` are expected to be unit vectors. A light behind the
/// surface contributes nothing.
pub fn diffuse(m: &Material, color: Color, light: &Light,
    lightv: Vector3, normalv: Vector3) -> Color {
    let light_dot_normal = normalv.dot(&lightv).max(0.0);
    m.diffuse * light.intensity * light_dot_normal * color
}

/// Computes the specular term `Ks * I * max(R·V, 0)^n`.
///
/// The light vector is mirrored about the normal (`R = 2(N·L)N - L`) and
/// compared against the eye vector. The surface color is not involved, so
/// highlights take the color of the light.
pub fn specular(m: &Material, light: &Light, lightv: Vector3,
    normalv: Vector3, eyev: Vector3) -> Color {
    let reflectv = 2.0 * (normalv.dot(&lightv) * normalv) - lightv;
    let reflect_dot_eye = reflectv.dot(&eyev).max(0.0);
    let factor = reflect_dot_eye.powf(f64::from(m.exponent));

    m.specular * light.intensity * factor
}

#[test]
fn ambient_scales_surface_by_ambient_light() {
    let m = Material { ambient: 0.5, ..Default::default() };
    let c = ambient(&m, Color::rgb(1.0, 0.5, 0.0), Color::rgb(0.2, 0.4, 1.0));

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.0));
}

#[test]
fn huge_exponent_fades_highlight() {
    let m = Material {
        specular: 1.0,
        exponent: 3_000_000_000,
        ..Default::default()
    };
    let light = Light::new("key", Vector3::new(0.0, 0.0, -10.0),
        Color::white());

    // R·V = 0.5
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let lightv = Vector3::new(0.0, 0.0, -1.0);
    let eyev = Vector3::new(0.0, 3.0f64.sqrt() / 2.0, -0.5);

    let c = specular(&m, &light, lightv, normalv, eyev);
    assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
    assert_eq!(c, Color::black());

    // A highlight aimed straight at the eye keeps full strength.
    let c = specular(&m, &light, lightv, normalv, normalv);
    assert_eq!(c, Color::white());
}

#[test]
fn eye_between_light_and_surface() {
    let m: Material = Default::default();
    let color = Color::white();
    let position = Vector3::zero();

    let eyev = Vector3::new(0.0, 0.0, -1.0);
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let light = Light::new(
        "key",
        Vector3::new(0.0, 0.0, -10.0),
        Color::rgb(1.0, 1.0, 1.0),
    );
    let lightv = light.direction_from(position);

    let res = diffuse(&m, color, &light, lightv, normalv)
        + specular(&m, &light, lightv, normalv, eyev);
    assert_eq!(res, Color::rgb(1.8, 1.8, 1.8));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let m: Material = Default::default();
    let color = Color::white();
    let position = Vector3::zero();

    let eyev = Vector3::new(0.0, 0.0, -1.0);
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let light = Light::new(
        "key",
        Vector3::new(0.0, 10.0, -10.0),
        Color::rgb(1.0, 1.0, 1.0),
    );
    let lightv = light.direction_from(position);

    // The highlight points away from the eye, so only diffuse light remains.
    let res = diffuse(&m, color, &light, lightv, normalv)
        + specular(&m, &light, lightv, normalv, eyev);
    assert_eq!(res, Color::rgb(0.6364, 0.6364, 0.6364));
}

#[test]
fn eye_opposite_from_surface_in_reflection() {
    let m: Material = Default::default();
    let color = Color::white();
    let position = Vector3::zero();

    let eyev = Vector3::new(0., -(2.0f64.sqrt())/2., -(2.0f64.sqrt())/2.);
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let light = Light::new(
        "key",
        Vector3::new(0.0, 10.0, -10.0),
        Color::rgb(1.0, 1.0, 1.0),
    );
    let lightv = light.direction_from(position);

    let res = diffuse(&m, color, &light, lightv, normalv)
        + specular(&m, &light, lightv, normalv, eyev);
    assert_eq!(res, Color::rgb(1.5364, 1.5364, 1.5364));
}

#[test]
fn light_behind_surface_contributes_nothing() {
    let m: Material = Default::default();
    let position = Vector3::zero();

    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let light = Light::new(
        "key",
        Vector3::new(0.0, 0.0, 10.0),
        Color::rgb(1.0, 1.0, 1.0),
    );
    let lightv = light.direction_from(position);

    assert_eq!(diffuse(&m, Color::white(), &light, lightv, normalv),
        Color::black());
}

#[test]
fn light_direction_and_distance() {
    let light = Light::new("key", Vector3::new(0.0, 3.0, 4.0), Color::white());

    assert_eq!(light.distance_from(Vector3::zero()), 5.0);
    assert!(light.direction_from(Vector3::zero())
        .approx_eq(&Vector3::new(0.0, 0.6, 0.8)));
}
