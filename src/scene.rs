use std::fs;
use std::path::{ Path, PathBuf };

use log::debug;
use serde::{ Serialize, Deserialize };

use crate::consts::DEFAULT_OUTPUT;
use crate::error::SceneError;
use crate::vector::Vector3;
use crate::color::Color;
use crate::geometry::Sphere;
use crate::light::{ Light, Material };
use crate::tracer::RayTracer;
use crate::parser::SceneParser;

/// Scene-wide parameters.
///
/// The view frustum bounds (`near`, `left`, `right`, `top`, `bottom`) describe
/// the view plane, the `resolution` is `(width, height)` in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Setup {
    pub near: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub resolution: (usize, usize),
    pub background: Color,
    pub ambient: Color,
    pub output: PathBuf,
}

impl Default for Setup {
    fn default() -> Setup {
        Setup {
            near: 1.0,
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            resolution: (0, 0),
            background: Color::black(),
            ambient: Color::black(),
            output: DEFAULT_OUTPUT.into(),
        }
    }
}

/// A scene: one setup, plus ordered lists of spheres and lights.
///
/// A scene owns its data. Rendering borrows it through `tracer`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub setup: Setup,
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Loads a scene from a file.
    ///
    /// Files with a `.json` extension are read as scene JSON; anything else is
    /// read as a text scene. The loaded scene is validated before returning.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        let is_json = path.extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let scene = if is_json {
            Scene::from_json_str(&fs::read_to_string(path)?)?
        } else {
            let mut parser = SceneParser::new(path);
            parser.parse()?
        };

        scene.validate()?;
        debug!("Loaded {:?}: {} sphere(s), {} light(s), {}x{}",
            path, scene.spheres.len(), scene.lights.len(),
            scene.setup.resolution.0, scene.setup.resolution.1);

        Ok(scene)
    }

    /// Reads a scene from a JSON string. The scene is not validated.
    pub fn from_json_str(json: &str) -> Result<Scene, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Ok(scene_json.into())
    }

    /// Borrows this scene for tracing.
    pub fn tracer(&self) -> RayTracer<'_> {
        RayTracer::new(&self.setup, &self.spheres, &self.lights)
    }

    /// Checks the scene for inputs the tracer cannot handle.
    ///
    /// Rejects spheres with zero or non-finite scale components, non-finite
    /// positions, colors or coefficients, and an empty resolution.
    pub fn validate(&self) -> Result<(), SceneError> {
        let (width, height) = self.setup.resolution;
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyImage);
        }

        let setup_values = [
            self.setup.near, self.setup.left, self.setup.right,
            self.setup.top, self.setup.bottom,
        ];
        if !all_finite(&setup_values)
            || !color_finite(&self.setup.background)
            || !color_finite(&self.setup.ambient) {
            return Err(SceneError::NonFinite("setup".into()));
        }

        for s in self.spheres.iter() {
            let scale = [s.scale.x, s.scale.y, s.scale.z];
            if scale.iter().any(|&c| c == 0.0 || !c.is_finite()) {
                return Err(SceneError::DegenerateScale(s.name.clone()));
            }

            let m = &s.material;
            let coefficients = [m.ambient, m.diffuse, m.specular, m.reflective];
            if !all_finite(&coefficients)
                || !vector_finite(&s.position)
                || !color_finite(&s.color) {
                return Err(SceneError::NonFinite(s.name.clone()));
            }
        }

        for l in self.lights.iter() {
            if !vector_finite(&l.position) || !color_finite(&l.intensity) {
                return Err(SceneError::NonFinite(l.name.clone()));
            }
        }

        Ok(())
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn vector_finite(v: &Vector3) -> bool {
    all_finite(&[v.x, v.y, v.z])
}

fn color_finite(c: &Color) -> bool {
    all_finite(&[c.r, c.g, c.b])
}

/// Scene JSON.
///
/// Mirrors the text scene format field for field. Vectors and colors are
/// arrays of three numbers; missing trailing components default to zero.
#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    near: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    resolution: (usize, usize),

    #[serde(default)]
    background: Vec<f64>,
    #[serde(default)]
    ambient: Vec<f64>,
    #[serde(default = "default_output")]
    output: String,

    #[serde(default)]
    spheres: Vec<SphereJson>,
    #[serde(default)]
    lights: Vec<LightJson>,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.into()
}

#[derive(Clone, Serialize, Deserialize)]
struct SphereJson {
    name: String,
    position: Vec<f64>,
    scale: Vec<f64>,
    color: Vec<f64>,
    ka: f64,
    kd: f64,
    ks: f64,
    kr: f64,
    exponent: u32,
}

#[derive(Clone, Serialize, Deserialize)]
struct LightJson {
    name: String,
    position: Vec<f64>,
    intensity: Vec<f64>,
}

impl From<SphereJson> for Sphere {
    fn from(sphere_json: SphereJson) -> Sphere {
        Sphere {
            name: sphere_json.name,
            position: (&sphere_json.position).into(),
            scale: (&sphere_json.scale).into(),
            color: (&sphere_json.color).into(),
            material: Material {
                ambient: sphere_json.ka,
                diffuse: sphere_json.kd,
                specular: sphere_json.ks,
                reflective: sphere_json.kr,
                exponent: sphere_json.exponent,
            },
        }
    }
}

impl From<LightJson> for Light {
    fn from(light_json: LightJson) -> Light {
        Light {
            name: light_json.name,
            position: (&light_json.position).into(),
            intensity: (&light_json.intensity).into(),
        }
    }
}

impl From<SceneJson> for Scene {
    fn from(scene_json: SceneJson) -> Scene {
        let setup = Setup {
            near: scene_json.near,
            left: scene_json.left,
            right: scene_json.right,
            top: scene_json.top,
            bottom: scene_json.bottom,
            resolution: scene_json.resolution,
            background: (&scene_json.background).into(),
            ambient: (&scene_json.ambient).into(),
            output: scene_json.output.into(),
        };

        Scene {
            setup,
            spheres: scene_json.spheres.into_iter().map(|x| x.into()).collect(),
            lights: scene_json.lights.into_iter().map(|x| x.into()).collect(),
        }
    }
}

#[cfg(test)]
const JSON_SCENE: &str = r#"{
    "near": 1, "left": -1, "right": 1, "top": 1, "bottom": -1,
    "resolution": [4, 2],
    "background": [0.1, 0.2, 0.3],
    "ambient": [0.5, 0.5, 0.5],
    "output": "json.ppm",
    "spheres": [
        { "name": "s1", "position": [0, 0, -10], "scale": [2, 4, 2],
          "color": [0.5, 0, 0], "ka": 1, "kd": 1, "ks": 0.9, "kr": 0,
          "exponent": 50 }
    ],
    "lights": [
        { "name": "l1", "position": [0, 0, 0], "intensity": [0.9, 0.9, 0.9] }
    ]
}"#;

#[test]
fn json_scene_is_read() {
    let scene = Scene::from_json_str(JSON_SCENE).unwrap();

    assert_eq!(scene.setup.resolution, (4, 2));
    assert_eq!(scene.setup.background, Color::rgb(0.1, 0.2, 0.3));
    assert_eq!(scene.setup.output, PathBuf::from("json.ppm"));

    assert_eq!(scene.spheres.len(), 1);
    assert_eq!(scene.spheres[0].name, "s1");
    assert_eq!(scene.spheres[0].scale, Vector3::new(2.0, 4.0, 2.0));
    assert_eq!(scene.spheres[0].material.specular, 0.9);
    assert_eq!(scene.spheres[0].material.exponent, 50);

    assert_eq!(scene.lights[0].intensity, Color::rgb(0.9, 0.9, 0.9));
    assert!(scene.validate().is_ok());
}

#[test]
fn json_defaults_optional_fields() {
    let json = r#"{ "near": 1, "left": -1, "right": 1, "top": 1,
        "bottom": -1, "resolution": [1, 1] }"#;
    let scene = Scene::from_json_str(json).unwrap();

    assert_eq!(scene.setup.background, Color::black());
    assert_eq!(scene.setup.output, PathBuf::from(DEFAULT_OUTPUT));
    assert!(scene.spheres.is_empty());
    assert!(scene.lights.is_empty());
}

#[test]
fn json_missing_frustum_is_an_error() {
    let json = r#"{ "resolution": [1, 1] }"#;

    assert!(matches!(Scene::from_json_str(json), Err(SceneError::Json(_))));
}

#[test]
fn zero_scale_is_rejected() {
    let mut scene = Scene::from_json_str(JSON_SCENE).unwrap();
    scene.spheres[0].scale.y = 0.0;

    assert!(matches!(scene.validate(),
        Err(SceneError::DegenerateScale(ref name)) if name == "s1"));
}

#[test]
fn non_finite_coefficient_is_rejected() {
    let mut scene = Scene::from_json_str(JSON_SCENE).unwrap();
    scene.spheres[0].material.diffuse = f64::NAN;

    assert!(matches!(scene.validate(), Err(SceneError::NonFinite(_))));
}

#[test]
fn empty_resolution_is_rejected() {
    let mut scene = Scene::from_json_str(JSON_SCENE).unwrap();
    scene.setup.resolution = (0, 10);

    assert!(matches!(scene.validate(), Err(SceneError::EmptyImage)));
}
