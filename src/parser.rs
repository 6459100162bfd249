use std::fs;
use std::path::{ Path, PathBuf };
use std::str::FromStr;

use log::{ debug, warn };

use crate::error::SceneError;
use crate::vector::Vector3;
use crate::color::Color;
use crate::geometry::Sphere;
use crate::light::{ Light, Material };
use crate::scene::{ Scene, Setup };

/// A parser for text scene files.
///
/// A scene file has one directive per line: a tag, a space, then the tag's
/// data. For example:
///
/// ```text
/// NEAR 1
/// LEFT -1
/// RIGHT 1
/// BOTTOM -1
/// TOP 1
/// RES 600 600
/// SPHERE s1 0 0 -10 2 4 2 0.5 0 0 1 1 0.9 0 50
/// LIGHT l1 0 0 0 0.9 0.9 0.9
/// BACK 1 1 1
/// AMBIENT 0.2 0.2 0.2
/// OUTPUT testAmbient.ppm
/// ```
///
/// A `SPHERE` line carries a name, position, scale, color, the `Ka Kd Ks Kr`
/// coefficients and the specular exponent. A `LIGHT` line carries a name,
/// position and intensity. Tabs count as spaces.
///
/// Unrecognized tags are skipped, and each one increments `ignored_lines`.
#[derive(Clone, Debug)]
pub struct SceneParser {
    pub path: PathBuf,
    pub ignored_lines: usize,

    near: Option<f64>,
    left: Option<f64>,
    right: Option<f64>,
    top: Option<f64>,
    bottom: Option<f64>,
    resolution: Option<(usize, usize)>,

    setup: Setup,
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl SceneParser {
    /// Creates a new `SceneParser` to parse the scene file at `path`.
    pub fn new(path: &Path) -> SceneParser {
        SceneParser {
            path: path.into(),
            ignored_lines: 0,

            near: None,
            left: None,
            right: None,
            top: None,
            bottom: None,
            resolution: None,

            setup: Default::default(),
            spheres: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Forgets everything read by an earlier parse, keeping the path.
    fn reset(&mut self) {
        let path = self.path.clone();
        *self = SceneParser::new(&path);
    }

    /// Reads and parses the scene file.
    pub fn parse(&mut self) -> Result<Scene, SceneError> {
        let contents = fs::read_to_string(&self.path)?;
        self.parse_str(&contents)
    }

    /// Parses scene text.
    ///
    /// The frustum bounds and the resolution are required. `BACK` and
    /// `AMBIENT` default to black, `OUTPUT` defaults to `out.ppm`. A
    /// directive that appears twice keeps its last value. Each call starts
    /// from an empty scene.
    pub fn parse_str(&mut self, contents: &str) -> Result<Scene, SceneError> {
        self.reset();

        for (i, raw) in contents.lines().enumerate() {
            let line = raw.replace('\t', " ");
            let line = line.trim();

            // Ignore empty lines.
            if line.is_empty() {
                continue;
            }

            self.handle_command(line, i + 1)?;
        }

        if self.ignored_lines > 0 {
            warn!("Ignored {} unrecognized line(s) in {:?}",
                self.ignored_lines, self.path);
        }

        self.finish()
    }

    /// Parses a single (trimmed, non-empty) line of a scene file.
    fn handle_command(&mut self, line: &str, line_no: usize)
        -> Result<(), SceneError> {
        let (tag, data) = match line.find(' ') {
            Some(i) => (&line[..i], line[i + 1..].trim()),
            None => (line, ""),
        };

        match tag {
            "NEAR" => self.near = Some(parse_one(data, line_no)?),
            "LEFT" => self.left = Some(parse_one(data, line_no)?),
            "RIGHT" => self.right = Some(parse_one(data, line_no)?),
            "TOP" => self.top = Some(parse_one(data, line_no)?),
            "BOTTOM" => self.bottom = Some(parse_one(data, line_no)?),

            "RES" => {
                let fields = expect_fields(data, 2, line_no)?;
                self.resolution = Some((
                    parse_field(fields[0], line_no)?,
                    parse_field(fields[1], line_no)?,
                ));
            },

            "SPHERE" => {
                let fields = expect_fields(data, 15, line_no)?;
                let floats = parse_floats(&fields[1..14], line_no)?;

                let mut sphere = Sphere::new(
                    fields[0],
                    Vector3::new(floats[0], floats[1], floats[2]),
                    Vector3::new(floats[3], floats[4], floats[5]),
                );
                sphere.color = Color::rgb(floats[6], floats[7], floats[8]);
                sphere.material = Material {
                    ambient: floats[9],
                    diffuse: floats[10],
                    specular: floats[11],
                    reflective: floats[12],
                    exponent: parse_field(fields[14], line_no)?,
                };

                self.spheres.push(sphere);
            },

            "LIGHT" => {
                let fields = expect_fields(data, 7, line_no)?;
                let floats = parse_floats(&fields[1..7], line_no)?;

                self.lights.push(Light::new(
                    fields[0],
                    Vector3::new(floats[0], floats[1], floats[2]),
                    Color::rgb(floats[3], floats[4], floats[5]),
                ));
            },

            "BACK" => self.setup.background = parse_color(data, line_no)?,
            "AMBIENT" => self.setup.ambient = parse_color(data, line_no)?,

            "OUTPUT" => {
                if data.is_empty() {
                    return Err(SceneError::Parse {
                        line: line_no,
                        message: "OUTPUT needs a file name".into(),
                    });
                }

                self.setup.output = data.into();
            },

            // If this line has an unrecognized tag, ignore it.
            _ => {
                debug!("Ignoring line {} of {:?}: {}", line_no, self.path, line);
                self.ignored_lines += 1;
            },
        }

        Ok(())
    }

    /// Assembles the scene once every line has been handled.
    fn finish(&mut self) -> Result<Scene, SceneError> {
        let mut setup = self.setup.clone();
        setup.near = self.near.ok_or(SceneError::MissingDirective("NEAR"))?;
        setup.left = self.left.ok_or(SceneError::MissingDirective("LEFT"))?;
        setup.right = self.right.ok_or(SceneError::MissingDirective("RIGHT"))?;
        setup.top = self.top.ok_or(SceneError::MissingDirective("TOP"))?;
        setup.bottom = self.bottom
            .ok_or(SceneError::MissingDirective("BOTTOM"))?;
        setup.resolution = self.resolution
            .ok_or(SceneError::MissingDirective("RES"))?;

        Ok(Scene {
            setup,
            spheres: self.spheres.clone(),
            lights: self.lights.clone(),
        })
    }
}

/// Splits `data` on whitespace, requiring at least `n` fields.
fn expect_fields(data: &str, n: usize, line_no: usize)
    -> Result<Vec<&str>, SceneError> {
    let fields: Vec<&str> = data.split_whitespace().collect();
    if fields.len() < n {
        return Err(SceneError::Parse {
            line: line_no,
            message: format!("expected {} fields, found {}", n, fields.len()),
        });
    }

    Ok(fields)
}

fn parse_field<T: FromStr>(field: &str, line_no: usize)
    -> Result<T, SceneError> {
    field.parse().map_err(|_| SceneError::Parse {
        line: line_no,
        message: format!("invalid number {:?}", field),
    })
}

fn parse_floats(fields: &[&str], line_no: usize)
    -> Result<Vec<f64>, SceneError> {
    fields.iter().map(|f| parse_field(f, line_no)).collect()
}

fn parse_one(data: &str, line_no: usize) -> Result<f64, SceneError> {
    let fields = expect_fields(data, 1, line_no)?;
    parse_field(fields[0], line_no)
}

fn parse_color(data: &str, line_no: usize) -> Result<Color, SceneError> {
    let fields = expect_fields(data, 3, line_no)?;
    let floats = parse_floats(&fields[..3], line_no)?;

    Ok(Color::rgb(floats[0], floats[1], floats[2]))
}

#[cfg(test)]
const TEXT_SCENE: &str = "NEAR 1
LEFT -1
RIGHT 1
BOTTOM -1
TOP 1
RES 4 2
SPHERE s1 0 0 -10 2 4 2 0.5 0 0 1 1 0.9 0 50
SPHERE\ts2\t4 4 -10 1 2 1 0 0.5 0 1 1 0.9 0.5 50
LIGHT l1 0 0 0 0.9 0.9 0.9

BACK 0.1 0.2 0.3
AMBIENT 0.5 0.5 0.5
OUTPUT text.ppm
";

#[cfg(test)]
fn parse_text(contents: &str) -> (SceneParser, Result<Scene, SceneError>) {
    let mut parser = SceneParser::new(Path::new("test.txt"));
    let scene = parser.parse_str(contents);

    (parser, scene)
}

#[test]
fn reads_every_directive() {
    let (parser, scene) = parse_text(TEXT_SCENE);
    let scene = scene.unwrap();

    assert_eq!(parser.ignored_lines, 0);
    assert_eq!(scene.setup.near, 1.0);
    assert_eq!(scene.setup.left, -1.0);
    assert_eq!(scene.setup.right, 1.0);
    assert_eq!(scene.setup.bottom, -1.0);
    assert_eq!(scene.setup.top, 1.0);
    assert_eq!(scene.setup.resolution, (4, 2));
    assert_eq!(scene.setup.background, Color::rgb(0.1, 0.2, 0.3));
    assert_eq!(scene.setup.ambient, Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(scene.setup.output, PathBuf::from("text.ppm"));

    assert_eq!(scene.spheres.len(), 2);
    assert_eq!(scene.spheres[1].name, "s2");
    assert_eq!(scene.spheres[1].position, Vector3::new(4.0, 4.0, -10.0));
    assert_eq!(scene.spheres[1].scale, Vector3::new(1.0, 2.0, 1.0));
    assert_eq!(scene.spheres[1].color, Color::rgb(0.0, 0.5, 0.0));
    assert_eq!(scene.spheres[1].material, Material {
        ambient: 1.0,
        diffuse: 1.0,
        specular: 0.9,
        reflective: 0.5,
        exponent: 50,
    });

    assert_eq!(scene.lights, vec![Light::new("l1",
        Vector3::zero(), Color::rgb(0.9, 0.9, 0.9))]);
}

#[test]
fn text_and_json_scenes_agree() {
    let json = r#"{
        "near": 1, "left": -1, "right": 1, "top": 1, "bottom": -1,
        "resolution": [4, 2],
        "background": [0.1, 0.2, 0.3],
        "ambient": [0.5, 0.5, 0.5],
        "output": "text.ppm",
        "spheres": [
            { "name": "s1", "position": [0, 0, -10], "scale": [2, 4, 2],
              "color": [0.5, 0, 0], "ka": 1, "kd": 1, "ks": 0.9, "kr": 0,
              "exponent": 50 },
            { "name": "s2", "position": [4, 4, -10], "scale": [1, 2, 1],
              "color": [0, 0.5, 0], "ka": 1, "kd": 1, "ks": 0.9, "kr": 0.5,
              "exponent": 50 }
        ],
        "lights": [
            { "name": "l1", "position": [0, 0, 0],
              "intensity": [0.9, 0.9, 0.9] }
        ]
    }"#;

    let (_, text_scene) = parse_text(TEXT_SCENE);

    assert_eq!(text_scene.unwrap(), Scene::from_json_str(json).unwrap());
}

#[test]
fn ignoring_unrecognized_lines() {
    let contents = format!("{}CAMERA 0 0 0\n# a comment\nFOO\n", TEXT_SCENE);
    let (parser, scene) = parse_text(&contents);

    assert!(scene.is_ok());
    assert_eq!(parser.ignored_lines, 3);
}

#[test]
fn parsing_twice_starts_fresh() {
    let mut parser = SceneParser::new(Path::new("test.txt"));
    let contents = format!("{}FOO\n", TEXT_SCENE);

    let first = parser.parse_str(&contents).unwrap();
    let second = parser.parse_str(&contents).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.spheres.len(), 2);
    assert_eq!(second.lights.len(), 1);
    assert_eq!(parser.ignored_lines, 1);

    // Directives from the first text must not satisfy the second.
    let partial = "NEAR 1\nLEFT -1\nRIGHT 1\nBOTTOM -1\nTOP 1\n";
    assert!(matches!(parser.parse_str(partial),
        Err(SceneError::MissingDirective("RES"))));
}

#[test]
fn optional_directives_have_defaults() {
    let contents = "NEAR 1\nLEFT -1\nRIGHT 1\nBOTTOM -1\nTOP 1\nRES 1 1\n";
    let scene = parse_text(contents).1.unwrap();

    assert_eq!(scene.setup.background, Color::black());
    assert_eq!(scene.setup.ambient, Color::black());
    assert_eq!(scene.setup.output, PathBuf::from("out.ppm"));
}

#[test]
fn missing_resolution_is_reported() {
    let contents = "NEAR 1\nLEFT -1\nRIGHT 1\nBOTTOM -1\nTOP 1\n";

    assert!(matches!(parse_text(contents).1,
        Err(SceneError::MissingDirective("RES"))));
}

#[test]
fn malformed_number_reports_line() {
    let contents = "NEAR 1\nLEFT -1\nRIGHT one\n";

    assert!(matches!(parse_text(contents).1,
        Err(SceneError::Parse { line: 3, .. })));
}

#[test]
fn short_sphere_line_reports_line() {
    let contents = "NEAR 1\n\nSPHERE s1 0 0 -10 2 4 2\n";

    assert!(matches!(parse_text(contents).1,
        Err(SceneError::Parse { line: 3, .. })));
}

#[test]
fn missing_file_is_io_error() {
    let mut parser = SceneParser::new(Path::new("./scenes/does-not-exist.txt"));

    assert!(matches!(parser.parse(), Err(SceneError::Io(_))));
}
