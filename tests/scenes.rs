use std::fs;
use std::path::Path;

use ellipsoid_tracer::feq;
use ellipsoid_tracer::vector::Vector3;
use ellipsoid_tracer::color::Color;
use ellipsoid_tracer::scene::Scene;
use ellipsoid_tracer::camera::Camera;

#[test]
fn text_scene_renders_to_ppm() {
    let scene = Scene::load(Path::new("./scenes/mirrors.txt")).unwrap();

    assert_eq!(scene.spheres.len(), 3);
    assert_eq!(scene.lights.len(), 2);
    assert_eq!(scene.spheres[2].name, "egg");
    assert_eq!(scene.spheres[2].scale, Vector3::new(1.0, 2.0, 1.0));

    let canvas = Camera::new(&scene.setup, Vector3::zero())
        .render(&scene.tracer());

    let out = std::env::temp_dir().join("ellipsoid-tracer-mirrors.ppm");
    canvas.save(&out).unwrap();
    let ppm = fs::read_to_string(&out).unwrap();
    fs::remove_file(&out).unwrap();

    let lines: Vec<&str> = ppm.lines().collect();
    assert_eq!(&lines[..3], &["P3", "64 64", "255"]);
    assert_eq!(lines.len(), 3 + 64);
    assert!(lines[3..].iter()
        .all(|row| row.split_whitespace().count() == 64 * 3));
}

#[test]
fn json_scene_renders_background_and_ellipsoid() {
    let scene = Scene::load(Path::new("./scenes/ellipsoids.json")).unwrap();
    let canvas = Camera::new(&scene.setup, Vector3::zero())
        .render(&scene.tracer());

    assert_eq!(canvas.width, 64);
    assert_eq!(canvas.height, 48);

    // The corner ray misses everything.
    assert_eq!(canvas.read_pixel(0, 0).unwrap(), Color::white());

    // Just below the center, the ray lands on the wide red ellipsoid; only
    // the specular highlight adds green and blue, and it adds them equally.
    let p = canvas.read_pixel(32, 27).unwrap();
    assert_ne!(p, scene.setup.background);
    assert!(p.r > p.g);
    assert!(feq(p.g, p.b));
}

#[test]
fn scenes_are_deterministic() {
    let scene = Scene::load(Path::new("./scenes/mirrors.txt")).unwrap();
    let camera = Camera::new(&scene.setup, Vector3::zero());

    assert_eq!(camera.render(&scene.tracer()), camera.render(&scene.tracer()));
}
