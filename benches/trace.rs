use std::path::Path;

use criterion::{ black_box, criterion_group, criterion_main, Criterion };

use ellipsoid_tracer::vector::Vector3;
use ellipsoid_tracer::ray::Ray;
use ellipsoid_tracer::scene::Scene;
use ellipsoid_tracer::camera::Camera;

fn trace_benchmark(c: &mut Criterion) {
    let scene = Scene::load(Path::new("./scenes/mirrors.txt"))
        .expect("sample scene should load");
    let tracer = scene.tracer();

    let ray = Ray::new(Vector3::zero(),
        Vector3::new(-0.2, 0.0, -1.0).normalize());
    c.bench_function("trace primary ray", |b| {
        b.iter(|| tracer.trace(black_box(&ray), 0))
    });

    let camera = Camera::new(&scene.setup, Vector3::zero());
    c.bench_function("render 64x64", |b| {
        b.iter(|| camera.render(black_box(&tracer)))
    });
}

criterion_group!(benches, trace_benchmark);
criterion_main!(benches);
