use std::path::{ Path, PathBuf };
use std::time::{ Duration, Instant };

use anyhow::{ bail, Context, Result };
use clap::Parser;
use log::info;

use ellipsoid_tracer::vector::Vector3;
use ellipsoid_tracer::scene::Scene;
use ellipsoid_tracer::camera::Camera;
use ellipsoid_tracer::logger::init_logger;

mod cli;

use cli::Args;

/// Loads, renders and saves one scene. Returns the path written.
fn render_scene(path: &Path, output: Option<&Path>, eye: Vector3)
    -> Result<PathBuf> {
    let scene = Scene::load(path)
        .with_context(|| format!("failed to load scene {:?}", path))?;

    let camera = Camera::new(&scene.setup, eye);
    let canvas = camera.render(&scene.tracer());

    let out = output.map_or_else(|| scene.setup.output.clone(), Path::to_path_buf);
    canvas.save(&out)
        .with_context(|| format!("failed to write image {:?}", out))?;

    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if args.output.is_some() && args.scenes.len() > 1 {
        bail!("--output can only be used with a single scene");
    }

    let mut runtimes: Vec<(Duration, &Path)> = Vec::new();
    for scene in args.scenes.iter() {
        let start = Instant::now();
        let out = render_scene(scene, args.output.as_deref(), args.eye)?;
        let runtime = start.elapsed();

        info!("Saved render of {:?} to {:?} in {:.2} seconds.",
            scene, out, runtime.as_secs_f64());
        runtimes.push((runtime, scene.as_path()));
    }

    if runtimes.len() > 1 {
        let total: Duration = runtimes.iter().map(|(t, _)| *t).sum();
        let average = total.as_secs_f64() / runtimes.len() as f64;

        info!("Average runtime: {:.2} seconds.", average);
        if let Some((t, p)) = runtimes.iter().max_by_key(|(t, _)| *t) {
            info!("Slowest runtime: {:.2} seconds ({:?}).", t.as_secs_f64(), p);
        }
        if let Some((t, p)) = runtimes.iter().min_by_key(|(t, _)| *t) {
            info!("Fastest runtime: {:.2} seconds ({:?}).", t.as_secs_f64(), p);
        }
        info!("Total runtime: {:.2} seconds.", total.as_secs_f64());
    }

    Ok(())
}
