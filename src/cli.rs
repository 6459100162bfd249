use std::path::PathBuf;

use clap::{ Parser, ValueEnum };
use log::LevelFilter;

use ellipsoid_tracer::vector::Vector3;

/// Log levels selectable from the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders scenes of scaled spheres with recursive ray tracing.
///
/// Scene files ending in `.json` are read as JSON; all others are read as
/// text scenes. Each scene is written to the file named by its OUTPUT
/// directive.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Args {
    /// Scene files to render
    #[clap(required = true, value_parser)]
    pub scenes: Vec<PathBuf>,

    /// Write the image here instead of the scene's OUTPUT (one scene only)
    #[clap(short, long, value_parser)]
    pub output: Option<PathBuf>,

    /// Camera position as X,Y,Z
    #[clap(long, default_value = "0,0,0", value_parser = parse_eye)]
    pub eye: Vector3,

    /// Set the logging level
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Parses a camera position such as `0,1.5,-2`.
fn parse_eye(s: &str) -> Result<Vector3, String> {
    let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z but got {:?}", s));
    }

    let mut coords = [0.0; 3];
    for (coord, part) in coords.iter_mut().zip(parts.iter()) {
        *coord = part.parse()
            .map_err(|_| format!("invalid coordinate {:?}", part))?;
    }

    Ok(coords.into())
}

#[test]
fn eye_is_parsed() {
    assert_eq!(parse_eye("1, -2.5,3"), Ok(Vector3::new(1.0, -2.5, 3.0)));
    assert!(parse_eye("1,2").is_err());
    assert!(parse_eye("1,two,3").is_err());
}

#[test]
fn args_parse() {
    let args = Args::parse_from(&[
        "ellipsoid-tracer", "--eye", "0,0,1", "--log-level", "debug",
        "a.txt", "b.json",
    ]);

    assert_eq!(args.scenes, vec![PathBuf::from("a.txt"),
        PathBuf::from("b.json")]);
    assert_eq!(args.eye, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(args.log_level, LogLevel::Debug);
    assert_eq!(args.output, None);
}
