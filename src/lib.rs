pub mod consts;
pub mod error;
pub mod logger;

pub mod vector;
pub mod color;
pub mod ray;

pub mod geometry;
pub mod light;
pub mod intersect;
pub mod tracer;

pub mod scene;
pub mod parser;
pub mod camera;
pub mod canvas;

use consts::FEQ_EPSILON;

pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
