pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod transform;
pub mod ray;

pub mod sphere;
pub mod intersect;
pub mod light;

pub mod color;
pub mod canvas;

pub mod scene;

pub use error::{ Error, Result };

use consts::FEQ_EPSILON;

/// Approximate equality for floating point numbers.
///
/// Every tolerant comparison in the crate (tuples, colors, matrices) goes
/// through this function, so they all share `FEQ_EPSILON`.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
