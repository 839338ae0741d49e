use thiserror::Error;

/// Errors produced by the ray caster.
///
/// Most variants come from matrix algebra on ill-shaped or singular inputs.
/// A ray missing every object is *not* an error; see `Intersections::hit`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot multiply a {0}x{1} matrix by a {2}x{3} matrix")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("operation requires a square matrix, got {0}x{1}")]
    NotSquare(usize, usize),

    #[error("determinant requires at least a 2x2 matrix, got {0}x{0}")]
    TooSmall(usize),

    #[error("matrix has no rows or no columns")]
    EmptyMatrix,

    #[error("index ({0}, {1}) out of range for a {2}x{3} matrix")]
    IndexOutOfRange(usize, usize, usize, usize),

    #[error("expected {expected} elements for matrix data, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("attempted to divide a matrix by zero")]
    DivideByZero,

    #[error("matrix is not invertible (determinant is zero)")]
    Singular,

    #[error("sphere {0} has a singular transform")]
    SingularTransform(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene description: {0}")]
    Scene(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
