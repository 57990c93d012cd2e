use thiserror::Error;

/// Errors returned when constructing curves from invalid input.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GeomError {
    #[error("A bézier curve needs at least one control point")]
    EmptyControlPoints,
    #[error("The x and y polynomials have different orders ({x} and {y})")]
    OrderMismatch { x: usize, y: usize },
    #[error("The radii of an elliptical arc must be finite and non-negative")]
    InvalidRadii,
}
