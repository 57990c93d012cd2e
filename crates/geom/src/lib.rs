#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]

//! 2D curves on top of euclid and the `sbgeom_poly` polynomials.
//!
//! This crate is reexported in `sbgeom`.
//!
//! # Overview.
//!
//! This crate implements the maths to work with:
//!
//! - line segments, including horizontal and vertical ones,
//! - quadratic, cubic and arbitrary order bézier curves,
//! - curves defined by a pair of symmetric power basis polynomials,
//! - elliptical arcs.
//!
//! All of them implement the object safe [`Curve`] trait and are gathered in the [`AnyCurve`]
//! enum. Every curve is parametrized over `t ∈ [0, 1]` and can be converted into its
//! [`XY`]`<`[`SBasis`]`>` form, which the generic algorithms of the trait build on.

// Reexport dependencies.
pub use arrayvec;
pub use euclid;
pub use sbgeom_poly as poly;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod any_curve;
pub mod arc;
mod bezier_curve;
mod curve;
pub mod cubic_bezier;
mod error;
mod line;
pub mod quadratic_bezier;
mod sbasis_curve;
pub mod utils;
mod xy;

#[doc(inline)]
pub use crate::any_curve::{AnyCurve, CurveKind};
#[doc(inline)]
pub use crate::arc::EllipticalArc;
#[doc(inline)]
pub use crate::bezier_curve::BezierCurve;
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezier;
#[doc(inline)]
pub use crate::curve::{Curve, DEFAULT_LENGTH_TOLERANCE};
#[doc(inline)]
pub use crate::error::GeomError;
#[doc(inline)]
pub use crate::line::{HLineSegment, LineSegment, VLineSegment};
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezier;
#[doc(inline)]
pub use crate::sbasis_curve::SBasisCurve;
#[doc(inline)]
pub use crate::xy::{Axis, XY};

pub use sbgeom_poly::{Bezier, Interval, Linear, SBasis};

/// Alias for `euclid::default::Point2D<f64>`.
pub type Point = euclid::default::Point2D<f64>;

/// Alias for `euclid::default::Vector2D<f64>`.
pub type Vector = euclid::default::Vector2D<f64>;

/// Alias for `euclid::default::Box2D<f64>`.
pub type Box2D = euclid::default::Box2D<f64>;

/// Alias for `euclid::default::Transform2D<f64>`.
pub type Transform = euclid::default::Transform2D<f64>;

/// Alias for `euclid::Angle<f64>`.
pub type Angle = euclid::Angle<f64>;

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
