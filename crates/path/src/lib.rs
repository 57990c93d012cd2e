#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Continuous sequences of curves.
//!
//! A [`Path`] owns an ordered sequence of [`AnyCurve`](geom::AnyCurve) values in which each
//! curve starts where the previous one ends. The path is parametrized by a single global
//! time: the integer part selects a curve and the fractional part is the time on that curve.
//!
//! This crate is reexported in `sbgeom`.
//!
//! # Examples
//!
//! ```
//! use sbgeom_path::Path;
//! use sbgeom_path::geom::point;
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
//! builder.close();
//!
//! let path = builder.build().unwrap();
//! assert_eq!(path.size_open(), 2);
//! assert_eq!(path.point_at(1.0).unwrap(), point(1.0, 0.0));
//! ```

pub use sbgeom_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod path;

#[cfg(test)]
mod path_tests;

#[doc(inline)]
pub use crate::builder::PathBuilder;
#[doc(inline)]
pub use crate::path::{Iter, Path};

use crate::geom::GeomError;
use thiserror::Error;

/// What to do when an edit would break the continuity of a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Stitching {
    /// Reject the edit with `PathError::Discontinuity`.
    None,
    /// Join the broken ends with line segments.
    Discontinuous,
}

impl Default for Stitching {
    fn default() -> Self {
        Stitching::None
    }
}

/// A position on a path, as a curve index and a time on that curve.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathTime {
    pub curve_index: usize,
    pub t: f64,
}

impl PathTime {
    #[inline]
    pub fn new(curve_index: usize, t: f64) -> Self {
        PathTime { curve_index, t }
    }

    /// The global time of the position.
    #[inline]
    pub fn as_flat_time(&self) -> f64 {
        self.curve_index as f64 + self.t
    }
}

/// Errors returned by path operations.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PathError {
    #[error("Curve index {index} is out of range for a path of {len} curves")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Time {t} is outside of [0, {max}]")]
    TimeOutOfRange { t: f64, max: f64 },
    #[error("The curves are not continuous at join {index}")]
    Discontinuity { index: usize },
    #[error("The path is empty")]
    EmptyPath,
    #[error(transparent)]
    Geom(#[from] GeomError),
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn flat_times() {
    assert_eq!(PathTime::new(3, 0.25).as_flat_time(), 3.25);
    assert!(PathTime::new(1, 0.9) < PathTime::new(2, 0.0));
    assert_eq!(Stitching::default(), Stitching::None);
}
