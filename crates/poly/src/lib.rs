#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]

//! One dimensional polynomials over the unit interval.
//!
//! This crate is reexported in `sbgeom`.
//!
//! # Overview.
//!
//! Two representations of the same polynomials are provided:
//!
//! - [`SBasis`], the symmetric power basis. Each level is a [`Linear`] term multiplied by a
//!   power of `s = t(1 - t)`. Arithmetic, composition and calculus are simple and exact in
//!   this basis, and truncating the series gives good approximations.
//! - [`Bezier`], the Bernstein basis. The coefficients bound the polynomial which makes it
//!   the natural representation for root finding and subdivision.
//!
//! Both convert into each other without loss.
//!
//! The [`approx`] module builds truncated series for a few non-polynomial functions.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod approx;
mod bezier;
mod interval;
mod linear;
mod roots;
mod sbasis;
pub mod utils;

#[doc(inline)]
pub use crate::bezier::{bernstein_value_at, casteljau_subdivision, Bezier};
#[doc(inline)]
pub use crate::interval::{union_opt, Interval};
#[doc(inline)]
pub use crate::linear::Linear;
#[doc(inline)]
pub use crate::roots::SolverOptions;
#[doc(inline)]
pub use crate::sbasis::SBasis;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
