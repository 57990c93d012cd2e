#![deny(bare_trait_objects)]

//! 2D geometry built on polynomials over the unit interval.
//!
//! # Crates
//!
//! This meta-crate (`sbgeom`) reexports the following sub-crates for convenience:
//!
//! * **sbgeom_poly** - Symmetric power basis and Bernstein polynomials, root finding and
//!   series approximations.
//! * **sbgeom_geom** - Line segments, bézier curves, elliptical arcs and the `Curve` trait.
//! * **sbgeom_path** - Continuous sequences of curves with a global parameter.
//!
//! Each `sbgeom_<name>` crate is reexported as a `<name>` module in `sbgeom`. For example:
//!
//! ```ignore
//! extern crate sbgeom_path;
//! use sbgeom_path::Path;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate sbgeom;
//! use sbgeom::path::Path;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Querying a path
//!
//! ```
//! use sbgeom::geom::{point, Axis};
//! use sbgeom::path::Path;
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(2.0, 0.0));
//! builder.quadratic_bezier_to(point(2.0, 2.0), point(0.0, 2.0));
//! builder.close();
//! let path = builder.build().unwrap();
//!
//! // The closing segment counts for closed paths.
//! assert_eq!(path.size(), 3);
//! assert_eq!(path.point_at(2.5).unwrap(), point(0.0, 1.0));
//! assert_eq!(path.winding(point(1.0, 0.5)), 1);
//!
//! // Where does the path cross the horizontal line y = 1?
//! let roots = path.roots(1.0, Axis::Y);
//! assert_eq!(roots.len(), 2);
//! ```
//!
//! ## Working with polynomials
//!
//! ```
//! use sbgeom::poly::{Linear, SBasis};
//!
//! let t = SBasis::from(Linear::new(0.0, 1.0));
//! let p = t.multiply(&t);
//! assert!((p.value_at(0.5) - 0.25).abs() < 1e-12);
//! ```

pub extern crate sbgeom_geom;
pub extern crate sbgeom_path;
pub extern crate sbgeom_poly;

pub use sbgeom_geom as geom;
pub use sbgeom_path as path;
pub use sbgeom_poly as poly;

pub use sbgeom_geom::{point, vector, Point, Vector};
