//! Path building utilities.
//!
//! ```
//! use sbgeom_path::{Path, geom::{point, vector, Angle}};
//!
//! let mut builder = Path::builder();
//!
//! builder.begin(point(0.0, 0.0));
//! builder.horizontal_line_to(2.0);
//! builder.arc_to(vector(1.0, 1.0), Angle::zero(), false, true, point(2.0, 2.0));
//! builder.cubic_bezier_to(point(1.0, 3.0), point(0.0, 1.0), point(0.0, 2.0));
//! builder.close();
//!
//! let path = builder.build().unwrap();
//! assert_eq!(path.size_open(), 3);
//! assert!(path.is_closed());
//! ```

use crate::geom::{AnyCurve, Angle, CubicBezier, EllipticalArc, HLineSegment, LineSegment};
use crate::geom::{Point, QuadraticBezier, SBasis, SBasisCurve, VLineSegment, Vector, XY};
use crate::{Path, PathError, Stitching};

use log::debug;

#[derive(Default, Copy, Clone, Debug, PartialEq)]
struct DebugValidator {
    #[cfg(debug_assertions)]
    in_contour: bool,
}

impl DebugValidator {
    #[inline(always)]
    fn begin(&mut self) {
        #[cfg(debug_assertions)]
        {
            assert!(!self.in_contour, "multiple begin() calls without end()");
            self.in_contour = true;
        }
    }

    #[inline(always)]
    fn end(&mut self) {
        #[cfg(debug_assertions)]
        {
            assert!(self.in_contour, "end() called without begin()");
            self.in_contour = false;
        }
    }

    #[inline(always)]
    fn edge(&self) {
        #[cfg(debug_assertions)]
        assert!(self.in_contour, "edge operation is made before begin()");
    }

    #[inline(always)]
    fn build(&self) {
        #[cfg(debug_assertions)]
        assert!(!self.in_contour, "build() called before end()");
    }
}

/// Builds a [`Path`] one curve at a time, each curve starting where the previous one ends.
///
/// A path is a single contour. Beginning again after `end` joins the new start point to the
/// current end with a line segment.
///
/// Errors, such as invalid arc radii, are deferred to `build`.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    path: Path,
    error: Option<PathError>,
    validator: DebugValidator,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder::default()
    }

    /// The current end point.
    #[inline]
    pub fn current_position(&self) -> Point {
        self.path.final_point()
    }

    pub fn begin(&mut self, at: Point) {
        self.validator.begin();
        nan_check(at);

        if self.path.is_empty() {
            self.path.start(at);
        } else {
            debug!("joining a new start point to the end of the path");
            self.path.stitch_to(at);
        }
    }

    /// Ends the contour, closing it or not.
    pub fn end(&mut self, close: bool) {
        self.validator.end();
        self.path.close(close);
    }

    /// Same as `end(true)`.
    #[inline]
    pub fn close(&mut self) {
        self.end(true);
    }

    fn push(&mut self, curve: AnyCurve, stitching: Stitching) {
        self.validator.edge();
        if let Err(e) = self.path.append(curve, stitching) {
            self.record(e);
        }
    }

    fn record(&mut self, e: PathError) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }

    pub fn line_to(&mut self, to: Point) {
        nan_check(to);
        let from = self.current_position();
        self.push(LineSegment::new(from, to).into(), Stitching::None);
    }

    pub fn horizontal_line_to(&mut self, x: f64) {
        let from = self.current_position();
        self.push(HLineSegment::new(from.x, x, from.y).into(), Stitching::None);
    }

    pub fn vertical_line_to(&mut self, y: f64) {
        let from = self.current_position();
        self.push(VLineSegment::new(from.x, from.y, y).into(), Stitching::None);
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        nan_check(ctrl);
        nan_check(to);
        let from = self.current_position();
        self.push(QuadraticBezier::new(from, ctrl, to).into(), Stitching::None);
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        nan_check(ctrl1);
        nan_check(ctrl2);
        nan_check(to);
        let from = self.current_position();
        self.push(CubicBezier::new(from, ctrl1, ctrl2, to).into(), Stitching::None);
    }

    /// Adds an elliptical arc in the SVG endpoint parametrization.
    pub fn arc_to(&mut self, radii: Vector, x_rotation: Angle, large_arc: bool, sweep: bool, to: Point) {
        nan_check(to);
        let from = self.current_position();
        match EllipticalArc::new(from, radii, x_rotation, large_arc, sweep, to) {
            Ok(arc) => self.push(arc.into(), Stitching::None),
            Err(e) => {
                self.validator.edge();
                self.record(e.into());
            }
        }
    }

    /// Adds a curve given by its polynomial form, joining it with a line segment if it does
    /// not start at the current position.
    pub fn sbasis_to(&mut self, curve: XY<SBasis>) {
        self.push(SBasisCurve::new(curve).into(), Stitching::Discontinuous);
    }

    /// Adds any curve, joining it with a line segment if it does not start at the current
    /// position.
    pub fn curve_to<C: Into<AnyCurve>>(&mut self, curve: C) {
        self.push(curve.into(), Stitching::Discontinuous);
    }

    /// Returns the path, or the first error met while building it.
    pub fn build(self) -> Result<Path, PathError> {
        self.validator.build();

        match self.error {
            Some(e) => Err(e),
            None => Ok(self.path),
        }
    }
}

#[inline]
fn nan_check(p: Point) {
    debug_assert!(p.x.is_finite());
    debug_assert!(p.y.is_finite());
}

#[cfg(test)]
use crate::geom::{point, vector, Curve, CurveKind, GeomError};

#[test]
fn build_a_closed_contour() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.vertical_line_to(1.0);
    builder.horizontal_line_to(0.0);
    builder.close();

    let path = builder.build().unwrap();
    assert_eq!(path.size_open(), 3);
    assert_eq!(path.size_closed(), 4);
    assert!(path.is_closed());
    assert_eq!(path.get(1).unwrap().kind(), CurveKind::VLine);
    assert_eq!(path.get(2).unwrap().kind(), CurveKind::HLine);
    assert_eq!(path.final_point(), point(0.0, 1.0));
}

#[test]
fn curve_kinds() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(1.0, 1.0), point(2.0, 0.0));
    builder.cubic_bezier_to(point(3.0, 1.0), point(4.0, -1.0), point(5.0, 0.0));
    builder.arc_to(vector(1.0, 1.0), Angle::zero(), false, true, point(7.0, 0.0));
    builder.sbasis_to(XY::line(point(7.0, 0.0), point(8.0, 1.0)));
    builder.end(false);

    let path = builder.build().unwrap();
    let kinds: Vec<CurveKind> = path.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            CurveKind::Quadratic,
            CurveKind::Cubic,
            CurveKind::Arc,
            CurveKind::SBasis
        ]
    );
    assert!(path.check_continuity().is_ok());
    assert!(!path.is_closed());
}

#[test]
fn foreign_curves_are_stitched() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.curve_to(LineSegment::new(point(2.0, 0.0), point(3.0, 0.0)));
    builder.end(false);

    let path = builder.build().unwrap();
    assert_eq!(path.size_open(), 3);
    assert_eq!(path.get(1).unwrap().initial_point(), point(1.0, 0.0));
    assert_eq!(path.get(1).unwrap().final_point(), point(2.0, 0.0));
}

#[test]
fn invalid_arcs_fail_the_build() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.arc_to(vector(-1.0, 1.0), Angle::zero(), false, true, point(1.0, 0.0));
    builder.line_to(point(2.0, 0.0));
    builder.end(false);

    assert_eq!(
        builder.build(),
        Err(PathError::Geom(GeomError::InvalidRadii))
    );
}

#[test]
fn beginning_again_joins_the_contours() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.end(false);
    builder.begin(point(1.0, 1.0));
    builder.line_to(point(0.0, 1.0));
    builder.end(false);

    let path = builder.build().unwrap();
    assert_eq!(path.size_open(), 3);
    assert!(path.check_continuity().is_ok());
}
