use crate::curve::check_portion;
use crate::{AnyCurve, Axis, Box2D, Curve, Point, Transform, Vector, XY};
use sbgeom_poly::{Linear, SBasis};

/// A curve defined by one symmetric power basis polynomial per axis.
///
/// This is the most general curve type. Any other curve can be converted into one with
/// `Curve::to_sbasis`, and results of polynomial algebra are stored in this form.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SBasisCurve {
    pub inner: XY<SBasis>,
}

impl SBasisCurve {
    #[inline]
    pub fn new(inner: XY<SBasis>) -> Self {
        SBasisCurve { inner }
    }

    /// The straight line between two points.
    pub fn line(from: Point, to: Point) -> Self {
        SBasisCurve {
            inner: XY::line(from, to),
        }
    }

    #[inline]
    pub fn sbasis(&self) -> &XY<SBasis> {
        &self.inner
    }

    #[inline]
    pub fn into_sbasis(self) -> XY<SBasis> {
        self.inner
    }
}

impl From<XY<SBasis>> for SBasisCurve {
    fn from(inner: XY<SBasis>) -> Self {
        SBasisCurve { inner }
    }
}

fn set_end(sb: &mut SBasis, end: usize, v: f64) {
    if sb.is_empty() {
        sb.push(Linear::ZERO);
    }
    sb[0][end] = v;
}

impl Curve for SBasisCurve {
    fn initial_point(&self) -> Point {
        self.inner.initial_point()
    }

    fn final_point(&self) -> Point {
        self.inner.final_point()
    }

    fn point_at(&self, t: f64) -> Point {
        self.inner.point_at(t)
    }

    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        self.inner[axis].value_at(t)
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        self.inner.point_and_derivatives(t, n)
    }

    fn is_degenerate(&self) -> bool {
        self.inner.is_constant(0.0)
    }

    fn is_line_segment(&self) -> bool {
        self.inner.x.normalized().len() <= 1 && self.inner.y.normalized().len() <= 1
    }

    fn bounds_fast(&self) -> Box2D {
        self.inner.bounds_fast()
    }

    fn bounds_exact(&self) -> Box2D {
        self.inner.bounds_exact()
    }

    fn set_initial(&mut self, p: Point) {
        set_end(&mut self.inner.x, 0, p.x);
        set_end(&mut self.inner.y, 0, p.y);
    }

    fn set_final(&mut self, p: Point) {
        set_end(&mut self.inner.x, 1, p.x);
        set_end(&mut self.inner.y, 1, p.y);
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::SBasis(self.clone())
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        AnyCurve::SBasis(SBasisCurve {
            inner: self.inner.transformed(transform),
        })
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::SBasis(SBasisCurve {
            inner: self.inner.portion(from, to),
        })
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::SBasis(SBasisCurve {
            inner: self.inner.reverse(),
        })
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::SBasis(SBasisCurve {
            inner: self.inner.derivative(),
        })
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        self.inner.clone()
    }

    fn degrees_of_freedom(&self) -> usize {
        self.inner.degrees_of_freedom()
    }
}

#[cfg(test)]
use crate::point;

#[cfg(test)]
fn parabola() -> SBasisCurve {
    // x = t, y = 4t(1 - t)
    SBasisCurve::new(XY::new(
        SBasis::from_linear(Linear::new(0.0, 1.0)),
        SBasis::from_terms(vec![Linear::ZERO, Linear::constant(4.0)]),
    ))
}

#[test]
fn evaluation() {
    let c = parabola();
    assert_eq!(c.initial_point(), point(0.0, 0.0));
    assert_eq!(c.final_point(), point(1.0, 0.0));
    assert_eq!(c.point_at(0.5), point(0.5, 1.0));
    assert_eq!(c.value_at(0.5, Axis::Y), 1.0);
    assert!(!c.is_line_segment());
    assert!(!c.is_degenerate());
    assert_eq!(c.degrees_of_freedom(), 6);

    let d = c.point_and_derivatives(0.5, 2);
    assert_eq!(d[1], crate::vector(1.0, 0.0));
    assert_eq!(d[2], crate::vector(0.0, -8.0));

    assert!(SBasisCurve::line(point(0.0, 0.0), point(1.0, 1.0)).is_line_segment());
    assert!(SBasisCurve::default().is_degenerate());
}

#[test]
fn bounds() {
    let c = parabola();
    let exact = c.bounds_exact();
    assert!((exact.max.y - 1.0).abs() < 1e-12);
    assert_eq!(exact.min.y, 0.0);
    assert_eq!(exact.max.x, 1.0);

    let fast = c.bounds_fast();
    assert!(fast.contains_box(&exact));
}

#[test]
fn editing_and_portions() {
    let mut c = parabola();
    c.set_initial(point(-1.0, 2.0));
    c.set_final(point(2.0, 3.0));
    assert_eq!(c.initial_point(), point(-1.0, 2.0));
    assert_eq!(c.final_point(), point(2.0, 3.0));

    let c = parabola();
    let p = c.portion(0.25, 0.5);
    assert_eq!(p.initial_point(), c.point_at(0.25));
    assert_eq!(p.final_point(), c.point_at(0.5));

    let r = c.reverse();
    assert!((r.point_at(0.25) - c.point_at(0.75)).length() < 1e-12);

    let moved = c.transformed(&Transform::translation(1.0, 1.0));
    assert_eq!(moved.point_at(0.5), point(1.5, 2.0));
}

#[test]
fn queries() {
    let c = parabola();
    let roots = c.roots(0.75, Axis::Y);
    assert_eq!(roots.len(), 2);
    assert!((roots[0] - 0.25).abs() < 1e-9);
    assert!((roots[1] - 0.75).abs() < 1e-9);

    assert!((c.nearest_time_unit(point(0.5, 3.0)) - 0.5).abs() < 1e-9);

    // y = 0.75 is crossed upwards at x = 0.25 and downwards at x = 0.75.
    assert_eq!(c.winding(point(-1.0, 0.75)), 0);
    assert_eq!(c.winding(point(0.5, 0.75)), -1);

    let length = c.length(1e-6);
    assert!(length > 2.0 && length < 3.0);
}
