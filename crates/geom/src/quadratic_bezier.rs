use crate::curve::check_portion;
use crate::utils::{box_from_ranges, cubic_polynomial_roots, hull};
use crate::{AnyCurve, Axis, Box2D, CubicBezier, Curve, LineSegment, Point, Transform, Vector, XY};
use sbgeom_poly::{Bezier, SBasis};

use core::ops::Range;

// Five point Gauss-Legendre quadrature mapped to [0, 1], as (node, weight) pairs.
const GAUSS_LEGENDRE_5: [(f64, f64); 5] = [
    (0.046910077030668, 0.118463442528095),
    (0.230765344947158, 0.239314335249683),
    (0.5, 0.284444444444444),
    (0.769234655052842, 0.239314335249683),
    (0.953089922969332, 0.118463442528095),
];

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezier {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

#[inline]
fn bernstein_weights(t: f64) -> [f64; 3] {
    let u = 1.0 - t;
    [u * u, 2.0 * u * t, t * t]
}

impl QuadraticBezier {
    #[inline]
    pub fn new(from: Point, ctrl: Point, to: Point) -> Self {
        QuadraticBezier { from, ctrl, to }
    }

    /// The control polygon of one coordinate.
    #[inline]
    pub fn coordinates(&self, axis: Axis) -> [f64; 3] {
        [
            axis.of_point(self.from),
            axis.of_point(self.ctrl),
            axis.of_point(self.to),
        ]
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        let w = bernstein_weights(t);
        self.from * w[0] + self.ctrl.to_vector() * w[1] + self.to.to_vector() * w[2]
    }

    /// Sample one coordinate of the curve at t.
    pub fn value(&self, t: f64, axis: Axis) -> f64 {
        let w = bernstein_weights(t);
        let c = self.coordinates(axis);
        c[0] * w[0] + c[1] * w[1] + c[2] * w[2]
    }

    #[inline]
    pub fn x(&self, t: f64) -> f64 {
        self.value(t, Axis::X)
    }

    #[inline]
    pub fn y(&self, t: f64) -> f64 {
        self.value(t, Axis::Y)
    }

    /// The derivative of the curve, a straight segment.
    pub fn hodograph(&self) -> LineSegment {
        LineSegment {
            from: ((self.ctrl - self.from) * 2.0).to_point(),
            to: ((self.to - self.ctrl) * 2.0).to_point(),
        }
    }

    /// Sample the curve's derivative at t.
    #[inline]
    pub fn derivative(&self, t: f64) -> Vector {
        self.hodograph().sample(t).to_vector()
    }

    /// The constant second derivative.
    #[inline]
    pub fn second_derivative(&self) -> Vector {
        self.hodograph().to_vector()
    }

    /// The time of the local extremum of a coordinate strictly inside `(0, 1)`, if any.
    pub fn local_extremum_t(&self, axis: Axis) -> Option<f64> {
        let c = self.coordinates(axis);
        let curvature = c[0] - 2.0 * c[1] + c[2];
        if curvature == 0.0 {
            return None;
        }
        let t = (c[0] - c[1]) / curvature;

        if t > 0.0 && t < 1.0 {
            Some(t)
        } else {
            None
        }
    }

    /// Invokes a callback for the local x extremum, if any.
    pub fn for_each_local_x_extremum_t<F: FnMut(f64)>(&self, cb: &mut F) {
        self.local_extremum_t(Axis::X).into_iter().for_each(cb);
    }

    /// Invokes a callback for the local y extremum, if any.
    pub fn for_each_local_y_extremum_t<F: FnMut(f64)>(&self, cb: &mut F) {
        self.local_extremum_t(Axis::Y).into_iter().for_each(cb);
    }

    /// The range of a coordinate over the control polygon.
    #[inline]
    pub fn fast_bounding_range(&self, axis: Axis) -> (f64, f64) {
        hull(&self.coordinates(axis))
    }

    /// The range of a coordinate over the curve.
    pub fn bounding_range(&self, axis: Axis) -> (f64, f64) {
        let c = self.coordinates(axis);
        match self.local_extremum_t(axis) {
            Some(t) => hull(&[c[0], c[2], self.value(t, axis)]),
            None => hull(&[c[0], c[2]]),
        }
    }

    /// Returns a conservative rectangle that contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D {
        box_from_ranges(
            self.fast_bounding_range(Axis::X),
            self.fast_bounding_range(Axis::Y),
        )
    }

    /// Returns the smallest rectangle the curve is contained in.
    pub fn bounding_box(&self) -> Box2D {
        box_from_ranges(self.bounding_range(Axis::X), self.bounding_range(Axis::Y))
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// The range may run backwards, in which case so does the result.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let ctrl = from + self.derivative(t0) * ((t1 - t0) * 0.5);

        QuadraticBezier::new(from, ctrl, self.sample(t1))
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f64) -> (QuadraticBezier, QuadraticBezier) {
        let mid = self.sample(t);

        (
            QuadraticBezier::new(self.from, self.from.lerp(self.ctrl, t), mid),
            QuadraticBezier::new(mid, self.ctrl.lerp(self.to, t), self.to),
        )
    }

    /// Same as `split`.
    #[inline]
    pub fn subdivide(&self, t: f64) -> (QuadraticBezier, QuadraticBezier) {
        self.split(t)
    }

    pub fn before_split(&self, t: f64) -> QuadraticBezier {
        self.split(t).0
    }

    pub fn after_split(&self, t: f64) -> QuadraticBezier {
        self.split(t).1
    }

    /// The same curve as a cubic bézier.
    pub fn to_cubic(&self) -> CubicBezier {
        let ctrl = self.ctrl.to_vector() * 2.0;
        CubicBezier::new(
            self.from,
            (self.from + ctrl) / 3.0,
            (self.to + ctrl) / 3.0,
            self.to,
        )
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed(&self, transform: &Transform) -> Self {
        QuadraticBezier::new(
            transform.transform_point(self.from),
            transform.transform_point(self.ctrl),
            transform.transform_point(self.to),
        )
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezier::new(self.to, self.ctrl, self.from)
    }

    /// The time in `[t0, t1]` of the point of the curve closest to `p`.
    pub fn nearest_time_in(&self, p: Point, t0: f64, t1: f64) -> f64 {
        // Roots of (B(t) - p) · B'(t), a cubic in t.
        let a = self.from - p;
        let b = self.ctrl - self.from;
        let c = self.from + self.to.to_vector() - self.ctrl * 2.0;
        let roots = cubic_polynomial_roots(c.dot(c), 3.0 * b.dot(c), 2.0 * b.dot(b) + a.dot(c), a.dot(b));

        let distance = |t: f64| (self.sample(t) - p).square_length();
        let mut best = (t0, distance(t0));
        let candidates = roots.into_iter().filter(|t| *t > t0 && *t < t1);
        for t in candidates.chain(core::iter::once(t1)) {
            let d = distance(t);
            if d < best.1 {
                best = (t, d);
            }
        }

        best.0
    }

    /// The exact length of the curve.
    pub fn length(&self) -> f64 {
        // |B'(t)|² = a t² + b t + c
        let d1 = (self.ctrl - self.from) * 2.0;
        let d2 = self.to - self.ctrl * 2.0 + self.from.to_vector();
        let d2 = d2 * 2.0;
        let a = d2.square_length();
        let b = 2.0 * d1.dot(d2);
        let c = d1.square_length();

        if a <= 1e-8 * c || a == 0.0 {
            // Close to a straight line.
            return GAUSS_LEGENDRE_5
                .iter()
                .map(|&(t, w)| (d1 + d2 * t).length() * w)
                .sum();
        }

        // Substitute u = t + b / 2a, so that |B'|² = a (u² + k).
        let u0 = b / (2.0 * a);
        let u1 = 1.0 + u0;
        let k = c / a - u0 * u0;
        let antiderivative = |u: f64| {
            if k <= 1e-12 * (u0 * u0 + u1 * u1) {
                // Collinear control points, the speed vanishes at u = 0.
                0.5 * u * u.abs()
            } else {
                0.5 * (u * (u * u + k).sqrt() + k * (u / k.sqrt()).asinh())
            }
        };

        a.sqrt() * (antiderivative(u1) - antiderivative(u0))
    }

    fn axis_bezier(&self, axis: Axis) -> Bezier {
        Bezier::new(self.coordinates(axis).to_vec())
    }
}

impl Curve for QuadraticBezier {
    fn initial_point(&self) -> Point {
        self.from
    }

    fn final_point(&self) -> Point {
        self.to
    }

    fn point_at(&self, t: f64) -> Point {
        self.sample(t)
    }

    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        self.value(t, axis)
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        let mut result = vec![
            self.sample(t).to_vector(),
            self.derivative(t),
            self.second_derivative(),
        ];
        result.resize(n + 1, Vector::zero());

        result
    }

    fn is_degenerate(&self) -> bool {
        self.from == self.ctrl && self.ctrl == self.to
    }

    fn bounds_fast(&self) -> Box2D {
        self.fast_bounding_box()
    }

    fn bounds_exact(&self) -> Box2D {
        self.bounding_box()
    }

    fn set_initial(&mut self, p: Point) {
        self.from = p;
    }

    fn set_final(&mut self, p: Point) {
        self.to = p;
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::Quadratic(*self)
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        AnyCurve::Quadratic(self.transformed(transform))
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::Quadratic(self.split_range(from..to))
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::Quadratic(self.flip())
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::Line(self.hodograph())
    }

    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        let (a, b) = if from > to { (to, from) } else { (from, to) };
        self.nearest_time_in(p, a.max(0.0).min(1.0), b.max(0.0).min(1.0))
    }

    fn length(&self, _tolerance: f64) -> f64 {
        self.length()
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        XY::new(
            self.axis_bezier(Axis::X).to_sbasis(),
            self.axis_bezier(Axis::Y).to_sbasis(),
        )
    }

    fn degrees_of_freedom(&self) -> usize {
        6
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn bounding_box_for_monotonic_quadratic_bezier_segment() {
    let a = QuadraticBezier::new(point(0.0, 0.0), point(0.0, 0.0), point(2.0, 0.0));
    assert_eq!(a.bounding_box(), box_from_ranges((0.0, 2.0), (0.0, 0.0)));
}

#[test]
fn bounding_boxes() {
    let a = QuadraticBezier::new(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0));

    let fast = box_from_ranges((0.0, 2.0), (0.0, 1.0));
    assert_eq!(a.fast_bounding_box(), fast);
    assert_eq!(a.bounds_fast(), fast);

    let exact = box_from_ranges((0.0, 2.0), (0.0, 0.5));
    assert_eq!(a.bounding_box(), exact);
    assert_eq!(a.bounds_exact(), exact);
}

#[test]
fn extrema() {
    let a = QuadraticBezier::new(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0));
    assert_eq!(a.local_extremum_t(Axis::Y), Some(0.5));
    assert_eq!(a.local_extremum_t(Axis::X), None);
    assert_eq!(a.flip().local_extremum_t(Axis::Y), Some(0.5));

    let mut found = Vec::new();
    a.for_each_local_y_extremum_t(&mut |t| found.push(t));
    a.for_each_local_x_extremum_t(&mut |t| found.push(t));
    assert_eq!(found, vec![0.5]);

    let b = QuadraticBezier::new(point(2.0, 0.0), point(1.0, 1.0), point(2.0, 2.0));
    assert_eq!(b.local_extremum_t(Axis::X), Some(0.5));
    assert_eq!(b.bounding_range(Axis::X), (1.5, 2.0));
}

#[test]
fn length_straight_line() {
    let len = QuadraticBezier::new(point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)).length();
    assert!((len - 2.0).abs() < 0.000001);

    // Collinear with a turn back.
    let back = QuadraticBezier::new(point(0.0, 0.0), point(2.0, 0.0), point(1.0, 0.0));
    let reference = crate::curve::polyline_length(&|t| back.sample(t), 1e-7);
    assert!((back.length() - reference).abs() < 1e-5);
}

#[test]
fn length_matches_polyline() {
    let c = QuadraticBezier::new(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0));
    let exact = c.length();
    let approx = crate::curve::polyline_length(&|t| c.sample(t), 1e-6);
    assert!((exact - approx).abs() < 1e-4);

    let skewed = QuadraticBezier::new(point(0.0, 0.0), point(9.0, 1.0), point(3.0, 4.0));
    let approx = crate::curve::polyline_length(&|t| skewed.sample(t), 1e-6);
    assert!((skewed.length() - approx).abs() < 1e-4);
}

#[test]
fn derivatives() {
    let c1 = QuadraticBezier::new(point(1.0, 1.0), point(2.0, 1.0), point(2.0, 2.0));

    assert_eq!(c1.derivative(0.0).y, 0.0);
    assert_eq!(c1.derivative(1.0).x, 0.0);
    assert_eq!(c1.derivative(0.5).x, c1.derivative(0.5).y);

    let d = c1.point_and_derivatives(0.5, 3);
    assert_eq!(d.len(), 4);
    assert_eq!(d[1], c1.derivative(0.5));
    assert_eq!(d[2], crate::vector(-2.0, 2.0));
    assert_eq!(d[3], Vector::zero());

    let hodograph = Curve::derivative(&c1);
    for i in 0..=4 {
        let t = i as f64 / 4.0;
        assert_eq!(hodograph.point_at(t).to_vector(), c1.derivative(t));
    }
}

#[test]
fn polynomial_form() {
    let c = QuadraticBezier::new(point(0.0, 1.0), point(3.0, 5.0), point(2.0, -1.0));
    let sb = c.to_sbasis();
    let cubic = c.to_cubic();
    for i in 0..=8 {
        let t = i as f64 / 8.0;
        assert!((sb.point_at(t) - c.sample(t)).length() < 1e-12);
        assert!((cubic.sample(t) - c.sample(t)).length() < 1e-12);
    }
    assert_eq!(c.degrees_of_freedom(), 6);
}

#[test]
fn portion_and_reverse() {
    let c = QuadraticBezier::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0));
    let p = c.portion(0.25, 0.75);
    assert_eq!(p.initial_point(), c.sample(0.25));
    assert_eq!(p.final_point(), c.sample(0.75));
    assert!((p.point_at(0.5) - c.sample(0.5)).length() < 1e-12);

    let backwards = c.portion(0.75, 0.25);
    assert_eq!(backwards.initial_point(), c.sample(0.75));
    assert!((backwards.point_at(0.25) - c.sample(0.625)).length() < 1e-12);

    let (a, b) = c.split(0.25);
    assert_eq!(a.to, b.from);
    assert_eq!(c.before_split(0.25), a);
    assert_eq!(c.after_split(0.25), b);

    let r = c.reverse();
    assert_eq!(r.initial_point(), c.to);
    assert_eq!(r.point_at(0.25), c.sample(0.75));
}

#[test]
fn nearest_point() {
    let c = QuadraticBezier::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0));
    assert!((c.nearest_time_unit(point(1.0, 5.0)) - 0.5).abs() < 1e-9);
    assert_eq!(c.nearest_time_unit(point(-1.0, -1.0)), 0.0);
    assert_eq!(c.nearest_time(point(1.0, 5.0), 0.0, 0.25), 0.25);
    let t = c.nearest_time_in(point(1.0, 5.0), 0.0, 1.0);
    assert!(((c.sample(t) - point(1.0, 5.0)).length() - 4.0).abs() < 1e-9);

    let times = c.all_nearest_times(point(1.0, -3.0), 0.0, 1.0);
    assert_eq!(times, vec![0.0, 1.0]);
}

#[test]
fn winding_of_an_arch() {
    // The arch crosses y = 0.5 twice, in opposite directions.
    let c = QuadraticBezier::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0));
    assert_eq!(c.winding(point(-1.0, 0.5)), 0);
    assert_eq!(c.winding(point(1.0, 0.5)), -1);
    // Tangent to the ray at the top.
    assert_eq!(c.winding(point(-1.0, 1.0)), 0);
    assert_eq!(c.winding(point(-1.0, 3.0)), 0);
}
