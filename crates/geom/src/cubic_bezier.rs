use crate::curve::check_portion;
use crate::utils::{box_from_ranges, cubic_polynomial_roots, hull, quadratic_polynomial_roots};
use crate::{AnyCurve, Axis, Box2D, Curve, Point, QuadraticBezier, Transform, Vector, XY};
use arrayvec::ArrayVec;
use sbgeom_poly::{Bezier, SBasis};

use core::ops::Range;

const LENGTH_MAX_DEPTH: u32 = 16;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

#[inline]
fn bernstein_weights(t: f64) -> [f64; 4] {
    let u = 1.0 - t;
    [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t]
}

impl CubicBezier {
    #[inline]
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        CubicBezier {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// The control polygon of one coordinate.
    #[inline]
    pub fn coordinates(&self, axis: Axis) -> [f64; 4] {
        [
            axis.of_point(self.from),
            axis.of_point(self.ctrl1),
            axis.of_point(self.ctrl2),
            axis.of_point(self.to),
        ]
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        let w = bernstein_weights(t);
        self.from * w[0]
            + self.ctrl1.to_vector() * w[1]
            + self.ctrl2.to_vector() * w[2]
            + self.to.to_vector() * w[3]
    }

    /// Sample one coordinate of the curve at t.
    pub fn value(&self, t: f64, axis: Axis) -> f64 {
        let w = bernstein_weights(t);
        let c = self.coordinates(axis);
        c[0] * w[0] + c[1] * w[1] + c[2] * w[2] + c[3] * w[3]
    }

    #[inline]
    pub fn x(&self, t: f64) -> f64 {
        self.value(t, Axis::X)
    }

    #[inline]
    pub fn y(&self, t: f64) -> f64 {
        self.value(t, Axis::Y)
    }

    /// The derivative of the curve, a quadratic bézier curve.
    pub fn hodograph(&self) -> QuadraticBezier {
        QuadraticBezier {
            from: ((self.ctrl1 - self.from) * 3.0).to_point(),
            ctrl: ((self.ctrl2 - self.ctrl1) * 3.0).to_point(),
            to: ((self.to - self.ctrl2) * 3.0).to_point(),
        }
    }

    /// Sample the curve's derivative at t.
    #[inline]
    pub fn derivative(&self, t: f64) -> Vector {
        self.hodograph().sample(t).to_vector()
    }

    #[inline]
    pub fn second_derivative(&self, t: f64) -> Vector {
        self.hodograph().derivative(t)
    }

    /// The constant third derivative.
    #[inline]
    pub fn third_derivative(&self) -> Vector {
        self.hodograph().second_derivative()
    }

    /// The times in `[0, 1]` at which a coordinate equals `value`, in increasing order.
    pub fn solve_t(&self, value: f64, axis: Axis) -> ArrayVec<f64, 3> {
        let c = self.coordinates(axis);
        let (min, max) = hull(&c);
        if value < min || value > max {
            return ArrayVec::new();
        }

        // Power basis form of the coordinate minus `value`.
        let a = c[3] - c[0] + 3.0 * (c[1] - c[2]);
        let b = 3.0 * (c[0] - 2.0 * c[1] + c[2]);
        let d = 3.0 * (c[1] - c[0]);
        let mut roots: ArrayVec<f64, 3> = cubic_polynomial_roots(a, b, d, c[0] - value)
            .into_iter()
            .filter(|t| (0.0..=1.0).contains(t))
            .collect();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));

        roots
    }

    /// The times of the local extrema of a coordinate strictly inside `(0, 1)`, in increasing
    /// order.
    pub fn local_extrema_t(&self, axis: Axis) -> ArrayVec<f64, 2> {
        let c = self.coordinates(axis);
        // A third of the derivative.
        let a = c[3] - c[0] + 3.0 * (c[1] - c[2]);
        let b = 2.0 * (c[0] - 2.0 * c[1] + c[2]);
        let d = c[1] - c[0];

        quadratic_polynomial_roots(a, b, d)
            .into_iter()
            .filter(|&t| t > 0.0 && t < 1.0)
            .collect()
    }

    /// Invokes a callback for each local x extremum, in increasing order of t.
    pub fn for_each_local_x_extremum_t<F: FnMut(f64)>(&self, cb: &mut F) {
        self.local_extrema_t(Axis::X).into_iter().for_each(cb);
    }

    /// Invokes a callback for each local y extremum, in increasing order of t.
    pub fn for_each_local_y_extremum_t<F: FnMut(f64)>(&self, cb: &mut F) {
        self.local_extrema_t(Axis::Y).into_iter().for_each(cb);
    }

    /// The range of a coordinate over the control polygon.
    #[inline]
    pub fn fast_bounding_range(&self, axis: Axis) -> (f64, f64) {
        hull(&self.coordinates(axis))
    }

    /// The range of a coordinate over the curve.
    pub fn bounding_range(&self, axis: Axis) -> (f64, f64) {
        let c = self.coordinates(axis);
        let mut range = hull(&[c[0], c[3]]);
        for t in self.local_extrema_t(axis) {
            let v = self.value(t, axis);
            range = (range.0.min(v), range.1.max(v));
        }

        range
    }

    /// Returns a conservative rectangle the curve is contained in.
    pub fn fast_bounding_box(&self) -> Box2D {
        box_from_ranges(
            self.fast_bounding_range(Axis::X),
            self.fast_bounding_range(Axis::Y),
        )
    }

    /// Returns the smallest rectangle that contains the curve.
    pub fn bounding_box(&self) -> Box2D {
        box_from_ranges(self.bounding_range(Axis::X), self.bounding_range(Axis::Y))
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// The range may run backwards, in which case so does the result.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let to = self.sample(t1);
        // The tangents at the cut points, scaled to the new parameter range.
        let scale = (t1 - t0) / 3.0;
        let ctrl1 = from + self.derivative(t0) * scale;
        let ctrl2 = to - self.derivative(t1) * scale;

        CubicBezier::new(from, ctrl1, ctrl2, to)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let ab = self.from.lerp(self.ctrl1, t);
        let bc = self.ctrl1.lerp(self.ctrl2, t);
        let cd = self.ctrl2.lerp(self.to, t);
        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);
        let mid = abc.lerp(bcd, t);

        (
            CubicBezier::new(self.from, ab, abc, mid),
            CubicBezier::new(mid, bcd, cd, self.to),
        )
    }

    /// Same as `split`.
    #[inline]
    pub fn subdivide(&self, t: f64) -> (CubicBezier, CubicBezier) {
        self.split(t)
    }

    pub fn before_split(&self, t: f64) -> CubicBezier {
        self.split(t).0
    }

    pub fn after_split(&self, t: f64) -> CubicBezier {
        self.split(t).1
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed(&self, transform: &Transform) -> Self {
        CubicBezier::new(
            transform.transform_point(self.from),
            transform.transform_point(self.ctrl1),
            transform.transform_point(self.ctrl2),
            transform.transform_point(self.to),
        )
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezier::new(self.to, self.ctrl2, self.ctrl1, self.from)
    }

    /// Computes the length of the curve within `tolerance`.
    ///
    /// Subdivides until the control polygon and the chord agree, then averages them
    /// (Gravesen's estimate).
    pub fn approximate_length(&self, tolerance: f64) -> f64 {
        self.approximate_length_impl(tolerance.max(1e-12), 0)
    }

    fn approximate_length_impl(&self, tolerance: f64, depth: u32) -> f64 {
        let chord = (self.to - self.from).length();
        let polygon = (self.ctrl1 - self.from).length()
            + (self.ctrl2 - self.ctrl1).length()
            + (self.to - self.ctrl2).length();

        if polygon - chord <= tolerance || depth >= LENGTH_MAX_DEPTH {
            return (chord + polygon) * 0.5;
        }

        let (a, b) = self.split(0.5);
        a.approximate_length_impl(tolerance * 0.5, depth + 1)
            + b.approximate_length_impl(tolerance * 0.5, depth + 1)
    }

    fn axis_bezier(&self, axis: Axis) -> Bezier {
        Bezier::new(self.coordinates(axis).to_vec())
    }
}

impl Curve for CubicBezier {
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
        let h = self.hodograph();
        let mut result = vec![
            self.sample(t).to_vector(),
            h.sample(t).to_vector(),
            h.derivative(t),
            h.second_derivative(),
        ];
        result.resize(n + 1, Vector::zero());

        result
    }

    fn is_degenerate(&self) -> bool {
        self.from == self.ctrl1 && self.ctrl1 == self.ctrl2 && self.ctrl2 == self.to
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
        AnyCurve::Cubic(*self)
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        AnyCurve::Cubic(self.transformed(transform))
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::Cubic(self.split_range(from..to))
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::Cubic(self.flip())
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::Quadratic(self.hodograph())
    }

    fn length(&self, tolerance: f64) -> f64 {
        self.approximate_length(tolerance)
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        XY::new(
            self.axis_bezier(Axis::X).to_sbasis(),
            self.axis_bezier(Axis::Y).to_sbasis(),
        )
    }

    fn degrees_of_freedom(&self) -> usize {
        8
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn fast_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezier::new(
        point(0.0, 0.0),
        point(0.5, 1.0),
        point(1.5, -1.0),
        point(2.0, 0.0),
    );

    let expected = box_from_ranges((0.0, 2.0), (-1.0, 1.0));
    assert_eq!(a.fast_bounding_box(), expected);
    assert_eq!(a.bounds_fast(), expected);
}

#[test]
fn minimum_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezier::new(
        point(0.0, 0.0),
        point(0.5, 2.0),
        point(1.5, -2.0),
        point(2.0, 0.0),
    );

    let bigger = box_from_ranges((0.0, 2.0), (-0.6, 0.6));
    let smaller = box_from_ranges((0.1, 2.0), (-0.5, 0.5));

    let exact = a.bounds_exact();
    assert!(bigger.contains_box(&exact));
    assert!(exact.contains_box(&smaller));

    // The polynomial form agrees with the closed form.
    let from_sbasis = a.to_sbasis().bounds_exact();
    assert!((from_sbasis.min - exact.min).length() < 1e-9);
    assert!((from_sbasis.max - exact.max).length() < 1e-9);
}

#[test]
fn local_extrema() {
    let a = CubicBezier::new(
        point(0.0, 0.0),
        point(1.0, 2.0),
        point(2.0, 2.0),
        point(3.0, 0.0),
    );

    let mut found = Vec::new();
    a.for_each_local_y_extremum_t(&mut |t| found.push(t));
    assert_eq!(found, vec![0.5]);
    assert!(a.local_extrema_t(Axis::X).is_empty());
    assert_eq!(a.bounding_range(Axis::Y), (0.0, 1.5));

    // An s-shape has two extrema.
    let s = CubicBezier::new(
        point(0.0, 0.0),
        point(0.0, 3.0),
        point(1.0, -3.0),
        point(1.0, 0.0),
    );
    let extrema = s.local_extrema_t(Axis::Y);
    assert_eq!(extrema.len(), 2);
    assert!(extrema[0] < extrema[1]);
    for t in extrema {
        assert!(s.derivative(t).y.abs() < 1e-9);
    }
}

#[test]
fn derivatives() {
    let c1 = CubicBezier::new(
        point(1.0, 1.0),
        point(1.0, 2.0),
        point(2.0, 1.0),
        point(2.0, 2.0),
    );

    assert_eq!(c1.derivative(0.0).x, 0.0);
    assert_eq!(c1.derivative(1.0).x, 0.0);
    assert_eq!(c1.derivative(0.5).y, 0.0);

    let sb = c1.to_sbasis();
    for i in 0..=4 {
        let t = i as f64 / 4.0;
        let expected = sb.point_and_derivatives(t, 4);
        let actual = c1.point_and_derivatives(t, 4);
        assert_eq!(actual.len(), 5);
        for (a, b) in actual.iter().zip(expected.iter()) {
            assert!((*a - *b).length() < 1e-9);
        }
        let hodograph = Curve::derivative(&c1);
        assert!((hodograph.point_at(t).to_vector() - c1.derivative(t)).length() < 1e-12);
    }
    assert_eq!(c1.point_and_derivatives(0.5, 1).len(), 2);
    assert_eq!(c1.degrees_of_freedom(), 8);
}

#[test]
fn length() {
    let straight = CubicBezier::new(
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
    );
    assert!((straight.approximate_length(0.0001) - 2.0).abs() < 0.000001);

    let c = CubicBezier::new(
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(10.0, 10.0),
        point(10.0, 0.0),
    );
    let reference = crate::curve::polyline_length(&|t| c.sample(t), 1e-7);
    assert!((Curve::length(&c, 1e-4) - reference).abs() < 1e-3);
    assert!(Curve::length(&c, 1e-4) >= (c.to - c.from).length());
}

#[test]
fn portion_and_reverse() {
    let c = CubicBezier::new(
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(3.0, -1.0),
        point(4.0, 2.0),
    );

    let p = c.portion(0.2, 0.7);
    assert_eq!(p.initial_point(), c.sample(0.2));
    assert_eq!(p.final_point(), c.sample(0.7));
    assert!((p.point_at(0.5) - c.sample(0.45)).length() < 1e-12);

    let backwards = c.portion(0.7, 0.2);
    assert!((backwards.point_at(0.5) - c.sample(0.45)).length() < 1e-12);
    assert_eq!(backwards.initial_point(), c.sample(0.7));

    let (a, b) = c.split(0.3);
    assert_eq!(a.to, b.from);
    assert!((a.sample(0.5) - c.sample(0.15)).length() < 1e-12);
    assert_eq!(c.before_split(0.3), a);
    assert_eq!(c.after_split(0.3), b);

    let r = c.reverse();
    assert_eq!(r.initial_point(), c.to);
    assert_eq!(r.final_point(), c.from);
}

#[test]
fn subdivided_halves_reproduce_the_curve() {
    let c = CubicBezier::new(
        point(2.0, 0.0),
        point(-1.0, 2.9),
        point(-2.0, 3.0),
        point(3.0, 1.0),
    );

    let chord = (c.to - c.from).length();
    assert!(Curve::length(&c, crate::DEFAULT_LENGTH_TOLERANCE) >= chord);
    assert!(c.approximate_length(0.001) >= chord);

    let (left, right) = c.subdivide(0.8);
    assert_eq!(left.to, right.from);
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        assert!((left.sample(t) - c.sample(0.8 * t)).length() < 1e-12);
        assert!((right.sample(t) - c.sample(0.8 + 0.2 * t)).length() < 1e-12);
    }
}

#[test]
fn roots_and_nearest_time() {
    let c = CubicBezier::new(
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(3.0, -1.0),
        point(4.0, 2.0),
    );

    for level in &[0.5, 1.0, 1.5] {
        let roots = c.roots(*level, Axis::Y);
        assert!(!roots.is_empty());
        for t in roots {
            assert!((c.y(t) - level).abs() < 1e-9);
        }
        let solved = c.solve_t(*level, Axis::Y);
        assert!(!solved.is_empty());
        for t in solved {
            assert!((c.y(t) - level).abs() < 1e-9);
        }
    }
    assert!(c.solve_t(5.0, Axis::Y).is_empty());

    let target = c.sample(0.35) + crate::vector(0.0, 0.01);
    let t = c.nearest_time_unit(target);
    assert!((t - 0.35).abs() < 0.01);
}
