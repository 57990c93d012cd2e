use crate::curve::check_portion;
use crate::utils::{box_from_ranges, min_max};
use crate::{point, AnyCurve, Axis, Box2D, Curve, Point, Transform, Vector, XY};
use sbgeom_poly::{Interval, SBasis};

use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        LineSegment { from, to }
    }

    /// Sample the segment at t. Both end points are reproduced exactly.
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        if t == 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, t)
    }

    /// Sample one coordinate of the segment at t.
    #[inline]
    pub fn value(&self, t: f64, axis: Axis) -> f64 {
        let (a, b) = (axis.of_point(self.from), axis.of_point(self.to));
        a + (b - a) * t
    }

    /// The time at which a coordinate equals `value`, if it lies in `[0, 1]`.
    ///
    /// Segments along which the coordinate is constant have no isolated solution.
    pub fn solve_t(&self, value: f64, axis: Axis) -> Option<f64> {
        let (a, b) = (axis.of_point(self.from), axis.of_point(self.to));
        if a == b {
            if a == value {
                log::debug!("segment lies on the level {}, no isolated roots", value);
            }
            return None;
        }

        let t = (value - a) / (b - a);
        if (0.0..=1.0).contains(&t) {
            Some(t)
        } else {
            None
        }
    }

    /// Swap the beginning and the end of the segment.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment::new(self.to, self.from)
    }

    /// The sub-segment inside a range of t, running backwards if the range does.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        LineSegment::new(self.sample(t_range.start), self.sample(t_range.end))
    }

    #[inline]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let mid = self.sample(t);
        (LineSegment::new(self.from, mid), LineSegment::new(mid, self.to))
    }

    #[inline]
    pub fn before_split(&self, t: f64) -> Self {
        self.split(t).0
    }

    #[inline]
    pub fn after_split(&self, t: f64) -> Self {
        self.split(t).1
    }

    #[inline]
    pub fn bounding_range(&self, axis: Axis) -> (f64, f64) {
        min_max(axis.of_point(self.from), axis.of_point(self.to))
    }

    #[inline]
    pub fn bounding_box(&self) -> Box2D {
        box_from_ranges(self.bounding_range(Axis::X), self.bounding_range(Axis::Y))
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> f64 {
        self.to_vector().square_length()
    }

    #[inline]
    pub fn transformed(&self, transform: &Transform) -> Self {
        LineSegment::new(
            transform.transform_point(self.from),
            transform.transform_point(self.to),
        )
    }

    /// The time in `[t0, t1]` of the point of the segment closest to `p`.
    ///
    /// A degenerate segment gives `t0`.
    pub fn nearest_time_in(&self, p: Point, t0: f64, t1: f64) -> f64 {
        let v = self.to_vector();
        let len_sq = v.square_length();
        if len_sq == 0.0 {
            return t0;
        }

        ((p - self.from).dot(v) / len_sq).max(t0).min(t1)
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        (self.sample(self.nearest_time_in(p, 0.0, 1.0)) - p).length()
    }

    // The constant derivative, as a degenerate segment.
    fn derivative_segment(&self) -> LineSegment {
        let d = self.to_vector().to_point();
        LineSegment::new(d, d)
    }
}

fn line_bounds_local(
    segment: &LineSegment,
    interval: Option<Interval>,
    deg: usize,
) -> Option<Box2D> {
    let interval = interval?.intersect(&Interval::UNIT)?;
    Some(match deg {
        0 => segment
            .split_range(interval.min()..interval.max())
            .bounding_box(),
        1 => {
            let d = segment.to_vector().to_point();
            Box2D { min: d, max: d }
        }
        _ => Box2D::zero(),
    })
}

impl Curve for LineSegment {
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
        let mut result = Vec::with_capacity(n + 1);
        result.push(self.sample(t).to_vector());
        if n > 0 {
            result.push(self.to_vector());
        }
        for _ in 1..n {
            result.push(Vector::zero());
        }

        result
    }

    fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    fn is_line_segment(&self) -> bool {
        true
    }

    fn bounds_fast(&self) -> Box2D {
        self.bounding_box()
    }

    fn bounds_exact(&self) -> Box2D {
        self.bounding_box()
    }

    fn bounds_local(&self, interval: Option<Interval>, deg: usize) -> Option<Box2D> {
        line_bounds_local(self, interval, deg)
    }

    fn set_initial(&mut self, p: Point) {
        self.from = p;
    }

    fn set_final(&mut self, p: Point) {
        self.to = p;
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::Line(*self)
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        AnyCurve::Line(self.transformed(transform))
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::Line(self.split_range(from..to))
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::Line(self.flip())
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::Line(self.derivative_segment())
    }

    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        let (from, to) = min_max(from.max(0.0).min(1.0), to.max(0.0).min(1.0));
        self.nearest_time_in(p, from, to)
    }

    fn all_nearest_times(&self, p: Point, from: f64, to: f64) -> Vec<f64> {
        vec![self.nearest_time(p, from, to)]
    }

    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        self.solve_t(level, axis).into_iter().collect()
    }

    fn length(&self, _tolerance: f64) -> f64 {
        self.length()
    }

    fn unit_tangent_at(&self, _t: f64, _n: usize) -> Vector {
        let v = self.to_vector();
        let length = v.length();
        if length == 0.0 {
            return Vector::zero();
        }

        v / length
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        XY::line(self.from, self.to)
    }

    fn degrees_of_freedom(&self) -> usize {
        4
    }
}

/// A horizontal line segment.
///
/// The shared y coordinate follows the initial point: `set_initial` moves it while
/// `set_final` only moves the final x coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct HLineSegment {
    pub from_x: f64,
    pub to_x: f64,
    pub y: f64,
}

impl HLineSegment {
    #[inline]
    pub fn new(from_x: f64, to_x: f64, y: f64) -> Self {
        HLineSegment { from_x, to_x, y }
    }

    /// Builds a horizontal segment from `from` to `to`, if they share the same y.
    pub fn from_points(from: Point, to: Point) -> Option<Self> {
        if from.y != to.y {
            return None;
        }

        Some(HLineSegment::new(from.x, to.x, from.y))
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    #[inline]
    pub fn to_line_segment(&self) -> LineSegment {
        LineSegment {
            from: point(self.from_x, self.y),
            to: point(self.to_x, self.y),
        }
    }

    pub fn flip(&self) -> Self {
        HLineSegment::new(self.to_x, self.from_x, self.y)
    }

    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        let s = self.to_line_segment().split_range(t_range);
        HLineSegment::new(s.from.x, s.to.x, self.y)
    }
}

impl Curve for HLineSegment {
    fn initial_point(&self) -> Point {
        point(self.from_x, self.y)
    }

    fn final_point(&self) -> Point {
        point(self.to_x, self.y)
    }

    fn point_at(&self, t: f64) -> Point {
        self.to_line_segment().sample(t)
    }

    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.to_line_segment().value(t, Axis::X),
            Axis::Y => self.y,
        }
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        self.to_line_segment().point_and_derivatives(t, n)
    }

    fn is_degenerate(&self) -> bool {
        self.from_x == self.to_x
    }

    fn is_line_segment(&self) -> bool {
        true
    }

    fn bounds_fast(&self) -> Box2D {
        self.to_line_segment().bounding_box()
    }

    fn bounds_exact(&self) -> Box2D {
        self.to_line_segment().bounding_box()
    }

    fn bounds_local(&self, interval: Option<Interval>, deg: usize) -> Option<Box2D> {
        line_bounds_local(&self.to_line_segment(), interval, deg)
    }

    fn set_initial(&mut self, p: Point) {
        self.from_x = p.x;
        self.y = p.y;
    }

    fn set_final(&mut self, p: Point) {
        self.to_x = p.x;
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::HLine(*self)
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        let s = self.to_line_segment().transformed(transform);
        match HLineSegment::from_points(s.from, s.to) {
            Some(h) => AnyCurve::HLine(h),
            None => AnyCurve::Line(s),
        }
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::HLine(self.split_range(from..to))
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::HLine(self.flip())
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::Line(self.to_line_segment().derivative_segment())
    }

    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        self.to_line_segment().nearest_time(p, from, to)
    }

    fn all_nearest_times(&self, p: Point, from: f64, to: f64) -> Vec<f64> {
        vec![self.nearest_time(p, from, to)]
    }

    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        self.to_line_segment().roots(level, axis)
    }

    fn length(&self, _tolerance: f64) -> f64 {
        (self.to_x - self.from_x).abs()
    }

    fn unit_tangent_at(&self, t: f64, n: usize) -> Vector {
        self.to_line_segment().unit_tangent_at(t, n)
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        self.to_line_segment().to_sbasis()
    }

    fn degrees_of_freedom(&self) -> usize {
        3
    }
}

/// A vertical line segment.
///
/// The shared x coordinate follows the initial point: `set_initial` moves it while
/// `set_final` only moves the final y coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VLineSegment {
    pub x: f64,
    pub from_y: f64,
    pub to_y: f64,
}

impl VLineSegment {
    #[inline]
    pub fn new(x: f64, from_y: f64, to_y: f64) -> Self {
        VLineSegment { x, from_y, to_y }
    }

    /// Builds a vertical segment from `from` to `to`, if they share the same x.
    pub fn from_points(from: Point, to: Point) -> Option<Self> {
        if from.x != to.x {
            return None;
        }

        Some(VLineSegment::new(from.x, from.y, to.y))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    #[inline]
    pub fn to_line_segment(&self) -> LineSegment {
        LineSegment {
            from: point(self.x, self.from_y),
            to: point(self.x, self.to_y),
        }
    }

    pub fn flip(&self) -> Self {
        VLineSegment::new(self.x, self.to_y, self.from_y)
    }

    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        let s = self.to_line_segment().split_range(t_range);
        VLineSegment::new(self.x, s.from.y, s.to.y)
    }
}

impl Curve for VLineSegment {
    fn initial_point(&self) -> Point {
        point(self.x, self.from_y)
    }

    fn final_point(&self) -> Point {
        point(self.x, self.to_y)
    }

    fn point_at(&self, t: f64) -> Point {
        self.to_line_segment().sample(t)
    }

    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.to_line_segment().value(t, Axis::Y),
        }
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        self.to_line_segment().point_and_derivatives(t, n)
    }

    fn is_degenerate(&self) -> bool {
        self.from_y == self.to_y
    }

    fn is_line_segment(&self) -> bool {
        true
    }

    fn bounds_fast(&self) -> Box2D {
        self.to_line_segment().bounding_box()
    }

    fn bounds_exact(&self) -> Box2D {
        self.to_line_segment().bounding_box()
    }

    fn bounds_local(&self, interval: Option<Interval>, deg: usize) -> Option<Box2D> {
        line_bounds_local(&self.to_line_segment(), interval, deg)
    }

    fn set_initial(&mut self, p: Point) {
        self.x = p.x;
        self.from_y = p.y;
    }

    fn set_final(&mut self, p: Point) {
        self.to_y = p.y;
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::VLine(*self)
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        let s = self.to_line_segment().transformed(transform);
        match VLineSegment::from_points(s.from, s.to) {
            Some(v) => AnyCurve::VLine(v),
            None => AnyCurve::Line(s),
        }
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::VLine(self.split_range(from..to))
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::VLine(self.flip())
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::Line(self.to_line_segment().derivative_segment())
    }

    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        self.to_line_segment().nearest_time(p, from, to)
    }

    fn all_nearest_times(&self, p: Point, from: f64, to: f64) -> Vec<f64> {
        vec![self.nearest_time(p, from, to)]
    }

    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        self.to_line_segment().roots(level, axis)
    }

    fn length(&self, _tolerance: f64) -> f64 {
        (self.to_y - self.from_y).abs()
    }

    fn unit_tangent_at(&self, t: f64, n: usize) -> Vector {
        self.to_line_segment().unit_tangent_at(t, n)
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        self.to_line_segment().to_sbasis()
    }

    fn degrees_of_freedom(&self) -> usize {
        3
    }
}

#[cfg(test)]
use crate::vector;

#[test]
fn bounding_box() {
    let cases = [
        (point(1.0, 5.0), point(5.0, 7.0), (1.0, 5.0), (5.0, 7.0)),
        (point(5.0, 5.0), point(1.0, 1.0), (1.0, 5.0), (1.0, 5.0)),
        (point(3.0, 3.0), point(1.0, 5.0), (1.0, 3.0), (3.0, 5.0)),
    ];
    for &(from, to, x, y) in &cases {
        let ls = LineSegment::new(from, to);
        let r = box_from_ranges(x, y);
        assert_eq!(ls.bounding_box(), r);
        assert_eq!(ls.bounds_exact(), r);
        assert_eq!(ls.bounds_fast(), r);
    }
}

#[test]
fn evaluation_and_derivatives() {
    let l = LineSegment::new(point(1.0, 1.0), point(3.0, 5.0));
    assert_eq!(l.point_at(0.0), point(1.0, 1.0));
    assert_eq!(l.point_at(1.0), point(3.0, 5.0));
    assert_eq!(l.point_at(0.5), point(2.0, 3.0));
    assert_eq!(l.value_at(0.5, Axis::Y), 3.0);

    let d = l.point_and_derivatives(0.25, 3);
    assert_eq!(d.len(), 4);
    assert_eq!(d[0], vector(1.5, 2.0));
    assert_eq!(d[1], vector(2.0, 4.0));
    assert_eq!(d[2], vector(0.0, 0.0));
    assert_eq!(l.solve_t(4.0, Axis::Y), Some(0.75));
    assert_eq!(l.solve_t(4.0, Axis::X), None);

    let sb = l.to_sbasis();
    assert_eq!(sb.point_at(0.5), l.point_at(0.5));
    assert_eq!(l.derivative().point_at(0.7), point(2.0, 4.0));
    assert!(l.is_line_segment());
    assert!(!l.is_degenerate());
    assert_eq!(l.degrees_of_freedom(), 4);
}

#[test]
fn nearest_point() {
    let l = LineSegment::new(point(0.0, 0.0), point(10.0, 0.0));
    assert_eq!(l.nearest_time_unit(point(5.0, 3.0)), 0.5);
    assert_eq!(l.nearest_time_unit(point(-5.0, 3.0)), 0.0);
    assert_eq!(l.nearest_time_unit(point(15.0, 3.0)), 1.0);
    assert_eq!(l.nearest_time(point(8.0, 1.0), 0.2, 0.6), 0.6);
    assert_eq!(l.distance_to_point(point(5.0, 3.0)), 3.0);

    let degenerate = LineSegment::new(point(1.0, 1.0), point(1.0, 1.0));
    assert_eq!(degenerate.nearest_time(point(4.0, 4.0), 0.3, 0.9), 0.3);
}

#[test]
fn roots_and_winding() {
    crate::init_test_logger();

    let up = LineSegment::new(point(1.0, 0.0), point(1.0, 4.0));
    assert_eq!(up.roots(1.0, Axis::Y), vec![0.25]);
    assert!(up.roots(5.0, Axis::Y).is_empty());
    assert_eq!(up.winding(point(0.0, 1.0)), 1);
    assert_eq!(up.winding(point(2.0, 1.0)), 0);
    assert_eq!(up.flip().winding(point(0.0, 1.0)), -1);

    // End points on the ray: counted at the start when leaving upwards only.
    assert_eq!(up.winding(point(0.0, 0.0)), 1);
    assert_eq!(up.winding(point(0.0, 4.0)), 0);
    assert_eq!(up.flip().winding(point(0.0, 0.0)), -1);
    assert_eq!(up.flip().winding(point(0.0, 4.0)), 0);

    // A segment lying on the level has no isolated roots.
    assert!(up.roots(1.0, Axis::X).is_empty());
    assert_eq!(up.solve_t(1.0, Axis::X), None);
}

#[test]
fn portions() {
    let l = LineSegment::new(point(0.0, 0.0), point(4.0, 8.0));
    let p = l.portion(0.25, 0.5);
    assert_eq!(p.initial_point(), point(1.0, 2.0));
    assert_eq!(p.final_point(), point(2.0, 4.0));

    let r = l.portion(0.5, 0.25);
    assert_eq!(r.initial_point(), point(2.0, 4.0));
    assert_eq!(r.final_point(), point(1.0, 2.0));

    let rev = l.reverse();
    assert_eq!(rev.initial_point(), l.to);
    assert_eq!(rev.final_point(), l.from);
}

#[test]
#[should_panic]
fn portion_out_of_range() {
    let l = LineSegment::new(point(0.0, 0.0), point(4.0, 8.0));
    l.portion(-0.5, 0.5);
}

#[test]
fn length() {
    let l = LineSegment::new(point(0.0, 0.0), point(3.0, 4.0));
    assert_eq!(Curve::length(&l, 0.01), 5.0);
    let h = HLineSegment::new(5.0, 2.0, 1.0);
    assert_eq!(h.length(0.01), 3.0);
    let v = VLineSegment::new(1.0, 2.0, 7.0);
    assert_eq!(v.length(0.01), 5.0);
}

#[test]
fn bounds_local() {
    let l = LineSegment::new(point(0.0, 0.0), point(4.0, 8.0));
    let b = l.bounds_local(Some(Interval::new(0.25, 0.5)), 0).unwrap();
    assert_eq!(b.min, point(1.0, 2.0));
    assert_eq!(b.max, point(2.0, 4.0));
    let d = l.bounds_local(Some(Interval::UNIT), 1).unwrap();
    assert_eq!(d.min, point(4.0, 8.0));
    assert_eq!(l.bounds_local(None, 0), None);
    assert_eq!(l.bounds_local(Some(Interval::new(2.0, 3.0)), 0), None);
}

#[test]
fn horizontal_segment() {
    let mut h = HLineSegment::new(0.0, 4.0, 2.0);
    assert_eq!(h.initial_point(), point(0.0, 2.0));
    assert_eq!(h.final_point(), point(4.0, 2.0));
    assert_eq!(h.point_at(0.25), point(1.0, 2.0));
    assert_eq!(h.value_at(0.9, Axis::Y), 2.0);
    assert_eq!(h.degrees_of_freedom(), 3);

    // The y coordinate follows the initial point.
    h.set_initial(point(1.0, 3.0));
    assert_eq!(h.final_point(), point(4.0, 3.0));
    h.set_final(point(6.0, 10.0));
    assert_eq!(h.final_point(), point(6.0, 3.0));

    match h.portion(0.0, 0.5) {
        AnyCurve::HLine(p) => assert_eq!(p, HLineSegment::new(1.0, 3.5, 3.0)),
        other => panic!("unexpected {:?}", other),
    }

    let rotated = h.transformed(&Transform::rotation(crate::Angle::degrees(90.0)));
    assert!(matches!(rotated, AnyCurve::Line(_)));
    let moved = h.transformed(&Transform::translation(1.0, 1.0));
    assert!(matches!(moved, AnyCurve::HLine(_)));

    assert_eq!(HLineSegment::from_points(point(0.0, 0.0), point(1.0, 1.0)), None);
}

#[test]
fn vertical_segment() {
    let mut v = VLineSegment::new(2.0, 0.0, 4.0);
    assert_eq!(v.initial_point(), point(2.0, 0.0));
    assert_eq!(v.final_point(), point(2.0, 4.0));
    assert_eq!(v.roots(1.0, Axis::Y), vec![0.25]);
    assert!(v.roots(1.0, Axis::X).is_empty());

    v.set_initial(point(3.0, 1.0));
    assert_eq!(v.final_point(), point(3.0, 4.0));
    v.set_final(point(0.0, 5.0));
    assert_eq!(v.final_point(), point(3.0, 5.0));

    match v.reverse() {
        AnyCurve::VLine(r) => assert_eq!(r, VLineSegment::new(3.0, 5.0, 1.0)),
        other => panic!("unexpected {:?}", other),
    }
}

