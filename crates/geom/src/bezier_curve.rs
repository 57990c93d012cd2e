use crate::curve::check_portion;
use crate::xy::box_from_intervals;
use crate::{point, vector, AnyCurve, Axis, Box2D, Curve, GeomError, Point, Transform, Vector, XY};
use sbgeom_poly::{Bezier, Interval, SBasis};

const LENGTH_MAX_DEPTH: u32 = 16;

/// A bézier curve of any order, stored as one Bernstein polynomial per axis.
///
/// Both polynomials always have the same order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BezierCurve {
    x: Bezier,
    y: Bezier,
}

impl BezierCurve {
    /// Creates a curve from a pair of polynomials of the same order.
    pub fn new(x: Bezier, y: Bezier) -> Result<Self, GeomError> {
        if x.order() != y.order() {
            return Err(GeomError::OrderMismatch {
                x: x.order(),
                y: y.order(),
            });
        }

        Ok(BezierCurve { x, y })
    }

    /// Creates a curve from its control points. The order is the number of points minus one.
    pub fn from_points(points: &[Point]) -> Result<Self, GeomError> {
        if points.is_empty() {
            return Err(GeomError::EmptyControlPoints);
        }

        Ok(Self::from_points_unchecked(points.iter().cloned()))
    }

    fn from_points_unchecked<I: Iterator<Item = Point>>(points: I) -> Self {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.map(|p| (p.x, p.y)).unzip();
        BezierCurve {
            x: Bezier::new(xs),
            y: Bezier::new(ys),
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.x.order()
    }

    #[inline]
    pub fn x(&self) -> &Bezier {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &Bezier {
        &self.y
    }

    /// The polynomial of one axis.
    #[inline]
    pub fn component(&self, axis: Axis) -> &Bezier {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn control_point(&self, i: usize) -> Point {
        point(self.x[i], self.y[i])
    }

    pub fn control_points(&self) -> Vec<Point> {
        self.x
            .coefficients()
            .iter()
            .zip(self.y.coefficients())
            .map(|(x, y)| point(*x, *y))
            .collect()
    }

    /// Moves a control point.
    ///
    /// # Panics
    ///
    /// Panics if `i > self.order()`.
    pub fn set_control_point(&mut self, i: usize, p: Point) {
        self.x[i] = p.x;
        self.y[i] = p.y;
    }

    /// Splits the curve at `t`.
    pub fn subdivide(&self, t: f64) -> (BezierCurve, BezierCurve) {
        let (x0, x1) = self.x.subdivide(t);
        let (y0, y1) = self.y.subdivide(t);
        (BezierCurve { x: x0, y: y0 }, BezierCurve { x: x1, y: y1 })
    }

    /// The same curve with one more control point.
    pub fn elevate_degree(&self) -> BezierCurve {
        BezierCurve {
            x: self.x.elevate_degree(),
            y: self.y.elevate_degree(),
        }
    }

    fn derivative_curve(&self) -> BezierCurve {
        BezierCurve {
            x: self.x.derivative(),
            y: self.y.derivative(),
        }
    }

    fn polygon_length(&self) -> f64 {
        let points = self.control_points();
        points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
    }

    fn length_impl(&self, tolerance: f64, depth: u32) -> f64 {
        let chord = (self.final_point() - self.initial_point()).length();
        let polygon = self.polygon_length();
        if polygon - chord <= tolerance || depth >= LENGTH_MAX_DEPTH {
            // Gravesen's estimate.
            let n = self.order() as f64;
            return (2.0 * chord + (n - 1.0) * polygon) / (n + 1.0);
        }

        let (a, b) = self.subdivide(0.5);
        a.length_impl(tolerance * 0.5, depth + 1) + b.length_impl(tolerance * 0.5, depth + 1)
    }
}

impl Curve for BezierCurve {
    fn initial_point(&self) -> Point {
        point(self.x.at0(), self.y.at0())
    }

    fn final_point(&self) -> Point {
        point(self.x.at1(), self.y.at1())
    }

    fn point_at(&self, t: f64) -> Point {
        point(self.x.value_at(t), self.y.value_at(t))
    }

    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        self.component(axis).value_at(t)
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        let xs = self.x.value_and_derivatives(t, n);
        let ys = self.y.value_and_derivatives(t, n);
        xs.into_iter().zip(ys).map(|(x, y)| vector(x, y)).collect()
    }

    fn is_degenerate(&self) -> bool {
        self.x.is_constant(0.0) && self.y.is_constant(0.0)
    }

    fn is_line_segment(&self) -> bool {
        self.order() == 1
    }

    fn bounds_fast(&self) -> Box2D {
        box_from_intervals(self.x.bounds_fast(), self.y.bounds_fast())
    }

    fn bounds_exact(&self) -> Box2D {
        box_from_intervals(self.x.bounds_exact(), self.y.bounds_exact())
    }

    fn bounds_local(&self, interval: Option<Interval>, deg: usize) -> Option<Box2D> {
        let interval = interval?.intersect(&Interval::UNIT)?;
        let mut curve = self.clone();
        for _ in 0..deg {
            curve = curve.derivative_curve();
        }

        Some(box_from_intervals(
            curve.x.bounds_local(&interval),
            curve.y.bounds_local(&interval),
        ))
    }

    fn set_initial(&mut self, p: Point) {
        self.x.set_at0(p.x);
        self.y.set_at0(p.y);
    }

    fn set_final(&mut self, p: Point) {
        self.x.set_at1(p.x);
        self.y.set_at1(p.y);
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::Bezier(self.clone())
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        let points = self
            .control_points()
            .into_iter()
            .map(|p| transform.transform_point(p));
        AnyCurve::Bezier(Self::from_points_unchecked(points))
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::Bezier(BezierCurve {
            x: self.x.portion(from, to),
            y: self.y.portion(from, to),
        })
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::Bezier(BezierCurve {
            x: self.x.reverse(),
            y: self.y.reverse(),
        })
    }

    fn derivative(&self) -> AnyCurve {
        AnyCurve::Bezier(self.derivative_curve())
    }

    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        self.component(axis).roots_at(level)
    }

    fn length(&self, tolerance: f64) -> f64 {
        if self.order() == 0 {
            return 0.0;
        }

        self.length_impl(tolerance.max(1e-12), 0)
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        XY::new(self.x.to_sbasis(), self.y.to_sbasis())
    }

    fn degrees_of_freedom(&self) -> usize {
        2 * (self.order() + 1)
    }
}

#[test]
fn construction() {
    assert_eq!(
        BezierCurve::from_points(&[]),
        Err(GeomError::EmptyControlPoints)
    );
    assert_eq!(
        BezierCurve::new(Bezier::new(vec![0.0, 1.0]), Bezier::new(vec![0.0, 1.0, 2.0])),
        Err(GeomError::OrderMismatch { x: 1, y: 2 })
    );

    let points = [point(0.0, 0.0), point(1.0, 2.0), point(3.0, 2.0), point(4.0, 0.0)];
    let c = BezierCurve::from_points(&points).unwrap();
    assert_eq!(c.order(), 3);
    assert_eq!(c.control_points(), points.to_vec());
    assert_eq!(c.control_point(2), point(3.0, 2.0));
    assert_eq!(c.degrees_of_freedom(), 8);
    assert!(!c.is_line_segment());

    let single = BezierCurve::from_points(&[point(1.0, 1.0)]).unwrap();
    assert_eq!(single.order(), 0);
    assert!(single.is_degenerate());
    assert_eq!(single.length(0.01), 0.0);
}

#[test]
fn agrees_with_cubic() {
    let cubic = crate::CubicBezier::new(
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(3.0, -1.0),
        point(4.0, 2.0),
    );
    let c = BezierCurve::from_points(&[cubic.from, cubic.ctrl1, cubic.ctrl2, cubic.to]).unwrap();

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((c.point_at(t) - cubic.sample(t)).length() < 1e-12);
        let d = c.point_and_derivatives(t, 2);
        assert!((d[1] - cubic.derivative(t)).length() < 1e-9);
        assert!((d[2] - cubic.second_derivative(t)).length() < 1e-9);
    }

    let a = c.bounds_exact();
    let b = cubic.bounding_box();
    assert!((a.min - b.min).length() < 1e-9);
    assert!((a.max - b.max).length() < 1e-9);

    assert!((Curve::length(&c, 1e-4) - cubic.approximate_length(1e-4)).abs() < 1e-3);

    let sb = c.to_sbasis();
    assert!((sb.point_at(0.3) - cubic.sample(0.3)).length() < 1e-12);
}

#[test]
fn editing() {
    let mut c = BezierCurve::from_points(&[point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)])
        .unwrap();
    c.set_initial(point(-1.0, 0.0));
    c.set_final(point(3.0, 1.0));
    assert_eq!(c.initial_point(), point(-1.0, 0.0));
    assert_eq!(c.final_point(), point(3.0, 1.0));
    c.set_control_point(1, point(1.0, 5.0));
    assert_eq!(c.control_point(1), point(1.0, 5.0));

    let moved = c.transformed(&Transform::translation(1.0, 2.0));
    assert_eq!(moved.initial_point(), point(0.0, 2.0));
    assert_eq!(moved.final_point(), point(4.0, 3.0));
}

#[test]
fn portion_and_derivative() {
    let c = BezierCurve::from_points(&[
        point(0.0, 0.0),
        point(1.0, 2.0),
        point(2.0, -2.0),
        point(3.0, 2.0),
        point(4.0, 0.0),
    ])
    .unwrap();

    let p = c.portion(0.25, 0.75);
    assert_eq!(p.initial_point(), c.point_at(0.25));
    assert_eq!(p.final_point(), c.point_at(0.75));
    assert!((p.point_at(0.5) - c.point_at(0.5)).length() < 1e-12);

    let r = c.portion(0.75, 0.25);
    assert_eq!(r.initial_point(), c.point_at(0.75));

    let d = Curve::derivative(&c);
    assert_eq!(d.degrees_of_freedom(), 8);
    for i in 0..=4 {
        let t = i as f64 / 4.0;
        let expected = c.point_and_derivatives(t, 1)[1];
        assert!((d.point_at(t).to_vector() - expected).length() < 1e-9);
    }

    let local = c.bounds_local(Some(Interval::new(0.0, 0.5)), 0).unwrap();
    for i in 0..=10 {
        let q = c.point_at(i as f64 / 20.0);
        assert!(local.min.x <= q.x && q.x <= local.max.x);
        assert!(local.min.y <= q.y && q.y <= local.max.y);
    }
}

#[test]
fn straight_line_length() {
    let c = BezierCurve::from_points(&[point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)])
        .unwrap();
    assert!((c.length(0.0001) - 2.0).abs() < 1e-9);
    let roots = c.roots(1.0, Axis::X);
    assert_eq!(roots.len(), 1);
    assert!((roots[0] - 0.5).abs() < 1e-12);
}
