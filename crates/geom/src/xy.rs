use crate::{point, vector, Box2D, Point, Transform, Vector};
use sbgeom_poly::{Interval, Linear, SBasis};

use core::ops::{Index, IndexMut};

/// One of the two coordinate axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// The coordinate of a point along this axis.
    #[inline]
    pub fn of_point(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    #[inline]
    pub fn of_vector(self, v: Vector) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// A pair of values, one per axis.
///
/// `XY<SBasis>` is the polynomial form every curve converts to.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

impl<T> XY<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        XY { x, y }
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> XY<U> {
        XY {
            x: f(&self.x),
            y: f(&self.y),
        }
    }
}

impl<T> Index<Axis> for XY<T> {
    type Output = T;
    #[inline]
    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for XY<T> {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl XY<SBasis> {
    /// A constant curve.
    pub fn from_point(p: Point) -> Self {
        XY::new(SBasis::constant(p.x), SBasis::constant(p.y))
    }

    /// The straight line between two points.
    pub fn line(from: Point, to: Point) -> Self {
        XY::new(
            SBasis::from_linear(Linear::new(from.x, to.x)),
            SBasis::from_linear(Linear::new(from.y, to.y)),
        )
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        point(self.x.value_at(t), self.y.value_at(t))
    }

    #[inline]
    pub fn initial_point(&self) -> Point {
        point(self.x.at0(), self.y.at0())
    }

    #[inline]
    pub fn final_point(&self) -> Point {
        point(self.x.at1(), self.y.at1())
    }

    /// The position followed by the first `n` derivatives, as vectors.
    pub fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        let xs = self.x.value_and_derivatives(t, n);
        let ys = self.y.value_and_derivatives(t, n);
        xs.into_iter().zip(ys).map(|(x, y)| vector(x, y)).collect()
    }

    pub fn derivative(&self) -> Self {
        self.map(SBasis::derivative)
    }

    pub fn portion(&self, from: f64, to: f64) -> Self {
        self.map(|p| p.portion(from, to))
    }

    pub fn reverse(&self) -> Self {
        self.map(SBasis::reverse)
    }

    pub fn is_constant(&self, eps: f64) -> bool {
        self.x.is_constant(eps) && self.y.is_constant(eps)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the dot product with another pair of polynomials.
    pub fn dot(&self, other: &XY<SBasis>) -> SBasis {
        &self.x * &other.x + &self.y * &other.y
    }

    /// Translates the curve by `-p`.
    pub fn sub_point(&self, p: Point) -> Self {
        XY::new(&self.x - p.x, &self.y - p.y)
    }

    /// Applies an affine transform to the curve.
    pub fn transformed(&self, m: &Transform) -> Self {
        let x = &(&self.x * m.m11) + &(&self.y * m.m21);
        let y = &(&self.x * m.m12) + &(&self.y * m.m22);
        XY::new(x + m.m31, y + m.m32)
    }

    pub fn bounds_fast(&self) -> Box2D {
        box_from_intervals(self.x.bounds_fast(0), self.y.bounds_fast(0))
    }

    pub fn bounds_exact(&self) -> Box2D {
        box_from_intervals(self.x.bounds_exact(), self.y.bounds_exact())
    }

    pub fn bounds_local(&self, interval: &Interval) -> Box2D {
        box_from_intervals(
            self.x.bounds_local(interval, 0),
            self.y.bounds_local(interval, 0),
        )
    }

    pub fn degrees_of_freedom(&self) -> usize {
        self.x.degrees_of_freedom() + self.y.degrees_of_freedom()
    }
}

impl From<Point> for XY<f64> {
    fn from(p: Point) -> Self {
        XY::new(p.x, p.y)
    }
}

/// The rectangle spanned by an interval on each axis.
pub(crate) fn box_from_intervals(x: Interval, y: Interval) -> Box2D {
    Box2D {
        min: point(x.min(), y.min()),
        max: point(x.max(), y.max()),
    }
}

#[test]
fn axis_access() {
    let mut xy = XY::new(1.0, 2.0);
    assert_eq!(xy[Axis::X], 1.0);
    assert_eq!(xy[Axis::Y], 2.0);
    xy[Axis::Y] = 3.0;
    assert_eq!(xy.y, 3.0);
    assert_eq!(Axis::X.other(), Axis::Y);
    assert_eq!(Axis::Y.of_point(point(4.0, 5.0)), 5.0);
}

#[test]
fn sbasis_pair() {
    let line = XY::line(point(0.0, 0.0), point(2.0, 4.0));
    assert_eq!(line.point_at(0.5), point(1.0, 2.0));
    assert_eq!(line.initial_point(), point(0.0, 0.0));
    assert_eq!(line.final_point(), point(2.0, 4.0));
    assert_eq!(line.derivative().point_at(0.3), point(2.0, 4.0));

    let moved = line.transformed(&Transform::translation(1.0, -1.0));
    assert_eq!(moved.point_at(1.0), point(3.0, 3.0));

    let scaled = line.transformed(&Transform::scale(2.0, 3.0));
    assert_eq!(scaled.final_point(), point(4.0, 12.0));

    let b = line.bounds_exact();
    assert_eq!(b.min, point(0.0, 0.0));
    assert_eq!(b.max, point(2.0, 4.0));

    let d = line.point_and_derivatives(0.5, 2);
    assert_eq!(d.len(), 3);
    assert_eq!(d[1], vector(2.0, 4.0));
    assert_eq!(d[2], vector(0.0, 0.0));
}
