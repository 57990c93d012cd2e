//! One dimensional closed ranges.

use core::ops::{Add, BitAnd, BitOr, Mul, Sub};

/// A closed range of real values `[min, max]`.
///
/// The empty set is represented by `Option<Interval>::None` rather than by a special
/// interval value, so a singular interval such as `[2, 2]` is still a valid, non-empty
/// range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// The unit interval `[0, 1]`, the domain of every curve.
    pub const UNIT: Self = Interval { min: 0.0, max: 1.0 };

    /// Creates an interval from two values in any order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Interval { min: a, max: b }
        } else {
            Interval { min: b, max: a }
        }
    }

    /// Creates a singular interval containing only `v`.
    #[inline]
    pub fn from_value(v: f64) -> Self {
        Interval { min: v, max: v }
    }

    /// Returns the smallest interval containing all the values, or `None` if the iterator
    /// is empty.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let mut result = Interval::from_value(first);
        for v in iter {
            result.expand_to(v);
        }

        Some(result)
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn middle(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Returns true if the interval contains a single value.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.min == self.max
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Sets the lower bound, moving the upper bound along if it would be crossed.
    pub fn set_min(&mut self, v: f64) {
        self.min = v;
        if self.max < v {
            self.max = v;
        }
    }

    /// Sets the upper bound, moving the lower bound along if it would be crossed.
    pub fn set_max(&mut self, v: f64) {
        self.max = v;
        if self.min > v {
            self.min = v;
        }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Returns true if `v` lies strictly inside the interval.
    #[inline]
    pub fn interior_contains(&self, v: f64) -> bool {
        self.min < v && v < self.max
    }

    #[inline]
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Maps `t` in `[0, 1]` to the corresponding value in the interval.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.min * (1.0 - t) + self.max * t
    }

    /// Inverse of `value_at`.
    ///
    /// Returns `0.0` for singular intervals.
    #[inline]
    pub fn time_at(&self, v: f64) -> f64 {
        let extent = self.extent();
        if extent == 0.0 {
            return 0.0;
        }

        (v - self.min) / extent
    }

    /// Grows the interval by `amount` on both sides.
    ///
    /// A negative amount shrinks it, collapsing to the middle value if it would invert.
    pub fn expand_by(&mut self, amount: f64) {
        self.min -= amount;
        self.max += amount;
        if self.min > self.max {
            let mid = self.middle();
            self.min = mid;
            self.max = mid;
        }
    }

    /// Grows the interval so that it contains `v`.
    #[inline]
    pub fn expand_to(&mut self, v: f64) {
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }

    /// Returns the smallest interval containing both intervals.
    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the overlap of both intervals, or `None` if they are disjoint.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min <= max {
            Some(Interval { min, max })
        } else {
            None
        }
    }
}

/// Union of two optional intervals, where `None` is the empty set.
pub fn union_opt(a: Option<Interval>, b: Option<Interval>) -> Option<Interval> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

impl BitOr for Interval {
    type Output = Interval;
    #[inline]
    fn bitor(self, other: Interval) -> Interval {
        self.union(&other)
    }
}

impl BitAnd for Interval {
    type Output = Option<Interval>;
    #[inline]
    fn bitand(self, other: Interval) -> Option<Interval> {
        self.intersect(&other)
    }
}

impl Add<f64> for Interval {
    type Output = Interval;
    #[inline]
    fn add(self, offset: f64) -> Interval {
        Interval {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl Sub<f64> for Interval {
    type Output = Interval;
    #[inline]
    fn sub(self, offset: f64) -> Interval {
        self + (-offset)
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;
    #[inline]
    fn mul(self, scale: f64) -> Interval {
        Interval::new(self.min * scale, self.max * scale)
    }
}

impl From<f64> for Interval {
    fn from(v: f64) -> Self {
        Interval::from_value(v)
    }
}

#[test]
fn construction_sorts_bounds() {
    let i = Interval::new(3.0, -1.0);
    assert_eq!(i.min(), -1.0);
    assert_eq!(i.max(), 3.0);
    assert_eq!(i.extent(), 4.0);
    assert_eq!(i.middle(), 1.0);
}

#[test]
fn union_and_intersection() {
    let a = Interval::new(0.0, 2.0);
    let b = Interval::new(1.0, 5.0);
    let c = Interval::new(3.0, 4.0);

    assert_eq!(a | b, Interval::new(0.0, 5.0));
    assert_eq!(a & b, Some(Interval::new(1.0, 2.0)));
    assert_eq!(a & c, None);

    // Touching intervals intersect in a singular interval, which is not the empty set.
    let d = Interval::new(2.0, 3.0);
    let touch = (a & d).unwrap();
    assert!(touch.is_singular());
    assert_eq!(touch.min(), 2.0);

    assert_eq!(union_opt(None, Some(c)), Some(c));
    assert_eq!(union_opt(None, None), None);
}

#[test]
fn containment() {
    let a = Interval::new(-1.0, 1.0);
    assert!(a.contains(1.0));
    assert!(!a.interior_contains(1.0));
    assert!(a.interior_contains(0.0));
    assert!(a.contains_interval(&Interval::new(-0.5, 0.5)));
    assert!(!a.contains_interval(&Interval::new(-0.5, 1.5)));
}

#[test]
fn expansion() {
    let mut a = Interval::from_value(1.0);
    a.expand_to(3.0);
    a.expand_to(-2.0);
    assert_eq!(a, Interval::new(-2.0, 3.0));

    a.expand_by(1.0);
    assert_eq!(a, Interval::new(-3.0, 4.0));

    a.expand_by(-10.0);
    assert!(a.is_singular());
    assert_eq!(a.min(), 0.5);

    assert_eq!(
        Interval::from_values(vec![4.0, -1.0, 2.0]),
        Some(Interval::new(-1.0, 4.0))
    );
    assert_eq!(Interval::from_values(Vec::new()), None);
}

#[test]
fn lerp_and_inverse() {
    let a = Interval::new(2.0, 6.0);
    assert_eq!(a.value_at(0.25), 3.0);
    assert_eq!(a.time_at(3.0), 0.25);
    assert_eq!((a * -1.0), Interval::new(-6.0, -2.0));
    assert_eq!((a + 1.0), Interval::new(3.0, 7.0));
}
