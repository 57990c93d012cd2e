use crate::Interval;

use core::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A single level of the symmetric power basis.
///
/// Holds the value of the level at `t = 0` and at `t = 1` and interpolates linearly
/// in between: `L(t) = (1 - t) * a[0] + t * a[1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Linear {
    pub a: [f64; 2],
}

impl Linear {
    pub const ZERO: Self = Linear { a: [0.0, 0.0] };

    #[inline]
    pub fn new(a0: f64, a1: f64) -> Self {
        Linear { a: [a0, a1] }
    }

    #[inline]
    pub fn constant(c: f64) -> Self {
        Linear { a: [c, c] }
    }

    #[inline]
    pub fn at0(&self) -> f64 {
        self.a[0]
    }

    #[inline]
    pub fn at1(&self) -> f64 {
        self.a[1]
    }

    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.a[0] * (1.0 - t) + self.a[1] * t
    }

    /// Difference between the value at 1 and the value at 0.
    #[inline]
    pub fn tri(&self) -> f64 {
        self.a[1] - self.a[0]
    }

    /// Average of the end values.
    #[inline]
    pub fn hat(&self) -> f64 {
        (self.a[0] + self.a[1]) * 0.5
    }

    #[inline]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.a[0].abs() <= eps && self.a[1].abs() <= eps
    }

    #[inline]
    pub fn is_constant(&self, eps: f64) -> bool {
        (self.a[0] - self.a[1]).abs() <= eps
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a[0].is_finite() && self.a[1].is_finite()
    }

    #[inline]
    pub fn reverse(&self) -> Self {
        Linear::new(self.a[1], self.a[0])
    }

    #[inline]
    pub fn bounds(&self) -> Interval {
        Interval::new(self.a[0], self.a[1])
    }
}

impl Index<usize> for Linear {
    type Output = f64;
    #[inline]
    fn index(&self, idx: usize) -> &f64 {
        &self.a[idx]
    }
}

impl IndexMut<usize> for Linear {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut f64 {
        &mut self.a[idx]
    }
}

impl Add for Linear {
    type Output = Linear;
    #[inline]
    fn add(self, other: Linear) -> Linear {
        Linear::new(self.a[0] + other.a[0], self.a[1] + other.a[1])
    }
}

impl Sub for Linear {
    type Output = Linear;
    #[inline]
    fn sub(self, other: Linear) -> Linear {
        Linear::new(self.a[0] - other.a[0], self.a[1] - other.a[1])
    }
}

impl AddAssign for Linear {
    #[inline]
    fn add_assign(&mut self, other: Linear) {
        self.a[0] += other.a[0];
        self.a[1] += other.a[1];
    }
}

impl SubAssign for Linear {
    #[inline]
    fn sub_assign(&mut self, other: Linear) {
        self.a[0] -= other.a[0];
        self.a[1] -= other.a[1];
    }
}

impl Neg for Linear {
    type Output = Linear;
    #[inline]
    fn neg(self) -> Linear {
        Linear::new(-self.a[0], -self.a[1])
    }
}

impl Add<f64> for Linear {
    type Output = Linear;
    #[inline]
    fn add(self, b: f64) -> Linear {
        Linear::new(self.a[0] + b, self.a[1] + b)
    }
}

impl Sub<f64> for Linear {
    type Output = Linear;
    #[inline]
    fn sub(self, b: f64) -> Linear {
        Linear::new(self.a[0] - b, self.a[1] - b)
    }
}

impl Mul<f64> for Linear {
    type Output = Linear;
    #[inline]
    fn mul(self, b: f64) -> Linear {
        Linear::new(self.a[0] * b, self.a[1] * b)
    }
}

impl MulAssign<f64> for Linear {
    #[inline]
    fn mul_assign(&mut self, b: f64) {
        self.a[0] *= b;
        self.a[1] *= b;
    }
}

impl Div<f64> for Linear {
    type Output = Linear;
    #[inline]
    fn div(self, b: f64) -> Linear {
        Linear::new(self.a[0] / b, self.a[1] / b)
    }
}

#[test]
fn linear_evaluation() {
    let l = Linear::new(1.0, 7.0);
    assert_eq!(l.value_at(0.0), 1.0);
    assert_eq!(l.value_at(1.0), 7.0);
    assert_eq!(l.value_at(0.5), 4.0);
    assert_eq!(l.tri(), 6.0);
    assert_eq!(l.hat(), 4.0);
    assert_eq!(l.reverse().value_at(0.25), l.value_at(0.75));
}

#[test]
fn linear_arithmetic() {
    let a = Linear::new(1.0, 2.0);
    let b = Linear::new(3.0, -1.0);
    assert_eq!(a + b, Linear::new(4.0, 1.0));
    assert_eq!(a - b, Linear::new(-2.0, 3.0));
    assert_eq!(-a, Linear::new(-1.0, -2.0));
    assert_eq!(a * 2.0, Linear::new(2.0, 4.0));
    assert_eq!(a + 1.0, Linear::new(2.0, 3.0));
    assert!(Linear::constant(3.0).is_constant(0.0));
    assert!(Linear::ZERO.is_zero(0.0));
}
