use crate::roots::{bernstein_roots, deflate_start, SolverOptions};
use crate::utils::{binomial, lerp};
use crate::{Interval, Linear, SBasis};

use core::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// A polynomial over `[0, 1]` in Bernstein form.
///
/// ```text
/// ∀ t ∈ [0..1],  B(t) = Σ c[i] * C(n, i) * tⁱ * (1 - t)ⁿ⁻ⁱ
/// ```
///
/// A Bézier polynomial always has at least one coefficient. Its order (or degree) is the
/// number of coefficients minus one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Bezier {
    c: Vec<f64>,
}

/// Evaluates Bernstein coefficients at `t`.
///
/// This is a Horner-like scheme that does not require the binomial coefficients to be
/// precomputed. It is exact at `t = 0` and `t = 1`.
pub fn bernstein_value_at(c: &[f64], t: f64) -> f64 {
    let n = match c.len() {
        0 => return 0.0,
        len => len - 1,
    };
    let u = 1.0 - t;
    let mut bc = 1.0;
    let mut tn = 1.0;
    let mut tmp = c[0] * u;
    for i in 1..n {
        tn *= t;
        bc = bc * (n - i + 1) as f64 / i as f64;
        tmp = (tmp + tn * bc * c[i]) * u;
    }

    tmp + tn * t * c[n]
}

/// Splits Bernstein coefficients at `t` using de Casteljau's algorithm.
///
/// Returns the coefficients of the left and right pieces, each reparametrized to `[0, 1]`.
pub fn casteljau_subdivision(c: &[f64], t: f64) -> (Vec<f64>, Vec<f64>) {
    let mut right = c.to_vec();
    let mut left = c.to_vec();
    if c.is_empty() {
        return (left, right);
    }

    let degree = c.len() - 1;
    for i in 1..=degree {
        for j in 0..=(degree - i) {
            right[j] = lerp(t, right[j], right[j + 1]);
        }
        left[i] = right[0];
    }

    (left, right)
}

impl Bezier {
    /// Creates a Bézier polynomial from its coefficients.
    ///
    /// An empty list produces the zero polynomial of order zero.
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Bezier { c: vec![0.0] };
        }

        Bezier { c: coefficients }
    }

    pub fn from_slice(coefficients: &[f64]) -> Self {
        Bezier::new(coefficients.to_vec())
    }

    #[inline]
    pub fn constant(value: f64) -> Self {
        Bezier { c: vec![value] }
    }

    /// The zero polynomial of a given order.
    pub fn with_order(order: usize) -> Self {
        Bezier {
            c: vec![0.0; order + 1],
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.c.len() - 1
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.order()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.c.len()
    }

    /// Always false, a Bézier polynomial has at least one coefficient.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.c
    }

    #[inline]
    pub fn at0(&self) -> f64 {
        self.c[0]
    }

    #[inline]
    pub fn at1(&self) -> f64 {
        self.c[self.c.len() - 1]
    }

    pub fn set_at0(&mut self, v: f64) {
        self.c[0] = v;
    }

    pub fn set_at1(&mut self, v: f64) {
        let n = self.order();
        self.c[n] = v;
    }

    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        bernstein_value_at(&self.c, t)
    }

    /// Returns the value and the first `n` derivatives at `t`.
    ///
    /// Entries beyond the degree of the polynomial are zero.
    pub fn value_and_derivatives(&self, t: f64, n: usize) -> Vec<f64> {
        let mut result = Vec::with_capacity(n + 1);
        let mut d = self.clone();
        for i in 0..=n {
            result.push(d.value_at(t));
            if i < n {
                d = d.derivative();
            }
        }

        result
    }

    pub fn is_zero(&self, eps: f64) -> bool {
        self.c.iter().all(|c| c.abs() <= eps)
    }

    pub fn is_constant(&self, eps: f64) -> bool {
        let first = self.c[0];
        self.c.iter().all(|c| (c - first).abs() <= eps)
    }

    pub fn is_finite(&self) -> bool {
        self.c.iter().all(|c| c.is_finite())
    }

    /// Splits the polynomial at `t`.
    pub fn subdivide(&self, t: f64) -> (Bezier, Bezier) {
        let (mut left, mut right) = casteljau_subdivision(&self.c, t);
        let v = self.value_at(t);
        let n = self.order();
        left[n] = v;
        right[0] = v;

        (Bezier { c: left }, Bezier { c: right })
    }

    /// Returns the polynomial restricted to `[from, to]` and reparametrized to `[0, 1]`.
    ///
    /// If `from > to` the result is reversed. The end coefficients are exactly the values
    /// at `from` and `to`.
    pub fn portion(&self, from: f64, to: f64) -> Bezier {
        if from > to {
            return self.portion(to, from).reverse();
        }

        let mut result = if from == 0.0 {
            self.clone()
        } else {
            Bezier {
                c: casteljau_subdivision(&self.c, from).1,
            }
        };

        if to != 1.0 {
            let t = if from == 1.0 {
                0.0
            } else {
                (to - from) / (1.0 - from)
            };
            result.c = casteljau_subdivision(&result.c, t).0;
        }

        let n = result.order();
        result.c[0] = self.value_at(from);
        result.c[n] = self.value_at(to);

        result
    }

    pub fn reverse(&self) -> Bezier {
        let mut c = self.c.clone();
        c.reverse();
        Bezier { c }
    }

    /// Returns the same polynomial expressed with one more coefficient.
    pub fn elevate_degree(&self) -> Bezier {
        let n = self.order() + 1;
        let mut c = Vec::with_capacity(n + 1);
        c.push(self.c[0]);
        for i in 1..n {
            let u = i as f64 / n as f64;
            c.push(u * self.c[i - 1] + (1.0 - u) * self.c[i]);
        }
        c.push(self.c[n - 1]);

        Bezier { c }
    }

    /// Elevates the degree until the order equals `order`.
    ///
    /// Does nothing if the polynomial is already of a greater or equal order.
    pub fn elevate_to_degree(&self, order: usize) -> Bezier {
        let mut result = self.clone();
        while result.order() < order {
            result = result.elevate_degree();
        }

        result
    }

    /// Returns an approximation of this polynomial with one less coefficient.
    ///
    /// The result is exact when the polynomial is the degree elevation of a lower degree
    /// one. Otherwise the first half of the coefficients comes from the forward elevation
    /// recurrence and the second half from the backward one.
    pub fn reduce_degree(&self) -> Bezier {
        let n = self.order();
        if n == 0 {
            return self.clone();
        }
        if n == 1 {
            return Bezier::constant((self.c[0] + self.c[1]) * 0.5);
        }

        let nf = n as f64;
        let mut r = vec![0.0; n];
        let split = (n + 1) / 2;

        r[0] = self.c[0];
        for i in 1..split {
            r[i] = (nf * self.c[i] - i as f64 * r[i - 1]) / (n - i) as f64;
        }

        r[n - 1] = self.c[n];
        for i in ((split + 1)..n).rev() {
            r[i - 1] = (nf * self.c[i] - (n - i) as f64 * r[i]) / i as f64;
        }

        Bezier { c: r }
    }

    /// Divides the polynomial by `t`.
    ///
    /// This is exact when the polynomial has a root at zero, otherwise the value at zero
    /// is dropped.
    pub fn deflate(&self) -> Bezier {
        if self.order() == 0 {
            return self.clone();
        }
        let mut c = self.c.clone();
        deflate_start(&mut c);

        Bezier { c }
    }

    pub fn derivative(&self) -> Bezier {
        let n = self.order();
        if n == 0 {
            return Bezier::constant(0.0);
        }

        let nf = n as f64;
        let c = self.c.windows(2).map(|w| nf * (w[1] - w[0])).collect();

        Bezier { c }
    }

    /// Returns the antiderivative that is zero at `t = 0`.
    pub fn integral(&self) -> Bezier {
        let n = self.order() + 1;
        let mut c = Vec::with_capacity(n + 1);
        let mut acc = 0.0;
        c.push(acc);
        for v in &self.c {
            acc += v / n as f64;
            c.push(acc);
        }

        Bezier { c }
    }

    /// Returns the `k`-th forward difference of the coefficients.
    pub fn forward_difference(&self, k: usize) -> Bezier {
        let mut c = self.c.clone();
        for _ in 0..k {
            if c.len() <= 1 {
                return Bezier::constant(0.0);
            }
            c = c.windows(2).map(|w| w[1] - w[0]).collect();
        }

        Bezier { c }
    }

    /// Product of two Bézier polynomials. The order of the result is the sum of the orders.
    pub fn multiply(&self, other: &Bezier) -> Bezier {
        let m = self.order();
        let n = other.order();
        let mut c = vec![0.0; m + n + 1];
        for (i, a) in self.c.iter().enumerate() {
            let bi = binomial(m, i);
            for (j, b) in other.c.iter().enumerate() {
                c[i + j] += bi * binomial(n, j) * a * b;
            }
        }
        for (k, v) in c.iter_mut().enumerate() {
            *v /= binomial(m + n, k);
        }

        Bezier { c }
    }

    /// Returns `self(inner(t))`.
    pub fn compose(&self, inner: &Bezier) -> Bezier {
        let order = self.order() * inner.order();
        self.to_sbasis()
            .compose(&inner.to_sbasis())
            .to_bezier_degree(order)
    }

    /// Smallest interval containing the control coefficients.
    pub fn bounds_fast(&self) -> Interval {
        let mut result = Interval::from_value(self.c[0]);
        for v in &self.c[1..] {
            result.expand_to(*v);
        }

        result
    }

    /// Smallest interval containing the values of the polynomial over `[0, 1]`.
    pub fn bounds_exact(&self) -> Interval {
        let mut result = Interval::new(self.at0(), self.at1());
        for t in self.derivative().roots() {
            result.expand_to(self.value_at(t));
        }

        result
    }

    /// Conservative bounds of the polynomial over a sub-interval of `[0, 1]`.
    pub fn bounds_local(&self, interval: &Interval) -> Interval {
        self.portion(interval.min(), interval.max()).bounds_fast()
    }

    /// Roots in `[0, 1]`, in increasing order.
    pub fn roots(&self) -> Vec<f64> {
        self.roots_with(&SolverOptions::DEFAULT)
    }

    pub fn roots_with(&self, options: &SolverOptions) -> Vec<f64> {
        let mut roots = Vec::new();
        bernstein_roots(&self.c, options, &mut roots);
        roots
    }

    /// Parameters in `[0, 1]` where the polynomial equals `level`.
    pub fn roots_at(&self, level: f64) -> Vec<f64> {
        (self - level).roots()
    }

    /// Roots in an arbitrary interval, which may extend beyond `[0, 1]`.
    pub fn roots_in(&self, interval: &Interval) -> Vec<f64> {
        if interval.is_singular() {
            let t = interval.min();
            return if self.value_at(t) == 0.0 {
                vec![t]
            } else {
                Vec::new()
            };
        }

        self.portion(interval.min(), interval.max())
            .roots()
            .into_iter()
            .map(|t| interval.value_at(t))
            .collect()
    }

    /// Converts to the symmetric power basis.
    ///
    /// This is an exact change of basis: converting back with `to_bezier_degree(self.order())`
    /// reproduces the coefficients up to floating point round-off.
    pub fn to_sbasis(&self) -> SBasis {
        let mut w = self.c.clone();
        let mut n = self.order();
        let mut terms = Vec::with_capacity(n / 2 + 1);
        loop {
            if n == 0 {
                terms.push(Linear::constant(w[0]));
                break;
            }

            let (a0, a1) = (w[0], w[n]);
            terms.push(Linear::new(a0, a1));
            if n == 1 {
                break;
            }

            // Remove the linear part and divide the remainder, which vanishes at both
            // ends, by t(1 - t).
            let mut next = Vec::with_capacity(n - 1);
            for i in 1..n {
                let remainder = w[i] - lerp(i as f64 / n as f64, a0, a1);
                next.push(remainder * binomial(n, i) / binomial(n - 2, i - 1));
            }
            w = next;
            n -= 2;
        }

        SBasis::from_terms(terms)
    }

    fn elevate_pair(a: &Bezier, b: &Bezier) -> (Bezier, Bezier) {
        let order = a.order().max(b.order());
        (a.elevate_to_degree(order), b.elevate_to_degree(order))
    }
}

impl Index<usize> for Bezier {
    type Output = f64;
    #[inline]
    fn index(&self, idx: usize) -> &f64 {
        &self.c[idx]
    }
}

impl IndexMut<usize> for Bezier {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut f64 {
        &mut self.c[idx]
    }
}

impl<'l> Add<&'l Bezier> for &'l Bezier {
    type Output = Bezier;
    fn add(self, other: &Bezier) -> Bezier {
        let (a, b) = Bezier::elevate_pair(self, other);
        Bezier {
            c: a.c.iter().zip(&b.c).map(|(x, y)| x + y).collect(),
        }
    }
}

impl<'l> Sub<&'l Bezier> for &'l Bezier {
    type Output = Bezier;
    fn sub(self, other: &Bezier) -> Bezier {
        let (a, b) = Bezier::elevate_pair(self, other);
        Bezier {
            c: a.c.iter().zip(&b.c).map(|(x, y)| x - y).collect(),
        }
    }
}

impl Add for Bezier {
    type Output = Bezier;
    fn add(self, other: Bezier) -> Bezier {
        &self + &other
    }
}

impl Sub for Bezier {
    type Output = Bezier;
    fn sub(self, other: Bezier) -> Bezier {
        &self - &other
    }
}

impl<'l> Mul<&'l Bezier> for &'l Bezier {
    type Output = Bezier;
    fn mul(self, other: &Bezier) -> Bezier {
        self.multiply(other)
    }
}

impl Mul for Bezier {
    type Output = Bezier;
    fn mul(self, other: Bezier) -> Bezier {
        self.multiply(&other)
    }
}

impl<'l> Add<f64> for &'l Bezier {
    type Output = Bezier;
    fn add(self, v: f64) -> Bezier {
        Bezier {
            c: self.c.iter().map(|c| c + v).collect(),
        }
    }
}

impl<'l> Sub<f64> for &'l Bezier {
    type Output = Bezier;
    fn sub(self, v: f64) -> Bezier {
        self + (-v)
    }
}

impl<'l> Mul<f64> for &'l Bezier {
    type Output = Bezier;
    fn mul(self, v: f64) -> Bezier {
        Bezier {
            c: self.c.iter().map(|c| c * v).collect(),
        }
    }
}

impl<'l> Div<f64> for &'l Bezier {
    type Output = Bezier;
    fn div(self, v: f64) -> Bezier {
        Bezier {
            c: self.c.iter().map(|c| c / v).collect(),
        }
    }
}

impl Add<f64> for Bezier {
    type Output = Bezier;
    fn add(self, v: f64) -> Bezier {
        &self + v
    }
}

impl Sub<f64> for Bezier {
    type Output = Bezier;
    fn sub(self, v: f64) -> Bezier {
        &self - v
    }
}

impl Mul<f64> for Bezier {
    type Output = Bezier;
    fn mul(self, v: f64) -> Bezier {
        &self * v
    }
}

impl Div<f64> for Bezier {
    type Output = Bezier;
    fn div(self, v: f64) -> Bezier {
        &self / v
    }
}

impl<'l> Neg for &'l Bezier {
    type Output = Bezier;
    fn neg(self) -> Bezier {
        self * -1.0
    }
}

impl Neg for Bezier {
    type Output = Bezier;
    fn neg(self) -> Bezier {
        &self * -1.0
    }
}

impl From<&SBasis> for Bezier {
    fn from(sb: &SBasis) -> Self {
        sb.to_bezier()
    }
}

#[cfg(test)]
fn wiggle() -> Bezier {
    Bezier::new(vec![0.0, 1.0, -2.0, 3.0])
}

#[cfg(test)]
fn hump() -> Bezier {
    Bezier::new(vec![0.0, 1.0, 0.0])
}

#[cfg(test)]
fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-10, "{} != {}", a, b);
}

#[cfg(test)]
fn samples() -> impl Iterator<Item = f64> {
    (0..=10).map(|i| i as f64 / 10.0)
}

#[test]
fn basics() {
    let b = Bezier::new(vec![1.0, 2.0, 3.0]);
    assert_eq!(b.order(), 2);
    assert_eq!(b.at0(), 1.0);
    assert_eq!(b.at1(), 3.0);
    assert_eq!(b.value_at(0.0), 1.0);
    assert_eq!(b.value_at(1.0), 3.0);
    assert_close(b.value_at(0.5), 2.0);

    assert_eq!(Bezier::new(Vec::new()), Bezier::constant(0.0));
    assert_eq!(Bezier::with_order(3).len(), 4);
    assert!(Bezier::with_order(3).is_zero(0.0));
    assert!(Bezier::new(vec![2.0, 2.0, 2.0]).is_constant(0.0));
}

#[test]
fn wiggle_values() {
    let w = wiggle();
    assert_eq!(w.value_at(0.5), 0.0);
    let d = w.value_and_derivatives(0.5, 5);
    let expected = [0.0, 0.0, 12.0, 72.0, 0.0, 0.0];
    assert_eq!(d.len(), expected.len());
    for (a, b) in d.iter().zip(&expected) {
        assert_close(*a, *b);
    }
}

#[test]
fn wiggle_roots() {
    assert_eq!(wiggle().roots(), vec![0.0, 0.5, 0.5]);
}

#[test]
fn product_roots() {
    let roots = [0.1, 0.35, 0.5, 0.8];
    let mut product = Bezier::constant(1.0);
    for r in &roots {
        product = product.multiply(&Bezier::new(vec![-r, 1.0 - r]));
    }
    assert_eq!(product.order(), roots.len());

    let found = product.roots();
    assert_eq!(found.len(), roots.len());
    for (a, b) in found.iter().zip(&roots) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }
}

#[test]
fn roots_at_level() {
    let b = Bezier::new(vec![0.0, 1.0]);
    assert_eq!(b.roots_at(0.25), vec![0.25]);
    assert!(b.roots_at(2.0).is_empty());
}

#[test]
fn roots_outside_the_unit_interval() {
    let b = Bezier::new(vec![-2.0, -1.0]); // t - 2
    assert!(b.roots().is_empty());
    let roots = b.roots_in(&Interval::new(0.0, 4.0));
    assert_eq!(roots.len(), 1);
    assert_close(roots[0], 2.0);
}

#[test]
fn multiplication_is_pointwise() {
    let a = wiggle();
    let b = hump();
    let p = &a * &b;
    assert_eq!(p.order(), 5);
    for t in samples() {
        assert_close(p.value_at(t), a.value_at(t) * b.value_at(t));
    }
}

#[test]
fn addition_elevates() {
    let a = wiggle();
    let b = hump();
    let sum = &a + &b;
    let diff = &a - &b;
    assert_eq!(sum.order(), 3);
    for t in samples() {
        assert_close(sum.value_at(t), a.value_at(t) + b.value_at(t));
        assert_close(diff.value_at(t), a.value_at(t) - b.value_at(t));
        assert_close((-&a).value_at(t), -a.value_at(t));
        assert_close((&a * 3.0).value_at(t), a.value_at(t) * 3.0);
    }
}

#[test]
fn subdivide_and_portion() {
    let w = wiggle();
    let (left, right) = w.subdivide(0.3);
    for t in samples() {
        assert_close(left.value_at(t), w.value_at(0.3 * t));
        assert_close(right.value_at(t), w.value_at(0.3 + 0.7 * t));
    }

    let p = w.portion(0.2, 0.7);
    assert_eq!(p.at0(), w.value_at(0.2));
    assert_eq!(p.at1(), w.value_at(0.7));
    for t in samples() {
        assert_close(p.value_at(t), w.value_at(0.2 + 0.5 * t));
    }

    let reversed = w.portion(0.7, 0.2);
    for t in samples() {
        assert_close(reversed.value_at(t), w.value_at(0.7 - 0.5 * t));
    }
}

#[test]
fn degree_elevation_and_reduction() {
    let w = wiggle();
    let e = w.elevate_degree();
    assert_eq!(e.order(), 4);
    for t in samples() {
        assert_close(e.value_at(t), w.value_at(t));
    }

    let r = e.reduce_degree();
    assert_eq!(r.order(), 3);
    for i in 0..4 {
        assert_close(r[i], w[i]);
    }

    let e5 = w.elevate_to_degree(6);
    assert_eq!(e5.order(), 6);
    for t in samples() {
        assert_close(e5.value_at(t), w.value_at(t));
    }
}

#[test]
fn deflation() {
    let b = Bezier::new(vec![0.0, 2.0, 1.0, 3.0]);
    let d = b.deflate();
    assert_eq!(d.order(), 2);
    for t in samples().skip(1) {
        assert_close(d.value_at(t), b.value_at(t) / t);
    }
}

#[test]
fn calculus() {
    let w = wiggle();
    let d = w.derivative();
    let i = d.integral();
    for t in samples() {
        // The integral starts at zero, like the wiggle.
        assert_close(i.value_at(t), w.value_at(t));
    }
    assert_eq!(Bezier::constant(4.0).derivative(), Bezier::constant(0.0));

    let f = w.forward_difference(1);
    assert_eq!(f.coefficients(), &[1.0, -3.0, 5.0]);
}

#[test]
fn hump_bounds() {
    let h = hump();
    let exact = h.bounds_exact();
    assert_eq!(exact.min(), 0.0);
    assert_close(exact.max(), 0.5);
    assert_eq!(h.bounds_fast(), Interval::new(0.0, 1.0));

    let local = h.bounds_local(&Interval::new(0.3, 0.6));
    let lower = h.value_at(0.3).min(h.value_at(0.6));
    assert!(local.min() <= lower + 1e-12);
    assert!(local.max() >= h.value_at(0.5) - 1e-12);
}

#[test]
fn sbasis_round_trip() {
    let cases = vec![
        wiggle(),
        hump(),
        Bezier::new(vec![0.0, 2.0, 4.0, 5.0]),
        Bezier::new(vec![1.0, -3.0, 2.5, 0.0, 7.0]),
        Bezier::constant(3.0),
        Bezier::new(vec![2.0, -1.0]),
    ];
    for b in cases {
        let sb = b.to_sbasis();
        for t in samples() {
            assert_close(sb.value_at(t), b.value_at(t));
        }
        let back = sb.to_bezier_degree(b.order());
        assert_eq!(back.order(), b.order());
        for i in 0..b.len() {
            assert_close(back[i], b[i]);
        }
    }
}

#[test]
fn composition() {
    let a = wiggle();
    let b = hump();
    let c = a.compose(&b);
    for t in samples() {
        assert_close(c.value_at(t), a.value_at(b.value_at(t)));
    }
}
