use crate::roots::SolverOptions;
use crate::utils::{binomial, lerp};
use crate::{Bezier, Interval, Linear};

use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A polynomial over `[0, 1]` in the symmetric power basis.
///
/// ```text
/// ∀ t ∈ [0..1],  P(t) = Σ sᵏ * ((1 - t) * a[k][0] + t * a[k][1]),  with s = t * (1 - t)
/// ```
///
/// Each level is a [`Linear`] term. Trailing zero terms are insignificant: two polynomials
/// compare equal if they only differ by such terms. An empty `SBasis` is the zero
/// polynomial.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SBasis {
    terms: Vec<Linear>,
}

/// Maximum subdivision depth of `level_set`.
const LEVEL_SET_MAX_DEPTH: u32 = 24;

impl SBasis {
    /// The zero polynomial.
    #[inline]
    pub fn new() -> Self {
        SBasis { terms: Vec::new() }
    }

    #[inline]
    pub fn constant(c: f64) -> Self {
        SBasis {
            terms: vec![Linear::constant(c)],
        }
    }

    #[inline]
    pub fn from_linear(l: Linear) -> Self {
        SBasis { terms: vec![l] }
    }

    #[inline]
    pub fn from_terms(terms: Vec<Linear>) -> Self {
        SBasis { terms }
    }

    /// The identity polynomial `P(t) = t`.
    #[inline]
    pub fn identity() -> Self {
        SBasis::from_linear(Linear::new(0.0, 1.0))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn terms(&self) -> &[Linear] {
        &self.terms
    }

    #[inline]
    pub fn push(&mut self, term: Linear) {
        self.terms.push(term);
    }

    #[inline]
    pub fn degrees_of_freedom(&self) -> usize {
        self.terms.len() * 2
    }

    #[inline]
    pub fn at0(&self) -> f64 {
        self.terms.first().map_or(0.0, |t| t[0])
    }

    #[inline]
    pub fn at1(&self) -> f64 {
        self.terms.first().map_or(0.0, |t| t[1])
    }

    /// Evaluates the polynomial. `t` may lie outside of `[0, 1]`.
    pub fn value_at(&self, t: f64) -> f64 {
        let s = t * (1.0 - t);
        let mut p0 = 0.0;
        let mut p1 = 0.0;
        for term in self.terms.iter().rev() {
            p0 = p0 * s + term[0];
            p1 = p1 * s + term[1];
        }

        (1.0 - t) * p0 + t * p1
    }

    /// Returns the value and the first `n` derivatives at `t`.
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

    /// Returns true if every coefficient is within `eps` of zero.
    pub fn is_zero(&self, eps: f64) -> bool {
        self.terms.iter().all(|t| t.is_zero(eps))
    }

    /// Returns true if the polynomial is constant, up to `eps` per coefficient.
    pub fn is_constant(&self, eps: f64) -> bool {
        match self.terms.split_first() {
            None => true,
            Some((first, rest)) => first.is_constant(eps) && rest.iter().all(|t| t.is_zero(eps)),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.terms.iter().all(|t| t.is_finite())
    }

    /// Removes trailing zero terms.
    pub fn normalize(&mut self) {
        while let Some(last) = self.terms.last() {
            if last[0] == 0.0 && last[1] == 0.0 {
                self.terms.pop();
            } else {
                break;
            }
        }
    }

    pub fn normalized(&self) -> SBasis {
        let mut result = self.clone();
        result.normalize();
        result
    }

    /// Keeps at most the first `k` terms.
    pub fn truncate(&mut self, k: usize) {
        self.terms.truncate(k);
    }

    pub fn truncated(&self, k: usize) -> SBasis {
        SBasis {
            terms: self.terms.iter().take(k).cloned().collect(),
        }
    }

    /// Multiplies by `sⁿ`, where `s = t(1 - t)`.
    pub fn shift(&self, n: usize) -> SBasis {
        let mut terms = vec![Linear::ZERO; n];
        terms.extend_from_slice(&self.terms);
        SBasis { terms }
    }

    /// Upper bound of the magnitude of the terms at and beyond level `k`.
    pub fn tail_error(&self, k: usize) -> f64 {
        let b = self.bounds_fast(k);
        b.min().abs().max(b.max().abs())
    }

    /// Returns `P(1 - t)`.
    pub fn reverse(&self) -> SBasis {
        SBasis {
            terms: self.terms.iter().map(|t| t.reverse()).collect(),
        }
    }

    /// Product of two polynomials.
    pub fn multiply(&self, other: &SBasis) -> SBasis {
        if self.is_empty() || other.is_empty() {
            return SBasis::new();
        }

        let a = &self.terms;
        let b = &other.terms;
        let mut c = vec![Linear::ZERO; a.len() + b.len()];
        for j in 0..b.len() {
            for i in j..(a.len() + j) {
                let tri = b[j].tri() * a[i - j].tri();
                c[i + 1] += Linear::constant(-tri);
            }
        }
        for j in 0..b.len() {
            for i in j..(a.len() + j) {
                c[i][0] += b[j][0] * a[i - j][0];
                c[i][1] += b[j][1] * a[i - j][1];
            }
        }

        let mut result = SBasis { terms: c };
        result.normalize();
        result
    }

    /// Returns `self * b + c`.
    pub fn multiply_add(&self, b: &SBasis, c: &SBasis) -> SBasis {
        &self.multiply(b) + c
    }

    /// The derivative of the polynomial.
    pub fn derivative(&self) -> SBasis {
        let a = &self.terms;
        let mut c = vec![Linear::ZERO; a.len()];
        for k in 0..a.len() {
            let d = (2 * k + 1) as f64 * a[k].tri();
            c[k] = Linear::constant(d);
            if k + 1 < a.len() {
                let kf = (k + 1) as f64;
                c[k][0] = d + kf * a[k + 1][0];
                c[k][1] = d - kf * a[k + 1][1];
            }
        }

        let mut result = SBasis { terms: c };
        result.normalize();
        result
    }

    /// An antiderivative of the polynomial.
    ///
    /// The derivative of the result is exactly `self`. The integration constant is chosen
    /// so that the result is centered rather than zero at `t = 0`.
    pub fn integral(&self) -> SBasis {
        let c = &self.terms;
        let mut a = vec![Linear::ZERO; c.len() + 1];
        for k in 1..=c.len() {
            let ahat = -c[k - 1].tri() / (2 * k) as f64;
            a[k] = Linear::constant(ahat);
        }

        let mut a_tri = 0.0;
        for k in (0..c.len()).rev() {
            a_tri = (c[k].hat() + (k + 1) as f64 * a_tri / 2.0) / (2 * k + 1) as f64;
            a[k][0] -= a_tri / 2.0;
            a[k][1] += a_tri / 2.0;
        }

        let mut result = SBasis { terms: a };
        result.normalize();
        result
    }

    /// Returns the polynomial `self(inner(t))`.
    pub fn compose(&self, inner: &SBasis) -> SBasis {
        let one_minus = &SBasis::constant(1.0) - inner;
        let s = one_minus.multiply(inner);
        let mut r = SBasis::new();
        for term in self.terms.iter().rev() {
            let linear_part = &(&one_minus * term[0]) + &(inner * term[1]);
            r = &linear_part + &r.multiply(&s);
        }

        r.normalize();
        r
    }

    /// Same as `compose`, keeping at most `k` terms.
    pub fn compose_truncated(&self, inner: &SBasis, k: usize) -> SBasis {
        let mut r = self.compose(inner);
        r.truncate(k);
        r
    }

    /// Returns the polynomial restricted to `[from, to]` and reparametrized to `[0, 1]`.
    pub fn portion(&self, from: f64, to: f64) -> SBasis {
        let mut result = self.compose(&SBasis::from_linear(Linear::new(from, to)));
        if result.is_empty() {
            return result;
        }
        // Higher levels vanish at both ends, keep the end values bit-exact.
        result.terms[0] = Linear::new(self.value_at(from), self.value_at(to));
        result
    }

    /// Conservative bounds of the terms at and beyond level `order`, scaled by the maximum
    /// of `s^order`.
    ///
    /// With `order == 0` this bounds the whole polynomial over `[0, 1]`.
    pub fn bounds_fast(&self, order: usize) -> Interval {
        let mut lo = 0.0;
        let mut hi = 0.0;
        for term in self.terms.iter().skip(order).rev() {
            let (a, b) = (term[0], term[1]);

            let mut t = 0.0;
            if lo < 0.0 {
                t = ((b - a) / lo + 1.0) * 0.5;
            }
            if lo >= 0.0 || t < 0.0 || t > 1.0 {
                lo = a.min(b);
            } else {
                lo = lerp(t, a + lo * t, b);
            }

            if hi > 0.0 {
                t = ((b - a) / hi + 1.0) * 0.5;
            }
            if hi <= 0.0 || t < 0.0 || t > 1.0 {
                hi = a.max(b);
            } else {
                hi = lerp(t, a + hi * t, b);
            }
        }

        scale_tail(Interval::new(lo, hi), order, 0.25)
    }

    /// Exact bounds of the polynomial over `[0, 1]`, from its values at the ends and at
    /// the roots of its derivative.
    pub fn bounds_exact(&self) -> Interval {
        let mut result = Interval::new(self.at0(), self.at1());
        for t in self.derivative().roots() {
            result.expand_to(self.value_at(t));
        }

        result
    }

    /// Conservative bounds of the terms at and beyond level `order` over a sub-interval
    /// of `[0, 1]`.
    ///
    /// Tighter than `bounds_fast` for small intervals, and always contains the exact
    /// bounds of the polynomial over `interval` when `order == 0`.
    pub fn bounds_local(&self, interval: &Interval, order: usize) -> Interval {
        let (t0, t1) = (interval.min(), interval.max());
        let mut lo = 0.0;
        let mut hi = 0.0;
        for term in self.terms.iter().skip(order).rev() {
            let (a, b) = (term[0], term[1]);
            let at = |t: f64, inner: f64| a * (1.0 - t) + b * t + inner * t * (1.0 - t);

            let mut t = 0.0;
            if lo < 0.0 {
                t = ((b - a) / lo + 1.0) * 0.5;
            }
            if lo >= 0.0 || t < t0 || t > t1 {
                lo = at(t0, lo).min(at(t1, lo));
            } else {
                lo = lerp(t, a + lo * t, b);
            }

            if hi > 0.0 {
                t = ((b - a) / hi + 1.0) * 0.5;
            }
            if hi <= 0.0 || t < t0 || t > t1 {
                hi = at(t0, hi).max(at(t1, hi));
            } else {
                hi = lerp(t, a + hi * t, b);
            }
        }

        let s_max = if t0 <= 0.5 && 0.5 <= t1 {
            0.25
        } else {
            (t0 * (1.0 - t0)).max(t1 * (1.0 - t1))
        };

        scale_tail(Interval::new(lo, hi), order, s_max)
    }

    /// Roots in `[0, 1]`, in increasing order.
    pub fn roots(&self) -> Vec<f64> {
        self.roots_with(&SolverOptions::DEFAULT)
    }

    pub fn roots_with(&self, options: &SolverOptions) -> Vec<f64> {
        let normalized = self.normalized();
        if normalized.is_empty() {
            log::debug!("identically zero polynomial, no isolated roots");
            return Vec::new();
        }

        normalized.to_bezier().roots_with(options)
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

    /// Parameters in `[0, 1]` where the polynomial equals `level`.
    pub fn roots_at(&self, level: f64) -> Vec<f64> {
        (self - level).roots()
    }

    /// For each level, the parameters in `[0, 1]` where the polynomial equals it.
    pub fn multi_roots(&self, levels: &[f64]) -> Vec<Vec<f64>> {
        levels.iter().map(|level| self.roots_at(*level)).collect()
    }

    /// Sub-intervals of `[0, 1]` where the polynomial stays within `tolerance` of `level`.
    ///
    /// Unlike `roots_at`, this reports a tangency to the level as a (possibly tiny)
    /// interval. Adjacent intervals are merged.
    pub fn level_set(&self, level: f64, tolerance: f64) -> Vec<Interval> {
        let target = Interval::new(level - tolerance, level + tolerance);
        let mut result = Vec::new();
        level_set_impl(self, &target, Interval::UNIT, 0, &mut result);

        let mut merged: Vec<Interval> = Vec::with_capacity(result.len());
        for i in result {
            match merged.last_mut() {
                Some(last) if last.max() >= i.min() => *last = last.union(&i),
                _ => merged.push(i),
            }
        }

        merged
    }

    /// `level_set` for several levels at once.
    pub fn level_sets(&self, levels: &[f64], tolerance: f64) -> Vec<Vec<Interval>> {
        levels
            .iter()
            .map(|level| self.level_set(*level, tolerance))
            .collect()
    }

    /// Converts to a Bézier polynomial of the smallest order that represents this
    /// polynomial exactly.
    pub fn to_bezier(&self) -> Bezier {
        let normalized = self.normalized();
        let m = normalized.len();
        if m == 0 {
            return Bezier::constant(0.0);
        }

        let last = normalized.terms[m - 1];
        let order = if last[0] == last[1] { 2 * m - 2 } else { 2 * m - 1 };
        normalized.to_bezier_degree(order)
    }

    /// Converts to a Bézier polynomial of the given order.
    ///
    /// Terms that cannot be represented at this order are dropped.
    pub fn to_bezier_degree(&self, order: usize) -> Bezier {
        let n = order;
        let mut c = vec![0.0; n + 1];
        for (k, term) in self.terms.iter().enumerate() {
            if 2 * k + 1 <= n {
                // s^k (1 - t) and s^k t, elevated to order n.
                let m = n - 2 * k - 1;
                for j in 0..=m {
                    let bin = binomial(m, j);
                    c[k + j] += term[0] * bin / binomial(n, k + j);
                    c[k + j + 1] += term[1] * bin / binomial(n, k + j + 1);
                }
            } else if 2 * k == n {
                c[k] += term.hat() / binomial(n, k);
            }
        }

        Bezier::new(c)
    }
}

fn scale_tail(bounds: Interval, order: usize, s_max: f64) -> Interval {
    if order == 0 {
        return bounds;
    }
    let f = s_max.powi(order as i32);

    Interval::new((bounds.min() * f).min(0.0), (bounds.max() * f).max(0.0))
}

fn level_set_impl(
    sb: &SBasis,
    target: &Interval,
    domain: Interval,
    depth: u32,
    output: &mut Vec<Interval>,
) {
    let bounds = sb.bounds_local(&domain, 0);
    if !bounds.intersects(target) {
        return;
    }

    if target.contains_interval(&bounds) {
        output.push(domain);
        return;
    }

    if depth >= LEVEL_SET_MAX_DEPTH {
        if target.contains(sb.value_at(domain.middle())) {
            output.push(domain);
        }
        return;
    }

    let mid = domain.middle();
    level_set_impl(sb, target, Interval::new(domain.min(), mid), depth + 1, output);
    level_set_impl(sb, target, Interval::new(mid, domain.max()), depth + 1, output);
}

impl PartialEq for SBasis {
    fn eq(&self, other: &SBasis) -> bool {
        let n = self.len().max(other.len());
        (0..n).all(|i| {
            let a = self.terms.get(i).copied().unwrap_or(Linear::ZERO);
            let b = other.terms.get(i).copied().unwrap_or(Linear::ZERO);
            a == b
        })
    }
}

impl Index<usize> for SBasis {
    type Output = Linear;
    #[inline]
    fn index(&self, idx: usize) -> &Linear {
        &self.terms[idx]
    }
}

impl IndexMut<usize> for SBasis {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut Linear {
        &mut self.terms[idx]
    }
}

impl From<Linear> for SBasis {
    fn from(l: Linear) -> Self {
        SBasis::from_linear(l)
    }
}

impl From<&Bezier> for SBasis {
    fn from(b: &Bezier) -> Self {
        b.to_sbasis()
    }
}

impl<'l> AddAssign<&'l SBasis> for SBasis {
    fn add_assign(&mut self, other: &SBasis) {
        if other.len() > self.len() {
            self.terms.resize(other.len(), Linear::ZERO);
        }
        for (a, b) in self.terms.iter_mut().zip(&other.terms) {
            *a += *b;
        }
    }
}

impl<'l> SubAssign<&'l SBasis> for SBasis {
    fn sub_assign(&mut self, other: &SBasis) {
        if other.len() > self.len() {
            self.terms.resize(other.len(), Linear::ZERO);
        }
        for (a, b) in self.terms.iter_mut().zip(&other.terms) {
            *a -= *b;
        }
    }
}

impl<'l> Add<&'l SBasis> for &'l SBasis {
    type Output = SBasis;
    fn add(self, other: &SBasis) -> SBasis {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl<'l> Sub<&'l SBasis> for &'l SBasis {
    type Output = SBasis;
    fn sub(self, other: &SBasis) -> SBasis {
        let mut result = self.clone();
        result -= other;
        result
    }
}

impl<'l> Mul<&'l SBasis> for &'l SBasis {
    type Output = SBasis;
    fn mul(self, other: &SBasis) -> SBasis {
        self.multiply(other)
    }
}

impl Add for SBasis {
    type Output = SBasis;
    fn add(mut self, other: SBasis) -> SBasis {
        self += &other;
        self
    }
}

impl Sub for SBasis {
    type Output = SBasis;
    fn sub(mut self, other: SBasis) -> SBasis {
        self -= &other;
        self
    }
}

impl Mul for SBasis {
    type Output = SBasis;
    fn mul(self, other: SBasis) -> SBasis {
        self.multiply(&other)
    }
}

impl<'l> Neg for &'l SBasis {
    type Output = SBasis;
    fn neg(self) -> SBasis {
        SBasis {
            terms: self.terms.iter().map(|t| -*t).collect(),
        }
    }
}

impl Neg for SBasis {
    type Output = SBasis;
    fn neg(self) -> SBasis {
        -&self
    }
}

impl AddAssign<f64> for SBasis {
    fn add_assign(&mut self, v: f64) {
        if self.terms.is_empty() {
            self.terms.push(Linear::constant(v));
        } else {
            self.terms[0] = self.terms[0] + v;
        }
    }
}

impl SubAssign<f64> for SBasis {
    fn sub_assign(&mut self, v: f64) {
        *self += -v;
    }
}

impl MulAssign<f64> for SBasis {
    fn mul_assign(&mut self, v: f64) {
        for t in &mut self.terms {
            *t *= v;
        }
    }
}

impl DivAssign<f64> for SBasis {
    fn div_assign(&mut self, v: f64) {
        for t in &mut self.terms {
            *t = *t / v;
        }
    }
}

impl<'l> Add<f64> for &'l SBasis {
    type Output = SBasis;
    fn add(self, v: f64) -> SBasis {
        let mut result = self.clone();
        result += v;
        result
    }
}

impl<'l> Sub<f64> for &'l SBasis {
    type Output = SBasis;
    fn sub(self, v: f64) -> SBasis {
        let mut result = self.clone();
        result -= v;
        result
    }
}

impl<'l> Mul<f64> for &'l SBasis {
    type Output = SBasis;
    fn mul(self, v: f64) -> SBasis {
        let mut result = self.clone();
        result *= v;
        result
    }
}

impl<'l> Div<f64> for &'l SBasis {
    type Output = SBasis;
    fn div(self, v: f64) -> SBasis {
        let mut result = self.clone();
        result /= v;
        result
    }
}

impl Add<f64> for SBasis {
    type Output = SBasis;
    fn add(mut self, v: f64) -> SBasis {
        self += v;
        self
    }
}

impl Sub<f64> for SBasis {
    type Output = SBasis;
    fn sub(mut self, v: f64) -> SBasis {
        self -= v;
        self
    }
}

impl Mul<f64> for SBasis {
    type Output = SBasis;
    fn mul(mut self, v: f64) -> SBasis {
        self *= v;
        self
    }
}

impl Div<f64> for SBasis {
    type Output = SBasis;
    fn div(mut self, v: f64) -> SBasis {
        self /= v;
        self
    }
}

#[cfg(test)]
fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[cfg(test)]
fn samples() -> impl Iterator<Item = f64> {
    (0..=10).map(|i| i as f64 / 10.0)
}

#[cfg(test)]
fn wiggle() -> SBasis {
    Bezier::new(vec![0.0, 1.0, -2.0, 3.0]).to_sbasis()
}

#[cfg(test)]
fn hump() -> SBasis {
    Bezier::new(vec![0.0, 1.0, 0.0]).to_sbasis()
}

#[cfg(test)]
fn arbitrary() -> SBasis {
    SBasis::from_terms(vec![
        Linear::new(0.5, -1.0),
        Linear::new(2.0, 3.0),
        Linear::new(-1.5, 0.25),
    ])
}

#[test]
fn evaluation() {
    let p = arbitrary();
    assert_eq!(p.value_at(0.0), 0.5);
    assert_eq!(p.value_at(1.0), -1.0);
    assert_eq!(p.at0(), 0.5);
    assert_eq!(p.at1(), -1.0);

    // Direct expansion of the definition.
    for t in samples() {
        let s = t * (1.0 - t);
        let mut expected = 0.0;
        for (k, term) in p.terms().iter().enumerate() {
            expected += s.powi(k as i32) * term.value_at(t);
        }
        assert_close(p.value_at(t), expected);
    }

    assert_eq!(SBasis::new().value_at(0.3), 0.0);
    assert_eq!(SBasis::new().at1(), 0.0);
}

#[test]
fn value_and_derivatives() {
    let w = wiggle();
    let d = w.value_and_derivatives(0.5, 5);
    let expected = [0.0, 0.0, 12.0, 72.0, 0.0, 0.0];
    for (a, b) in d.iter().zip(&expected) {
        assert_close(*a, *b);
    }
    assert_eq!(d[0], w.value_at(0.5));
}

#[test]
fn product_of_linears() {
    let u = SBasis::from_linear(Linear::new(1.0, 7.0));
    let v = SBasis::from_linear(Linear::new(2.0, 8.0));
    let p = &u * &v;
    assert_eq!(p.len(), 2);
    assert_close(p.value_at(0.5), u.value_at(0.5) * v.value_at(0.5));
}

#[test]
fn product_is_pointwise() {
    let a = arbitrary();
    let b = wiggle();
    let p = a.multiply(&b);
    for t in samples() {
        assert_close(p.value_at(t), a.value_at(t) * b.value_at(t));
    }
    assert!(a.multiply(&SBasis::new()).is_empty());

    let c = hump();
    let fma = a.multiply_add(&b, &c);
    for t in samples() {
        assert_close(fma.value_at(t), a.value_at(t) * b.value_at(t) + c.value_at(t));
    }
}

#[test]
fn arithmetic() {
    let a = arbitrary();
    let b = hump();
    for t in samples() {
        assert_close((&a + &b).value_at(t), a.value_at(t) + b.value_at(t));
        assert_close((&a - &b).value_at(t), a.value_at(t) - b.value_at(t));
        assert_close((-&a).value_at(t), -a.value_at(t));
        assert_close((&a * 2.5).value_at(t), a.value_at(t) * 2.5);
        assert_close((&a / 4.0).value_at(t), a.value_at(t) / 4.0);
        assert_close((&a + 1.5).value_at(t), a.value_at(t) + 1.5);
        assert_close((&a - 1.5).value_at(t), a.value_at(t) - 1.5);
    }
}

#[test]
fn equality_ignores_trailing_zeros() {
    let mut a = arbitrary();
    let b = arbitrary();
    a.push(Linear::ZERO);
    a.push(Linear::ZERO);
    assert_eq!(a, b);
    assert_eq!(a.normalized().len(), 3);
    assert_ne!(a, hump());
    assert_eq!(SBasis::new(), SBasis::constant(0.0));
}

#[test]
fn calculus_laws() {
    for p in &[arbitrary(), wiggle(), hump(), SBasis::constant(3.0)] {
        let d = p.integral().derivative();
        for t in samples() {
            assert_close(d.value_at(t), p.value_at(t));
        }

        // The integral of the derivative only differs by a constant.
        let i = p.derivative().integral();
        let offset = p.value_at(0.0) - i.value_at(0.0);
        for t in samples() {
            assert_close(i.value_at(t) + offset, p.value_at(t));
        }
    }
}

#[test]
fn derivative_of_s() {
    // s = t(1 - t), s' = 1 - 2t
    let s = SBasis::from_terms(vec![Linear::ZERO, Linear::constant(1.0)]);
    assert_eq!(s.derivative(), SBasis::from_linear(Linear::new(1.0, -1.0)));
}

#[test]
fn composition() {
    let a = arbitrary();
    let b = wiggle();
    let c = a.compose(&b);
    for t in samples() {
        assert_close(c.value_at(t), a.value_at(b.value_at(t)));
    }

    let truncated = a.compose_truncated(&b, 2);
    assert!(truncated.len() <= 2);
}

#[test]
fn reverse_and_portion() {
    let a = arbitrary();
    let r = a.reverse();
    for t in samples() {
        assert_close(r.value_at(t), a.value_at(1.0 - t));
    }

    let p = a.portion(0.25, 0.75);
    assert_eq!(p.at0(), a.value_at(0.25));
    assert_eq!(p.at1(), a.value_at(0.75));
    for t in samples() {
        assert_close(p.value_at(t), a.value_at(0.25 + 0.5 * t));
    }
}

#[test]
fn shift_and_truncate() {
    let a = arbitrary();
    let shifted = a.shift(2);
    assert_eq!(shifted.len(), 5);
    for t in samples() {
        let s = t * (1.0 - t);
        assert_close(shifted.value_at(t), a.value_at(t) * s * s);
    }

    assert_eq!(a.truncated(1), SBasis::from_linear(Linear::new(0.5, -1.0)));
    assert_eq!(a.tail_error(a.len()), 0.0);
    assert!(a.tail_error(1) > 0.0);
}

#[test]
fn hump_bounds() {
    let h = hump();
    assert_eq!(h.len(), 2);
    let exact = h.bounds_exact();
    assert_eq!(exact.min(), 0.0);
    assert_close(exact.max(), 0.5);
    assert_eq!(h.derivative().roots(), vec![0.5]);

    let local = h.bounds_local(&Interval::new(0.3, 0.6), 0);
    let lower = h.value_at(0.3).min(h.value_at(0.6));
    assert!(local.min() <= lower + 1e-12);
    assert!(local.max() >= h.value_at(0.5) - 1e-12);
}

#[test]
fn bounds_contain_values() {
    for p in &[arbitrary(), wiggle(), hump()] {
        let fast = p.bounds_fast(0);
        let exact = p.bounds_exact();
        assert!(fast.min() <= exact.min() + 1e-12);
        assert!(fast.max() >= exact.max() - 1e-12);
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = p.value_at(t);
            assert!(exact.min() - 1e-9 <= v && v <= exact.max() + 1e-9);
        }

        let sub = Interval::new(0.2, 0.45);
        let local = p.bounds_local(&sub, 0);
        for i in 0..=20 {
            let v = p.value_at(sub.value_at(i as f64 / 20.0));
            assert!(local.min() - 1e-9 <= v && v <= local.max() + 1e-9);
        }
    }
}

#[test]
fn roots_are_valid() {
    let a = arbitrary();
    for r in a.roots() {
        assert!(a.value_at(r).abs() < 1e-9);
    }
    for r in a.roots_at(0.25) {
        assert_close(a.value_at(r), 0.25);
    }

    let w = wiggle();
    let roots = w.roots();
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0], 0.0);
    assert_close(roots[1], 0.5);
    assert_close(roots[2], 0.5);

    assert!(SBasis::new().roots().is_empty());
    assert!(SBasis::constant(0.0).roots().is_empty());
}

#[test]
fn roots_of_a_product_of_linears() {
    let expected = [0.15, 0.4, 0.75];
    let mut p = SBasis::constant(1.0);
    for r in &expected {
        p = p.multiply(&SBasis::from_linear(Linear::new(-r, 1.0 - r)));
    }
    let roots = p.roots();
    assert_eq!(roots.len(), 3);
    for (a, b) in roots.iter().zip(&expected) {
        assert_close(*a, *b);
    }

    let outside = SBasis::from_linear(Linear::new(-3.0, -2.0)); // t - 3
    assert!(outside.roots().is_empty());
    let found = outside.roots_in(&Interval::new(-1.0, 5.0));
    assert_eq!(found.len(), 1);
    assert_close(found[0], 3.0);
}

#[test]
fn multi_roots() {
    let line = SBasis::from_linear(Linear::new(0.0, 2.0));
    let roots = line.multi_roots(&[0.5, 1.0, 3.0]);
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0], vec![0.25]);
    assert_eq!(roots[1], vec![0.5]);
    assert!(roots[2].is_empty());
}

#[test]
fn level_set_of_a_tangency() {
    let h = hump();
    // The hump touches 0.5 at t = 0.5 without crossing it.
    let set = h.level_set(0.5, 1e-3);
    assert_eq!(set.len(), 1);
    assert!(set[0].contains(0.5));
    assert!(set[0].extent() < 0.2);

    // Everything below 0.6.
    let all = h.level_set(0.25, 0.35);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], Interval::UNIT);

    assert!(h.level_set(2.0, 0.1).is_empty());

    let sets = h.level_sets(&[0.0, 0.5], 1e-3);
    assert_eq!(sets.len(), 2);
    // Near zero at both ends.
    assert_eq!(sets[0].len(), 2);
}

#[test]
fn bezier_conversion() {
    let a = arbitrary();
    let b = a.to_bezier();
    assert_eq!(b.order(), 5);
    for t in samples() {
        assert_close(b.value_at(t), a.value_at(t));
    }
    let back = b.to_sbasis();
    for t in samples() {
        assert_close(back.value_at(t), a.value_at(t));
    }

    assert_eq!(hump().to_bezier().order(), 2);
    assert_eq!(SBasis::new().to_bezier(), Bezier::constant(0.0));
}
