//! Truncated series approximations of non-polynomial functions in the symmetric power basis.
//!
//! Each function takes a number of terms `k`. Larger values give more accurate results.

use crate::{Linear, SBasis};

const MAX_INVERSE_ITERATIONS: u32 = 32;

/// Approximates `sin(b(t))` for a linear argument.
pub fn sin(b: &Linear, k: usize) -> SBasis {
    let mut s = vec![Linear::ZERO; k + 2];
    s[0] = Linear::new(b[0].sin(), b[1].sin());
    let tr = s[0].tri();
    let mut t2 = b.tri();
    s[1] = Linear::new(b[0].cos() * t2 - tr, -b[1].cos() * t2 + tr);

    t2 *= t2;
    for i in 0..k {
        let n = (i + 1) as f64;
        let mut next = Linear::new(
            4.0 * n * s[i + 1][0] - 2.0 * s[i + 1][1],
            -2.0 * s[i + 1][0] + 4.0 * n * s[i + 1][1],
        );
        next -= s[i] * (t2 / n);
        s[i + 2] = next / (i + 2) as f64;
    }

    let mut result = SBasis::from_terms(s);
    result.normalize();
    result
}

/// Approximates `cos(b(t))` for a linear argument.
pub fn cos(b: &Linear, k: usize) -> SBasis {
    sin(&(*b + core::f64::consts::FRAC_PI_2), k)
}

/// Approximates `sqrt(a(t))`.
///
/// `a` must be positive at both ends.
pub fn sqrt(a: &SBasis, k: usize) -> SBasis {
    if a.is_zero(0.0) || k == 0 {
        return SBasis::new();
    }

    let mut c = SBasis::from_terms(vec![Linear::ZERO; k]);
    c[0] = Linear::new(a[0][0].sqrt(), a[0][1].sqrt());
    let mut r = a - &c.multiply(&c);

    let mut i = 1;
    while i <= k && i < r.len() {
        let ci = SBasis::from_linear(Linear::new(
            r[i][0] / (2.0 * c[0][0]),
            r[i][1] / (2.0 * c[0][1]),
        ));
        let ci_si = ci.shift(i);
        r -= &(&c * 2.0 + ci_si.clone()).shift(i).multiply(&ci);
        r.truncate(k + 1);
        c += &ci_si;
        if r.tail_error(i) == 0.0 {
            break;
        }
        i += 1;
    }

    c.normalize();
    c
}

/// Approximates `1 / a(t)` for a linear function that does not cross zero.
pub fn reciprocal(a: &Linear, k: usize) -> SBasis {
    let ratio = (a.tri() * a.tri()) / (-a[0] * a[1]);
    let mut ratio_k = 1.0;
    let mut terms = Vec::with_capacity(k);
    for _ in 0..k {
        terms.push(Linear::new(ratio_k / a[0], ratio_k / a[1]));
        ratio_k *= ratio;
    }

    SBasis::from_terms(terms)
}

/// Approximates `a(t) / b(t)` with `k + 1` terms.
///
/// `b` must not vanish at either end.
pub fn divide(a: &SBasis, b: &SBasis, k: usize) -> SBasis {
    if a.is_zero(0.0) {
        return SBasis::new();
    }

    let k = k + 1;
    let b0 = b.terms().first().copied().unwrap_or(Linear::ZERO);
    let mut r = a.clone();
    let mut c = SBasis::from_terms(vec![Linear::ZERO; k]);
    for i in 0..k {
        let ri = r.terms().get(i).copied().unwrap_or(Linear::ZERO);
        let ci = Linear::new(ri[0] / b0[0], ri[1] / b0[1]);
        c[i] += ci;
        r -= &SBasis::from_linear(ci).multiply(b).shift(i);
        r.truncate(k + 1);
        if r.tail_error(i) == 0.0 {
            break;
        }
    }

    c.normalize();
    c
}

/// Approximates the functional inverse of a monotone polynomial.
///
/// The input is first normalized to `f = (a - a(0)) / (a(1) - a(0))`, which maps `[0, 1]`
/// onto itself. The result `g` satisfies `f(g(u)) ≈ u`. To invert the original polynomial at
/// a value `v`, evaluate `g` at `(v - a(0)) / (a(1) - a(0))`.
///
/// The derivative of `a` must not vanish at either end.
pub fn inverse(a: &SBasis, k: usize) -> SBasis {
    let a0 = a.at0();
    let extent = a.at1() - a0;
    if extent == 0.0 {
        log::debug!("cannot invert a polynomial with equal end values");
        return SBasis::new();
    }

    let f = &(a - a0) / extent;
    let df = f.derivative();
    let identity = SBasis::identity();

    // Newton iteration on the whole function: g <- g - (f(g) - t) / f'(g).
    let mut g = identity.clone();
    let mut prev_error = f64::INFINITY;
    for _ in 0..MAX_INVERSE_ITERATIONS {
        let residual = &f.compose_truncated(&g, k + 1) - &identity;
        let error = residual.tail_error(0);
        if error <= f64::EPSILON || error >= prev_error {
            break;
        }
        prev_error = error;

        let slope = df.compose_truncated(&g, k + 1);
        g -= &divide(&residual, &slope, k);
        g.truncate(k + 1);
    }

    g.normalize();
    g
}

#[cfg(test)]
fn max_error(p: &SBasis, f: impl Fn(f64) -> f64) -> f64 {
    (0..=50)
        .map(|i| i as f64 / 50.0)
        .map(|t| (p.value_at(t) - f(t)).abs())
        .fold(0.0, f64::max)
}

#[test]
fn sine_and_cosine() {
    use core::f64::consts::PI;

    let s = sin(&Linear::new(0.0, PI), 8);
    assert!(max_error(&s, |t| (PI * t).sin()) < 1e-9);

    let c = cos(&Linear::new(0.0, PI), 8);
    assert!(max_error(&c, |t| (PI * t).cos()) < 1e-9);
}

#[test]
fn square_root() {
    // (1 + t)² = 1 + 3t - s
    let square = SBasis::from_terms(vec![Linear::new(1.0, 4.0), Linear::constant(-1.0)]);
    let exact = sqrt(&square, 4);
    assert!(max_error(&exact, |t| 1.0 + t) < 1e-12);

    let approx = sqrt(&SBasis::from_linear(Linear::new(1.0, 4.0)), 10);
    assert!(max_error(&approx, |t| (1.0 + 3.0 * t).sqrt()) < 1e-4);

    assert!(sqrt(&SBasis::new(), 4).is_empty());
}

#[test]
fn reciprocal_of_linear() {
    let r = reciprocal(&Linear::new(1.0, 2.0), 8);
    assert_eq!(r.len(), 8);
    assert!(max_error(&r, |t| 1.0 / (1.0 + t)) < 1e-6);
}

#[test]
fn division() {
    let a = SBasis::from_linear(Linear::new(1.0, 2.0));
    let b = SBasis::from_linear(Linear::new(2.0, 3.0));
    let exact = divide(&(&a * &b), &a, 4);
    assert!(max_error(&exact, |t| 2.0 + t) < 1e-12);

    let approx = divide(&SBasis::constant(1.0), &a, 8);
    assert!(max_error(&approx, |t| 1.0 / (1.0 + t)) < 1e-6);

    assert!(divide(&SBasis::new(), &a, 4).is_empty());
}

#[test]
fn functional_inverse() {
    // t - 0.2 t (1 - t) is monotone on [0, 1].
    let f = SBasis::from_terms(vec![Linear::new(0.0, 1.0), Linear::constant(-0.2)]);
    let g = inverse(&f, 8);
    assert!(max_error(&f.compose(&g), |u| u) < 1e-6);

    // The inverse is expressed over the normalized range.
    let a = &(&f * 3.0) + 2.0;
    let h = inverse(&a, 8);
    for i in 0..=10 {
        let v = 2.0 + 3.0 * i as f64 / 10.0;
        let t = h.value_at((v - 2.0) / 3.0);
        assert!((a.value_at(t) - v).abs() < 1e-5);
    }

    assert!(inverse(&SBasis::constant(1.0), 4).is_empty());
}
