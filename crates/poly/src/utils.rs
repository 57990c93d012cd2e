/// Binomial coefficient `n choose k` as a float.
///
/// Returns zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }

    result.round()
}

#[inline]
pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[inline]
pub(crate) fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[test]
fn binomial_coefficients() {
    assert_eq!(binomial(0, 0), 1.0);
    assert_eq!(binomial(4, 2), 6.0);
    assert_eq!(binomial(5, 0), 1.0);
    assert_eq!(binomial(5, 5), 1.0);
    assert_eq!(binomial(10, 3), 120.0);
    assert_eq!(binomial(3, 4), 0.0);
}
