//! Root isolation for polynomials in Bernstein form.
//!
//! The solver relies on the variation diminishing property of the Bernstein basis: the
//! number of sign changes in the control coefficients bounds the number of roots in the
//! unit interval. Ranges with a single sign change contain exactly one root, which is
//! refined with the Illinois variant of regula falsi. Ranges with more sign changes are
//! subdivided until they split or until the maximum depth is reached.

use crate::bezier::{bernstein_value_at, casteljau_subdivision};

/// Parameters of the root finder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct SolverOptions {
    /// Maximum number of subdivisions before clustered roots are reported at the
    /// middle of the remaining range.
    ///
    /// Default value: `SolverOptions::DEFAULT_MAX_DEPTH`.
    pub max_depth: u32,

    /// Parameter precision of the refinement of isolated roots.
    ///
    /// Default value: `SolverOptions::DEFAULT_EPSILON`.
    pub epsilon: f64,
}

impl SolverOptions {
    /// Default maximum subdivision depth.
    pub const DEFAULT_MAX_DEPTH: u32 = 48;

    /// Default parameter precision.
    pub const DEFAULT_EPSILON: f64 = 1e-14;

    pub const DEFAULT: Self = SolverOptions {
        max_depth: Self::DEFAULT_MAX_DEPTH,
        epsilon: Self::DEFAULT_EPSILON,
    };

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const MAX_REFINE_ITERATIONS: u32 = 128;

/// Appends the roots in `[0, 1]` of the polynomial with the given Bernstein coefficients.
///
/// The roots are appended in increasing order. Roots with multiplicity are repeated.
pub(crate) fn bernstein_roots(coefficients: &[f64], options: &SolverOptions, roots: &mut Vec<f64>) {
    if coefficients.iter().all(|c| *c == 0.0) {
        log::debug!("identically zero polynomial, no isolated roots");
        return;
    }

    let start = roots.len();
    let mut w = coefficients.to_vec();

    while w.len() > 1 && w[0] == 0.0 {
        roots.push(0.0);
        deflate_start(&mut w);
    }

    let mut roots_at_end = 0;
    while w.len() > 1 && w[w.len() - 1] == 0.0 {
        roots_at_end += 1;
        deflate_end(&mut w);
    }

    if w.len() > 1 {
        solve_range(&w, 0.0, 1.0, 0, options, roots);
    }

    for _ in 0..roots_at_end {
        roots.push(1.0);
    }

    roots[start..].sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
}

/// Divides the polynomial by `t`, assuming its first coefficient is zero.
pub(crate) fn deflate_start(w: &mut Vec<f64>) {
    let n = w.len() - 1;
    for i in 0..n {
        w[i] = n as f64 * w[i + 1] / (i + 1) as f64;
    }
    w.pop();
}

/// Divides the polynomial by `1 - t`, assuming its last coefficient is zero.
pub(crate) fn deflate_end(w: &mut Vec<f64>) {
    w.reverse();
    deflate_start(w);
    w.reverse();
}

fn sign_changes(w: &[f64]) -> usize {
    let mut changes = 0;
    let mut prev = 0.0;
    for &v in w {
        if v == 0.0 {
            continue;
        }
        if prev != 0.0 && (v > 0.0) != (prev > 0.0) {
            changes += 1;
        }
        prev = v;
    }

    changes
}

fn solve_range(
    w: &[f64],
    left: f64,
    right: f64,
    depth: u32,
    options: &SolverOptions,
    roots: &mut Vec<f64>,
) {
    let changes = sign_changes(w);
    if changes == 0 {
        return;
    }

    if changes == 1 {
        let t = refine_single_root(w, options.epsilon);
        roots.push(left + (right - left) * t);
        return;
    }

    let mid = (left + right) * 0.5;
    if depth >= options.max_depth {
        log::trace!(
            "root solver reached depth {} with {} sign changes around {}",
            depth,
            changes,
            mid
        );
        for _ in 0..changes {
            roots.push(mid);
        }
        return;
    }

    let (mut l, mut r) = casteljau_subdivision(w, 0.5);

    // The split point itself may be a root of any multiplicity.
    while r.len() > 1 && r[0] == 0.0 {
        roots.push(mid);
        deflate_start(&mut r);
        if l.len() > 1 {
            deflate_end(&mut l);
        }
    }

    solve_range(&l, left, mid, depth + 1, options, roots);
    solve_range(&r, mid, right, depth + 1, options, roots);
}

// Illinois algorithm on [0, 1], where the end values have opposite signs.
fn refine_single_root(w: &[f64], epsilon: f64) -> f64 {
    let n = w.len() - 1;
    let (mut s, mut t) = (0.0, 1.0);
    let (mut fs, mut ft) = (w[0], w[n]);
    if fs == 0.0 {
        return s;
    }
    if ft == 0.0 {
        return t;
    }

    let mut side = 0;
    let mut r = f64::NAN;
    for _ in 0..MAX_REFINE_ITERATIONS {
        let prev = r;
        r = (s * ft - t * fs) / (ft - fs);
        if !r.is_finite() {
            r = (s + t) * 0.5;
        }

        let fr = bernstein_value_at(w, r);
        if fr == 0.0 {
            return r;
        }

        if fr * ft > 0.0 {
            t = r;
            ft = fr;
            if side == -1 {
                fs *= 0.5;
            }
            side = -1;
        } else {
            s = r;
            fs = fr;
            if side == 1 {
                ft *= 0.5;
            }
            side = 1;
        }

        if (t - s).abs() <= epsilon || (r - prev).abs() <= epsilon * 0.5 {
            break;
        }
    }

    r
}

#[cfg(test)]
fn find(coefficients: &[f64]) -> Vec<f64> {
    let mut roots = Vec::new();
    bernstein_roots(coefficients, &SolverOptions::DEFAULT, &mut roots);
    roots
}

#[test]
fn simple_root() {
    let roots = find(&[-1.0, 1.0]);
    assert_eq!(roots, vec![0.5]);
}

#[test]
fn no_root() {
    assert!(find(&[1.0, 2.0, 0.5, 3.0]).is_empty());
}

#[test]
fn zero_polynomial_has_no_isolated_roots() {
    crate::init_test_logger();
    assert!(find(&[0.0, 0.0, 0.0]).is_empty());
}

#[test]
fn roots_at_the_ends_are_deflated() {
    // t * (1 - t)
    let roots = find(&[0.0, 0.5, 0.0]);
    assert_eq!(roots, vec![0.0, 1.0]);
}

#[test]
fn double_root_at_split_point() {
    // 3t(1-2t)² has a simple root at 0 and a double root at 0.5.
    let roots = find(&[0.0, 1.0, -2.0, 3.0]);
    assert_eq!(roots, vec![0.0, 0.5, 0.5]);
}

#[test]
fn three_separated_roots() {
    // (t - 0.2)(t - 0.6)(t - 0.9) expressed in the Bernstein basis.
    let p = |t: f64| (t - 0.2) * (t - 0.6) * (t - 0.9);
    // Power basis: t³ - 1.7t² + 0.84t - 0.108
    let (a, b, c, d) = (1.0, -1.7, 0.84, -0.108);
    let w = [d, d + c / 3.0, d + 2.0 * c / 3.0 + b / 3.0, a + b + c + d];
    let roots = find(&w);
    assert_eq!(roots.len(), 3);
    for (r, expected) in roots.iter().zip(&[0.2, 0.6, 0.9]) {
        assert!((r - expected).abs() < 1e-10, "{} != {}", r, expected);
        assert!(p(*r).abs() < 1e-12);
    }
}

#[test]
fn solver_options_builder() {
    let options = SolverOptions::DEFAULT.with_max_depth(10).with_epsilon(1e-6);
    assert_eq!(options.max_depth, 10);
    assert_eq!(options.epsilon, 1e-6);
    assert_eq!(SolverOptions::default(), SolverOptions::DEFAULT);
}
