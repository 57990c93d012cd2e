use arrayvec::ArrayVec;
use core::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

#[inline]
pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The smallest and largest of a set of values.
#[inline]
pub fn hull(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[inline]
pub fn box_from_ranges(x: (f64, f64), y: (f64, f64)) -> crate::Box2D {
    crate::Box2D {
        min: crate::point(x.0, y.0),
        max: crate::point(x.1, y.1),
    }
}

/// Wraps an angle in radians into `[0, 2π)`.
#[inline]
pub fn normalize_angle(a: f64) -> f64 {
    let r = a % TWO_PI;
    if r < 0.0 {
        r + TWO_PI
    } else {
        r
    }
}

/// Signed angle from `a` to `b`, in `(-π, π]`.
#[inline]
pub fn directed_angle(a: crate::Vector, b: crate::Vector) -> f64 {
    let angle = b.y.atan2(b.x) - a.y.atan2(a.x);
    if angle > PI {
        angle - TWO_PI
    } else if angle <= -PI {
        angle + TWO_PI
    } else {
        angle
    }
}

/// Real roots of `a * t² + b * t + c`, in increasing order.
pub fn quadratic_polynomial_roots(a: f64, b: f64, c: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();

    if a.abs() < 1e-12 {
        if b.abs() > 1e-12 {
            result.push(-c / b);
        }
        return result;
    }

    let delta = b * b - 4.0 * a * c;
    if delta > 0.0 {
        // Avoids cancellation between -b and the square root.
        let sqrt_delta = delta.sqrt();
        let q = -0.5 * (b + b.signum() * sqrt_delta);
        let (r0, r1) = if q == 0.0 {
            (0.0, 0.0)
        } else {
            (q / a, c / q)
        };
        let (r0, r1) = min_max(r0, r1);
        result.push(r0);
        result.push(r1);
    } else if delta == 0.0 {
        result.push(-b / (2.0 * a));
    }

    result
}

/// Real roots of `a * t³ + b * t² + c * t + d`.
///
/// Falls back to the quadratic formula when `a` is close to zero.
pub fn cubic_polynomial_roots(a: f64, b: f64, c: f64, d: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();

    if a.abs() < 1e-12 {
        for root in quadratic_polynomial_roots(b, c, d) {
            result.push(root);
        }
        return result;
    }

    let frac_1_3 = 1.0 / 3.0;

    let bn = b / a;
    let cn = c / a;
    let dn = d / a;

    let delta0 = (3.0 * cn - bn * bn) / 9.0;
    let delta1 = (9.0 * bn * cn - 27.0 * dn - 2.0 * bn * bn * bn) / 54.0;
    let delta_01 = delta0 * delta0 * delta0 + delta1 * delta1;

    if delta_01 >= 0.0 {
        let delta_p_sqrt = delta1 + delta_01.sqrt();
        let delta_m_sqrt = delta1 - delta_01.sqrt();

        let s = delta_p_sqrt.signum() * delta_p_sqrt.abs().powf(frac_1_3);
        let t = delta_m_sqrt.signum() * delta_m_sqrt.abs().powf(frac_1_3);

        result.push(-bn * frac_1_3 + (s + t));

        if (s - t).abs() < 1e-5 && (s + t).abs() >= 1e-5 {
            result.push(-bn * frac_1_3 - (s + t) / 2.0);
        }
    } else {
        let theta = (delta1 / (-delta0 * delta0 * delta0).sqrt()).acos();
        let two_sqrt_delta0 = 2.0 * (-delta0).sqrt();
        result.push(two_sqrt_delta0 * (theta * frac_1_3).cos() - bn * frac_1_3);
        result.push(two_sqrt_delta0 * ((theta + 2.0 * PI) * frac_1_3).cos() - bn * frac_1_3);
        result.push(two_sqrt_delta0 * ((theta + 4.0 * PI) * frac_1_3).cos() - bn * frac_1_3);
    }

    result
}

#[test]
fn cubic_polynomial() {
    fn assert_approx_eq(a: ArrayVec<f64, 3>, b: &[f64], epsilon: f64) {
        let mut a = a;
        a.sort_by(|x, y| x.partial_cmp(y).unwrap());
        for i in 0..a.len() {
            if (a[i] - b[i]).abs() > epsilon {
                println!("{:?} != {:?}", a, b);
            }
            assert!((a[i] - b[i]).abs() <= epsilon);
        }
        assert_eq!(a.len(), b.len());
    }

    assert_approx_eq(cubic_polynomial_roots(2.0, -4.0, 2.0, 0.0), &[0.0, 1.0], 0.0000001);
    assert_approx_eq(cubic_polynomial_roots(-1.0, 1.0, -1.0, 1.0), &[1.0], 0.000001);
    assert_approx_eq(cubic_polynomial_roots(-2.0, 2.0, -1.0, 10.0), &[2.0], 0.00005);
    // (t - 1)(t - 2)(t - 3)
    assert_approx_eq(cubic_polynomial_roots(1.0, -6.0, 11.0, -6.0), &[1.0, 2.0, 3.0], 1e-9);
    // Degenerates to 2t² - 2 = 0.
    assert_approx_eq(cubic_polynomial_roots(0.0, 2.0, 0.0, -2.0), &[-1.0, 1.0], 1e-12);
}

#[test]
fn quadratic_polynomial() {
    let roots = quadratic_polynomial_roots(1.0, -3.0, 2.0);
    assert_eq!(roots.as_slice(), &[1.0, 2.0]);
    assert_eq!(quadratic_polynomial_roots(1.0, 0.0, 1.0).len(), 0);
    assert_eq!(quadratic_polynomial_roots(0.0, 2.0, -1.0).as_slice(), &[0.5]);
    assert_eq!(quadratic_polynomial_roots(1.0, -2.0, 1.0).as_slice(), &[1.0]);
}

#[test]
fn ranges() {
    assert_eq!(hull(&[3.0, -1.0, 2.0]), (-1.0, 3.0));
    let b = box_from_ranges((0.0, 1.0), (-2.0, 2.0));
    assert_eq!(b.min, crate::point(0.0, -2.0));
    assert_eq!(b.max, crate::point(1.0, 2.0));
}

#[test]
fn angles() {
    use crate::vector;
    assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
    assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
    let a = directed_angle(vector(1.0, 0.0), vector(0.0, 1.0));
    assert!((a - PI / 2.0).abs() < 1e-12);
    let b = directed_angle(vector(0.0, 1.0), vector(1.0, 0.0));
    assert!((b + PI / 2.0).abs() < 1e-12);
}
