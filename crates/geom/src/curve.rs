use crate::{AnyCurve, Axis, Box2D, Point, Transform, Vector, XY};
use sbgeom_poly::{Interval, SBasis};

use core::fmt;

/// Tolerance used by `length` when the caller has no better value.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 0.01;

const TANGENT_EPSILON: f64 = 1e-12;
const LENGTH_MAX_DEPTH: u32 = 16;
const LENGTH_INITIAL_SAMPLES: u32 = 4;

/// Common API of all curves, parametrized over `t ∈ [0, 1]`.
///
/// The trait is object safe. Operations that produce a new curve return an [`AnyCurve`].
///
/// Only a handful of methods must be implemented. The others default to generic
/// algorithms working on the polynomial form returned by `to_sbasis`, and implementors
/// override them where a closed form exists.
pub trait Curve: fmt::Debug {
    /// Start of the curve.
    fn initial_point(&self) -> Point;

    /// End of the curve.
    fn final_point(&self) -> Point;

    /// Sample the curve at `t`.
    fn point_at(&self, t: f64) -> Point;

    /// Sample a single coordinate of the curve at `t`.
    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        axis.of_point(self.point_at(t))
    }

    /// The position at `t` followed by the first `n` derivatives.
    ///
    /// Always returns `n + 1` vectors.
    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        self.to_sbasis().point_and_derivatives(t, n)
    }

    /// Returns true if the curve is a single point.
    fn is_degenerate(&self) -> bool;

    /// Returns true if the curve is a straight line segment by construction.
    fn is_line_segment(&self) -> bool {
        false
    }

    /// A conservative rectangle containing the curve.
    fn bounds_fast(&self) -> Box2D;

    /// The smallest rectangle containing the curve.
    fn bounds_exact(&self) -> Box2D;

    /// A conservative rectangle containing the `deg`-th derivative of the curve over a
    /// sub-interval of `[0, 1]`.
    ///
    /// Returns `None` if the interval is `None` or does not overlap `[0, 1]`.
    fn bounds_local(&self, interval: Option<Interval>, deg: usize) -> Option<Box2D> {
        sbasis_bounds_local(&self.to_sbasis(), interval, deg)
    }

    /// Moves the start of the curve.
    fn set_initial(&mut self, p: Point);

    /// Moves the end of the curve.
    fn set_final(&mut self, p: Point);

    fn duplicate(&self) -> AnyCurve;

    /// Applies an affine transform to the curve and returns the result.
    fn transformed(&self, transform: &Transform) -> AnyCurve;

    /// Returns the part of the curve between two parameters.
    ///
    /// If `from > to` the result runs backwards.
    ///
    /// # Panics
    ///
    /// Panics if either parameter is outside of `[0, 1]`.
    fn portion(&self, from: f64, to: f64) -> AnyCurve;

    /// Same as `portion`, with the parameters given as an interval.
    fn portion_interval(&self, interval: &Interval) -> AnyCurve {
        self.portion(interval.min(), interval.max())
    }

    /// The same curve traversed in the opposite direction.
    fn reverse(&self) -> AnyCurve {
        self.portion(1.0, 0.0)
    }

    /// The derivative of the curve, as a curve.
    fn derivative(&self) -> AnyCurve;

    /// The parameter in `[from, to]` of the point of the curve closest to `p`.
    ///
    /// The parameters are swapped if needed and clamped to `[0, 1]`. A degenerate curve
    /// returns `from`.
    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        sbasis_nearest_time(&self.to_sbasis(), p, from, to)
    }

    /// `nearest_time` over the whole curve.
    fn nearest_time_unit(&self, p: Point) -> f64 {
        self.nearest_time(p, 0.0, 1.0)
    }

    /// Every parameter in `[from, to]` at which the curve is closest to `p`, in increasing
    /// order.
    fn all_nearest_times(&self, p: Point, from: f64, to: f64) -> Vec<f64> {
        sbasis_all_nearest_times(&self.to_sbasis(), p, from, to)
    }

    /// Parameters in `[0, 1]` where the coordinate along `axis` equals `level`.
    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        self.to_sbasis()[axis].roots_at(level)
    }

    /// The arc length of the curve.
    ///
    /// The result is never shorter than the chord between the end points.
    fn length(&self, tolerance: f64) -> f64 {
        polyline_length(&|t| self.point_at(t), tolerance)
    }

    /// The number of times the curve crosses the horizontal ray going from `p` towards
    /// positive x, counted positively when the curve goes towards positive y.
    ///
    /// An end point lying on the ray is counted when the curve leaves it upwards (start)
    /// or reaches it downwards (end), so that the windings of joined curves add up.
    fn winding(&self, p: Point) -> i32 {
        let mut ts = self.roots(p.y, Axis::Y);
        ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
        ts.retain(|&t| {
            if t == 0.0 {
                return self.unit_tangent_at(0.0, 3).y > 0.0;
            }
            if t == 1.0 {
                return self.unit_tangent_at(1.0, 3).y < 0.0;
            }
            true
        });

        let mut wind = 0;
        let mut i = 0;
        while i < ts.len() {
            // Repeated roots are tangencies of even or odd order.
            let mut j = i + 1;
            while j < ts.len() && ts[j] - ts[i] < 1e-9 {
                j += 1;
            }
            let multiplicity = j - i;
            let t = ts[i];
            i = j;

            if multiplicity % 2 == 0 || self.value_at(t, Axis::X) <= p.x {
                continue;
            }

            let direction = if multiplicity == 1 {
                self.unit_tangent_at(t, 3).y
            } else {
                let h = 1e-6;
                self.value_at((t + h).min(1.0), Axis::Y) - self.value_at((t - h).max(0.0), Axis::Y)
            };
            if direction > 0.0 {
                wind += 1;
            } else if direction < 0.0 {
                wind -= 1;
            }
        }

        wind
    }

    /// The normalized direction of the first non-zero derivative at `t`, looking at
    /// derivatives up to order `n`.
    ///
    /// Returns a zero vector when all of them vanish.
    fn unit_tangent_at(&self, t: f64, n: usize) -> Vector {
        let derivatives = self.point_and_derivatives(t, n.max(1));
        for d in &derivatives[1..] {
            let length = d.length();
            if length > TANGENT_EPSILON {
                return *d / length;
            }
        }

        Vector::zero()
    }

    /// The polynomial form of the curve.
    fn to_sbasis(&self) -> XY<SBasis>;

    /// The number of scalars defining the curve.
    fn degrees_of_freedom(&self) -> usize;
}

/// Panics unless both parameters lie in `[0, 1]`.
pub(crate) fn check_portion(from: f64, to: f64) {
    assert!(
        (0.0..=1.0).contains(&from) && (0.0..=1.0).contains(&to),
        "portion [{}, {}] is outside of the unit interval",
        from,
        to
    );
}

fn ordered_unit_range(from: f64, to: f64) -> (f64, f64) {
    let (a, b) = if from > to { (to, from) } else { (from, to) };
    (a.max(0.0).min(1.0), b.max(0.0).min(1.0))
}

pub(crate) fn sbasis_bounds_local(
    sb: &XY<SBasis>,
    interval: Option<Interval>,
    deg: usize,
) -> Option<Box2D> {
    let interval = interval?.intersect(&Interval::UNIT)?;
    let mut sb = sb.clone();
    for _ in 0..deg {
        sb = sb.derivative();
    }

    Some(sb.bounds_local(&interval))
}

/// Candidate parameters where the distance to `p` has a local extremum in `[from, to]`,
/// including the ends.
fn nearest_time_candidates(sb: &XY<SBasis>, p: Point, from: f64, to: f64) -> Vec<f64> {
    let mut candidates = vec![from];
    if to > from {
        let dd = sb.sub_point(p).dot(&sb.derivative());
        candidates.extend(dd.roots_in(&Interval::new(from, to)));
        candidates.push(to);
    }

    candidates
}

pub(crate) fn sbasis_nearest_time(sb: &XY<SBasis>, p: Point, from: f64, to: f64) -> f64 {
    let (from, to) = ordered_unit_range(from, to);
    if sb.is_constant(0.0) {
        return from;
    }

    let mut closest = from;
    let mut min_dist_sq = f64::INFINITY;
    for t in nearest_time_candidates(sb, p, from, to) {
        let d = (sb.point_at(t) - p).square_length();
        if d < min_dist_sq {
            min_dist_sq = d;
            closest = t;
        }
    }

    closest
}

pub(crate) fn sbasis_all_nearest_times(sb: &XY<SBasis>, p: Point, from: f64, to: f64) -> Vec<f64> {
    let (from, to) = ordered_unit_range(from, to);
    if sb.is_constant(0.0) {
        return vec![from];
    }

    let candidates = nearest_time_candidates(sb, p, from, to);
    let distances: Vec<f64> = candidates
        .iter()
        .map(|t| (sb.point_at(*t) - p).square_length())
        .collect();
    let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
    let threshold = min + min.abs() * 1e-12;

    let mut result: Vec<f64> = Vec::new();
    for (t, d) in candidates.into_iter().zip(distances) {
        if d <= threshold && result.last() != Some(&t) {
            result.push(t);
        }
    }

    result
}

/// Length of an adaptive polyline approximation of a parametric curve.
pub(crate) fn polyline_length(curve: &dyn Fn(f64) -> Point, tolerance: f64) -> f64 {
    let mut length = 0.0;
    let mut t0 = 0.0;
    let mut p0 = curve(0.0);
    for i in 1..=LENGTH_INITIAL_SAMPLES {
        let t1 = i as f64 / LENGTH_INITIAL_SAMPLES as f64;
        let p1 = curve(t1);
        length += polyline_length_impl(curve, t0, p0, t1, p1, tolerance, 0);
        t0 = t1;
        p0 = p1;
    }

    length
}

fn polyline_length_impl(
    curve: &dyn Fn(f64) -> Point,
    t0: f64,
    p0: Point,
    t1: f64,
    p1: Point,
    tolerance: f64,
    depth: u32,
) -> f64 {
    let tm = (t0 + t1) * 0.5;
    let pm = curve(tm);
    let chord = (p1 - p0).length();
    let split = (pm - p0).length() + (p1 - pm).length();
    if split - chord <= tolerance * (t1 - t0) || depth >= LENGTH_MAX_DEPTH {
        return split;
    }

    polyline_length_impl(curve, t0, p0, tm, pm, tolerance, depth + 1)
        + polyline_length_impl(curve, tm, pm, t1, p1, tolerance, depth + 1)
}
