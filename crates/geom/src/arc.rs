//! Elliptic arc related maths and tools.

use crate::curve::{check_portion, polyline_length, sbasis_all_nearest_times, sbasis_nearest_time};
use crate::utils::{directed_angle, normalize_angle};
use crate::{point, vector, Angle, AnyCurve, Axis, Box2D, Curve, GeomError, LineSegment};
use crate::{Point, Transform, Vector, XY};
use sbgeom_poly::{approx, Linear, SBasis};

use core::f64::consts::{FRAC_PI_2, PI};

const TWO_PI: f64 = 2.0 * PI;
const RADIUS_EPSILON: f64 = 1e-12;
const SBASIS_TERMS: usize = 8;
const NEWTON_STEPS: u32 = 8;

/// An elliptical arc.
///
/// The arc is stored in the SVG endpoint form (end points, radii, rotation and the two
/// flags) along with the derived center form (center, start angle and signed sweep angle).
/// The parameter `t` moves linearly in angle from the start to the end.
///
/// Radii too small to join the end points are scaled up uniformly, as described in the
/// SVG implementation notes (F.6.6). An arc with a zero radius, or with coincident end points, is
/// a chord: it behaves as the line segment between its end points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct EllipticalArc {
    from: Point,
    to: Point,
    radii: Vector,
    rotation: Angle,
    large_arc: bool,
    sweep: bool,
    center: Point,
    start_angle: f64,
    sweep_angle: f64,
}

fn check_radii(radii: Vector) -> Result<(), GeomError> {
    if !radii.x.is_finite() || !radii.y.is_finite() || radii.x < 0.0 || radii.y < 0.0 {
        return Err(GeomError::InvalidRadii);
    }

    Ok(())
}

impl EllipticalArc {
    /// Creates an arc from its SVG endpoint parametrization.
    ///
    /// With `sweep` set, the angle increases from the start to the end of the arc.
    pub fn new(
        from: Point,
        radii: Vector,
        rotation: Angle,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) -> Result<Self, GeomError> {
        check_radii(radii)?;

        let mut arc = EllipticalArc {
            from,
            to,
            radii,
            rotation,
            large_arc,
            sweep,
            center: from,
            start_angle: 0.0,
            sweep_angle: 0.0,
        };
        arc.update_center_and_angles();

        Ok(arc)
    }

    /// Creates an arc from its center parametrization.
    ///
    /// A positive `sweep` goes in the direction of increasing angles.
    pub fn from_center(
        center: Point,
        radii: Vector,
        rotation: Angle,
        start: Angle,
        sweep: Angle,
    ) -> Result<Self, GeomError> {
        check_radii(radii)?;

        Ok(Self::from_center_unchecked(
            center,
            radii,
            rotation,
            start.radians,
            sweep.radians,
        ))
    }

    fn from_center_unchecked(
        center: Point,
        radii: Vector,
        rotation: Angle,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Self {
        let mut arc = EllipticalArc {
            from: center,
            to: center,
            radii,
            rotation,
            large_arc: sweep_angle.abs() > PI,
            sweep: sweep_angle > 0.0,
            center,
            start_angle,
            sweep_angle,
        };
        arc.from = arc.point_at_angle_radians(start_angle);
        arc.to = arc.point_at_angle_radians(start_angle + sweep_angle);

        arc
    }

    fn chord_between(from: Point, to: Point) -> Self {
        EllipticalArc {
            from,
            to,
            radii: Vector::zero(),
            rotation: Angle::zero(),
            large_arc: false,
            sweep: false,
            center: from.lerp(to, 0.5),
            start_angle: 0.0,
            sweep_angle: 0.0,
        }
    }

    // SVG implementation notes, F.6.5 and F.6.6.
    fn update_center_and_angles(&mut self) {
        let mid = self.from.lerp(self.to, 0.5);
        self.center = mid;
        self.start_angle = 0.0;
        self.sweep_angle = 0.0;

        if self.from == self.to
            || self.radii.x < RADIUS_EPSILON
            || self.radii.y < RADIUS_EPSILON
        {
            return;
        }

        let (sin_phi, cos_phi) = self.rotation.radians.sin_cos();
        let hd = (self.from - self.to) * 0.5;
        // F.6.5.1
        let p = vector(
            cos_phi * hd.x + sin_phi * hd.y,
            -sin_phi * hd.x + cos_phi * hd.y,
        );

        let mut rx = self.radii.x;
        let mut ry = self.radii.y;
        // F.6.6.2
        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
            self.radii = vector(rx, ry);
        }

        // F.6.5.2
        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        let sign_coe = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let coe = sign_coe * ((rxry * rxry - sum_of_sq) / sum_of_sq).max(0.0).sqrt();

        let transformed_cx = coe * rxpy / ry;
        let transformed_cy = -coe * rypx / rx;

        // F.6.5.3
        self.center = point(
            cos_phi * transformed_cx - sin_phi * transformed_cy + mid.x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + mid.y,
        );

        // F.6.5.5 and F.6.5.6
        let a = vector((p.x - transformed_cx) / rx, (p.y - transformed_cy) / ry);
        let b = vector((-p.x - transformed_cx) / rx, (-p.y - transformed_cy) / ry);

        self.start_angle = a.y.atan2(a.x);
        let mut delta = directed_angle(a, b);
        if self.sweep && delta < 0.0 {
            delta += TWO_PI;
        } else if !self.sweep && delta > 0.0 {
            delta -= TWO_PI;
        }
        self.sweep_angle = delta;
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The radius along one of the axes of the ellipse.
    #[inline]
    pub fn ray(&self, axis: Axis) -> f64 {
        axis.of_vector(self.radii)
    }

    #[inline]
    pub fn rays(&self) -> Vector {
        self.radii
    }

    /// The angle between the x axis of the ellipse and the x axis of the plane.
    #[inline]
    pub fn rotation_angle(&self) -> Angle {
        self.rotation
    }

    #[inline]
    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    #[inline]
    pub fn sweep(&self) -> bool {
        self.sweep
    }

    /// The angle of the initial point on the ellipse, in `[0, 2π)`.
    pub fn initial_angle(&self) -> Angle {
        Angle::radians(normalize_angle(self.start_angle))
    }

    /// The angle of the final point on the ellipse, in `[0, 2π)`.
    pub fn final_angle(&self) -> Angle {
        Angle::radians(normalize_angle(self.start_angle + self.sweep_angle))
    }

    /// The signed angle swept by the arc. It is negative when `sweep` is false.
    #[inline]
    pub fn sweep_angle(&self) -> Angle {
        Angle::radians(self.sweep_angle)
    }

    /// The angle on the ellipse at `t`.
    #[inline]
    pub fn angle_at(&self, t: f64) -> Angle {
        Angle::radians(self.start_angle + self.sweep_angle * t)
    }

    /// The parameter at which the arc reaches an angle.
    ///
    /// Angles outside of the arc produce values greater than one.
    pub fn time_at_angle(&self, angle: Angle) -> f64 {
        if self.sweep_angle == 0.0 {
            return 0.0;
        }

        let d = if self.sweep_angle > 0.0 {
            normalize_angle(angle.radians - self.start_angle)
        } else {
            normalize_angle(self.start_angle - angle.radians)
        };

        d / self.sweep_angle.abs()
    }

    pub fn contains_angle(&self, angle: Angle) -> bool {
        self.sweep_angle.abs() >= TWO_PI || self.time_at_angle(angle) <= 1.0
    }

    fn ellipse_vector(&self, angle: f64) -> Vector {
        let (sin_a, cos_a) = angle.sin_cos();
        let (sin_phi, cos_phi) = self.rotation.radians.sin_cos();
        let x = self.radii.x * cos_a;
        let y = self.radii.y * sin_a;

        vector(cos_phi * x - sin_phi * y, sin_phi * x + cos_phi * y)
    }

    fn point_at_angle_radians(&self, angle: f64) -> Point {
        self.center + self.ellipse_vector(angle)
    }

    /// The point of the ellipse at an angle, whether or not the arc contains it.
    pub fn point_at_angle(&self, angle: Angle) -> Point {
        self.point_at_angle_radians(angle.radians)
    }

    pub fn value_at_angle(&self, angle: Angle, axis: Axis) -> f64 {
        axis.of_point(self.point_at_angle(angle))
    }

    /// The transform mapping the unit circle onto the ellipse.
    pub fn unit_circle_transform(&self) -> Transform {
        Transform::scale(self.radii.x, self.radii.y)
            .then_rotate(self.rotation)
            .then_translate(self.center.to_vector())
    }

    /// The transform mapping the ellipse onto the unit circle, if the ellipse is not flat.
    pub fn inverse_unit_circle_transform(&self) -> Option<Transform> {
        self.unit_circle_transform().inverse()
    }

    /// Returns true if the arc is a straight line between its end points.
    pub fn is_chord(&self) -> bool {
        self.radii.x < RADIUS_EPSILON || self.radii.y < RADIUS_EPSILON || self.sweep_angle == 0.0
    }

    /// The line segment joining the end points.
    #[inline]
    pub fn chord(&self) -> LineSegment {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        if self.is_chord() {
            return self.chord().sample(t);
        }
        if t == 0.0 {
            return self.from;
        }
        if t == 1.0 {
            return self.to;
        }

        self.point_at_angle_radians(self.start_angle + self.sweep_angle * t)
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// The range may run backwards, in which case so does the result.
    pub fn split_range(&self, from: f64, to: f64) -> Self {
        if self.is_chord() {
            let chord = self.chord();
            return Self::chord_between(chord.sample(from), chord.sample(to));
        }

        let mut arc = Self::from_center_unchecked(
            self.center,
            self.radii,
            self.rotation,
            self.start_angle + self.sweep_angle * from,
            self.sweep_angle * (to - from),
        );
        arc.from = self.sample(from);
        arc.to = self.sample(to);

        arc
    }

    /// Split this curve into two sub-curves.
    pub fn subdivide(&self, t: f64) -> (EllipticalArc, EllipticalArc) {
        (self.split_range(0.0, t), self.split_range(t, 1.0))
    }

    /// Swap the direction of the arc.
    pub fn flip(&self) -> Self {
        EllipticalArc {
            from: self.to,
            to: self.from,
            sweep: !self.sweep,
            start_angle: self.start_angle + self.sweep_angle,
            sweep_angle: -self.sweep_angle,
            ..*self
        }
    }

    /// Applies an affine transform to the arc.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let from = transform.transform_point(self.from);
        let to = transform.transform_point(self.to);
        if self.is_chord() {
            return Self::chord_between(from, to);
        }

        // Decompose the linear part of the map from the unit circle as
        // rotation(phi) * scale(sx, sy) * rotation(theta).
        let m = self.unit_circle_transform().then(transform);
        let (a, b, c, d) = (m.m11, m.m21, m.m12, m.m22);
        let e = (a + d) * 0.5;
        let f = (a - d) * 0.5;
        let g = (c + b) * 0.5;
        let h = (c - b) * 0.5;
        let q = e.hypot(h);
        let r = f.hypot(g);
        let sx = q + r;
        let sy = q - r;
        let a1 = g.atan2(f);
        let a2 = h.atan2(e);
        let theta = (a2 - a1) * 0.5;
        let phi = (a2 + a1) * 0.5;

        let center = point(m.m31, m.m32);
        let start = self.start_angle + theta;
        let mut arc = if sy >= 0.0 {
            Self::from_center_unchecked(
                center,
                vector(sx, sy),
                Angle::radians(phi),
                start,
                self.sweep_angle,
            )
        } else {
            // Mirrored: the arc runs the other way around the ellipse.
            Self::from_center_unchecked(
                center,
                vector(sx, -sy),
                Angle::radians(phi),
                -start,
                -self.sweep_angle,
            )
        };
        arc.from = from;
        arc.to = to;

        arc
    }

    /// Returns the smallest rectangle containing the arc.
    pub fn bounding_box(&self) -> Box2D {
        if self.is_chord() {
            return self.chord().bounding_box();
        }

        let mut min = self.from.min(self.to);
        let mut max = self.from.max(self.to);

        let (sin_phi, cos_phi) = self.rotation.radians.sin_cos();
        let (rx, ry) = (self.radii.x, self.radii.y);
        let extrema = [
            (-ry * sin_phi).atan2(rx * cos_phi),
            (ry * cos_phi).atan2(rx * sin_phi),
        ];
        for &a in &extrema {
            for &angle in &[a, a + PI] {
                if self.contains_angle(Angle::radians(angle)) {
                    let p = self.point_at_angle_radians(angle);
                    min = min.min(p);
                    max = max.max(p);
                }
            }
        }

        Box2D { min, max }
    }

    fn derivative_arc(&self) -> EllipticalArc {
        let delta = self.sweep_angle;
        let quarter = if delta > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };

        Self::from_center_unchecked(
            Point::origin(),
            self.radii * delta.abs(),
            self.rotation,
            self.start_angle + quarter,
            delta,
        )
    }
}

impl Curve for EllipticalArc {
    fn initial_point(&self) -> Point {
        self.from
    }

    fn final_point(&self) -> Point {
        self.to
    }

    fn point_at(&self, t: f64) -> Point {
        self.sample(t)
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        if self.is_chord() {
            return self.chord().point_and_derivatives(t, n);
        }

        let angle = self.start_angle + self.sweep_angle * t;
        let mut result = Vec::with_capacity(n + 1);
        result.push(self.sample(t).to_vector());
        let mut scale = 1.0;
        for k in 1..=n {
            scale *= self.sweep_angle;
            result.push(self.ellipse_vector(angle + k as f64 * FRAC_PI_2) * scale);
        }

        result
    }

    fn is_degenerate(&self) -> bool {
        self.is_chord() && self.from == self.to
    }

    fn is_line_segment(&self) -> bool {
        self.is_chord()
    }

    fn bounds_fast(&self) -> Box2D {
        self.bounding_box()
    }

    fn bounds_exact(&self) -> Box2D {
        self.bounding_box()
    }

    fn set_initial(&mut self, p: Point) {
        self.from = p;
        self.update_center_and_angles();
    }

    fn set_final(&mut self, p: Point) {
        self.to = p;
        self.update_center_and_angles();
    }

    fn duplicate(&self) -> AnyCurve {
        AnyCurve::Arc(*self)
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        AnyCurve::Arc(self.transformed(transform))
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        check_portion(from, to);
        AnyCurve::Arc(self.split_range(from, to))
    }

    fn reverse(&self) -> AnyCurve {
        AnyCurve::Arc(self.flip())
    }

    fn derivative(&self) -> AnyCurve {
        if self.is_chord() {
            let d = (self.to - self.from).to_point();
            return AnyCurve::Line(LineSegment { from: d, to: d });
        }

        AnyCurve::Arc(self.derivative_arc())
    }

    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        if self.is_chord() {
            return self.chord().nearest_time(p, from, to);
        }

        let (a, b) = if from > to { (to, from) } else { (from, to) };
        let (a, b) = (a.max(0.0).min(1.0), b.max(0.0).min(1.0));
        let scale = self.radii.x.max(self.radii.y);
        if (self.radii.x - self.radii.y).abs() <= RADIUS_EPSILON * scale
            && (p - self.center).length() <= RADIUS_EPSILON * scale
        {
            return a;
        }

        // Start from the polynomial approximation and polish on the exact curve.
        let mut t = sbasis_nearest_time(&self.to_sbasis(), p, a, b);
        let mut dist_sq = (self.sample(t) - p).square_length();
        for _ in 0..NEWTON_STEPS {
            let d = self.point_and_derivatives(t, 2);
            let v = d[0] - p.to_vector();
            let slope = d[1].square_length() + v.dot(d[2]);
            if slope == 0.0 {
                break;
            }
            let next = (t - v.dot(d[1]) / slope).max(a).min(b);
            let next_dist_sq = (self.sample(next) - p).square_length();
            if next_dist_sq >= dist_sq {
                break;
            }
            t = next;
            dist_sq = next_dist_sq;
        }

        t
    }

    fn all_nearest_times(&self, p: Point, from: f64, to: f64) -> Vec<f64> {
        if self.is_chord() {
            return vec![self.chord().nearest_time(p, from, to)];
        }

        sbasis_all_nearest_times(&self.to_sbasis(), p, from, to)
    }

    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        if self.is_chord() {
            return self.chord().roots(level, axis);
        }

        // The coordinate is c + alpha * cos(angle) + beta * sin(angle).
        let (sin_phi, cos_phi) = self.rotation.radians.sin_cos();
        let (c, alpha, beta) = match axis {
            Axis::X => (self.center.x, self.radii.x * cos_phi, -self.radii.y * sin_phi),
            Axis::Y => (self.center.y, self.radii.x * sin_phi, self.radii.y * cos_phi),
        };
        let amplitude = alpha.hypot(beta);
        if amplitude == 0.0 {
            return Vec::new();
        }
        let ratio = (level - c) / amplitude;
        if ratio.abs() > 1.0 {
            return Vec::new();
        }

        let phase = beta.atan2(alpha);
        let offset = ratio.acos();
        let mut result = Vec::new();
        for &angle in &[phase - offset, phase + offset] {
            let t = self.time_at_angle(Angle::radians(angle));
            if t <= 1.0 {
                result.push(t);
                if t == 0.0 && self.sweep_angle.abs() >= TWO_PI {
                    result.push(1.0);
                }
            }
        }
        result.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));

        result
    }

    fn length(&self, tolerance: f64) -> f64 {
        if self.is_chord() {
            return self.chord().length();
        }

        polyline_length(&|t| self.sample(t), tolerance)
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        if self.is_chord() {
            return XY::line(self.from, self.to);
        }

        let angles = Linear::new(self.start_angle, self.start_angle + self.sweep_angle);
        let circle = XY::new(
            approx::cos(&angles, SBASIS_TERMS),
            approx::sin(&angles, SBASIS_TERMS),
        );
        let mut result = circle.transformed(&self.unit_circle_transform());
        // Pin the end points.
        for &axis in &[Axis::X, Axis::Y] {
            let sb = &mut result[axis];
            if sb.is_empty() {
                sb.push(Linear::ZERO);
            }
            sb[0] = Linear::new(axis.of_point(self.from), axis.of_point(self.to));
        }

        result
    }

    fn degrees_of_freedom(&self) -> usize {
        7
    }
}

#[cfg(test)]
fn assert_near(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

#[cfg(test)]
fn quarter_circle(large_arc: bool, sweep: bool) -> EllipticalArc {
    EllipticalArc::new(
        point(1.0, 0.0),
        vector(1.0, 1.0),
        Angle::zero(),
        large_arc,
        sweep,
        point(0.0, 1.0),
    )
    .unwrap()
}

#[test]
fn center_from_svg_flags() {
    let small_ccw = quarter_circle(false, true);
    assert_near(small_ccw.center(), point(0.0, 0.0));
    assert!((small_ccw.sweep_angle().radians - FRAC_PI_2).abs() < 1e-12);
    let h = 0.5f64.sqrt();
    assert_near(small_ccw.point_at(0.5), point(h, h));
    assert_eq!(small_ccw.point_at(0.0), point(1.0, 0.0));
    assert_eq!(small_ccw.point_at(1.0), point(0.0, 1.0));

    let large_ccw = quarter_circle(true, true);
    assert_near(large_ccw.center(), point(1.0, 1.0));
    assert!((large_ccw.sweep_angle().radians - 1.5 * PI).abs() < 1e-12);
    assert_near(large_ccw.point_at(0.5), point(1.0 + h, 1.0 + h));

    let small_cw = quarter_circle(false, false);
    assert_near(small_cw.center(), point(1.0, 1.0));
    assert!((small_cw.sweep_angle().radians + FRAC_PI_2).abs() < 1e-12);
    assert_near(small_cw.point_at(0.5), point(1.0 - h, 1.0 - h));

    let large_cw = quarter_circle(true, false);
    assert_near(large_cw.center(), point(0.0, 0.0));
    assert!((large_cw.sweep_angle().radians + 1.5 * PI).abs() < 1e-12);
    assert_near(large_cw.point_at(0.5), point(-h, -h));
}

#[test]
fn radii_are_scaled_up() {
    let arc = EllipticalArc::new(
        point(0.0, 0.0),
        vector(1.0, 1.0),
        Angle::zero(),
        false,
        true,
        point(4.0, 0.0),
    )
    .unwrap();

    assert_near(arc.rays().to_point(), point(2.0, 2.0));
    assert_near(arc.center(), point(2.0, 0.0));
    assert!((arc.sweep_angle().radians - PI).abs() < 1e-12);
    assert_near(arc.point_at(0.5), point(2.0, -2.0));
}

#[test]
fn invalid_radii() {
    let arc = |r| {
        EllipticalArc::new(
            point(0.0, 0.0),
            r,
            Angle::zero(),
            false,
            false,
            point(1.0, 0.0),
        )
    };
    assert_eq!(arc(vector(-1.0, 1.0)), Err(GeomError::InvalidRadii));
    assert_eq!(arc(vector(1.0, f64::NAN)), Err(GeomError::InvalidRadii));
    assert!(arc(vector(0.0, 1.0)).is_ok());
}

#[test]
fn chords() {
    let flat = EllipticalArc::new(
        point(0.0, 0.0),
        vector(0.0, 1.0),
        Angle::zero(),
        false,
        true,
        point(2.0, 2.0),
    )
    .unwrap();
    assert!(flat.is_chord());
    assert!(flat.is_line_segment());
    assert!(!flat.is_degenerate());
    assert_eq!(flat.point_at(0.5), point(1.0, 1.0));
    assert_eq!(flat.length(0.01), 8.0f64.sqrt());
    assert_eq!(flat.chord(), LineSegment::new(point(0.0, 0.0), point(2.0, 2.0)));

    let point_arc = EllipticalArc::new(
        point(1.0, 1.0),
        vector(1.0, 1.0),
        Angle::zero(),
        false,
        true,
        point(1.0, 1.0),
    )
    .unwrap();
    assert!(point_arc.is_chord());
    assert!(point_arc.is_degenerate());
}

#[test]
fn angles() {
    let arc = quarter_circle(false, true);
    assert!(arc.initial_angle().radians.abs() < 1e-12);
    assert!((arc.final_angle().radians - FRAC_PI_2).abs() < 1e-12);
    assert!((arc.angle_at(0.5).radians - PI / 4.0).abs() < 1e-12);
    assert!((arc.time_at_angle(Angle::radians(PI / 4.0)) - 0.5).abs() < 1e-12);
    assert!(arc.contains_angle(Angle::radians(0.3)));
    assert!(!arc.contains_angle(Angle::radians(PI)));
    assert!(!arc.contains_angle(Angle::radians(-0.1)));
    assert_near(arc.point_at_angle(Angle::radians(PI)), point(-1.0, 0.0));
    assert!((arc.value_at_angle(Angle::radians(PI), Axis::X) + 1.0).abs() < 1e-12);
    assert_eq!(arc.ray(Axis::Y), 1.0);

    let m = arc.unit_circle_transform();
    assert_near(m.transform_point(point(1.0, 0.0)), arc.point_at(0.0));
    let inv = arc.inverse_unit_circle_transform().unwrap();
    assert_near(inv.transform_point(arc.point_at(0.3)), point((0.3 * FRAC_PI_2).cos(), (0.3 * FRAC_PI_2).sin()));
}

#[test]
fn full_ellipse() {
    let arc = EllipticalArc::from_center(
        point(0.0, 0.0),
        vector(2.0, 1.0),
        Angle::zero(),
        Angle::zero(),
        Angle::radians(2.0 * PI),
    )
    .unwrap();
    assert!(!arc.is_chord());
    assert!(!arc.is_degenerate());
    assert!(arc.large_arc());
    assert!(arc.sweep());
    assert_near(arc.point_at(0.25), point(0.0, 1.0));

    let b = arc.bounds_exact();
    assert_near(b.min, point(-2.0, -1.0));
    assert_near(b.max, point(2.0, 1.0));
    assert_eq!(arc.bounds_fast(), b);

    // Counter-clockwise around the origin.
    assert_eq!(arc.winding(point(0.0, 0.0)), 1);
    assert_eq!(arc.winding(point(0.5, 0.5)), 1);
    assert_eq!(arc.winding(point(3.0, 0.0)), 0);
    assert_eq!(arc.flip().winding(point(0.0, 0.0)), -1);
}

#[test]
fn bounds() {
    let arc = quarter_circle(false, true);
    let b = arc.bounds_exact();
    assert_near(b.min, point(0.0, 0.0));
    assert_near(b.max, point(1.0, 1.0));

    let rotated = EllipticalArc::from_center(
        point(1.0, 1.0),
        vector(3.0, 1.0),
        Angle::degrees(30.0),
        Angle::radians(0.2),
        Angle::radians(2.5),
    )
    .unwrap();
    let b = rotated.bounds_exact();
    for i in 0..=100 {
        let p = rotated.point_at(i as f64 / 100.0);
        assert!(b.min.x - 1e-9 <= p.x && p.x <= b.max.x + 1e-9);
        assert!(b.min.y - 1e-9 <= p.y && p.y <= b.max.y + 1e-9);
    }
}

#[test]
fn transforms() {
    let arc = EllipticalArc::from_center(
        point(1.0, -1.0),
        vector(3.0, 1.0),
        Angle::degrees(20.0),
        Angle::radians(0.5),
        Angle::radians(2.0),
    )
    .unwrap();

    let transforms = [
        Transform::translation(1.0, 2.0),
        Transform::scale(2.0, 1.0)
            .then_rotate(Angle::degrees(30.0))
            .then_translate(vector(1.0, 2.0)),
        Transform::scale(1.0, -1.0),
        Transform::new(1.0, 0.5, 0.2, 1.0, 0.0, 3.0),
    ];

    for m in &transforms {
        let transformed = arc.transformed(m);
        assert_eq!(transformed.initial_point(), m.transform_point(arc.initial_point()));
        assert_eq!(transformed.final_point(), m.transform_point(arc.final_point()));
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert_near(transformed.point_at(t), m.transform_point(arc.point_at(t)));
        }
    }

    let mirrored = arc.transformed(&Transform::scale(1.0, -1.0));
    assert_eq!(mirrored.sweep(), !arc.sweep());
}

#[test]
fn derivatives() {
    let arc = EllipticalArc::from_center(
        point(1.0, -1.0),
        vector(3.0, 1.0),
        Angle::degrees(20.0),
        Angle::radians(0.5),
        Angle::radians(-2.0),
    )
    .unwrap();

    let derivative = Curve::derivative(&arc);
    let at = |t: f64| arc.point_at(t).to_vector();
    for i in 1..8 {
        let t = i as f64 / 8.0;
        let d = arc.point_and_derivatives(t, 2);
        assert_eq!(d.len(), 3);
        let h = 1e-6;
        let numeric = (at(t + h) - at(t - h)) / (2.0 * h);
        assert!((d[1] - numeric).length() < 1e-5);
        assert_near(derivative.point_at(t), d[1].to_point());
        let h = 1e-4;
        let numeric2 = (at(t + h) - at(t) * 2.0 + at(t - h)) / (h * h);
        assert!((d[2] - numeric2).length() < 1e-2);
    }
    assert_eq!(arc.degrees_of_freedom(), 7);
}

#[test]
fn roots_and_nearest_time() {
    let arc = quarter_circle(false, true);
    let roots = arc.roots(0.5, Axis::Y);
    assert_eq!(roots.len(), 1);
    assert!((roots[0] - 1.0 / 3.0).abs() < 1e-12);
    assert!(arc.roots(2.0, Axis::X).is_empty());

    assert!((arc.nearest_time_unit(point(2.0, 2.0)) - 0.5).abs() < 1e-9);
    assert_eq!(arc.nearest_time_unit(point(3.0, -1.0)), 0.0);
    // Every point of a circle is as close to its center.
    assert_eq!(arc.nearest_time(point(0.0, 0.0), 0.25, 0.75), 0.25);
}

#[test]
fn portions() {
    let arc = quarter_circle(true, false);
    let p = arc.portion(0.25, 0.75);
    assert_eq!(p.initial_point(), arc.point_at(0.25));
    assert_eq!(p.final_point(), arc.point_at(0.75));
    assert_near(p.point_at(0.5), arc.point_at(0.5));

    let backwards = arc.portion(0.75, 0.25);
    assert_near(backwards.point_at(0.25), arc.point_at(0.625));

    let r = arc.reverse();
    assert_eq!(r.initial_point(), arc.final_point());
    assert_near(r.point_at(0.3), arc.point_at(0.7));

    let (a, b) = arc.subdivide(0.4);
    assert_eq!(a.final_point(), b.initial_point());
}

#[test]
fn polynomial_form() {
    let arc = quarter_circle(true, true);
    let sb = arc.to_sbasis();
    assert_eq!(sb.initial_point(), arc.initial_point());
    assert_eq!(sb.final_point(), arc.final_point());
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((sb.point_at(t) - arc.point_at(t)).length() < 1e-6);
    }
}

#[test]
fn editing_end_points() {
    let mut arc = quarter_circle(false, true);
    arc.set_final(point(-1.0, 0.0));
    assert_near(arc.center(), point(0.0, 0.0));
    assert_near(arc.point_at(0.5), point(0.0, 1.0));
    assert_eq!(arc.final_point(), point(-1.0, 0.0));

    arc.set_initial(point(-1.0, 0.0));
    assert!(arc.is_chord());
}

#[test]
fn length() {
    let arc = quarter_circle(false, true);
    assert!((arc.length(1e-6) - FRAC_PI_2).abs() < 1e-5);
    assert!(arc.length(0.1) >= arc.chord().length());
}
