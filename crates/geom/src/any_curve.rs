use crate::{
    BezierCurve, CubicBezier, Curve, EllipticalArc, HLineSegment, LineSegment, QuadraticBezier,
    SBasisCurve, VLineSegment,
};
use crate::{Axis, Box2D, Point, Transform, Vector, XY};
use sbgeom_poly::{Interval, SBasis};

/// Any of the curve types of this crate.
///
/// This is what a path stores, and what the curve producing methods of [`Curve`] return.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum AnyCurve {
    Line(LineSegment),
    HLine(HLineSegment),
    VLine(VLineSegment),
    Quadratic(QuadraticBezier),
    Cubic(CubicBezier),
    Bezier(BezierCurve),
    SBasis(SBasisCurve),
    Arc(EllipticalArc),
}

/// The variant of an [`AnyCurve`], without its data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CurveKind {
    Line,
    HLine,
    VLine,
    Quadratic,
    Cubic,
    Bezier,
    SBasis,
    Arc,
}

macro_rules! dispatch {
    ($curve:expr, $c:ident => $e:expr) => {
        match $curve {
            AnyCurve::Line($c) => $e,
            AnyCurve::HLine($c) => $e,
            AnyCurve::VLine($c) => $e,
            AnyCurve::Quadratic($c) => $e,
            AnyCurve::Cubic($c) => $e,
            AnyCurve::Bezier($c) => $e,
            AnyCurve::SBasis($c) => $e,
            AnyCurve::Arc($c) => $e,
        }
    };
}

impl AnyCurve {
    pub fn kind(&self) -> CurveKind {
        match self {
            AnyCurve::Line(..) => CurveKind::Line,
            AnyCurve::HLine(..) => CurveKind::HLine,
            AnyCurve::VLine(..) => CurveKind::VLine,
            AnyCurve::Quadratic(..) => CurveKind::Quadratic,
            AnyCurve::Cubic(..) => CurveKind::Cubic,
            AnyCurve::Bezier(..) => CurveKind::Bezier,
            AnyCurve::SBasis(..) => CurveKind::SBasis,
            AnyCurve::Arc(..) => CurveKind::Arc,
        }
    }

    #[inline]
    pub fn as_curve(&self) -> &dyn Curve {
        dispatch!(self, c => c)
    }

    #[inline]
    pub fn as_curve_mut(&mut self) -> &mut dyn Curve {
        dispatch!(self, c => c)
    }

    // Axis aligned segments can't hold an end point off their axis.
    fn unalign_for(&mut self, p: Point, initial: bool) {
        let line = match self {
            AnyCurve::HLine(h) if p.y != h.y() => Some(h.to_line_segment()),
            AnyCurve::VLine(v) if p.x != v.x() => Some(v.to_line_segment()),
            _ => None,
        };

        if let Some(mut line) = line {
            if initial {
                line.from = p;
            } else {
                line.to = p;
            }
            *self = AnyCurve::Line(line);
        }
    }
}

impl Curve for AnyCurve {
    fn initial_point(&self) -> Point {
        dispatch!(self, c => Curve::initial_point(c))
    }

    fn final_point(&self) -> Point {
        dispatch!(self, c => Curve::final_point(c))
    }

    fn point_at(&self, t: f64) -> Point {
        dispatch!(self, c => Curve::point_at(c, t))
    }

    fn value_at(&self, t: f64, axis: Axis) -> f64 {
        dispatch!(self, c => Curve::value_at(c, t, axis))
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> Vec<Vector> {
        dispatch!(self, c => Curve::point_and_derivatives(c, t, n))
    }

    fn is_degenerate(&self) -> bool {
        dispatch!(self, c => Curve::is_degenerate(c))
    }

    fn is_line_segment(&self) -> bool {
        dispatch!(self, c => Curve::is_line_segment(c))
    }

    fn bounds_fast(&self) -> Box2D {
        dispatch!(self, c => Curve::bounds_fast(c))
    }

    fn bounds_exact(&self) -> Box2D {
        dispatch!(self, c => Curve::bounds_exact(c))
    }

    fn bounds_local(&self, interval: Option<Interval>, deg: usize) -> Option<Box2D> {
        dispatch!(self, c => Curve::bounds_local(c, interval, deg))
    }

    fn set_initial(&mut self, p: Point) {
        self.unalign_for(p, true);
        dispatch!(self, c => Curve::set_initial(c, p))
    }

    fn set_final(&mut self, p: Point) {
        self.unalign_for(p, false);
        dispatch!(self, c => Curve::set_final(c, p))
    }

    fn duplicate(&self) -> AnyCurve {
        self.clone()
    }

    fn transformed(&self, transform: &Transform) -> AnyCurve {
        dispatch!(self, c => Curve::transformed(c, transform))
    }

    fn portion(&self, from: f64, to: f64) -> AnyCurve {
        dispatch!(self, c => Curve::portion(c, from, to))
    }

    fn portion_interval(&self, interval: &Interval) -> AnyCurve {
        dispatch!(self, c => Curve::portion_interval(c, interval))
    }

    fn reverse(&self) -> AnyCurve {
        dispatch!(self, c => Curve::reverse(c))
    }

    fn derivative(&self) -> AnyCurve {
        dispatch!(self, c => Curve::derivative(c))
    }

    fn nearest_time(&self, p: Point, from: f64, to: f64) -> f64 {
        dispatch!(self, c => Curve::nearest_time(c, p, from, to))
    }

    fn all_nearest_times(&self, p: Point, from: f64, to: f64) -> Vec<f64> {
        dispatch!(self, c => Curve::all_nearest_times(c, p, from, to))
    }

    fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        dispatch!(self, c => Curve::roots(c, level, axis))
    }

    fn length(&self, tolerance: f64) -> f64 {
        dispatch!(self, c => Curve::length(c, tolerance))
    }

    fn winding(&self, p: Point) -> i32 {
        dispatch!(self, c => Curve::winding(c, p))
    }

    fn unit_tangent_at(&self, t: f64, n: usize) -> Vector {
        dispatch!(self, c => Curve::unit_tangent_at(c, t, n))
    }

    fn to_sbasis(&self) -> XY<SBasis> {
        dispatch!(self, c => Curve::to_sbasis(c))
    }

    fn degrees_of_freedom(&self) -> usize {
        dispatch!(self, c => Curve::degrees_of_freedom(c))
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty),)*) => {
        $(
            impl From<$ty> for AnyCurve {
                fn from(c: $ty) -> Self {
                    AnyCurve::$variant(c)
                }
            }
        )*
    };
}

impl_from! {
    Line(LineSegment),
    HLine(HLineSegment),
    VLine(VLineSegment),
    Quadratic(QuadraticBezier),
    Cubic(CubicBezier),
    Bezier(BezierCurve),
    SBasis(SBasisCurve),
    Arc(EllipticalArc),
}

#[cfg(test)]
use crate::{point, Angle};

#[cfg(test)]
fn sample_curves() -> Vec<AnyCurve> {
    vec![
        LineSegment::new(point(0.0, 0.0), point(2.0, 1.0)).into(),
        HLineSegment::new(0.0, 3.0, 1.0).into(),
        VLineSegment::new(1.0, 0.0, -2.0).into(),
        QuadraticBezier::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0)).into(),
        CubicBezier::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, -2.0), point(3.0, 0.0))
            .into(),
        BezierCurve::from_points(&[point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)])
            .unwrap()
            .into(),
        SBasisCurve::line(point(1.0, 1.0), point(0.0, 2.0)).into(),
        EllipticalArc::new(
            point(1.0, 0.0),
            crate::vector(1.0, 1.0),
            Angle::zero(),
            false,
            true,
            point(0.0, 1.0),
        )
        .unwrap()
        .into(),
    ]
}

#[test]
fn kinds() {
    let kinds: Vec<CurveKind> = sample_curves().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            CurveKind::Line,
            CurveKind::HLine,
            CurveKind::VLine,
            CurveKind::Quadratic,
            CurveKind::Cubic,
            CurveKind::Bezier,
            CurveKind::SBasis,
            CurveKind::Arc,
        ]
    );
}

#[test]
fn dispatch_matches_the_wrapped_curve() {
    for curve in sample_curves() {
        let inner = curve.as_curve();
        assert_eq!(curve.initial_point(), inner.initial_point());
        assert_eq!(curve.final_point(), inner.final_point());
        assert_eq!(curve.point_at(0.3), inner.point_at(0.3));
        assert_eq!(curve.bounds_exact(), inner.bounds_exact());
        assert_eq!(curve.degrees_of_freedom(), inner.degrees_of_freedom());
        assert_eq!(curve.duplicate(), curve);

        let sb = curve.to_sbasis();
        for i in 0..=4 {
            let t = i as f64 / 4.0;
            assert!((sb.point_at(t) - curve.point_at(t)).length() < 1e-6);
        }

        let r = curve.reverse();
        assert_eq!(r.initial_point(), curve.final_point());
        assert_eq!(r.final_point(), curve.initial_point());
    }
}

#[test]
fn editing_axis_aligned_segments() {
    let mut h: AnyCurve = HLineSegment::new(0.0, 3.0, 1.0).into();
    h.set_final(point(4.0, 1.0));
    assert_eq!(h.kind(), CurveKind::HLine);
    assert_eq!(h.final_point(), point(4.0, 1.0));

    h.set_final(point(4.0, 2.0));
    assert_eq!(h.kind(), CurveKind::Line);
    assert_eq!(h.initial_point(), point(0.0, 1.0));
    assert_eq!(h.final_point(), point(4.0, 2.0));

    let mut v: AnyCurve = VLineSegment::new(1.0, 0.0, -2.0).into();
    v.set_initial(point(0.0, 0.0));
    assert_eq!(v.kind(), CurveKind::Line);
    assert_eq!(v.initial_point(), point(0.0, 0.0));
    assert_eq!(v.final_point(), point(1.0, -2.0));

    let mut v: AnyCurve = VLineSegment::new(1.0, 0.0, -2.0).into();
    v.as_curve_mut().set_final(point(1.0, 5.0));
    assert_eq!(v.kind(), CurveKind::VLine);
    assert_eq!(v.final_point(), point(1.0, 5.0));
}

#[test]
fn transforms_keep_axis_alignment_when_possible() {
    let h: AnyCurve = HLineSegment::new(0.0, 3.0, 1.0).into();
    assert_eq!(
        h.transformed(&Transform::translation(1.0, 1.0)).kind(),
        CurveKind::HLine
    );
    assert_eq!(
        h.transformed(&Transform::rotation(Angle::degrees(30.0))).kind(),
        CurveKind::Line
    );
}
