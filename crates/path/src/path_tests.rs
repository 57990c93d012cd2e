use crate::geom::{point, vector, Angle, AnyCurve, Axis, Curve, CurveKind, Interval};
use crate::geom::{EllipticalArc, HLineSegment, LineSegment, Point, QuadraticBezier, Transform, XY};
use crate::{Path, PathError, PathTime, Stitching};

fn line(from: Point, to: Point) -> AnyCurve {
    LineSegment::new(from, to).into()
}

fn assert_near(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

// The unit square, counter-clockwise, without its left edge.
fn square(closed: bool) -> Path {
    Path::from_curves(
        vec![
            line(point(0.0, 0.0), point(1.0, 0.0)),
            line(point(1.0, 0.0), point(1.0, 1.0)),
            line(point(1.0, 1.0), point(0.0, 1.0)),
        ],
        closed,
    )
    .unwrap()
}

#[test]
fn sizes() {
    let open = square(false);
    assert_eq!(open.size_open(), 3);
    assert_eq!(open.size_closed(), 4);
    assert_eq!(open.size_default(), 3);
    assert_eq!(open.size(), 3);

    let closed = square(true);
    assert_eq!(closed.size_default(), 4);
    assert_eq!(closed.size(), 4);

    let mut degenerate_closing = square(true);
    degenerate_closing
        .append(line(point(0.0, 1.0), point(0.0, 0.0)), Stitching::None)
        .unwrap();
    assert_eq!(degenerate_closing.size_open(), 4);
    assert_eq!(degenerate_closing.size_closed(), 4);

    let empty = Path::new();
    assert!(empty.is_empty());
    assert_eq!(empty.size_closed(), 0);
    assert_eq!(empty.size(), 0);
}

#[test]
fn evaluation() {
    let path = square(true);
    assert_eq!(path.point_at(3.5).unwrap(), point(0.0, 0.5));
    assert_eq!(path.point_at(0.0).unwrap(), point(0.0, 0.0));
    assert_eq!(path.point_at(4.0).unwrap(), point(0.0, 0.0));
    assert_eq!(path.value_at(1.25, Axis::Y).unwrap(), 0.25);

    let (curve, t) = path.curve_at(2.75).unwrap();
    assert_eq!(curve.initial_point(), point(1.0, 1.0));
    assert_eq!(t, 0.75);

    assert_eq!(path.time_at(4.0).unwrap(), PathTime::new(3, 1.0));
    assert_eq!(path.time_at(1.5).unwrap().as_flat_time(), 1.5);

    let open = square(false);
    assert_eq!(open.point_at(3.0).unwrap(), point(0.0, 1.0));
    assert_eq!(
        open.point_at(3.5),
        Err(PathError::TimeOutOfRange { t: 3.5, max: 3.0 })
    );
    assert!(open.point_at(-0.1).is_err());
    assert!(open.point_at(f64::NAN).is_err());
    assert_eq!(Path::new().point_at(0.0), Err(PathError::EmptyPath));
}

#[test]
fn round_off_at_the_end_is_tolerated() {
    let path = square(false);
    let t = 3.0 + Path::TIME_EPSILON * 0.5;
    assert_eq!(path.point_at(t).unwrap(), point(0.0, 1.0));
    assert_eq!(path.point_at(-Path::TIME_EPSILON * 0.5).unwrap(), point(0.0, 0.0));
}

#[test]
fn continuity_at_integer_times() {
    let path = square(true);
    for i in 1..path.size_open() {
        let p = path.point_at(i as f64).unwrap();
        assert_eq!(p, path.get(i - 1).unwrap().final_point());
        assert_eq!(p, path.get(i).unwrap().initial_point());
    }
    assert!(path.check_continuity().is_ok());
}

#[test]
fn accessors() {
    let open = square(false);
    assert_eq!(open.initial_point(), point(0.0, 0.0));
    assert_eq!(open.final_point(), point(0.0, 1.0));
    assert_eq!(
        open.closing_segment(),
        LineSegment::new(point(0.0, 1.0), point(0.0, 0.0))
    );
    assert_eq!(open.front().unwrap().final_point(), point(1.0, 0.0));
    assert_eq!(open.back().unwrap().initial_point(), point(1.0, 1.0));
    assert_eq!(open.back_open(), open.get(2));
    assert_eq!(open.back_closed().unwrap().final_point(), point(0.0, 0.0));
    assert_eq!(open.iter().count(), 3);
    assert_eq!(open.iter_closed().count(), 4);
    assert_eq!((&open).into_iter().count(), 3);

    let closed = square(true);
    assert_eq!(closed.back(), closed.back_closed());
    assert_eq!(closed.iter_default().count(), 4);
    assert_eq!(closed.get(3).unwrap().final_point(), point(0.0, 0.0));
    assert_eq!(
        closed.curve(4),
        Err(PathError::IndexOutOfRange { index: 4, len: 4 })
    );
    assert!(Path::new().back_closed().is_none());
}

#[test]
fn from_curves_checks_continuity() {
    crate::init_test_logger();

    let result = Path::from_curves(
        vec![
            line(point(0.0, 0.0), point(1.0, 0.0)),
            line(point(1.0, 0.0), point(1.0, 1.0)),
            line(point(2.0, 1.0), point(0.0, 1.0)),
        ],
        false,
    );
    assert_eq!(result, Err(PathError::Discontinuity { index: 2 }));
}

#[test]
fn append_with_and_without_stitching() {
    crate::init_test_logger();

    let mut path = Path::new();
    path.append(line(point(0.0, 0.0), point(1.0, 0.0)), Stitching::None)
        .unwrap();
    let arc = EllipticalArc::new(
        point(2.0, 0.0),
        vector(1.0, 1.0),
        Angle::zero(),
        false,
        true,
        point(3.0, 1.0),
    )
    .unwrap();

    let before = path.clone();
    assert_eq!(
        path.append(arc, Stitching::None),
        Err(PathError::Discontinuity { index: 1 })
    );
    assert_eq!(path, before);

    let size = path.size();
    path.append(arc, Stitching::Discontinuous).unwrap();
    assert_eq!(path.size(), size + 2);
    assert_eq!(path.get(1).unwrap().kind(), CurveKind::Line);
    assert_eq!(path.get(1).unwrap().final_point(), point(2.0, 0.0));
    assert_eq!(path.get(2).unwrap().kind(), CurveKind::Arc);
    assert!(path.check_continuity().is_ok());
}

#[test]
fn an_empty_path_accepts_any_curve() {
    let mut path = Path::new();
    path.append(line(point(5.0, 5.0), point(6.0, 5.0)), Stitching::None)
        .unwrap();
    assert_eq!(path.initial_point(), point(5.0, 5.0));

    path.append_sbasis(XY::line(point(6.0, 5.0), point(6.0, 6.0)), Stitching::None)
        .unwrap();
    assert_eq!(path.get(1).unwrap().kind(), CurveKind::SBasis);
    assert_eq!(path.final_point(), point(6.0, 6.0));
}

#[test]
fn insert() {
    let mut path = square(false);
    path.insert(0, line(point(-1.0, 0.0), point(0.0, 0.0)), Stitching::None)
        .unwrap();
    assert_eq!(path.size_open(), 4);
    assert_eq!(path.initial_point(), point(-1.0, 0.0));

    let before = path.clone();
    assert!(path
        .insert(2, line(point(5.0, 5.0), point(6.0, 6.0)), Stitching::None)
        .is_err());
    assert_eq!(path, before);

    path.insert(2, line(point(5.0, 5.0), point(6.0, 6.0)), Stitching::Discontinuous)
        .unwrap();
    assert_eq!(path.size_open(), 7);
    assert!(path.check_continuity().is_ok());

    assert_eq!(
        path.insert(8, line(point(0.0, 1.0), point(0.0, 2.0)), Stitching::None),
        Err(PathError::IndexOutOfRange { index: 8, len: 7 })
    );
}

#[test]
fn insert_slice() {
    let mut path = Path::new();
    path.append(line(point(0.0, 0.0), point(1.0, 0.0)), Stitching::None)
        .unwrap();
    path.append(line(point(1.0, 0.0), point(3.0, 0.0)), Stitching::None)
        .unwrap();

    let other = square(false);
    path.insert_slice(1, &other, 2, 3, Stitching::Discontinuous)
        .unwrap();
    // A stitch on each side of the inserted curve.
    assert_eq!(path.size_open(), 5);
    assert_eq!(path.get(2).unwrap(), other.get(2).unwrap());
    assert!(path.check_continuity().is_ok());

    assert!(path.insert_slice(0, &other, 2, 4, Stitching::None).is_err());
    assert!(path.insert_slice(0, &other, 2, 1, Stitching::None).is_err());
}

#[test]
fn erase() {
    crate::init_test_logger();

    let mut path = square(false);
    let before = path.clone();
    assert_eq!(
        path.erase(1, Stitching::None),
        Err(PathError::Discontinuity { index: 1 })
    );
    assert_eq!(path, before);

    path.erase(1, Stitching::Discontinuous).unwrap();
    assert_eq!(path.size_open(), 3);
    assert_eq!(
        *path.get(1).unwrap(),
        line(point(1.0, 0.0), point(1.0, 1.0))
    );

    // Erasing the ends never breaks the path.
    path.erase(0, Stitching::None).unwrap();
    assert_eq!(path.initial_point(), point(1.0, 0.0));
    path.erase_last().unwrap();
    assert_eq!(path.size_open(), 1);
    path.erase_last().unwrap();
    assert!(path.is_empty());
    assert_eq!(path.erase_last(), Err(PathError::EmptyPath));
    assert_eq!(
        path.erase(0, Stitching::None),
        Err(PathError::IndexOutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn erase_range() {
    let mut path = square(false);
    path.erase_range(0, 2, Stitching::None).unwrap();
    assert_eq!(path.size_open(), 1);
    assert_eq!(path.initial_point(), point(1.0, 1.0));

    let mut path = square(false);
    path.append(line(point(0.0, 1.0), point(0.0, 0.0)), Stitching::None)
        .unwrap();
    path.erase_range(1, 3, Stitching::Discontinuous).unwrap();
    assert_eq!(path.size_open(), 3);
    assert_eq!(
        *path.get(1).unwrap(),
        line(point(1.0, 0.0), point(0.0, 1.0))
    );

    assert!(path.erase_range(2, 1, Stitching::None).is_err());
    assert!(path.erase_range(0, 4, Stitching::None).is_err());
}

#[test]
fn replace() {
    let mut path = square(false);
    let bump = QuadraticBezier::new(point(1.0, 0.0), point(2.0, 0.5), point(1.0, 1.0));
    path.replace(1, bump, Stitching::None).unwrap();
    assert_eq!(path.get(1).unwrap().kind(), CurveKind::Quadratic);
    assert_eq!(path.size_open(), 3);

    path.replace_slice(0, 2, line(point(0.0, 0.0), point(1.0, 1.0)), Stitching::None)
        .unwrap();
    assert_eq!(path.size_open(), 2);
    assert!(path.check_continuity().is_ok());

    let before = path.clone();
    assert!(path
        .replace(0, line(point(0.0, 0.0), point(2.0, 2.0)), Stitching::None)
        .is_err());
    assert_eq!(path, before);
    assert_eq!(
        path.replace(2, line(point(0.0, 0.0), point(2.0, 2.0)), Stitching::None),
        Err(PathError::IndexOutOfRange { index: 2, len: 2 })
    );
}

#[test]
fn replace_with_path() {
    let mut path = square(false);
    let mut detour = Path::new();
    detour.start(point(1.0, 0.0));
    detour.stitch_to(point(2.0, 0.0));
    detour.stitch_to(point(2.0, 1.0));
    detour.stitch_to(point(1.0, 1.0));
    assert_eq!(detour.size_open(), 3);

    path.replace_with_path(1, 2, &detour, Stitching::None).unwrap();
    assert_eq!(path.size_open(), 5);
    assert_eq!(path.point_at(2.5).unwrap(), point(2.0, 0.5));
    assert!(path.check_continuity().is_ok());
}

#[test]
fn start_and_stitch_to() {
    let mut path = square(true);
    path.start(point(3.0, 3.0));
    assert!(path.is_empty());
    assert!(!path.is_closed());
    assert_eq!(path.initial_point(), point(3.0, 3.0));
    assert_eq!(path.final_point(), point(3.0, 3.0));

    path.stitch_to(point(3.0, 3.0));
    assert!(path.is_empty());
    path.stitch_to(point(4.0, 3.0));
    assert_eq!(path.size_open(), 1);
    assert_eq!(path.initial_point(), point(3.0, 3.0));
    path.stitch_to(point(4.0, 3.0));
    assert_eq!(path.size_open(), 1);

    path.clear();
    assert!(path.is_empty());
    assert_eq!(path.initial_point(), point(0.0, 0.0));
}

#[test]
fn set_end_points() {
    let mut path = square(true);
    path.set_initial(point(-1.0, -1.0));
    path.set_final(point(-1.0, 2.0));
    assert_eq!(path.initial_point(), point(-1.0, -1.0));
    assert_eq!(path.final_point(), point(-1.0, 2.0));
    assert_eq!(path.point_at(4.0).unwrap(), point(-1.0, -1.0));
    assert_eq!(
        path.closing_segment(),
        LineSegment::new(point(-1.0, 2.0), point(-1.0, -1.0))
    );

    // Axis aligned segments turn into general ones when needed.
    let mut path = Path::new();
    path.append(HLineSegment::new(0.0, 1.0, 0.0), Stitching::None)
        .unwrap();
    path.set_final(point(1.0, 1.0));
    assert_eq!(path.get(0).unwrap().kind(), CurveKind::Line);
    assert_eq!(path.initial_point(), point(0.0, 0.0));

    let mut empty = Path::new();
    empty.set_final(point(2.0, 2.0));
    assert_eq!(empty.initial_point(), point(2.0, 2.0));
}

#[test]
fn append_path_and_portions() {
    let mut path = square(false);
    let mut tail = Path::new();
    tail.start(point(0.0, 1.0));
    tail.stitch_to(point(0.0, 2.0));
    path.append_path(&tail, Stitching::None).unwrap();
    assert_eq!(path.size_open(), 4);

    let source = square(true);
    let mut target = Path::new();
    source.append_portion_to(&mut target, 0.5, 1.5).unwrap();
    assert_eq!(target.initial_point(), point(0.5, 0.0));
    assert_eq!(target.final_point(), point(1.0, 0.5));
    source.append_portion_to(&mut target, 2.5, 3.5).unwrap();
    // The gap between the two portions is stitched.
    assert_eq!(target.size_open(), 5);
    assert_eq!(target.final_point(), point(0.0, 0.5));
    assert!(target.check_continuity().is_ok());
}

#[test]
fn portions() {
    let path = square(true);
    let size = path.size() as f64;
    let portion = path.portion(0.3 * size, 0.4 * size).unwrap();
    assert_near(portion.point_at(0.0).unwrap(), path.point_at(0.3 * size).unwrap());
    assert_near(portion.final_point(), path.point_at(0.4 * size).unwrap());
    assert!(!portion.is_closed());

    let whole = path.portion(0.0, size).unwrap();
    assert_eq!(whole.size_open(), 4);
    assert_eq!(whole.initial_point(), path.initial_point());

    let interval = path.portion_interval(&Interval::new(1.0, 3.0)).unwrap();
    assert_eq!(interval.size_open(), 2);
    assert_eq!(interval.initial_point(), point(1.0, 0.0));
    assert_eq!(interval.final_point(), point(0.0, 1.0));

    let point_like = path.portion(1.5, 1.5).unwrap();
    assert!(point_like.is_empty());
    assert_eq!(point_like.initial_point(), point(1.0, 0.5));

    assert!(path.portion(0.0, 5.0).is_err());
}

#[test]
fn backwards_portions() {
    // Closed paths wrap around their start.
    let closed = square(true);
    let wrapped = closed.portion(3.5, 0.5).unwrap();
    assert_eq!(wrapped.size_open(), 2);
    assert_eq!(wrapped.initial_point(), point(0.0, 0.5));
    assert_eq!(wrapped.point_at(1.0).unwrap(), point(0.0, 0.0));
    assert_eq!(wrapped.final_point(), point(0.5, 0.0));

    // Open paths give the reversed portion.
    let open = square(false);
    let reversed = open.portion(2.5, 0.5).unwrap();
    assert_eq!(reversed.size_open(), 3);
    assert_near(reversed.initial_point(), point(0.5, 1.0));
    assert_near(reversed.final_point(), point(0.5, 0.0));
    assert!(reversed.check_continuity().is_ok());
}

#[test]
fn reversed() {
    let mut path = square(false);
    let bump = QuadraticBezier::new(point(1.0, 0.0), point(2.0, 0.5), point(1.0, 1.0));
    path.replace(1, bump, Stitching::None).unwrap();

    let reversed = path.reversed();
    let size = path.size_open() as f64;
    for i in 0..=12 {
        let t = i as f64 / 4.0;
        assert_near(reversed.point_at(t).unwrap(), path.point_at(size - t).unwrap());
    }
    assert!(reversed.check_continuity().is_ok());
    assert_eq!(reversed.reversed(), path);
}

#[test]
fn reversed_closed_path() {
    let mut path = Path::new();
    path.append(
        crate::geom::CubicBezier::new(
            point(2.0, 0.0),
            point(3.0, 2.0),
            point(4.0, -1.0),
            point(5.0, 1.0),
        ),
        Stitching::None,
    )
    .unwrap();
    path.append(line(point(5.0, 1.0), point(3.0, 1.0)), Stitching::None)
        .unwrap();
    path.close(true);
    assert_eq!(path.size(), 3);

    let reversed = path.reversed();
    assert!(reversed.is_closed());
    assert_eq!(reversed.size(), 3);
    assert_eq!(reversed.initial_point(), path.initial_point());
    let size = path.size() as f64;
    for i in 0..=12 {
        let t = i as f64 / 4.0;
        assert_near(reversed.point_at(t).unwrap(), path.point_at(size - t).unwrap());
    }
    assert!(reversed.check_continuity().is_ok());
}

#[test]
fn transformed() {
    let path = square(true);
    let m = Transform::scale(2.0, 3.0).then_translate(vector(1.0, 1.0));
    let moved = path.transformed(&m);
    assert!(moved.is_closed());
    assert_eq!(moved.initial_point(), point(1.0, 1.0));
    assert_eq!(moved.point_at(1.5).unwrap(), point(3.0, 2.5));
    assert!(moved.check_continuity().is_ok());
}

#[test]
fn bounds() {
    assert!(Path::new().bounds_fast().is_none());
    assert!(Path::new().bounds_exact().is_none());

    let mut path = square(false);
    let bump = QuadraticBezier::new(point(1.0, 0.0), point(2.0, 0.5), point(1.0, 1.0));
    path.replace(1, bump, Stitching::None).unwrap();

    let exact = path.bounds_exact().unwrap();
    assert_eq!(exact.min, point(0.0, 0.0));
    assert!((exact.max.x - 1.5).abs() < 1e-12);
    assert_eq!(exact.max.y, 1.0);

    let fast = path.bounds_fast().unwrap();
    assert!(fast.contains_box(&exact));
}

#[test]
fn bounds_of_axis_aligned_lines() {
    let path = Path::from_curves(
        vec![
            line(point(0.0, 0.0), point(4.0, 0.0)),
            line(point(4.0, 0.0), point(4.0, 2.0)),
        ],
        false,
    )
    .unwrap();

    let expected = crate::geom::Box2D::new(point(0.0, 0.0), point(4.0, 2.0));
    assert_eq!(path.bounds_exact(), Some(expected));
    assert_eq!(path.bounds_fast(), Some(expected));

    let mut single_point = Path::new();
    single_point
        .append(line(point(1.0, 1.0), point(1.0, 1.0)), Stitching::None)
        .unwrap();
    single_point
        .append(line(point(1.0, 1.0), point(3.0, 1.0)), Stitching::None)
        .unwrap();
    let b = single_point.bounds_exact().unwrap();
    assert_eq!((b.min, b.max), (point(1.0, 1.0), point(3.0, 1.0)));
}

#[test]
fn roots() {
    let open = square(false);
    // The closing segment crosses y = 0.5 at time 3.5, past the end of an open path.
    assert_eq!(open.roots(0.5, Axis::Y), vec![1.5]);
    let closed = square(true);
    assert_eq!(closed.roots(0.5, Axis::Y), vec![1.5, 3.5]);

    // A segment lying on the level has no isolated roots.
    assert_eq!(open.roots(1.0, Axis::X), vec![1.0, 2.0]);
    for t in closed.roots(0.25, Axis::X) {
        assert!((closed.value_at(t, Axis::X).unwrap() - 0.25).abs() < 1e-12);
    }
}

#[test]
fn winding() {
    let open = square(false);
    let closed = square(true);
    for path in &[&open, &closed] {
        assert_eq!(path.winding(point(0.5, 0.5)), 1);
        assert_eq!(path.winding(point(2.0, 0.5)), 0);
        assert_eq!(path.winding(point(-1.0, 0.5)), 0);
        assert_eq!(path.winding(point(0.5, 2.0)), 0);
    }
    assert_eq!(closed.reversed().winding(point(0.5, 0.5)), -1);

    let mut round = Path::new();
    round
        .append(
            EllipticalArc::from_center(
                point(0.0, 0.0),
                vector(1.0, 1.0),
                Angle::zero(),
                Angle::zero(),
                Angle::radians(3.0),
            )
            .unwrap(),
            Stitching::None,
        )
        .unwrap();
    round.close(true);
    assert_eq!(round.winding(point(0.0, 0.5)), 1);
    assert_eq!(round.winding(point(0.0, -0.5)), 0);
}

#[test]
fn nearest_times() {
    let path = square(true);
    let (t, d) = path.nearest_time_and_dist_sq(point(0.5, -1.0)).unwrap();
    assert_eq!(t, 0.5);
    assert_eq!(d, 1.0);
    assert_eq!(path.nearest_time(point(-1.0, 0.5)).unwrap(), 3.5);
    assert_eq!(path.nearest_time(point(2.0, 2.0)).unwrap(), 2.0);

    assert_eq!(
        path.all_nearest_times(point(0.5, 0.5)).unwrap(),
        vec![0.5, 1.5, 2.5, 3.5]
    );
    assert_eq!(
        path.all_nearest_times_in(point(0.5, 0.5), 1.0, 3.0).unwrap(),
        vec![1.5, 2.5]
    );
    assert_eq!(
        path.nearest_time_in(point(0.5, -1.0), 1.0, 2.0).unwrap(),
        1.0
    );
    assert_eq!(
        path.nearest_time_per_curve(point(0.5, 0.5)),
        vec![0.5, 0.5, 0.5, 0.5]
    );

    let open = square(false);
    assert_eq!(open.nearest_time(point(-1.0, 0.5)).unwrap(), 0.0);
    assert_eq!(open.nearest_time_per_curve(point(0.5, 0.5)).len(), 3);

    assert_eq!(Path::new().nearest_time(point(0.0, 0.0)), Err(PathError::EmptyPath));
    assert!(path.nearest_time_in(point(0.0, 0.0), 0.0, 9.0).is_err());
}

#[test]
fn length_and_polynomial_pieces() {
    assert!((square(false).length(0.01) - 3.0).abs() < 1e-12);
    assert!((square(true).length(0.01) - 4.0).abs() < 1e-12);

    let pieces = square(true).to_sbasis_pieces();
    assert_eq!(pieces.len(), 4);
    assert_eq!(pieces[3].point_at(0.5), point(0.0, 0.5));
}

#[test]
fn equality() {
    assert_eq!(square(false), square(false));
    assert_ne!(square(false), square(true));

    let mut other = square(false);
    other.set_final(point(0.0, 2.0));
    assert_ne!(square(false), other);
}
