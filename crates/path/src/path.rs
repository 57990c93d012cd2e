//! The default path data structure.

use crate::builder::PathBuilder;
use crate::geom::{AnyCurve, Axis, Box2D, Curve, Interval, LineSegment, SBasisCurve};
use crate::geom::{Point, SBasis, Transform, XY};
use crate::{PathError, PathTime, Stitching};

use core::slice;
use log::debug;

/// A continuous sequence of curves.
///
/// Each curve starts at the final point of the previous one. Besides its explicit curves,
/// a path has a closing segment: the line from its final point back to its initial point.
/// It only takes part in queries when the path is closed and it is not degenerate.
///
/// The global time of a path goes from zero to `size_default()`. Time `i + t` is time `t`
/// on curve `i`.
///
/// Edits that would break continuity are either rejected or fixed by inserting line
/// segments, depending on the [`Stitching`] policy they are given.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    curves: Vec<AnyCurve>,
    // From the final point to the initial point. Both are the start point of an empty path.
    closing: AnyCurve,
    closed: bool,
}

impl Path {
    /// Times up to this far out of `[0, size_default()]` are clamped instead of rejected.
    pub const TIME_EPSILON: f64 = 1e-9;

    /// Creates an empty open path starting at the origin.
    pub fn new() -> Self {
        Path {
            curves: Vec::new(),
            closing: LineSegment::new(Point::origin(), Point::origin()).into(),
            closed: false,
        }
    }

    /// Creates a [`PathBuilder`].
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Creates a path from a sequence of curves, checking continuity once at the end.
    pub fn from_curves<I>(curves: I, closed: bool) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = AnyCurve>,
    {
        let curves: Vec<AnyCurve> = curves.into_iter().collect();
        if let Some(index) = first_discontinuity(&curves) {
            debug!("rejecting discontinuous curves at join {}", index);
            return Err(PathError::Discontinuity { index });
        }

        let mut path = Path::new();
        path.curves = curves;
        path.closed = closed;
        path.update_closing(Point::origin());

        Ok(path)
    }

    // Joins pieces computed from a continuous path, absorbing round-off at the joins.
    fn from_pieces(mut pieces: Vec<AnyCurve>, closed: bool, start: Point) -> Self {
        for i in 1..pieces.len() {
            let end = pieces[i - 1].final_point();
            if pieces[i].initial_point() != end {
                pieces[i].set_initial(end);
            }
        }

        let mut path = Path::new();
        path.curves = pieces;
        path.closed = closed;
        path.update_closing(start);

        path
    }

    fn update_closing(&mut self, start: Point) {
        let (from, to) = match (self.curves.first(), self.curves.last()) {
            (Some(first), Some(last)) => (last.final_point(), first.initial_point()),
            _ => (start, start),
        };
        self.closing = LineSegment::new(from, to).into();
    }

    /// The number of explicit curves.
    #[inline]
    pub fn size_open(&self) -> usize {
        self.curves.len()
    }

    /// The number of curves including the closing segment, unless it is degenerate.
    pub fn size_closed(&self) -> usize {
        if self.closing.is_degenerate() {
            self.curves.len()
        } else {
            self.curves.len() + 1
        }
    }

    /// `size_closed()` for closed paths and `size_open()` otherwise.
    pub fn size_default(&self) -> usize {
        if self.closed {
            self.size_closed()
        } else {
            self.size_open()
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size_default()
    }

    /// Returns true if the path has no explicit curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Opens or closes the path.
    #[inline]
    pub fn close(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// The curve at an index. Index `size_open()` is the closing segment if it isn't
    /// degenerate.
    pub fn get(&self, index: usize) -> Option<&AnyCurve> {
        if index < self.curves.len() {
            return Some(&self.curves[index]);
        }
        if index < self.size_closed() {
            return Some(&self.closing);
        }

        None
    }

    /// Same as `get`, with an error instead of `None`.
    pub fn curve(&self, index: usize) -> Result<&AnyCurve, PathError> {
        self.get(index).ok_or(PathError::IndexOutOfRange {
            index,
            len: self.size_closed(),
        })
    }

    /// Iterates over the explicit curves.
    pub fn iter(&self) -> Iter {
        Iter {
            curves: self.curves.iter(),
            closing: None,
        }
    }

    /// Iterates over the explicit curves, then the closing segment if it isn't degenerate.
    pub fn iter_closed(&self) -> Iter {
        Iter {
            curves: self.curves.iter(),
            closing: if self.closing.is_degenerate() {
                None
            } else {
                Some(&self.closing)
            },
        }
    }

    /// `iter_closed()` for closed paths and `iter()` otherwise.
    pub fn iter_default(&self) -> Iter {
        if self.closed {
            self.iter_closed()
        } else {
            self.iter()
        }
    }

    #[inline]
    pub fn front(&self) -> Option<&AnyCurve> {
        self.curves.first()
    }

    #[inline]
    pub fn back(&self) -> Option<&AnyCurve> {
        self.back_default()
    }

    /// The last explicit curve.
    #[inline]
    pub fn back_open(&self) -> Option<&AnyCurve> {
        self.curves.last()
    }

    /// The closing segment, or the last explicit curve if it is degenerate.
    pub fn back_closed(&self) -> Option<&AnyCurve> {
        if self.is_empty() {
            return None;
        }
        if self.closing.is_degenerate() {
            self.back_open()
        } else {
            Some(&self.closing)
        }
    }

    pub fn back_default(&self) -> Option<&AnyCurve> {
        if self.closed {
            self.back_closed()
        } else {
            self.back_open()
        }
    }

    /// The line segment from the final point to the initial point.
    pub fn closing_segment(&self) -> LineSegment {
        LineSegment::new(self.final_point(), self.initial_point())
    }

    #[inline]
    pub fn initial_point(&self) -> Point {
        self.closing.final_point()
    }

    #[inline]
    pub fn final_point(&self) -> Point {
        self.closing.initial_point()
    }

    fn curve_ref(&self, index: usize) -> &AnyCurve {
        self.curves.get(index).unwrap_or(&self.closing)
    }

    fn check_time(&self, t: f64) -> Result<f64, PathError> {
        let max = self.size_default() as f64;
        if !(t >= -Self::TIME_EPSILON && t <= max + Self::TIME_EPSILON) {
            return Err(PathError::TimeOutOfRange { t, max });
        }

        Ok(t.max(0.0).min(max))
    }

    /// Splits a global time into a curve index and a time on that curve.
    ///
    /// `size_default()` maps to the end of the last curve.
    pub fn time_at(&self, t: f64) -> Result<PathTime, PathError> {
        let size = self.size_default();
        if size == 0 {
            return Err(PathError::EmptyPath);
        }

        let t = self.check_time(t)?;
        let index = t.floor() as usize;
        if index >= size {
            return Ok(PathTime::new(size - 1, 1.0));
        }

        Ok(PathTime::new(index, t - index as f64))
    }

    pub fn point_at(&self, t: f64) -> Result<Point, PathError> {
        let pos = self.time_at(t)?;
        Ok(self.curve_ref(pos.curve_index).point_at(pos.t))
    }

    pub fn value_at(&self, t: f64, axis: Axis) -> Result<f64, PathError> {
        let pos = self.time_at(t)?;
        Ok(self.curve_ref(pos.curve_index).value_at(pos.t, axis))
    }

    /// The curve at a global time along with the time on that curve.
    pub fn curve_at(&self, t: f64) -> Result<(&AnyCurve, f64), PathError> {
        let pos = self.time_at(t)?;
        Ok((self.curve_ref(pos.curve_index), pos.t))
    }

    /// Replaces the curves in `first..last` with `source`.
    ///
    /// All mutations of the curve sequence go through here. Nothing changes if an error is
    /// returned.
    fn update(
        &mut self,
        first: usize,
        last: usize,
        mut source: Vec<AnyCurve>,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        debug_assert!(first <= last && last <= self.curves.len());

        let start = self.initial_point();
        let before = if first > 0 {
            Some(self.curves[first - 1].final_point())
        } else {
            None
        };
        let after = self.curves.get(last).map(|c| c.initial_point());

        if source.is_empty() {
            if let (Some(from), Some(to)) = (before, after) {
                if from != to {
                    check_stitching(stitching, first)?;
                    source.push(LineSegment::new(from, to).into());
                }
            }
        } else {
            let begin = source[0].initial_point();
            let end = source[source.len() - 1].final_point();
            let front_stitch = before.filter(|&from| from != begin);
            let back_stitch = after.filter(|&to| to != end);
            if front_stitch.is_some() {
                check_stitching(stitching, first)?;
            }
            if back_stitch.is_some() {
                check_stitching(stitching, first + source.len())?;
            }
            if let Some(to) = back_stitch {
                source.push(LineSegment::new(end, to).into());
            }
            if let Some(from) = front_stitch {
                source.insert(0, LineSegment::new(from, begin).into());
            }
        }

        let tail = self.curves.split_off(last);
        self.curves.truncate(first);
        self.curves.extend(source);
        self.curves.extend(tail);
        self.update_closing(start);

        Ok(())
    }

    fn check_index(index: usize, len: usize) -> Result<(), PathError> {
        if index > len {
            return Err(PathError::IndexOutOfRange { index, len });
        }

        Ok(())
    }

    /// Adds a curve at the end of the path.
    ///
    /// An empty path accepts any curve.
    pub fn append<C: Into<AnyCurve>>(
        &mut self,
        curve: C,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        let len = self.curves.len();
        self.update(len, len, vec![curve.into()], stitching)
    }

    /// Adds a curve given by its polynomial form at the end of the path.
    pub fn append_sbasis(&mut self, curve: XY<SBasis>, stitching: Stitching) -> Result<(), PathError> {
        self.append(SBasisCurve::new(curve), stitching)
    }

    /// Inserts a curve before the curve at `index`.
    pub fn insert<C: Into<AnyCurve>>(
        &mut self,
        index: usize,
        curve: C,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        Self::check_index(index, self.curves.len())?;
        self.update(index, index, vec![curve.into()], stitching)
    }

    /// Inserts the curves `from..to` of another path before the curve at `index`.
    pub fn insert_slice(
        &mut self,
        index: usize,
        other: &Path,
        from: usize,
        to: usize,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        Self::check_index(index, self.curves.len())?;
        Self::check_index(to, other.curves.len())?;
        Self::check_index(from, to)?;
        self.update(index, index, other.curves[from..to].to_vec(), stitching)
    }

    /// Removes the curve at `index`.
    pub fn erase(&mut self, index: usize, stitching: Stitching) -> Result<(), PathError> {
        if index >= self.curves.len() {
            return Err(PathError::IndexOutOfRange {
                index,
                len: self.curves.len(),
            });
        }

        self.update(index, index + 1, Vec::new(), stitching)
    }

    /// Removes the curves `first..last`.
    pub fn erase_range(
        &mut self,
        first: usize,
        last: usize,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        Self::check_index(last, self.curves.len())?;
        Self::check_index(first, last)?;
        self.update(first, last, Vec::new(), stitching)
    }

    /// Removes the last explicit curve.
    pub fn erase_last(&mut self) -> Result<(), PathError> {
        let len = self.curves.len();
        if len == 0 {
            return Err(PathError::EmptyPath);
        }

        self.update(len - 1, len, Vec::new(), Stitching::None)
    }

    /// Removes every curve and opens the path.
    pub fn clear(&mut self) {
        self.curves.clear();
        self.closing = LineSegment::new(Point::origin(), Point::origin()).into();
        self.closed = false;
    }

    /// Replaces the curve at `index`.
    pub fn replace<C: Into<AnyCurve>>(
        &mut self,
        index: usize,
        curve: C,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        if index >= self.curves.len() {
            return Err(PathError::IndexOutOfRange {
                index,
                len: self.curves.len(),
            });
        }

        self.update(index, index + 1, vec![curve.into()], stitching)
    }

    /// Replaces the curves `first..last` with a single curve.
    pub fn replace_slice<C: Into<AnyCurve>>(
        &mut self,
        first: usize,
        last: usize,
        curve: C,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        Self::check_index(last, self.curves.len())?;
        Self::check_index(first, last)?;
        self.update(first, last, vec![curve.into()], stitching)
    }

    /// Replaces the curves `first..last` with the explicit curves of another path.
    pub fn replace_with_path(
        &mut self,
        first: usize,
        last: usize,
        other: &Path,
        stitching: Stitching,
    ) -> Result<(), PathError> {
        Self::check_index(last, self.curves.len())?;
        Self::check_index(first, last)?;
        self.update(first, last, other.curves.clone(), stitching)
    }

    /// Empties the path and sets its start point.
    pub fn start(&mut self, p: Point) {
        self.clear();
        self.closing = LineSegment::new(p, p).into();
    }

    /// Adds a line segment to `p`, unless the path already ends there.
    pub fn stitch_to(&mut self, p: Point) {
        let end = self.final_point();
        if end != p {
            let start = self.initial_point();
            self.curves.push(LineSegment::new(end, p).into());
            self.update_closing(start);
        }
    }

    /// Moves the start of the first curve.
    pub fn set_initial(&mut self, p: Point) {
        if self.curves.is_empty() {
            self.start(p);
            return;
        }

        self.curves[0].set_initial(p);
        self.update_closing(p);
    }

    /// Moves the end of the last curve.
    pub fn set_final(&mut self, p: Point) {
        let start = self.initial_point();
        match self.curves.last_mut() {
            Some(curve) => curve.set_final(p),
            None => {
                self.start(p);
                return;
            }
        }
        self.update_closing(start);
    }

    /// Appends the explicit curves of another path.
    pub fn append_path(&mut self, other: &Path, stitching: Stitching) -> Result<(), PathError> {
        let len = self.curves.len();
        self.update(len, len, other.curves.clone(), stitching)
    }

    /// Appends `self.portion(from, to)` to `target`, stitching it to the end of `target`.
    pub fn append_portion_to(&self, target: &mut Path, from: f64, to: f64) -> Result<(), PathError> {
        let portion = self.portion(from, to)?;
        if portion.is_empty() {
            if target.is_empty() {
                target.start(portion.initial_point());
            } else {
                target.stitch_to(portion.initial_point());
            }
            return Ok(());
        }

        target.append_path(&portion, Stitching::Discontinuous)
    }

    /// The union of the fast bounds of the explicit curves.
    pub fn bounds_fast(&self) -> Option<Box2D> {
        union_of(self.curves.iter().map(|c| c.bounds_fast()))
    }

    /// The union of the exact bounds of the explicit curves.
    pub fn bounds_exact(&self) -> Option<Box2D> {
        union_of(self.curves.iter().map(|c| c.bounds_exact()))
    }

    /// Global times at which the coordinate along `axis` equals `level`, in increasing order.
    ///
    /// Open paths don't report roots on their closing segment.
    pub fn roots(&self, level: f64, axis: Axis) -> Vec<f64> {
        let mut result = Vec::new();
        for (i, curve) in self.iter_default().enumerate() {
            result.extend(curve.roots(level, axis).into_iter().map(|t| i as f64 + t));
        }
        result.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
        result.dedup();

        result
    }

    /// The winding number of the path, closing segment included, around `p`.
    pub fn winding(&self, p: Point) -> i32 {
        let mut wind = 0;
        // The top edge of each box is left out so that horizontal segments count once.
        for curve in self.iter_closed() {
            let bounds = curve.bounds_fast();
            if bounds.height() == 0.0 {
                continue;
            }
            if p.x > bounds.max.x || p.y < bounds.min.y || p.y >= bounds.max.y {
                continue;
            }

            if p.x < bounds.min.x {
                // Same contribution as the chord of the curve.
                let from = curve.initial_point();
                let to = curve.final_point();
                if from.y.min(to.y) <= p.y && p.y < from.y.max(to.y) {
                    if from.y < to.y {
                        wind += 1;
                    } else if from.y > to.y {
                        wind -= 1;
                    }
                }
            } else {
                wind += curve.winding(p);
            }
        }

        wind
    }

    /// The global time of the point of the path closest to `p`, along with the squared
    /// distance.
    pub fn nearest_time_and_dist_sq(&self, p: Point) -> Result<(f64, f64), PathError> {
        let size = self.size_default();
        if size == 0 {
            return Err(PathError::EmptyPath);
        }
        self.nearest_in_ranges(p, 0.0, size as f64)
    }

    /// The global time of the point of the path closest to `p`.
    pub fn nearest_time(&self, p: Point) -> Result<f64, PathError> {
        self.nearest_time_and_dist_sq(p).map(|(t, _)| t)
    }

    /// The global time in `[from, to]` of the point of the path closest to `p`.
    pub fn nearest_time_in(&self, p: Point, from: f64, to: f64) -> Result<f64, PathError> {
        let (from, to) = self.check_range(from, to)?;
        self.nearest_in_ranges(p, from, to).map(|(t, _)| t)
    }

    fn nearest_in_ranges(&self, p: Point, from: f64, to: f64) -> Result<(f64, f64), PathError> {
        let mut best = (from, f64::INFINITY);
        for (i, a, b) in self.local_ranges(from, to) {
            let curve = self.curve_ref(i);
            if square_distance_to_box(p, &curve.bounds_fast()) >= best.1 {
                continue;
            }
            let t = curve.nearest_time(p, a, b);
            let d = (curve.point_at(t) - p).square_length();
            if d < best.1 {
                best = (i as f64 + t, d);
            }
        }

        Ok(best)
    }

    /// Every global time at which the path is closest to `p`, in increasing order.
    pub fn all_nearest_times(&self, p: Point) -> Result<Vec<f64>, PathError> {
        self.all_nearest_times_in(p, 0.0, self.size_default() as f64)
    }

    /// Every global time in `[from, to]` at which the path is closest to `p`.
    pub fn all_nearest_times_in(&self, p: Point, from: f64, to: f64) -> Result<Vec<f64>, PathError> {
        let (from, to) = self.check_range(from, to)?;

        let mut best = f64::INFINITY;
        let mut result = Vec::new();
        for (i, a, b) in self.local_ranges(from, to) {
            let curve = self.curve_ref(i);
            if square_distance_to_box(p, &curve.bounds_fast()) > best {
                continue;
            }
            let ts = curve.all_nearest_times(p, a, b);
            let d = match ts.first() {
                Some(&t) => (curve.point_at(t) - p).square_length(),
                None => continue,
            };
            if d < best * (1.0 - 1e-12) {
                best = d;
                result.clear();
            }
            if d <= best * (1.0 + 1e-12) {
                best = best.min(d);
                result.extend(ts.iter().map(|t| i as f64 + t));
            }
        }
        result.dedup();

        Ok(result)
    }

    /// The nearest time to `p` on each curve, closing segment included for closed paths.
    pub fn nearest_time_per_curve(&self, p: Point) -> Vec<f64> {
        self.iter_default().map(|c| c.nearest_time_unit(p)).collect()
    }

    fn check_range(&self, from: f64, to: f64) -> Result<(f64, f64), PathError> {
        if self.size_default() == 0 {
            return Err(PathError::EmptyPath);
        }
        let from = self.check_time(from)?;
        let to = self.check_time(to)?;

        Ok(if from > to { (to, from) } else { (from, to) })
    }

    // Curve indices covered by [from, to] and the local range on each of them.
    fn local_ranges(&self, from: f64, to: f64) -> Vec<(usize, f64, f64)> {
        let size = self.size_default();
        let split = |t: f64| {
            let i = (t.floor() as usize).min(size - 1);
            (i, t - i as f64)
        };
        let (first, t0) = split(from);
        let (last, t1) = split(to);

        (first..=last)
            .map(|i| {
                let a = if i == first { t0 } else { 0.0 };
                let b = if i == last { t1 } else { 1.0 };
                (i, a, b)
            })
            .collect()
    }

    /// The part of the path between two global times.
    ///
    /// If `from > to`, a closed path gives the portion that wraps around its start, and an
    /// open path gives the reversed portion.
    pub fn portion(&self, from: f64, to: f64) -> Result<Path, PathError> {
        let size = self.size_default();
        if size == 0 {
            return Err(PathError::EmptyPath);
        }
        let from = self.check_time(from)?;
        let to = self.check_time(to)?;

        if from == to {
            let mut path = Path::new();
            path.start(self.point_at(from)?);
            return Ok(path);
        }

        if from > to {
            if !self.closed {
                return Ok(self.portion(to, from)?.reversed());
            }
            let mut pieces = self.portion_pieces(from, size as f64);
            pieces.extend(self.portion_pieces(0.0, to));
            return Ok(Self::from_pieces(pieces, false, self.point_at(from)?));
        }

        Ok(Self::from_pieces(
            self.portion_pieces(from, to),
            false,
            self.point_at(from)?,
        ))
    }

    /// Same as `portion`, with the times given as an interval.
    pub fn portion_interval(&self, interval: &Interval) -> Result<Path, PathError> {
        self.portion(interval.min(), interval.max())
    }

    // Expects 0 <= from <= to <= size_default().
    fn portion_pieces(&self, from: f64, to: f64) -> Vec<AnyCurve> {
        if from >= to {
            return Vec::new();
        }

        let first = from.floor() as usize;
        let t0 = from - first as f64;
        let mut last = to.floor() as usize;
        let mut t1 = to - last as f64;
        if t1 == 0.0 {
            last -= 1;
            t1 = 1.0;
        }

        let piece = |i: usize, a: f64, b: f64| {
            let curve = self.curve_ref(i);
            if a == 0.0 && b == 1.0 {
                curve.clone()
            } else {
                curve.portion(a, b)
            }
        };

        if first == last {
            return vec![piece(first, t0, t1)];
        }

        let mut pieces = Vec::with_capacity(last - first + 1);
        pieces.push(piece(first, t0, 1.0));
        for i in first + 1..last {
            pieces.push(self.curve_ref(i).clone());
        }
        pieces.push(piece(last, 0.0, t1));

        pieces
    }

    /// The same path traversed backwards: `reversed()(t) == self(size() - t)`.
    ///
    /// A closed path with a non-degenerate closing segment is reversed starting from its
    /// initial point, with the reversed closing segment as its first explicit curve.
    pub fn reversed(&self) -> Path {
        let mut pieces = Vec::with_capacity(self.curves.len() + 1);
        let lead_with_closing = self.closed && !self.closing.is_degenerate();
        if lead_with_closing {
            pieces.push(self.closing.reverse());
        }
        pieces.extend(self.curves.iter().rev().map(|c| c.reverse()));

        let start = if lead_with_closing {
            self.initial_point()
        } else {
            self.final_point()
        };
        Self::from_pieces(pieces, self.closed, start)
    }

    /// Applies an affine transform to every curve.
    pub fn transformed(&self, transform: &Transform) -> Path {
        let pieces = self.curves.iter().map(|c| c.transformed(transform)).collect();
        Self::from_pieces(
            pieces,
            self.closed,
            transform.transform_point(self.initial_point()),
        )
    }

    /// The sum of the lengths of the curves, closing segment included for closed paths.
    pub fn length(&self, tolerance: f64) -> f64 {
        self.iter_default().map(|c| c.length(tolerance)).sum()
    }

    /// The polynomial form of each curve, closing segment included for closed paths.
    pub fn to_sbasis_pieces(&self) -> Vec<XY<SBasis>> {
        self.iter_default().map(|c| c.to_sbasis()).collect()
    }

    /// Checks that each explicit curve starts where the previous one ends.
    pub fn check_continuity(&self) -> Result<(), PathError> {
        match first_discontinuity(&self.curves) {
            Some(index) => Err(PathError::Discontinuity { index }),
            None => Ok(()),
        }
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Path) -> bool {
        self.closed == other.closed && self.curves == other.curves
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = &'l AnyCurve;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// An iterator over the curves of a `Path`.
#[derive(Clone)]
pub struct Iter<'l> {
    curves: slice::Iter<'l, AnyCurve>,
    closing: Option<&'l AnyCurve>,
}

impl<'l> Iterator for Iter<'l> {
    type Item = &'l AnyCurve;

    fn next(&mut self) -> Option<&'l AnyCurve> {
        match self.curves.next() {
            Some(curve) => Some(curve),
            None => self.closing.take(),
        }
    }
}

fn check_stitching(stitching: Stitching, index: usize) -> Result<(), PathError> {
    match stitching {
        Stitching::None => {
            debug!("rejecting an edit that breaks the path at join {}", index);
            Err(PathError::Discontinuity { index })
        }
        Stitching::Discontinuous => {
            debug!("stitching join {} with a line segment", index);
            Ok(())
        }
    }
}

fn first_discontinuity(curves: &[AnyCurve]) -> Option<usize> {
    (1..curves.len()).find(|&i| curves[i - 1].final_point() != curves[i].initial_point())
}

// `Box2D::union` drops boxes with zero area, which the bounds of axis-aligned lines have.
fn union_of<I: Iterator<Item = Box2D>>(boxes: I) -> Option<Box2D> {
    boxes.fold(None, |acc, b| match acc {
        Some(a) => Some(Box2D::new(a.min.min(b.min), a.max.max(b.max))),
        None => Some(b),
    })
}

fn square_distance_to_box(p: Point, b: &Box2D) -> f64 {
    let dx = (b.min.x - p.x).max(p.x - b.max.x).max(0.0);
    let dy = (b.min.y - p.y).max(p.y - b.max.y).max(0.0);
    dx * dx + dy * dy
}
