//! The sweep-line pass that finds all the places where segments meet.
//!
//! We move a horizontal line upwards (in increasing `y`) over the segments. A
//! segment is "active" while the sweep-line is between its endpoints, and two
//! segments can only touch if they are active at the same time. Every
//! entering segment gets compared exactly against the active segments whose
//! horizontal extent overlaps it.
//!
//! The output is, for each segment, the sorted list of points that it passes
//! through: its endpoints, plus every point where some other segment touches
//! it. Cutting the segments at those points gives a collection of segments that
//! only ever meet at endpoints.

use tracing::trace;

use crate::{
    geom::Point,
    segments::{SegIdx, Segments},
};

/// For each segment (indexed by `SegIdx`), its split points in sweep-line order.
///
/// The first and last entries are the segment's own endpoints.
#[derive(Clone, Debug)]
pub struct SplitSegments {
    points: Vec<Vec<Point>>,
}

impl SplitSegments {
    /// The points along `idx`, including its endpoints, in sweep-line order.
    pub fn points(&self, idx: SegIdx) -> &[Point] {
        &self.points[idx.0]
    }
}

/// Runs the sweep-line over `segments`.
pub fn sweep(segments: &Segments) -> SplitSegments {
    let mut points: Vec<Vec<Point>> = segments
        .indices()
        .map(|idx| vec![segments[idx].start.clone(), segments[idx].end.clone()])
        .collect();

    let mut active: Vec<SegIdx> = Vec::new();
    let mut comparisons = 0usize;
    for &idx in segments.entrances() {
        let seg = &segments[idx];
        let y = &seg.start.y;

        // Retire the segments that the sweep-line has moved past.
        active.retain(|&other| &segments[other].end.y >= y);

        for &other_idx in &active {
            let other = &segments[other_idx];
            if other.max_x() < seg.min_x() || seg.max_x() < other.min_x() {
                continue;
            }
            comparisons += 1;
            let split = seg.split_points(other);
            points[idx.0].extend(split.first);
            points[other_idx.0].extend(split.second);
        }
        active.push(idx);
    }

    for ps in &mut points {
        ps.sort();
        ps.dedup();
    }
    trace!(
        segments = segments.len(),
        comparisons,
        "finished sweeping for intersections"
    );

    SplitSegments { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn crossing_squares() {
        let a = [p(0, 0), p(2, 0), p(2, 2), p(0, 2)];
        let b = [p(1, 1), p(3, 1), p(3, 3), p(1, 3)];
        let mut segs = Segments::default();
        segs.add_cycles([a.iter()], true);
        segs.add_cycles([b.iter()], false);
        let split = sweep(&segs);

        // The right side of `a` is crossed by the bottom of `b`.
        assert_eq!(split.points(SegIdx(1)), &[p(2, 0), p(2, 1), p(2, 2)]);
        // The top of `a` is crossed by the left of `b`.
        assert_eq!(split.points(SegIdx(2)), &[p(0, 2), p(1, 2), p(2, 2)]);
        // The bottom of `a` isn't touched.
        assert_eq!(split.points(SegIdx(0)), &[p(0, 0), p(2, 0)]);
    }

    #[test]
    fn overlapping_edges() {
        let a = [p(0, 0), p(4, 0), p(4, 1), p(0, 1)];
        let b = [p(2, 0), p(6, 0), p(6, -1), p(2, -1)];
        let mut segs = Segments::default();
        segs.add_cycles([a.iter()], true);
        segs.add_cycles([b.iter()], false);
        let split = sweep(&segs);

        assert_eq!(split.points(SegIdx(0)), &[p(0, 0), p(2, 0), p(4, 0)]);
        assert_eq!(split.points(SegIdx(4)), &[p(2, 0), p(4, 0), p(6, 0)]);
    }
}
