//! The planar graph formed by the boundaries of two polygon sets.
//!
//! Segments are cut at their split points, coincident pieces are merged, and
//! every piece learns the exact winding numbers on both of its sides. From
//! there, the boundary of any set described by those winding numbers can be
//! walked into rings and nested into polygons with holes.

use std::collections::{BTreeMap, BTreeSet};

use malachite::num::arithmetic::traits::Abs;
use malachite::Rational;
use tracing::{debug, warn};

use crate::{
    geom::{self, Point},
    polygon::{Polygon, PolygonWithHoles},
    segments::{cyclic_pairs, Segments},
    sweep,
};

/// Winding numbers of a region with respect to both input sets.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct WindingNumber {
    /// With respect to the first set.
    pub shape_a: i32,
    /// With respect to the second set.
    pub shape_b: i32,
}

impl std::fmt::Debug for WindingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}a + {}b", self.shape_a, self.shape_b)
    }
}

impl std::ops::Add for WindingNumber {
    type Output = WindingNumber;

    fn add(self, rhs: WindingNumber) -> WindingNumber {
        WindingNumber {
            shape_a: self.shape_a + rhs.shape_a,
            shape_b: self.shape_b + rhs.shape_b,
        }
    }
}

impl std::ops::AddAssign for WindingNumber {
    fn add_assign(&mut self, rhs: WindingNumber) {
        *self = *self + rhs;
    }
}

impl WindingNumber {
    fn scaled(self, k: i32) -> WindingNumber {
        WindingNumber {
            shape_a: self.shape_a * k,
            shape_b: self.shape_b * k,
        }
    }
}

/// The winding numbers on either side of an output segment, as seen from one
/// of its ends.
///
/// Merged segments can have sides whose winding numbers differ by more than one.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct HalfSegmentWindingNumbers {
    /// Left of the segment, looking out from this end.
    pub counter_clockwise: WindingNumber,
    /// Right of the segment, looking out from this end.
    pub clockwise: WindingNumber,
}

impl HalfSegmentWindingNumbers {
    /// Whether both sides agree, making the segment invisible to every set.
    pub fn is_trivial(&self) -> bool {
        self.counter_clockwise == self.clockwise
    }

    /// The same sides, seen from the other end.
    fn flipped(self) -> Self {
        Self {
            counter_clockwise: self.clockwise,
            clockwise: self.counter_clockwise,
        }
    }
}

impl std::fmt::Debug for HalfSegmentWindingNumbers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} | {:?}", self.clockwise, self.counter_clockwise)
    }
}

/// Identifies an output segment of one particular [`Topology`].
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutputSegIdx(usize);

impl OutputSegIdx {
    /// The end at the segment's smaller point.
    pub fn first_half(self) -> HalfOutputSegIdx {
        HalfOutputSegIdx {
            idx: self,
            first_half: true,
        }
    }

    /// The end at the segment's larger point.
    pub fn second_half(self) -> HalfOutputSegIdx {
        HalfOutputSegIdx {
            idx: self,
            first_half: false,
        }
    }
}

/// One end of an output segment.
///
/// The first half sits at the smaller endpoint in sweep order.
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct HalfOutputSegIdx {
    idx: OutputSegIdx,
    first_half: bool,
}

impl HalfOutputSegIdx {
    /// The other end of the same output segment.
    pub fn other_half(self) -> Self {
        Self {
            idx: self.idx,
            first_half: !self.first_half,
        }
    }
}

impl std::fmt::Debug for HalfOutputSegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.first_half {
            write!(f, "s{}->", self.idx.0)
        } else {
            write!(f, "s{}<-", self.idx.0)
        }
    }
}

/// Per-end data for output segments, with both ends stored side by side.
#[derive(Clone, Hash, PartialEq, Eq)]
struct HalfOutputSegVec<T> {
    start: Vec<T>,
    end: Vec<T>,
}

impl<T> HalfOutputSegVec<T> {
    fn with_capacity(cap: usize) -> Self {
        Self {
            start: Vec::with_capacity(cap),
            end: Vec::with_capacity(cap),
        }
    }

    fn push(&mut self, start: T, end: T) {
        self.start.push(start);
        self.end.push(end);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for HalfOutputSegVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for (start, end) in self.start.iter().zip(&self.end) {
            list.entry(&format_args!("{start:?} -> {end:?}"));
        }
        list.finish()
    }
}

impl<T> std::ops::Index<HalfOutputSegIdx> for HalfOutputSegVec<T> {
    type Output = T;

    fn index(&self, index: HalfOutputSegIdx) -> &Self::Output {
        if index.first_half {
            &self.start[index.idx.0]
        } else {
            &self.end[index.idx.0]
        }
    }
}

impl<T> std::ops::IndexMut<HalfOutputSegIdx> for HalfOutputSegVec<T> {
    fn index_mut(&mut self, index: HalfOutputSegIdx) -> &mut T {
        if index.first_half {
            &mut self.start[index.idx.0]
        } else {
            &mut self.end[index.idx.0]
        }
    }
}

typed_vec!(struct OutputSegVec[OutputSegIdx] as "o");

/// Identifies a point of one particular [`Topology`].
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PointIdx(usize);

typed_vec!(struct PointVec[PointIdx] as "p");

#[derive(Clone, Copy, Hash, PartialEq, Eq)]
struct PointNeighbors {
    clockwise: HalfOutputSegIdx,
    counter_clockwise: HalfOutputSegIdx,
}

impl std::fmt::Debug for PointNeighbors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} o {:?}", self.counter_clockwise, self.clockwise)
    }
}

/// The boundaries of two polygon sets, cut into output segments that only
/// meet at their endpoints.
///
/// Overlapping input edges share one output segment. Pieces that every set
/// sees on both sides are gone.
#[derive(Clone, Debug)]
pub struct Topology {
    /// The output points, in sweep-line order.
    points: PointVec<Point>,
    /// The segment endpoints, as indices into `points`.
    point_idx: HalfOutputSegVec<PointIdx>,
    /// For each output half-segment, its neighboring segments are the ones
    /// that share a point with it, in angular order around that point.
    point_neighbors: HalfOutputSegVec<PointNeighbors>,
    /// Side winding numbers, as seen from the first half. The second half sees
    /// them flipped.
    winding: OutputSegVec<HalfSegmentWindingNumbers>,
}

// An output segment in the making: its endpoints (in sweep-line order) and
// how much the winding number jumps when crossing it from right to left.
struct Piece<'a> {
    start: &'a Point,
    end: &'a Point,
    delta: WindingNumber,
}

impl Topology {
    /// Builds the topology of two polygon sets.
    ///
    /// Each polygon's last vertex connects back to its first. Either
    /// orientation is accepted.
    pub fn from_polygons<'a>(
        set_a: impl IntoIterator<Item = &'a Polygon>,
        set_b: impl IntoIterator<Item = &'a Polygon>,
    ) -> Self {
        let mut segments = Segments::default();
        segments.add_cycles(set_a.into_iter().map(|p| p.vertices()), true);
        segments.add_cycles(set_b.into_iter().map(|p| p.vertices()), false);
        Self::from_segments(&segments)
    }

    fn from_segments(segments: &Segments) -> Self {
        let split = sweep::sweep(segments);

        // Cut every segment at its split points, and merge the pieces that
        // coincide.
        let mut merged: BTreeMap<(Point, Point), WindingNumber> = BTreeMap::new();
        for idx in segments.indices() {
            let sign = if segments.positively_oriented(idx) {
                1
            } else {
                -1
            };
            let delta = if segments.is_shape_a(idx) {
                WindingNumber {
                    shape_a: sign,
                    shape_b: 0,
                }
            } else {
                WindingNumber {
                    shape_a: 0,
                    shape_b: sign,
                }
            };
            for pair in split.points(idx).windows(2) {
                *merged
                    .entry((pair[0].clone(), pair[1].clone()))
                    .or_default() += delta;
            }
        }
        // Coincident pieces can cancel out completely.
        merged.retain(|_, delta| *delta != WindingNumber::default());

        let pieces: Vec<Piece<'_>> = merged
            .iter()
            .map(|((start, end), delta)| Piece {
                start,
                end,
                delta: *delta,
            })
            .collect();

        let mut points = PointVec::with_capacity(pieces.len());
        let all_points: BTreeSet<&Point> = pieces.iter().flat_map(|p| [p.start, p.end]).collect();
        let point_map: BTreeMap<&Point, PointIdx> = all_points
            .into_iter()
            .map(|p| (p, points.push(p.clone())))
            .collect();

        let mut ret = Topology {
            points,
            point_idx: HalfOutputSegVec::with_capacity(pieces.len()),
            point_neighbors: HalfOutputSegVec::with_capacity(pieces.len()),
            winding: OutputSegVec::with_capacity(pieces.len()),
        };

        for (i, piece) in pieces.iter().enumerate() {
            let clockwise = winding_right_of(i, &pieces);
            let out_idx = ret.winding.push(HalfSegmentWindingNumbers {
                clockwise,
                counter_clockwise: clockwise + piece.delta,
            });
            ret.point_idx
                .push(point_map[piece.start], point_map[piece.end]);
            let no_nbrs = PointNeighbors {
                clockwise: out_idx.first_half(),
                counter_clockwise: out_idx.first_half(),
            };
            ret.point_neighbors.push(no_nbrs, no_nbrs);
        }
        ret.link_neighbors();

        debug!(
            points = ret.points.len(),
            segments = ret.winding.len(),
            "built topology"
        );
        ret
    }

    /// Sorts the half-segments around each point counter-clockwise, and links
    /// each one to its angular neighbors.
    fn link_neighbors(&mut self) {
        let mut around: PointVec<Vec<HalfOutputSegIdx>> =
            PointVec::filled(Vec::new(), self.points.len());
        for idx in self.winding.indices() {
            for half in [idx.first_half(), idx.second_half()] {
                around[self.point_idx[half]].push(half);
            }
        }

        for (p, halves) in around.iter() {
            let here = &self.points[p];
            let mut halves: Vec<_> = halves
                .iter()
                .map(|&h| {
                    let there = self.point(h.other_half());
                    (h, &there.x - &here.x, &there.y - &here.y)
                })
                .collect();
            halves.sort_by(|(_, x1, y1), (_, x2, y2)| geom::angle_cmp((x1, y1), (x2, y2)));

            let n = halves.len();
            for (i, (h, _, _)) in halves.iter().enumerate() {
                self.point_neighbors[*h] = PointNeighbors {
                    clockwise: halves[(i + n - 1) % n].0,
                    counter_clockwise: halves[(i + 1) % n].0,
                };
            }
        }
    }

    /// Iterates over indices of all output segments, in sweep-line order.
    pub fn segment_indices(&self) -> impl Iterator<Item = OutputSegIdx> + '_ {
        self.winding.indices()
    }

    /// Returns the winding numbers of an output half-segment.
    pub fn winding(&self, idx: HalfOutputSegIdx) -> HalfSegmentWindingNumbers {
        if idx.first_half {
            self.winding[idx.idx]
        } else {
            self.winding[idx.idx].flipped()
        }
    }

    /// Returns the endpoint of an output half-segment.
    pub fn point(&self, idx: HalfOutputSegIdx) -> &Point {
        &self.points[self.point_idx[idx]]
    }

    /// Starting from the end of a segment that we just walked along, turns
    /// clockwise until we hit a boundary segment that has the set on its left.
    fn next_boundary(
        &self,
        arrive: HalfOutputSegIdx,
        inside: &impl Fn(WindingNumber) -> bool,
    ) -> Option<HalfOutputSegIdx> {
        let mut nbr = self.point_neighbors[arrive].clockwise;
        while nbr != arrive {
            let w = self.winding(nbr);
            if inside(w.counter_clockwise) && !inside(w.clockwise) {
                return Some(nbr);
            }
            nbr = self.point_neighbors[nbr].clockwise;
        }
        None
    }

    /// Traces the boundary of the set of points whose winding numbers satisfy
    /// `inside`.
    ///
    /// For the non-zero intersection of the two sets, pass
    /// `|w| w.shape_a != 0 && w.shape_b != 0`.
    pub fn contours(&self, inside: impl Fn(WindingNumber) -> bool) -> Contours {
        // We walk each contour with the set on our left, and at every point we
        // take the first boundary segment clockwise from the one we arrived on.
        // That keeps the walk hugging the set, but when two pieces of boundary
        // touch at a point (like a hole touching its outer boundary) the walk
        // passes through that point twice. When that happens, we cut out the
        // loop between the two visits as a separate contour, so that every
        // contour is simple.
        let mut ret = Contours {
            contours: Vec::new(),
            unbounded: inside(WindingNumber::default()),
        };

        let bdy = |idx: OutputSegIdx| -> bool {
            inside(self.winding[idx].clockwise) != inside(self.winding[idx].counter_clockwise)
        };

        let mut visited = OutputSegVec::filled(false, self.winding.len());
        // The position (in `segs`) at which the current walk last left each point.
        // We don't clean this up between walks, so entries need to be
        // double-checked before use.
        let mut last_visit: PointVec<Option<usize>> = PointVec::filled(None, self.points.len());
        for idx in self.segment_indices() {
            if visited[idx] || !bdy(idx) {
                continue;
            }

            // Arrange the orientation so that the interior is on our left as we walk.
            let start = if inside(self.winding[idx].counter_clockwise) {
                idx.first_half()
            } else {
                idx.second_half()
            };

            // `segs` collects the half-segment at which we leave each point.
            let mut segs: Vec<HalfOutputSegIdx> = Vec::new();
            let mut next = start;
            loop {
                visited[next.idx] = true;
                last_visit[self.point_idx[next]] = Some(segs.len());
                segs.push(next);

                let Some(nbr) = self.next_boundary(next.other_half(), &inside) else {
                    warn!(?next, "boundary walk got stuck; dropping the partial contour");
                    segs.clear();
                    break;
                };
                if nbr == start {
                    break;
                }

                let p = self.point_idx[nbr];
                let repeat = last_visit[p].filter(|&i| i < segs.len() && self.point_idx[segs[i]] == p);
                if let Some(i) = repeat {
                    ret.push(self.ring(&segs[i..]));
                    segs.truncate(i);
                }
                next = nbr;
            }
            if !segs.is_empty() {
                ret.push(self.ring(&segs));
            }
        }

        ret.assign_parents();
        debug!(contours = ret.contours.len(), "extracted contours");
        ret
    }

    fn ring(&self, segs: &[HalfOutputSegIdx]) -> Contour {
        let points: Vec<Point> = segs.iter().map(|&h| self.point(h).clone()).collect();
        let area = signed_area(&points);
        Contour {
            outer: area > Rational::from(0),
            points,
            parent: None,
            area,
        }
    }
}

/// The winding number just to the right of piece `i`, walking from its start to its end.
///
/// We cast a ray from the piece's midpoint: rightwards if the piece isn't
/// horizontal, and downwards (by rotating everything a quarter turn) if it is.
/// Since pieces only meet at endpoints, the midpoint is on no other piece.
fn winding_right_of(i: usize, pieces: &[Piece<'_>]) -> WindingNumber {
    let piece = &pieces[i];
    let m = piece.start.midpoint(piece.end);
    let horizontal = piece.start.y == piece.end.y;
    let rotated_m = m.rotate_quarter();

    let mut w = WindingNumber::default();
    for (j, other) in pieces.iter().enumerate() {
        if j == i {
            continue;
        }
        let crossing = if horizontal {
            // Cheap rejection before paying for the rotation: the rotated ray
            // only meets pieces whose x range covers the midpoint.
            let (lo, hi) = if other.start.x <= other.end.x {
                (&other.start.x, &other.end.x)
            } else {
                (&other.end.x, &other.start.x)
            };
            if &m.x < lo || &m.x > hi {
                continue;
            }
            geom::ray_crossing(
                &other.start.rotate_quarter(),
                &other.end.rotate_quarter(),
                &rotated_m,
            )
        } else {
            geom::ray_crossing(other.start, other.end, &m)
        };
        if crossing != 0 {
            w += other.delta.scaled(crossing);
        }
    }
    w
}

/// The exact signed area of a ring; positive for counter-clockwise rings.
pub(crate) fn signed_area(points: &[Point]) -> Rational {
    let mut twice = Rational::from(0);
    for (p, q) in cyclic_pairs(points) {
        twice += &p.x * &q.y - &q.x * &p.y;
    }
    twice / Rational::from(2)
}

/// The winding number of a ring around `p`, which must not be on the ring.
pub(crate) fn ring_winding(points: &[Point], p: &Point) -> i32 {
    cyclic_pairs(points)
        .map(|(a, b)| geom::ray_crossing(a, b, p))
        .sum()
}

/// Position of a [`Contour`] in its [`Contours`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ContourIdx(pub usize);

/// One ring of a traced boundary. No point repeats and no two edges cross.
#[derive(Clone, Debug)]
pub struct Contour {
    /// The ring's vertices. The last one connects back to the first.
    pub points: Vec<Point>,

    /// The nearest enclosing ring of the opposite kind. In the shaded set
    ///
    /// ```text
    ///   ----------------------
    ///   |xxxxxxxxxxxxxxxxxxxx|
    ///   |xxxxxxxxx/\xxxxxxxxx|
    ///   |xxxxxxxx/  \xxxxxxxx|
    ///   |xxxxxxxx\  /xxxxxxxx|
    ///   |xxxxxxxxx\/xxxxxxxxx|
    ///   |xxxxxxxxxxxxxxxxxxxx|
    ///   ----------------------
    /// ```
    ///
    /// the diamond's parent is the square, and the square has none. This stays
    /// the same if the diamond is moved up to touch the top of the square.
    pub parent: Option<ContourIdx>,

    /// Outer rings run counter-clockwise and holes run clockwise, so the set
    /// is always on the left.
    pub outer: bool,

    area: Rational,
}

impl Contour {
    /// The exact signed area enclosed by this contour: positive for outer contours
    /// and negative for holes.
    pub fn area(&self) -> &Rational {
        &self.area
    }
}

/// Every ring of a traced boundary, indexed by [`ContourIdx`].
#[derive(Clone, Debug, Default)]
pub struct Contours {
    contours: Vec<Contour>,
    /// Does the set contain everything far enough away from the origin?
    unbounded: bool,
}

impl Contours {
    fn push(&mut self, contour: Contour) {
        debug_assert!(contour.area != Rational::from(0));
        self.contours.push(contour);
    }

    /// Hooks up each contour to the smallest contour of the opposite kind that contains it.
    fn assign_parents(&mut self) {
        let abs_areas: Vec<Rational> = self.contours.iter().map(|c| (&c.area).abs()).collect();

        for i in 0..self.contours.len() {
            let c = &self.contours[i];
            // Consecutive contour points are joined by a single output segment, and
            // output segments only meet at endpoints. So this is on no other contour.
            let probe = c.points[0].midpoint(&c.points[1]);

            let parent = self
                .contours
                .iter()
                .enumerate()
                .filter(|(j, other)| {
                    *j != i && other.outer != c.outer && ring_winding(&other.points, &probe) != 0
                })
                .min_by(|(j1, _), (j2, _)| abs_areas[*j1].cmp(&abs_areas[*j2]))
                .map(|(j, _)| ContourIdx(j));
            self.contours[i].parent = parent;
        }
    }

    /// Contour indices, one group per parentless contour.
    ///
    /// Each group starts with its parentless contour and continues with
    /// everything nested inside it, depth first. A parentless hole only
    /// happens when the set is unbounded.
    pub fn grouped(&self) -> Vec<Vec<ContourIdx>> {
        let mut children = vec![Vec::new(); self.contours.len()];
        let mut top_level = Vec::new();
        for (i, c) in self.contours.iter().enumerate() {
            if let Some(parent) = c.parent {
                children[parent.0].push(ContourIdx(i));
            } else {
                top_level.push(ContourIdx(i));
            }
        }

        fn visit(idx: ContourIdx, children: &[Vec<ContourIdx>], acc: &mut Vec<ContourIdx>) {
            acc.push(idx);
            for &child in &children[idx.0] {
                visit(child, children, acc);
            }
        }

        top_level
            .into_iter()
            .map(|top| {
                let mut tree = Vec::new();
                visit(top, &children, &mut tree);
                tree
            })
            .collect()
    }

    /// Iterates over all of the contours.
    pub fn contours(&self) -> impl Iterator<Item = &Contour> + '_ {
        self.contours.iter()
    }

    /// The number of contours.
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    /// Are there no contours at all?
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Converts to polygons with holes: one for each outer contour (holding its
    /// child contours as holes), plus one unbounded polygon if the set is unbounded.
    ///
    /// The unbounded polygon, if any, comes first.
    pub fn into_polygons_with_holes(self) -> Vec<PolygonWithHoles> {
        let mut unbounded = self.unbounded.then(|| PolygonWithHoles::unbounded(Vec::new()));
        let mut bounded = Vec::new();
        let mut slot = vec![None; self.contours.len()];

        for (i, c) in self.contours.iter().enumerate() {
            if c.outer {
                slot[i] = Some(bounded.len());
                let outer = Polygon::from_vertices(c.points.iter().cloned()).normalized();
                bounded.push(PolygonWithHoles::new(outer));
            }
        }
        for c in self.contours.iter().filter(|c| !c.outer) {
            let hole = Polygon::from_vertices(c.points.iter().cloned()).normalized();
            match c.parent.and_then(|p| slot[p.0]) {
                Some(s) => bounded[s].add_hole(hole),
                None => unbounded
                    .get_or_insert_with(|| PolygonWithHoles::unbounded(Vec::new()))
                    .add_hole(hole),
            }
        }

        unbounded.into_iter().chain(bounded).collect()
    }
}

impl std::ops::Index<ContourIdx> for Contours {
    type Output = Contour;

    fn index(&self, index: ContourIdx) -> &Self::Output {
        &self.contours[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    fn poly(points: &[(i64, i64)]) -> Polygon {
        points.iter().map(|&(x, y)| p(x, y)).collect()
    }

    fn xor(w: WindingNumber) -> bool {
        (w.shape_a + w.shape_b) % 2 != 0
    }

    #[test]
    fn square() {
        let square = poly(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let top = Topology::from_polygons([&square], [] as [&Polygon; 0]);
        assert_eq!(top.segment_indices().count(), 4);

        // Every segment has the square on one side and nothing on the other.
        for idx in top.segment_indices() {
            let w = top.winding(idx.first_half());
            let inside = WindingNumber {
                shape_a: 1,
                shape_b: 0,
            };
            assert!(w.clockwise == inside || w.counter_clockwise == inside);
            assert!(w.clockwise == WindingNumber::default() || w.counter_clockwise == WindingNumber::default());
        }
    }

    #[test]
    fn square_and_diamond() {
        let square = poly(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        let diamond = poly(&[(2, -1), (5, 2), (2, 5), (-1, 2)]);
        let top = Topology::from_polygons([&square], [&diamond]);

        // Each diamond edge crosses two square edges, cutting every edge in three.
        assert_eq!(top.points.len(), 4 + 4 + 8);
        assert_eq!(top.segment_indices().count(), 24);
        assert!(top.points.inner.contains(&p(3, 0)));
        assert!(top.points.inner.contains(&p(4, 1)));

        let both = top.contours(|w| w.shape_a != 0 && w.shape_b != 0);
        assert_eq!(both.len(), 1);
        assert_eq!(both[ContourIdx(0)].points.len(), 8);
        assert!(both[ContourIdx(0)].outer);
    }

    #[test]
    fn neighbors_around_a_corner() {
        let square = poly(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let top = Topology::from_polygons([&square], [] as [&Polygon; 0]);

        // Every corner has two half-segments, each the other's only neighbor.
        for idx in top.segment_indices() {
            for half in [idx.first_half(), idx.second_half()] {
                let nbrs = top.point_neighbors[half];
                assert_ne!(nbrs.clockwise, half);
                assert_eq!(nbrs.clockwise, nbrs.counter_clockwise);
                assert_eq!(top.point(nbrs.clockwise), top.point(half));
            }
        }
        assert!(format!("{:?}", top.points).starts_with("{p_0: "));
    }

    #[test]
    fn coincident_squares_merge() {
        let square = poly(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let top = Topology::from_polygons([&square], [&square]);
        assert_eq!(top.segment_indices().count(), 4);
        for idx in top.segment_indices() {
            let w = top.winding(idx.first_half());
            assert_eq!(
                (w.counter_clockwise.shape_a - w.clockwise.shape_a).abs(),
                1
            );
            assert_eq!(
                (w.counter_clockwise.shape_b - w.clockwise.shape_b).abs(),
                1
            );
        }

        // Oppositely oriented copies cancel out entirely.
        let reversed = square.reversed();
        let top = Topology::from_polygons([&square, &reversed], []);
        assert_eq!(top.segment_indices().count(), 0);
    }

    #[test]
    fn nested_squares() {
        let outer = poly(&[(-2, -2), (2, -2), (2, 2), (-2, 2)]);
        let inner = poly(&[(-1, -1), (1, -1), (1, 1), (-1, 1)]);
        let top = Topology::from_polygons([&outer], [&inner]);
        let contours = top.contours(xor);

        assert_eq!(contours.len(), 2);
        assert_eq!(contours.grouped(), vec![vec![ContourIdx(0), ContourIdx(1)]]);
        assert!(contours[ContourIdx(0)].outer);
        assert!(!contours[ContourIdx(1)].outer);
        assert_eq!(contours[ContourIdx(1)].parent, Some(ContourIdx(0)));
        assert_eq!(contours[ContourIdx(0)].area(), &Rational::from(16));
        assert_eq!(contours[ContourIdx(1)].area(), &Rational::from(-4));
    }

    #[test]
    fn hole_touching_outer_boundary() {
        // A triangular hole whose apex touches the bottom edge of the square.
        let outer = poly(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        let inner = poly(&[(2, 0), (3, 2), (1, 2)]);
        let top = Topology::from_polygons([&outer], [&inner]);
        let contours = top.contours(xor);

        assert_eq!(contours.len(), 2);
        let outers: Vec<_> = contours.contours().filter(|c| c.outer).collect();
        let holes: Vec<_> = contours.contours().filter(|c| !c.outer).collect();
        assert_eq!(outers.len(), 1);
        assert_eq!(holes.len(), 1);
        assert_eq!(holes[0].points.len(), 3);
        assert!(holes[0].parent.is_some());
    }

    #[test]
    fn squares_touching_at_a_corner() {
        let a = poly(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let b = poly(&[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let top = Topology::from_polygons([&a], [&b]);
        let contours = top.contours(|w| w.shape_a != 0 || w.shape_b != 0);

        // The shared corner doesn't join the two squares into one contour.
        assert_eq!(contours.len(), 2);
        assert!(contours.contours().all(|c| c.outer && c.parent.is_none()));
        assert!(contours.contours().all(|c| c.points.len() == 4));
    }

    #[test]
    fn complement_is_unbounded() {
        let square = poly(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let top = Topology::from_polygons([&square], [] as [&Polygon; 0]);
        let contours = top.contours(|w| w.shape_a == 0);
        assert_eq!(contours.len(), 1);
        assert!(!contours[ContourIdx(0)].outer);

        let pwhs = contours.into_polygons_with_holes();
        assert_eq!(pwhs.len(), 1);
        assert!(pwhs[0].is_unbounded());
        assert_eq!(pwhs[0].number_of_holes(), 1);
    }
}
