#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod geom;
mod num;
mod polygon;
pub mod render;
mod segments;
mod sweep;
pub mod topology;

#[cfg(feature = "generators")]
pub mod generators;

pub use geom::{orient, Point, Segment};
pub use malachite::Rational;
pub use num::{exact_from_f64, parse_exact, to_f64, ParseCoordError};
pub use polygon::{BoundedSide, Orientation, Polygon, PolygonError, PolygonWithHoles};

use polygon::BoundedSide::Outside;
use topology::{Topology, WindingNumber};

/// A fill rule tells us how to decide whether a point is "inside" a polygon.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FillRule {
    /// The point is "inside" if its winding number is odd.
    EvenOdd,
    /// The point is "inside" if its winding number is non-zero.
    NonZero,
}

/// Binary operations between sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    /// A point is in the union of two sets if it is in either one.
    Union,
    /// A point is in the intersection of two sets if it is in both.
    Intersection,
    /// A point is in the difference of two sets if it is in the first but not the second.
    Difference,
    /// A point is in the exclusive-or of two sets if it is in one or the other, but not both.
    Xor,
}

/// Computes a boolean operation between two sets, each of which is described as a collection of closed polygons.
///
/// All arithmetic is exact, so this never fails. Polygons that intersect
/// themselves (or each other, within a set) are interpreted using `fill_rule`.
pub fn binary_op<'a>(
    set_a: impl IntoIterator<Item = &'a Polygon>,
    set_b: impl IntoIterator<Item = &'a Polygon>,
    fill_rule: FillRule,
    op: BinaryOp,
) -> topology::Contours {
    let top = Topology::from_polygons(set_a, set_b);

    let inside = |windings: WindingNumber| {
        let inside_one = |winding: i32| match fill_rule {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        };

        match op {
            BinaryOp::Union => inside_one(windings.shape_a) || inside_one(windings.shape_b),
            BinaryOp::Intersection => inside_one(windings.shape_a) && inside_one(windings.shape_b),
            BinaryOp::Xor => inside_one(windings.shape_a) != inside_one(windings.shape_b),
            BinaryOp::Difference => inside_one(windings.shape_a) && !inside_one(windings.shape_b),
        }
    };

    top.contours(inside)
}

fn polygons_with_holes(p: &Polygon, q: &Polygon, op: BinaryOp) -> Vec<PolygonWithHoles> {
    binary_op([p], [q], FillRule::NonZero, op).into_polygons_with_holes()
}

/// Computes the union of two polygons, if it is connected.
///
/// Returns `None` if the union has more than one component: when the polygons
/// are disjoint, or when they only touch at isolated points. Polygons that
/// share a stretch of boundary are fused into one.
///
/// ```
/// use polyset::{join, Polygon};
///
/// let a: Polygon = "0,0 1,0 1,1 0,1".parse().unwrap();
/// let b: Polygon = "1,0 2,0 2,1 1,1".parse().unwrap();
/// let c: Polygon = "3,0 4,0 4,1 3,1".parse().unwrap();
/// assert_eq!(join(&a, &b).unwrap().outer_boundary().unwrap().len(), 4);
/// assert!(join(&a, &c).is_none());
/// ```
pub fn join(p: &Polygon, q: &Polygon) -> Option<PolygonWithHoles> {
    let mut union = polygons_with_holes(p, q, BinaryOp::Union);
    if union.len() == 1 && !union[0].is_unbounded() {
        union.pop()
    } else {
        None
    }
}

/// Computes the intersection of two polygons.
///
/// The intersection is returned as a collection of disjoint components. Parts
/// of the polygons that only touch along their boundaries don't count.
pub fn intersection(p: &Polygon, q: &Polygon) -> Vec<PolygonWithHoles> {
    polygons_with_holes(p, q, BinaryOp::Intersection)
}

/// Computes the part of `p` that is not in `q`.
pub fn difference(p: &Polygon, q: &Polygon) -> Vec<PolygonWithHoles> {
    polygons_with_holes(p, q, BinaryOp::Difference)
}

/// Computes the part of the plane that is in exactly one of `p` and `q`.
pub fn symmetric_difference(p: &Polygon, q: &Polygon) -> Vec<PolygonWithHoles> {
    polygons_with_holes(p, q, BinaryOp::Xor)
}

/// Computes the complement of `p`: the whole plane, with `p` as a hole.
pub fn complement(p: &Polygon) -> PolygonWithHoles {
    Topology::from_polygons([p], [])
        .contours(|w| w.shape_a == 0)
        .into_polygons_with_holes()
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Do the two polygons have any point in common?
///
/// Polygons are treated as closed sets here, so two polygons that touch at a
/// single point do intersect (even though their [`intersection`] is empty).
pub fn do_intersect(p: &Polygon, q: &Polygon) -> bool {
    let edges_meet = p.edges().any(|(a0, a1)| {
        q.edges().any(|(b0, b1)| match (segment(a0, a1), segment(b0, b1)) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        })
    });
    // If no edges meet, then either one polygon is inside the other or they're disjoint.
    edges_meet
        || p.vertices().next().is_some_and(|v| q.bounded_side(v) != Outside)
        || q.vertices().next().is_some_and(|v| p.bounded_side(v) != Outside)
}

fn segment(a: &Point, b: &Point) -> Option<Segment> {
    match a.cmp(b) {
        std::cmp::Ordering::Less => Some(Segment::new(a.clone(), b.clone())),
        std::cmp::Ordering::Greater => Some(Segment::new(b.clone(), a.clone())),
        std::cmp::Ordering::Equal => None,
    }
}
