//! Geometric primitives, like points and lines.

use std::cmp::Ordering;

use arrayvec::ArrayVec;
use malachite::Rational;

use crate::num::{self, ParseCoordError};

/// A two-dimensional point with exact coordinates.
///
/// Points are sorted by `y` and then by `x`, for the convenience of our sweep-line
/// algorithm (which moves in increasing `y`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Vertical coordinate.
    ///
    /// Declared first so that the derived ordering is the sweep-line ordering.
    pub y: Rational,
    /// Horizontal coordinate.
    pub x: Rational,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x, y) = self.to_f64();
        write!(f, "({x}, {y})")
    }
}

impl Point {
    /// Create a new point.
    ///
    /// Note that the `x` coordinate comes first, even though we sort by `y`
    /// first.
    pub fn new(x: impl Into<Rational>, y: impl Into<Rational>) -> Self {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }

    /// The nearest floating-point coordinates.
    pub fn to_f64(&self) -> (f64, f64) {
        (num::to_f64(&self.x), num::to_f64(&self.y))
    }

    /// The nearest floating-point point, for handing to a renderer.
    pub fn to_kurbo(&self) -> kurbo::Point {
        let (x, y) = self.to_f64();
        kurbo::Point::new(x, y)
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        let two = Rational::from(2);
        Point {
            x: (&self.x + &other.x) / &two,
            y: (&self.y + &other.y) / two,
        }
    }

    /// Rotates a quarter-turn counter-clockwise around the origin.
    ///
    /// Rotations preserve orientation, so winding numbers computed in the
    /// rotated frame are the same as in the original one.
    pub(crate) fn rotate_quarter(&self) -> Point {
        Point {
            x: -&self.y,
            y: self.x.clone(),
        }
    }
}

impl std::str::FromStr for Point {
    type Err = ParseCoordError;

    /// Parses `x,y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParseCoordError::MalformedPoint(s.to_owned()))?;
        Ok(Point {
            x: num::parse_exact(x)?,
            y: num::parse_exact(y)?,
        })
    }
}

/// The exact cross product of `b - a` and `c - a`.
///
/// It is positive when `a`, `b`, `c` turn counter-clockwise.
pub(crate) fn cross(a: &Point, b: &Point, c: &Point) -> Rational {
    (&b.x - &a.x) * (&c.y - &a.y) - (&b.y - &a.y) * (&c.x - &a.x)
}

/// The orientation of the triangle `a`, `b`, `c`.
///
/// `Greater` means counter-clockwise (`c` is to the left of the line from `a` to `b`),
/// `Less` means clockwise, and `Equal` means the three points are collinear.
pub fn orient(a: &Point, b: &Point, c: &Point) -> Ordering {
    cross(a, b, c).cmp(&Rational::from(0))
}

// Two orientations "straddle" a line if they aren't strictly on the same side.
fn straddles(o1: Ordering, o2: Ordering) -> bool {
    o1 != o2 || o1 == Ordering::Equal
}

/// A line segment, with endpoints in sweep-line order.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment {
    /// The smaller endpoint.
    pub start: Point,
    /// The larger endpoint.
    pub end: Point,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.start, self.end)
    }
}

/// The points at which two segments must be split so that they only meet at endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitPoints {
    /// Points in the interior of the first segment.
    pub first: ArrayVec<Point, 2>,
    /// Points in the interior of the second segment.
    pub second: ArrayVec<Point, 2>,
}

impl Segment {
    /// Create a new segment.
    ///
    /// `start` must be strictly less than `end`.
    pub fn new(start: Point, end: Point) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    /// The smallest `x` coordinate on this segment.
    pub fn min_x(&self) -> &Rational {
        (&self.start.x).min(&self.end.x)
    }

    /// The largest `x` coordinate on this segment.
    pub fn max_x(&self) -> &Rational {
        (&self.start.x).max(&self.end.x)
    }

    /// Is `p` on this segment, but not one of its endpoints?
    pub fn strictly_contains(&self, p: &Point) -> bool {
        // Points along a segment are monotonic in the sweep-line order, so once
        // we know `p` is on the line the order comparisons are enough.
        &self.start < p && p < &self.end && orient(&self.start, &self.end, p) == Ordering::Equal
    }

    /// Is `p` on this segment, endpoints included?
    pub fn contains(&self, p: &Point) -> bool {
        p == &self.start || p == &self.end || self.strictly_contains(p)
    }

    /// Do the two (closed) segments have a point in common?
    pub fn intersects(&self, other: &Segment) -> bool {
        let o1 = orient(&self.start, &self.end, &other.start);
        let o2 = orient(&self.start, &self.end, &other.end);
        if o1 == Ordering::Equal && o2 == Ordering::Equal {
            return self.contains(&other.start)
                || self.contains(&other.end)
                || other.contains(&self.start);
        }
        let o3 = orient(&other.start, &other.end, &self.start);
        let o4 = orient(&other.start, &other.end, &self.end);
        straddles(o1, o2) && straddles(o3, o4)
    }

    /// Finds where these two segments need to be split so that, afterwards, they
    /// only touch at shared endpoints.
    ///
    /// This covers proper crossings, an endpoint of one segment touching the
    /// interior of the other, and collinear overlaps (where each segment is split
    /// at the other's endpoints).
    pub fn split_points(&self, other: &Segment) -> SplitPoints {
        let mut ret = SplitPoints::default();
        let (a, b) = (&self.start, &self.end);
        let (c, d) = (&other.start, &other.end);

        let o1 = orient(a, b, c);
        let o2 = orient(a, b, d);
        if o1 == Ordering::Equal && o2 == Ordering::Equal {
            for p in [c, d] {
                if self.strictly_contains(p) {
                    ret.first.push(p.clone());
                }
            }
            for p in [a, b] {
                if other.strictly_contains(p) {
                    ret.second.push(p.clone());
                }
            }
            return ret;
        }

        let o3 = orient(c, d, a);
        let o4 = orient(c, d, b);
        if !straddles(o1, o2) || !straddles(o3, o4) {
            return ret;
        }

        let p = if o1 == Ordering::Equal {
            c.clone()
        } else if o2 == Ordering::Equal {
            d.clone()
        } else if o3 == Ordering::Equal {
            a.clone()
        } else if o4 == Ordering::Equal {
            b.clone()
        } else {
            // A proper crossing: p = a + t (b - a), where t is a ratio of cross
            // products. The denominator is non-zero because the segments aren't
            // parallel (otherwise they couldn't straddle each other).
            let dx_ab = &b.x - &a.x;
            let dy_ab = &b.y - &a.y;
            let dx_cd = &d.x - &c.x;
            let dy_cd = &d.y - &c.y;
            let denom = &dx_ab * &dy_cd - &dy_ab * &dx_cd;
            let numer = (&c.x - &a.x) * &dy_cd - (&c.y - &a.y) * &dx_cd;
            let t = numer / denom;
            Point {
                x: &a.x + &t * dx_ab,
                y: &a.y + t * dy_ab,
            }
        };

        if &p != a && &p != b {
            ret.first.push(p.clone());
        }
        if &p != c && &p != d {
            ret.second.push(p);
        }
        ret
    }
}

/// Compares two direction vectors by their counter-clockwise angle from the
/// positive `x` axis, in `[0, 2π)`.
///
/// Neither direction may be zero.
pub(crate) fn angle_cmp(d1: (&Rational, &Rational), d2: (&Rational, &Rational)) -> Ordering {
    let zero = Rational::from(0);
    let lower_half = |(dx, dy): (&Rational, &Rational)| *dy < zero || (*dy == zero && *dx < zero);
    lower_half(d1).cmp(&lower_half(d2)).then_with(|| {
        // In the same half-plane, d1 comes first if d2 is counter-clockwise from it.
        let c = d1.0 * d2.1 - d1.1 * d2.0;
        zero.cmp(&c)
    })
}

/// Sunday's winding-number contribution of the edge `a -> b` for a rightward
/// ray starting at `p`.
///
/// Summing this over a closed cycle gives the winding number of the
/// cycle around `p`, as long as `p` isn't on the cycle. Vertices that land
/// exactly on the ray are handled by treating every edge's `y` range as
/// half-open.
pub(crate) fn ray_crossing(a: &Point, b: &Point, p: &Point) -> i32 {
    if a.y <= p.y && p.y < b.y {
        // Upward edge: counts if p is strictly to its left.
        i32::from(orient(a, b, p) == Ordering::Greater)
    } else if b.y <= p.y && p.y < a.y {
        // Downward edge: counts (negatively) if p is strictly to its right.
        -i32::from(orient(a, b, p) == Ordering::Less)
    } else {
        0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use proptest::prelude::*;

    impl Reasonable for Point {
        type Strategy = BoxedStrategy<Point>;

        fn reasonable() -> Self::Strategy {
            (Rational::reasonable(), Rational::reasonable())
                .prop_map(|(x, y)| Point::new(x, y))
                .boxed()
        }
    }

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    fn seg(a: Point, b: Point) -> Segment {
        if a < b {
            Segment::new(a, b)
        } else {
            Segment::new(b, a)
        }
    }

    #[test]
    fn sweep_order() {
        assert!(p(5, 0) < p(0, 1));
        assert!(p(0, 1) < p(1, 1));
    }

    #[test]
    fn proper_crossing() {
        let s = seg(p(0, 0), p(2, 2));
        let t = seg(p(0, 2), p(2, 0));
        let split = s.split_points(&t);
        assert_eq!(split.first.as_slice(), &[p(1, 1)]);
        assert_eq!(split.second.as_slice(), &[p(1, 1)]);
    }

    #[test]
    fn crossing_at_a_fraction() {
        let s = seg(p(0, 0), p(3, 1));
        let t = seg(p(1, 0), p(1, 5));
        let split = s.split_points(&t);
        let expected = Point::new(1, Rational::from(1) / Rational::from(3));
        assert_eq!(split.first.as_slice(), &[expected.clone()]);
        assert_eq!(split.second.as_slice(), &[expected]);
    }

    #[test]
    fn t_junction() {
        let s = seg(p(0, 0), p(4, 0));
        let t = seg(p(2, 0), p(2, 3));
        let split = s.split_points(&t);
        assert_eq!(split.first.as_slice(), &[p(2, 0)]);
        assert!(split.second.is_empty());
    }

    #[test]
    fn shared_endpoint() {
        let s = seg(p(0, 0), p(4, 0));
        let t = seg(p(4, 0), p(2, 3));
        assert_eq!(s.split_points(&t), SplitPoints::default());
        assert!(s.intersects(&t));
    }

    #[test]
    fn collinear_overlap() {
        let s = seg(p(0, 0), p(4, 4));
        let t = seg(p(2, 2), p(6, 6));
        let split = s.split_points(&t);
        assert_eq!(split.first.as_slice(), &[p(2, 2)]);
        assert_eq!(split.second.as_slice(), &[p(4, 4)]);
    }

    #[test]
    fn collinear_disjoint() {
        let s = seg(p(0, 0), p(1, 1));
        let t = seg(p(2, 2), p(3, 3));
        assert_eq!(s.split_points(&t), SplitPoints::default());
        assert!(!s.intersects(&t));
    }

    #[test]
    fn angles() {
        let z = |x: i64, y: i64| (Rational::from(x), Rational::from(y));
        let dirs = [z(1, 0), z(1, 1), z(0, 1), z(-1, 1), z(-1, 0), z(-1, -1), z(0, -1), z(1, -1)];
        for (i, d1) in dirs.iter().enumerate() {
            for (j, d2) in dirs.iter().enumerate() {
                assert_eq!(angle_cmp((&d1.0, &d1.1), (&d2.0, &d2.1)), i.cmp(&j));
            }
        }
    }

    proptest! {
        #[test]
        fn split_points_lie_on_both(a in Point::reasonable(), b in Point::reasonable(), c in Point::reasonable(), d in Point::reasonable()) {
            prop_assume!(a != b && c != d);
            let s = seg(a, b);
            let t = seg(c, d);
            let split = s.split_points(&t);
            for q in &split.first {
                prop_assert!(s.strictly_contains(q));
                prop_assert!(t.contains(q));
            }
            for q in &split.second {
                prop_assert!(t.strictly_contains(q));
                prop_assert!(s.contains(q));
            }
            if !split.first.is_empty() || !split.second.is_empty() {
                prop_assert!(s.intersects(&t));
            }
        }

        #[test]
        fn orientation_is_antisymmetric(a in Point::reasonable(), b in Point::reasonable(), c in Point::reasonable()) {
            prop_assert_eq!(orient(&a, &b, &c), orient(&b, &a, &c).reverse());
        }
    }
}
