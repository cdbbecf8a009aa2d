//! Simple polygons, and polygons with holes.

use std::cmp::Ordering;

use malachite::num::arithmetic::traits::Abs;
use malachite::Rational;

use crate::{
    geom::{self, Point, Segment},
    num::ParseCoordError,
    segments::cyclic_pairs,
    topology,
};

/// Where a point is relative to a closed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundedSide {
    /// In the interior.
    Inside,
    /// On the boundary.
    Boundary,
    /// In the exterior.
    Outside,
}

/// The direction in which a polygon's vertices go around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The enclosed area is on the left when walking the boundary.
    CounterClockwise,
    /// The enclosed area is on the right when walking the boundary.
    Clockwise,
    /// The polygon encloses no area.
    Collinear,
}

/// Ways in which a polygon can fail to be simple.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolygonError {
    /// A polygon needs at least three vertices to enclose anything.
    #[error("a polygon needs at least 3 vertices, found {0}")]
    TooFewVertices(usize),
    /// The same point appears twice in the vertex list.
    #[error("vertex {0} appears more than once")]
    RepeatedVertex(Point),
    /// Two edges touch somewhere other than at a shared vertex.
    #[error("edge {first} intersects edge {second}")]
    SelfIntersection {
        /// The index of the earlier edge (edge `i` goes from vertex `i` to vertex `i + 1`).
        first: usize,
        /// The index of the later edge.
        second: usize,
    },
}

/// A polygon, stored as a cyclic sequence of vertices.
///
/// The last vertex is implicitly connected back to the first. No checking
/// happens on construction; use [`Polygon::validate`] to check whether the
/// polygon is simple.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    pub fn from_vertices(vertices: impl IntoIterator<Item = Point>) -> Self {
        Polygon {
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Appends a vertex.
    pub fn push(&mut self, p: Point) {
        self.vertices.push(p);
    }

    /// Iterates over the vertices, in order.
    pub fn vertices(&self) -> std::slice::Iter<'_, Point> {
        self.vertices.iter()
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Does this polygon have no vertices at all?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the edges, including the one that closes the polygon.
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        cyclic_pairs(&self.vertices)
    }

    /// The exact signed area: positive if the polygon is counter-clockwise.
    pub fn area(&self) -> Rational {
        topology::signed_area(&self.vertices)
    }

    /// Which way the vertices go around.
    pub fn orientation(&self) -> Orientation {
        match self.area().cmp(&Rational::from(0)) {
            Ordering::Greater => Orientation::CounterClockwise,
            Ordering::Less => Orientation::Clockwise,
            Ordering::Equal => Orientation::Collinear,
        }
    }

    /// The same polygon, with its vertices in the opposite order.
    pub fn reversed(&self) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().rev().cloned().collect(),
        }
    }

    /// Locates a point relative to this polygon.
    ///
    /// Points are inside if the polygon winds around them a non-zero number of times.
    pub fn bounded_side(&self, p: &Point) -> BoundedSide {
        if self.edges().any(|(a, b)| on_edge(a, b, p)) {
            BoundedSide::Boundary
        } else if topology::ring_winding(&self.vertices, p) != 0 {
            BoundedSide::Inside
        } else {
            BoundedSide::Outside
        }
    }

    /// Returns an equivalent polygon without redundant vertices.
    ///
    /// Repeated vertices and vertices in the middle of a straight run are
    /// removed, and the result starts at its smallest vertex (in sweep-line
    /// order: smallest `y`, then smallest `x`).
    pub fn normalized(&self) -> Polygon {
        let mut vertices = self.vertices.clone();
        vertices.dedup();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        while vertices.len() >= 3 {
            let n = vertices.len();
            let keep: Vec<bool> = (0..n)
                .map(|i| {
                    geom::orient(&vertices[(i + n - 1) % n], &vertices[i], &vertices[(i + 1) % n])
                        != Ordering::Equal
                })
                .collect();
            if keep.iter().all(|&k| k) {
                break;
            }
            vertices = vertices
                .into_iter()
                .zip(keep)
                .filter_map(|(v, k)| k.then_some(v))
                .collect();
        }

        if let Some(min) = vertices
            .iter()
            .enumerate()
            .min_by(|(_, p), (_, q)| p.cmp(q))
            .map(|(i, _)| i)
        {
            vertices.rotate_left(min);
        }
        Polygon { vertices }
    }

    /// The smallest axis-aligned rectangle containing all the vertices, or
    /// `None` if there are no vertices.
    pub fn bounding_box(&self) -> Option<kurbo::Rect> {
        let mut points = self.vertices.iter().map(Point::to_kurbo);
        let first = points.next()?;
        Some(points.fold(kurbo::Rect::from_points(first, first), |r, p| {
            r.union_pt(p)
        }))
    }

    /// Checks that this is a simple polygon: at least three vertices, no
    /// repeated vertices, and no edges that touch except for consecutive
    /// edges at their shared vertex.
    pub fn validate(&self) -> Result<(), PolygonError> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(PolygonError::TooFewVertices(n));
        }

        let mut sorted: Vec<&Point> = self.vertices.iter().collect();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(PolygonError::RepeatedVertex(pair[0].clone()));
        }

        let edges: Vec<(&Point, &Point)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a0, a1) = edges[i];
                let (b0, b1) = edges[j];
                let touching = if j == i + 1 {
                    // Consecutive edges share `a1 == b0`; they must not fold back
                    // onto one another.
                    on_edge(a0, a1, b1) || on_edge(b0, b1, a0)
                } else if i == 0 && j == n - 1 {
                    // The closing edge shares `b1 == a0`.
                    on_edge(a0, a1, b0) || on_edge(b0, b1, a1)
                } else {
                    segment(a0, a1).intersects(&segment(b0, b1))
                };
                if touching {
                    return Err(PolygonError::SelfIntersection { first: i, second: j });
                }
            }
        }
        Ok(())
    }
}

fn segment(a: &Point, b: &Point) -> Segment {
    if a < b {
        Segment::new(a.clone(), b.clone())
    } else {
        Segment::new(b.clone(), a.clone())
    }
}

fn on_edge(a: &Point, b: &Point, p: &Point) -> bool {
    a == p || b == p || (a != b && segment(a, b).contains(p))
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Polygon::from_vertices(iter)
    }
}

impl std::str::FromStr for Polygon {
    type Err = ParseCoordError;

    /// Parses whitespace-separated `x,y` vertices, like `0,0 5,0 7/2,3/2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse).collect()
    }
}

impl std::fmt::Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {} vertices:", self.vertices.len())?;
        for v in &self.vertices {
            write!(f, " {v}")?;
        }
        write!(f, " ]")
    }
}

/// A region bounded by an outer polygon, minus some holes.
///
/// A polygon with holes can also be unbounded, in which case there is no
/// outer boundary: it covers the whole plane except for its holes. The
/// default value is the whole plane.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PolygonWithHoles {
    outer: Option<Polygon>,
    holes: Vec<Polygon>,
}

impl PolygonWithHoles {
    /// A bounded region without holes.
    pub fn new(outer: Polygon) -> Self {
        PolygonWithHoles {
            outer: Some(outer),
            holes: Vec::new(),
        }
    }

    /// A bounded region with holes.
    pub fn with_holes(outer: Polygon, holes: impl IntoIterator<Item = Polygon>) -> Self {
        PolygonWithHoles {
            outer: Some(outer),
            holes: holes.into_iter().collect(),
        }
    }

    /// The whole plane, minus some holes.
    pub fn unbounded(holes: impl IntoIterator<Item = Polygon>) -> Self {
        PolygonWithHoles {
            outer: None,
            holes: holes.into_iter().collect(),
        }
    }

    /// Adds a hole.
    pub fn add_hole(&mut self, hole: Polygon) {
        self.holes.push(hole);
    }

    /// Is there no outer boundary?
    pub fn is_unbounded(&self) -> bool {
        self.outer.is_none()
    }

    /// The outer boundary, unless we're unbounded.
    pub fn outer_boundary(&self) -> Option<&Polygon> {
        self.outer.as_ref()
    }

    /// The holes, in order.
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// How many holes there are.
    pub fn number_of_holes(&self) -> usize {
        self.holes.len()
    }

    /// All the boundary rings: the outer boundary (if any) and then the holes.
    pub fn boundaries(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.outer.iter().chain(&self.holes)
    }

    /// The exact enclosed area, or `None` if we're unbounded.
    pub fn area(&self) -> Option<Rational> {
        let outer = self.outer.as_ref()?.area().abs();
        Some(
            self.holes
                .iter()
                .fold(outer, |acc, hole| acc - hole.area().abs()),
        )
    }

    /// Locates a point relative to this region.
    pub fn bounded_side(&self, p: &Point) -> BoundedSide {
        if let Some(outer) = &self.outer {
            match outer.bounded_side(p) {
                BoundedSide::Inside => {}
                side => return side,
            }
        }
        for hole in &self.holes {
            match hole.bounded_side(p) {
                BoundedSide::Inside => return BoundedSide::Outside,
                BoundedSide::Boundary => return BoundedSide::Boundary,
                BoundedSide::Outside => {}
            }
        }
        BoundedSide::Inside
    }
}

impl std::fmt::Display for PolygonWithHoles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outer {
            Some(outer) => writeln!(f, "{{ Outer boundary = {outer}")?,
            None => writeln!(f, "{{ Unbounded polygon.")?,
        }
        writeln!(f, " {} holes:", self.holes.len())?;
        for (k, hole) in self.holes.iter().enumerate() {
            writeln!(f, " Hole #{} = {hole}", k + 1)?;
        }
        write!(f, " }}")
    }
}
