use crate::geom::{Point, Segment};

/// Identifies one input edge. Two edges with the same endpoints still get
/// different indices.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct SegIdx(pub usize);

impl std::fmt::Debug for SegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{}", self.0)
    }
}

/// An arena of line segments, each belonging to one of the two input sets.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    segs: Vec<Segment>,
    /// Whether each edge ran from its smaller to its larger endpoint in its ring.
    orientation: Vec<bool>,
    /// For each segment, stores true if it came from the first input set.
    shape_a: Vec<bool>,
    /// All the segments, ordered by their smaller endpoint.
    enter: Vec<SegIdx>,
}

pub(crate) fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(xs.last().zip(xs.first()))
}

impl Segments {
    /// How many edges there are.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn indices(&self) -> impl Iterator<Item = SegIdx> {
        (0..self.segs.len()).map(SegIdx)
    }

    /// Whether `idx` ran from its smaller to its larger endpoint in its ring.
    pub fn positively_oriented(&self, idx: SegIdx) -> bool {
        self.orientation[idx.0]
    }

    /// Did `idx` come from the first input set?
    pub fn is_shape_a(&self, idx: SegIdx) -> bool {
        self.shape_a[idx.0]
    }

    /// Adds the edges of some rings, all belonging to one input set.
    ///
    /// Each polyline is implicitly closed: its last point connects back to its
    /// first. Repeated consecutive points contribute no segment.
    pub fn add_cycles<'a>(
        &mut self,
        cycles: impl IntoIterator<Item = impl IntoIterator<Item = &'a Point>>,
        shape_a: bool,
    ) {
        for cycle in cycles {
            let ps: Vec<_> = cycle.into_iter().collect();
            if ps.len() <= 1 {
                continue;
            }

            for (&p, &q) in cyclic_pairs(&ps) {
                if p == q {
                    continue;
                }
                let (a, b, orient) = if p < q { (p, q, true) } else { (q, p, false) };
                self.enter.push(SegIdx(self.segs.len()));
                self.segs.push(Segment::new(a.clone(), b.clone()));
                self.orientation.push(orient);
                self.shape_a.push(shape_a);
            }
        }

        // Sort by the entrance point, and then by the exit point so that ties
        // are broken deterministically.
        let segs = &self.segs;
        self.enter.sort_by(|s1, s2| {
            let (s1, s2) = (&segs[s1.0], &segs[s2.0]);
            s1.start.cmp(&s2.start).then_with(|| s1.end.cmp(&s2.end))
        });
    }

    /// All the segments, ordered by the point at which the sweep-line reaches them.
    pub fn entrances(&self) -> &[SegIdx] {
        &self.enter
    }
}

impl std::ops::Index<SegIdx> for Segments {
    type Output = Segment;

    fn index(&self, index: SegIdx) -> &Self::Output {
        &self.segs[index.0]
    }
}
