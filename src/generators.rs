//! Utilities for generating examples, benchmarks, and test cases.

use crate::{Point, Polygon};

/// Generate a bunch of squares, arranged in a grid.
///
/// The bottom-left of the first square is at (x0, y0). Each square has size `size
/// x size`, and the distance between squares (both horizontally and vertically)
/// is `offset`.
///
/// If `slant` is non-zero, generates parallelograms instead of squares: the
/// right-hand side of each square gets translated up by `slant`.
fn squares((x0, y0): (i64, i64), size: i64, offset: i64, slant: i64, count: usize) -> Vec<Polygon> {
    let mut ret = Vec::new();
    for i in 0..count as i64 {
        let x = x0 + i * offset;
        for j in 0..count as i64 {
            let y = y0 + j * offset;
            ret.push(Polygon::from_vertices([
                Point::new(x, y),
                Point::new(x + size, y + slant),
                Point::new(x + size, y + size + slant),
                Point::new(x, y + size),
            ]));
        }
    }

    ret
}

/// Generate an `n` by `n` checkerboard-like pattern with overlapping squares.
///
/// The outer squares have side 30 and are spaced 40 apart. The inner squares
/// are the same size, but shifted by 20 in both directions so that each one
/// overlaps the corners of four outer squares.
///
/// We return the pattern in two parts: the outer collection of `n x n`
/// non-overlapping squares, and the inner collection of `(n - 1) x (n - 1)`
/// non-overlapping squares.
pub fn checkerboard(n: usize) -> (Vec<Polygon>, Vec<Polygon>) {
    (
        squares((0, 0), 30, 40, 0, n),
        squares((20, 20), 30, 40, 0, n.saturating_sub(1)),
    )
}

/// Like `checkerboard`, but with no exactly-horizontal lines.
///
/// Horizontal lines have special handling when computing winding numbers, so
/// their presence or absence can affect performance.
pub fn slanted_checkerboard(n: usize) -> (Vec<Polygon>, Vec<Polygon>) {
    (
        squares((0, 0), 30, 40, 1, n),
        squares((20, 20), 30, 40, 1, n.saturating_sub(1)),
    )
}

/// The "evens" are a bunch of long, skinny parallelograms going from bottom-left
/// to top-right. The "odds" go from bottom-right to top-left.
pub fn slanties(n: usize) -> (Vec<Polygon>, Vec<Polygon>) {
    let h = 20 * n as i64;

    let mut even = Vec::new();
    let mut odd = Vec::new();
    for i in 0..n as i64 {
        let x_off = 20 * i;
        even.push(Polygon::from_vertices([
            Point::new(x_off, 0),
            Point::new(x_off + 10, 0),
            Point::new(x_off + h + 10, h),
            Point::new(x_off + h, h),
        ]));

        odd.push(Polygon::from_vertices([
            Point::new(x_off + h, 0),
            Point::new(x_off + h + 10, 0),
            Point::new(x_off + 10, h),
            Point::new(x_off, h),
        ]));
    }

    (even, odd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binary_op, BinaryOp, FillRule, Rational};

    #[test]
    fn checkerboard_intersection() {
        let (outer, inner) = checkerboard(3);
        assert_eq!(outer.len(), 9);
        assert_eq!(inner.len(), 4);

        // Every inner square overlaps four outer squares in 10x10 corners.
        let both = binary_op(&outer, &inner, FillRule::NonZero, BinaryOp::Intersection)
            .into_polygons_with_holes();
        assert_eq!(both.len(), 16);
        assert!(both.iter().all(|pwh| pwh.area() == Some(Rational::from(100))));
    }
}
