//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{Point, Polygon};

/// Generate a small integer coordinate.
///
/// The range is deliberately tiny, so that generated polygons often share
/// vertices, overlap along edges, and touch at single points.
pub fn coordinate(u: &mut Unstructured<'_>) -> Result<i32, arbitrary::Error> {
    u.int_in_range(-8..=8)
}

/// Generate an arbitrary simple polygon that is monotone in `x`.
///
/// The polygon is made of a lower chain and an upper chain that share their
/// leftmost and rightmost vertices, with the upper chain strictly above the
/// lower one in between. That makes it simple (although it may have collinear
/// vertices). It comes out in either orientation.
pub fn x_monotone_polygon(u: &mut Unstructured<'_>) -> Result<Polygon, arbitrary::Error> {
    let columns: usize = u.int_in_range(3..=6)?;

    let mut x = u.int_in_range(-8..=0)?;
    let mut lower = Vec::with_capacity(columns);
    let mut upper = Vec::with_capacity(columns);
    for i in 0..columns {
        let y = coordinate(u)?;
        lower.push(Point::new(x, y));
        if i > 0 && i + 1 < columns {
            let height: i32 = u.int_in_range(1..=4)?;
            upper.push(Point::new(x, y + height));
        }
        x += u.int_in_range(1..=3)?;
    }

    let poly: Polygon = lower.into_iter().chain(upper.into_iter().rev()).collect();
    Ok(if u.arbitrary()? { poly.reversed() } else { poly })
}

/// Generate an axis-aligned rectangle with integer corners.
///
/// Rectangles line up with each other much more often than general polygons
/// do, which makes them good for exercising shared edges.
pub fn rectangle(u: &mut Unstructured<'_>) -> Result<Polygon, arbitrary::Error> {
    let x0 = coordinate(u)?;
    let y0 = coordinate(u)?;
    let w: i32 = u.int_in_range(1..=6)?;
    let h: i32 = u.int_in_range(1..=6)?;
    Ok(Polygon::from_vertices([
        Point::new(x0, y0),
        Point::new(x0 + w, y0),
        Point::new(x0 + w, y0 + h),
        Point::new(x0, y0 + h),
    ]))
}

/// Generate a simple polygon: either a rectangle or an x-monotone polygon.
pub fn simple_polygon(u: &mut Unstructured<'_>) -> Result<Polygon, arbitrary::Error> {
    if u.ratio(1, 3)? {
        rectangle(u)
    } else {
        x_monotone_polygon(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_polygons_are_simple() {
        arbtest::arbtest(|u| {
            let poly = simple_polygon(u)?;
            assert_eq!(poly.validate(), Ok(()), "{poly}");
            Ok(())
        });
    }
}
