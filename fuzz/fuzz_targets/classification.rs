#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use polyset::{
    arbitrary::{coordinate, simple_polygon},
    do_intersect, intersection, join, BoundedSide, Point,
};

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let (Ok(p), Ok(q), Ok(x), Ok(y)) = (
        simple_polygon(&mut u),
        simple_polygon(&mut u),
        coordinate(&mut u),
        coordinate(&mut u),
    ) else {
        return;
    };
    let pt = Point::new(x, y);

    let both = intersection(&p, &q);
    if !do_intersect(&p, &q) {
        assert!(both.is_empty());
    }

    let in_p = p.bounded_side(&pt) == BoundedSide::Inside;
    let in_q = q.bounded_side(&pt) == BoundedSide::Inside;
    if in_p && in_q {
        assert!(both.iter().any(|pwh| pwh.bounded_side(&pt) == BoundedSide::Inside));
    }
    if in_p || in_q {
        if let Some(union) = join(&p, &q) {
            assert_eq!(union.bounded_side(&pt), BoundedSide::Inside);
        }
    }
});
