#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use malachite::num::arithmetic::traits::Abs;
use polyset::{
    arbitrary::simple_polygon, difference, intersection, symmetric_difference, PolygonWithHoles,
    Rational,
};

fn total_area(pwhs: &[PolygonWithHoles]) -> Rational {
    let mut area = Rational::from(0);
    for pwh in pwhs {
        area += pwh.area().unwrap();
    }
    area
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(p) = simple_polygon(&mut u) else {
        return;
    };
    let Ok(q) = simple_polygon(&mut u) else {
        return;
    };

    let p_area = p.area().abs();
    let q_area = q.area().abs();

    let both = total_area(&intersection(&p, &q));
    let p_only = total_area(&difference(&p, &q));
    let q_only = total_area(&difference(&q, &p));
    let either = total_area(&symmetric_difference(&p, &q));

    assert_eq!(&p_only + &both, p_area);
    assert_eq!(&q_only + &both, q_area);
    assert_eq!(p_only + q_only, either);
    assert_eq!(both, total_area(&intersection(&q, &p)));
});
