use std::path::PathBuf;

use assert_matches::assert_matches;
use polyset::{
    join,
    render::{render, PdfSurface, PngSurface, RenderError, Style, SvgSurface, Viewport},
    Polygon, PolygonWithHoles,
};

fn output_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    path.push("render");
    std::fs::create_dir_all(&path).unwrap();
    path.push(name);
    path
}

fn pentagon_union() -> PolygonWithHoles {
    let p: Polygon = "0,0 5,0 3.5,1.5 2.5,0.5 1.5,1.5".parse().unwrap();
    let q: Polygon = "0,2 1.5,0.5 2.5,1.5 3.5,0.5 5,2".parse().unwrap();
    join(&p, &q).unwrap()
}

fn view() -> Viewport {
    Viewport::new(-1.0, 6.0, -1.0, 6.0)
}

#[test]
fn pdf() {
    let path = output_path("union.pdf");
    let surface = PdfSurface::create(&path, 100.0, 100.0);
    render([&pentagon_union()], &view(), &Style::default(), surface).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn svg() {
    let path = output_path("union.svg");
    let surface = SvgSurface::new(&path, 100.0, 100.0);
    render([&pentagon_union()], &view(), &Style::default(), surface).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains(r#"fill-rule="evenodd""#));
    // The outer boundary and the hole, each starting with a move.
    assert_eq!(text.matches('M').count(), 2);
}

#[test]
fn png() {
    let path = output_path("union.png");
    let surface = PngSurface::new(&path, 100.0, 100.0).unwrap();
    render([&pentagon_union()], &view(), &Style::default(), surface).unwrap();

    let pixmap = tiny_skia::Pixmap::load_png(&path).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (100, 100));

    // Canvas coordinates are (model + 1) * 100 / 7.
    let to_canvas = |x: f64, y: f64| (((x + 1.0) * 100.0 / 7.0) as u32, ((y + 1.0) * 100.0 / 7.0) as u32);
    let is_black = |(x, y): (u32, u32)| {
        let px = pixmap.pixel(x, y).unwrap();
        px.red() == 0 && px.green() == 0 && px.blue() == 0
    };
    // Filled: between the left notch and the hole.
    assert!(is_black(to_canvas(1.5, 0.75)));
    // The diamond hole and the outside stay white.
    assert!(!is_black(to_canvas(2.5, 1.0)));
    assert!(!is_black(to_canvas(5.5, 5.5)));
}

#[test]
fn unbounded_union() {
    // Disjoint polygons have a trivial union; drawing the whole plane fails.
    let p: Polygon = "0,0 1,0 1,1 0,1".parse().unwrap();
    let q: Polygon = "3,3 4,3 4,4 3,4".parse().unwrap();
    let union = join(&p, &q).unwrap_or_default();

    let path = output_path("unbounded.svg");
    let _ = std::fs::remove_file(&path);
    let surface = SvgSurface::new(&path, 100.0, 100.0);
    assert_matches!(
        render([&union], &view(), &Style::default(), surface),
        Err(RenderError::Unbounded)
    );
    assert!(!path.exists());
}

#[test]
fn unbounded_union_leaves_no_pdf() {
    let p: Polygon = "0,0 1,0 1,1 0,1".parse().unwrap();
    let q: Polygon = "3,3 4,3 4,4 3,4".parse().unwrap();
    let union = join(&p, &q).unwrap_or_default();

    let path = output_path("unbounded.pdf");
    let _ = std::fs::remove_file(&path);
    let surface = PdfSurface::create(&path, 100.0, 100.0);
    assert_matches!(
        render([&union], &view(), &Style::default(), surface),
        Err(RenderError::Unbounded)
    );
    assert!(!path.exists());
}
