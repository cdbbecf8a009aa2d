//! Drawing polygons with holes onto a single page.
//!
//! Rendering is split in two: [`boundary_path`] turns a polygon with holes into
//! a canvas-space path, and a [`Surface`] knows how to paint that path and
//! write out a page. [`render`] glues them together.
//!
//! Canvas coordinates put the model point `(xmin, ymin)` at the origin, with
//! `x` growing to the right and `y` growing downwards. Backends whose native
//! `y` axis points up flip it themselves.

use kurbo::{Affine, BezPath};
use tracing::info;

use crate::PolygonWithHoles;

mod pdf;
mod raster;
mod svg;

pub use pdf::{PdfFile, PdfSurface};
pub use raster::PngSurface;
pub use self::svg::SvgSurface;

/// Things that can go wrong while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Unbounded polygons have no outer boundary to draw.
    #[error("polygon is unbounded")]
    Unbounded,
    /// The model rectangle or the canvas has no area.
    #[error("degenerate viewport {0:?}")]
    DegenerateViewport(Viewport),
    /// Failed to write the output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The PDF backend failed.
    #[error("failed to encode PDF: {0}")]
    Pdf(String),
    /// The raster backend failed.
    #[error("failed to encode PNG: {0}")]
    Png(String),
}

/// A map from a rectangle of the model plane to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// The smallest visible model `x` coordinate.
    pub xmin: f64,
    /// The largest visible model `x` coordinate.
    pub xmax: f64,
    /// The smallest visible model `y` coordinate.
    pub ymin: f64,
    /// The largest visible model `y` coordinate.
    pub ymax: f64,
    /// The canvas width.
    pub width: f64,
    /// The canvas height.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            xmin: -10.0,
            xmax: 10.0,
            ymin: -10.0,
            ymax: 10.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

impl Viewport {
    /// A viewport showing the given model rectangle, on the default canvas.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Viewport {
            xmin,
            xmax,
            ymin,
            ymax,
            ..Viewport::default()
        }
    }

    /// Changes the canvas size.
    pub fn with_canvas(self, width: f64, height: f64) -> Self {
        Viewport {
            width,
            height,
            ..self
        }
    }

    /// Checks that both the model rectangle and the canvas have positive, finite size.
    pub fn validate(&self) -> Result<(), RenderError> {
        let spans = [
            self.xmax - self.xmin,
            self.ymax - self.ymin,
            self.width,
            self.height,
        ];
        if spans.iter().all(|s| s.is_finite() && *s > 0.0) {
            Ok(())
        } else {
            Err(RenderError::DegenerateViewport(*self))
        }
    }

    /// Canvas units per model unit, horizontally and vertically.
    pub fn scale(&self) -> (f64, f64) {
        (
            self.width / (self.xmax - self.xmin),
            self.height / (self.ymax - self.ymin),
        )
    }

    /// The map from model coordinates to canvas coordinates.
    pub fn transform(&self) -> Affine {
        let (sx, sy) = self.scale();
        Affine::scale_non_uniform(sx, sy) * Affine::translate((-self.xmin, -self.ymin))
    }
}

/// An opaque RGB color, with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Black.
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    fn to_rgba8(self) -> [u8; 4] {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }
}

/// How to paint the polygons: a stroke of width `line_width` and a fill, both in `color`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Stroke width. When passed to [`render`] this is in model units; surfaces
    /// receive it in canvas units.
    pub line_width: f64,
    /// Stroke and fill color.
    pub color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            line_width: 0.1,
            color: Color::BLACK,
        }
    }
}

/// Something we can paint paths on, and then turn into a page.
///
/// A surface owns whatever it writes to. Dropping a surface releases it,
/// whether or not a page was shown.
pub trait Surface {
    /// Strokes the path, and then fills it using the even-odd rule.
    fn stroke_and_fill(&mut self, path: &BezPath, style: &Style) -> Result<(), RenderError>;

    /// Finishes the page and writes it out.
    fn show_page(self) -> Result<(), RenderError>
    where
        Self: Sized;
}

/// The boundary of a polygon with holes, as a canvas-space path.
///
/// Each boundary (the outer one first, then the holes) is a move to its first
/// vertex, a line to each of the others, and a line back to the first.
pub fn boundary_path(pwh: &PolygonWithHoles, viewport: &Viewport) -> Result<BezPath, RenderError> {
    if pwh.is_unbounded() {
        return Err(RenderError::Unbounded);
    }

    let transform = viewport.transform();
    let mut path = BezPath::new();
    for ring in pwh.boundaries() {
        let mut points = ring.vertices().map(|v| transform * v.to_kurbo());
        let Some(first) = points.next() else {
            continue;
        };
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
        path.line_to(first);
    }
    Ok(path)
}

/// Draws some polygons with holes on a surface, and shows the page.
///
/// The polygons are stroked and filled as a single path using the even-odd
/// rule, so holes come out as unfilled cavities. The surface is consumed: if
/// anything goes wrong (for example, if one of the polygons is unbounded) it
/// gets dropped without a page being shown.
pub fn render<'a, S: Surface>(
    polygons: impl IntoIterator<Item = &'a PolygonWithHoles>,
    viewport: &Viewport,
    style: &Style,
    mut surface: S,
) -> Result<(), RenderError> {
    viewport.validate()?;

    let mut path = BezPath::new();
    for pwh in polygons {
        path.extend(boundary_path(pwh, viewport)?);
    }

    // Scaling the canvas scales the stroke along with it.
    let (sx, sy) = viewport.scale();
    let canvas_style = Style {
        line_width: style.line_width * (sx * sy).sqrt(),
        ..*style
    };
    surface.stroke_and_fill(&path, &canvas_style)?;
    surface.show_page()?;
    info!(elements = path.elements().len(), "rendered page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use assert_matches::assert_matches;
    use kurbo::{PathEl, Point};

    use super::*;
    use crate::Polygon;

    #[derive(Debug, Default)]
    struct Log {
        painted: Vec<(BezPath, Style)>,
        pages: usize,
        drops: usize,
    }

    struct Recording(Rc<RefCell<Log>>);

    impl Surface for Recording {
        fn stroke_and_fill(&mut self, path: &BezPath, style: &Style) -> Result<(), RenderError> {
            self.0.borrow_mut().painted.push((path.clone(), *style));
            Ok(())
        }

        fn show_page(self) -> Result<(), RenderError> {
            self.0.borrow_mut().pages += 1;
            Ok(())
        }
    }

    impl Drop for Recording {
        fn drop(&mut self) {
            self.0.borrow_mut().drops += 1;
        }
    }

    fn union_with_hole() -> PolygonWithHoles {
        PolygonWithHoles::with_holes(
            "0,0 5,0 4,1 5,2 0,2 1,1".parse::<Polygon>().unwrap(),
            ["2.5,0.5 2,1 2.5,1.5 3,1".parse::<Polygon>().unwrap()],
        )
    }

    #[test]
    fn viewport_transform() {
        let view = Viewport::new(-1.0, 6.0, -1.0, 6.0).with_canvas(70.0, 140.0);
        let t = view.transform();
        assert_eq!(t * Point::new(-1.0, -1.0), Point::new(0.0, 0.0));
        assert_eq!(t * Point::new(6.0, 6.0), Point::new(70.0, 140.0));
        assert_eq!(view.scale(), (10.0, 20.0));

        assert_matches!(
            Viewport::new(1.0, 1.0, 0.0, 1.0).validate(),
            Err(RenderError::DegenerateViewport(_))
        );
        assert!(Viewport::default().validate().is_ok());
    }

    #[test]
    fn path_commands() {
        let view = Viewport::new(0.0, 10.0, 0.0, 10.0).with_canvas(10.0, 10.0);
        let path = boundary_path(&union_with_hole(), &view).unwrap();
        let els = path.elements();

        // Six outer vertices plus the closing line, and four hole vertices plus the closing line.
        assert_eq!(els.len(), 7 + 5);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(els[6], PathEl::LineTo(Point::new(0.0, 0.0)));
        assert_eq!(els[7], PathEl::MoveTo(Point::new(2.5, 0.5)));
        assert_eq!(els[11], PathEl::LineTo(Point::new(2.5, 0.5)));
        assert!(!els.contains(&PathEl::ClosePath));
    }

    #[test]
    fn renders_one_page() {
        let log = Rc::new(RefCell::new(Log::default()));
        let view = Viewport::new(-1.0, 6.0, -1.0, 6.0);
        render(
            [&union_with_hole()],
            &view,
            &Style::default(),
            Recording(log.clone()),
        )
        .unwrap();

        let log = log.borrow();
        assert_eq!(log.pages, 1);
        assert_eq!(log.drops, 1);
        assert_eq!(log.painted.len(), 1);
        let (path, style) = &log.painted[0];
        assert_eq!(path.elements().len(), 12);
        // 0.1 model units, at 100 / 7 canvas units per model unit.
        assert!((style.line_width - 1.0 / 0.7).abs() < 1e-9);
    }

    #[test]
    fn unbounded_is_an_error() {
        let log = Rc::new(RefCell::new(Log::default()));
        let result = render(
            [&PolygonWithHoles::default()],
            &Viewport::default(),
            &Style::default(),
            Recording(log.clone()),
        );
        assert_matches!(result, Err(RenderError::Unbounded));

        let log = log.borrow();
        assert!(log.painted.is_empty());
        assert_eq!(log.pages, 0);
        assert_eq!(log.drops, 1);

        assert_matches!(
            boundary_path(&PolygonWithHoles::default(), &Viewport::default()),
            Err(RenderError::Unbounded)
        );
    }
}
