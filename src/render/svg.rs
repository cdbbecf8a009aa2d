use std::path::PathBuf;

use kurbo::{BezPath, PathEl};
use svg::{
    node::element::{path::Data, Path, Rectangle},
    Document,
};
use tracing::{debug, warn};

use super::{Color, RenderError, Style, Surface};

fn css(color: Color) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// A single-page SVG document, saved to a file when the page is shown.
pub struct SvgSurface {
    document: Option<Document>,
    output: PathBuf,
}

impl SvgSurface {
    /// Starts a `width` by `height` SVG document that will be saved to `output`.
    pub fn new(output: impl Into<PathBuf>, width: f64, height: f64) -> Self {
        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height))
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", "white"),
            );
        SvgSurface {
            document: Some(document),
            output: output.into(),
        }
    }

    /// The document so far, or `None` if the page has already been shown.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }
}

impl Surface for SvgSurface {
    fn stroke_and_fill(&mut self, path: &BezPath, style: &Style) -> Result<(), RenderError> {
        let mut data = Data::new();
        for el in path.elements() {
            data = match *el {
                PathEl::MoveTo(p) => data.move_to((p.x, p.y)),
                PathEl::LineTo(p) => data.line_to((p.x, p.y)),
                // Boundary paths are made of straight lines only.
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => data.line_to((p.x, p.y)),
                PathEl::ClosePath => data.close(),
            };
        }

        let color = css(style.color);
        let path = Path::new()
            .set("stroke", color.clone())
            .set("stroke-width", style.line_width)
            .set("fill", color)
            .set("fill-rule", "evenodd")
            // Paint the stroke first and the fill over it.
            .set("paint-order", "stroke")
            .set("d", data);
        if let Some(document) = self.document.take() {
            self.document = Some(document.add(path));
        }
        Ok(())
    }

    fn show_page(mut self) -> Result<(), RenderError> {
        if let Some(document) = self.document.take() {
            svg::save(&self.output, &document)?;
            debug!(path = %self.output.display(), "wrote SVG page");
        }
        Ok(())
    }
}

impl Drop for SvgSurface {
    fn drop(&mut self) {
        if self.document.is_some() {
            warn!(path = %self.output.display(), "SVG surface released without showing a page");
        }
    }
}
