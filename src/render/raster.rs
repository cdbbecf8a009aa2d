use std::path::PathBuf;

use kurbo::{BezPath, PathEl};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, warn};

use super::{RenderError, Style, Surface};

fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p0, p1) => pb.quad_to(p0.x as f32, p0.y as f32, p1.x as f32, p1.y as f32),
            PathEl::CurveTo(p0, p1, p2) => pb.cubic_to(
                p0.x as f32,
                p0.y as f32,
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// A raster page, saved as a PNG file when the page is shown.
///
/// One canvas unit is one pixel. The page starts out white.
pub struct PngSurface {
    pixmap: Option<Pixmap>,
    output: PathBuf,
}

impl PngSurface {
    /// Starts a `width` by `height` pixel page that will be saved to `output`.
    pub fn new(output: impl Into<PathBuf>, width: f64, height: f64) -> Result<Self, RenderError> {
        let size = |s: f64| {
            let px = s.ceil();
            (px >= 1.0 && px <= f64::from(u32::MAX)).then_some(px as u32)
        };
        let mut pixmap = size(width)
            .zip(size(height))
            .and_then(|(w, h)| Pixmap::new(w, h))
            .ok_or_else(|| RenderError::Png(format!("cannot allocate a {width}x{height} canvas")))?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(PngSurface {
            pixmap: Some(pixmap),
            output: output.into(),
        })
    }

    /// The pixels so far, or `None` if the page has already been shown.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }
}

impl Surface for PngSurface {
    fn stroke_and_fill(&mut self, path: &BezPath, style: &Style) -> Result<(), RenderError> {
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), skia_path(path)) else {
            // Empty paths have nothing to draw.
            return Ok(());
        };

        let [r, g, b, a] = style.color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: style.line_width as f32,
            ..Default::default()
        };

        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        Ok(())
    }

    fn show_page(mut self) -> Result<(), RenderError> {
        if let Some(pixmap) = self.pixmap.take() {
            pixmap
                .save_png(&self.output)
                .map_err(|e| RenderError::Png(e.to_string()))?;
            debug!(path = %self.output.display(), "wrote PNG page");
        }
        Ok(())
    }
}

impl Drop for PngSurface {
    fn drop(&mut self) {
        if self.pixmap.is_some() {
            warn!(path = %self.output.display(), "PNG surface released without showing a page");
        }
    }
}
