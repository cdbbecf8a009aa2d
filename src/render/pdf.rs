use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use kurbo::{BezPath, PathEl};
use printpdf::{
    path::{PaintMode, WindingOrder},
    Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Pt, Rgb,
};
use tracing::{debug, warn};

use super::{RenderError, Style, Surface};

// The fill goes on top of the stroke. `PaintMode::FillStroke` would do it the
// other way around.
const PAINT_ORDER: [PaintMode; 2] = [PaintMode::Stroke, PaintMode::Fill];

// Canvas units are PDF points, and printpdf wants page sizes in millimeters.
fn mm(points: f64) -> Mm {
    Mm((points * 25.4 / 72.0) as f32)
}

/// An output file that is only created when the first byte is written.
#[derive(Debug)]
pub struct PdfFile {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl PdfFile {
    fn file(&mut self) -> io::Result<&mut BufWriter<File>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                debug!(path = %self.path.display(), "opened PDF output");
                BufWriter::new(File::create(&self.path)?)
            }
        };
        Ok(self.file.insert(file))
    }
}

impl Write for PdfFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// A single-page PDF document.
///
/// The page is `width` by `height` points. Nothing is written until
/// [`Surface::show_page`]; dropping the surface before that leaves the output
/// untouched.
pub struct PdfSurface<W: Write = PdfFile> {
    doc: Option<PdfDocumentReference>,
    layer: PdfLayerReference,
    out: W,
    height: f64,
}

impl PdfSurface {
    /// A PDF surface for a file at `path`.
    ///
    /// The file is created (or truncated) when the page is shown.
    pub fn create(path: impl Into<PathBuf>, width: f64, height: f64) -> Self {
        let out = PdfFile {
            path: path.into(),
            file: None,
        };
        PdfSurface::new(out, width, height)
    }
}

impl<W: Write> PdfSurface<W> {
    /// Creates a PDF surface that writes to `out`.
    pub fn new(out: W, width: f64, height: f64) -> Self {
        let (doc, page, layer) = PdfDocument::new("polyset", mm(width), mm(height), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        PdfSurface {
            doc: Some(doc),
            layer,
            out,
            height,
        }
    }

    /// Converts a canvas point to PDF user space, whose `y` axis points up.
    fn pdf_point(&self, p: kurbo::Point) -> printpdf::Point {
        printpdf::Point {
            x: Pt(p.x as f32),
            y: Pt((self.height - p.y) as f32),
        }
    }
}

impl<W: Write> Surface for PdfSurface<W> {
    fn stroke_and_fill(&mut self, path: &BezPath, style: &Style) -> Result<(), RenderError> {
        let mut rings: Vec<Vec<(printpdf::Point, bool)>> = Vec::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => rings.push(vec![(self.pdf_point(p), false)]),
                PathEl::LineTo(p) => {
                    let point = self.pdf_point(p);
                    match rings.last_mut() {
                        Some(ring) => ring.push((point, false)),
                        None => rings.push(vec![(point, false)]),
                    }
                }
                // Boundary paths are made of straight lines only.
                PathEl::QuadTo(..) | PathEl::CurveTo(..) | PathEl::ClosePath => {}
            }
        }

        let color = printpdf::Color::Rgb(Rgb::new(
            style.color.r as f32,
            style.color.g as f32,
            style.color.b as f32,
            None,
        ));
        self.layer.set_outline_thickness(style.line_width as f32);
        self.layer.set_outline_color(color.clone());
        self.layer.set_fill_color(color);
        for mode in PAINT_ORDER {
            self.layer.add_polygon(printpdf::Polygon {
                rings: rings.clone(),
                mode,
                winding_order: WindingOrder::EvenOdd,
            });
        }
        Ok(())
    }

    fn show_page(mut self) -> Result<(), RenderError> {
        let Some(doc) = self.doc.take() else {
            return Ok(());
        };
        let bytes = doc
            .save_to_bytes()
            .map_err(|e| RenderError::Pdf(format!("{e:?}")))?;
        self.out.write_all(&bytes)?;
        self.out.flush()?;
        debug!(bytes = bytes.len(), "wrote PDF page");
        Ok(())
    }
}

impl<W: Write> Drop for PdfSurface<W> {
    fn drop(&mut self) {
        if self.doc.is_some() {
            warn!("PDF surface released without showing a page");
        }
    }
}
