use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use polyset::{
    difference, intersection, join,
    render::{render, PdfSurface, PngSurface, Style, SvgSurface, Viewport},
    symmetric_difference, Polygon, PolygonWithHoles,
};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Op {
    Union,
    Intersection,
    Difference,
    Xor,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Format {
    Pdf,
    Svg,
    Png,
}

impl Format {
    fn from_extension(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Format::Pdf),
            "svg" => Some(Format::Svg),
            "png" => Some(Format::Png),
            _ => None,
        }
    }
}

/// The visible rectangle of the plane, as `xmin,xmax,ymin,ymax`.
#[derive(Copy, Clone, Debug)]
struct View([f64; 4]);

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nums = s
            .split(',')
            .map(|n| n.trim().parse::<f64>().map_err(|e| format!("{n:?}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        let nums: [f64; 4] = nums
            .try_into()
            .map_err(|_| format!("expected xmin,xmax,ymin,ymax, found {s:?}"))?;
        Ok(View(nums))
    }
}

/// Computes the union and intersection of two polygons, prints them, and
/// draws one of the results on a single page.
#[derive(Parser)]
struct Cli {
    /// The first polygon, as whitespace-separated `x,y` vertices.
    #[arg(long, default_value = "0,0 5,0 3.5,1.5 2.5,0.5 1.5,1.5")]
    p: Polygon,

    /// The second polygon, as whitespace-separated `x,y` vertices.
    #[arg(long, default_value = "0,2 1.5,0.5 2.5,1.5 3.5,0.5 5,2")]
    q: Polygon,

    /// Where to write the page.
    #[arg(long, short, default_value = "testfile1.pdf")]
    output: PathBuf,

    /// The output format. By default, this is guessed from the output's extension.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// The part of the plane to draw, as `xmin,xmax,ymin,ymax`.
    #[arg(long, default_value = "-1,6,-1,6", allow_hyphen_values = true)]
    view: View,

    /// Page width.
    #[arg(long, default_value_t = 100.0)]
    width: f64,

    /// Page height.
    #[arg(long, default_value_t = 100.0)]
    height: f64,

    /// Stroke width, in the same units as the polygons.
    #[arg(long, default_value_t = 0.1)]
    line_width: f64,

    /// Which result to draw.
    #[arg(long, value_enum, default_value_t = Op::Union)]
    render: Op,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    for (name, poly) in [("P", &args.p), ("Q", &args.q)] {
        if let Err(e) = poly.validate() {
            warn!("{name} is not a simple polygon: {e}");
        }
        println!("{name} = {poly}");
    }

    let union = join(&args.p, &args.q);
    match &union {
        Some(union) => println!("The union: {union}"),
        None => println!("P and Q are disjoint and their union is trivial."),
    }
    println!();

    let both = intersection(&args.p, &args.q);
    println!("The intersection:");
    for pwh in &both {
        println!("--> {pwh}");
    }

    // A trivial union leaves the whole (unbounded) plane to draw, which can't be done.
    let to_draw: Vec<PolygonWithHoles> = match args.render {
        Op::Union => vec![union.unwrap_or_default()],
        Op::Intersection => both,
        Op::Difference => difference(&args.p, &args.q),
        Op::Xor => symmetric_difference(&args.p, &args.q),
    };

    let View([xmin, xmax, ymin, ymax]) = args.view;
    let viewport = Viewport::new(xmin, xmax, ymin, ymax).with_canvas(args.width, args.height);
    let style = Style {
        line_width: args.line_width,
        ..Style::default()
    };
    let format = args
        .format
        .or_else(|| Format::from_extension(&args.output))
        .unwrap_or(Format::Pdf);

    let (w, h) = (args.width, args.height);
    let out = &args.output;
    let rendered = match format {
        Format::Pdf => render(&to_draw, &viewport, &style, PdfSurface::create(out, w, h)),
        Format::Svg => render(&to_draw, &viewport, &style, SvgSurface::new(out, w, h)),
        Format::Png => render(&to_draw, &viewport, &style, PngSurface::new(out, w, h)?),
    };
    rendered.with_context(|| format!("failed to render {:?} to {}", args.render, out.display()))?;

    info!(output = %out.display(), ?format, "done");
    Ok(())
}
