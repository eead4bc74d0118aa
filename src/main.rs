use anyhow::{anyhow, Context, Result};
use clap::Parser;
use plotforge::charts::{self, Mapping};
use plotforge::{export, ingest, svg, OutputFormat, RenderOptions};
use std::fs;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "plotforge")]
#[command(about = "Render charts from CSV data and a column mapping", long_about = None)]
struct Args {
    /// Chart archetype id (scatterplot, barchart, linechart, piechart, treemap)
    #[arg(long)]
    chart: String,

    /// Column mapping as JSON (e.g. '{"x": ["region"], "y": ["sales"]}')
    #[arg(long)]
    mapping: String,

    /// Render options as JSON (all fields optional)
    #[arg(long)]
    options: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "svg")]
    format: Format,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    out: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Format {
    Svg,
    Png,
}

impl From<&Format> for OutputFormat {
    fn from(f: &Format) -> Self {
        match f {
            Format::Svg => OutputFormat::Svg,
            Format::Png => OutputFormat::Png,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = ingest::read_csv_from_stdin().context("Failed to read CSV from stdin")?;

    let def = charts::chart_by_id(&args.chart)
        .ok_or_else(|| anyhow!("Unknown chart archetype '{}'", args.chart))?;

    let mapping: Mapping =
        serde_json::from_str(&args.mapping).context("Failed to parse mapping JSON")?;

    let options: RenderOptions = match &args.options {
        Some(json) => serde_json::from_str(json).context("Failed to parse options JSON")?,
        None => RenderOptions::default(),
    };

    let scene = charts::render_chart(def, &data, &mapping, &options);
    if scene.is_empty() {
        log::warn!(
            "chart '{}' produced an empty scene; check the mapping against the CSV columns",
            def.id
        );
    }

    let bytes = match OutputFormat::from(&args.format) {
        OutputFormat::Svg => svg::document(&scene).into_bytes(),
        OutputFormat::Png => export::to_png(&scene).context("Failed to rasterize scene")?,
    };

    match &args.out {
        Some(path) => fs::write(path, &bytes)
            .with_context(|| format!("Failed to write output to '{}'", path))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&bytes)
                .context("Failed to write output to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
