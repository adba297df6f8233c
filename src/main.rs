use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};

use groupbar::data::Table;
use groupbar::runtime::{render_chart, ChartOutcome};
use groupbar::{csv_reader, parser, ChartDefaults};

#[derive(Parser, Debug)]
#[command(name = "groupbar")]
#[command(about = "Generate grouped bar charts from CSV data using a pipe DSL", long_about = None)]
struct Args {
    /// Chart DSL string (e.g. 'bars(group: grp, value: val) | errorbars(sd)')
    dsl: String,

    /// Treat stdin as a JSON array of objects instead of CSV
    #[arg(long)]
    json: bool,

    /// Seed for the jitter RNG; same seed, same image
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with render defaults (colors, font size, jitter, ...)
    #[arg(long)]
    defaults: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Read the table from stdin; nothing piped is the "no upload" state
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;
    if input.trim().is_empty() {
        println!("Pipe a CSV table on stdin to draw a chart.");
        return Ok(());
    }

    let table = if args.json {
        let value = serde_json::from_str(&input).context("Failed to parse JSON input")?;
        Table::from_json(&value).context("Failed to read JSON table")?
    } else {
        let csv_data =
            csv_reader::read_csv(input.as_bytes()).context("Failed to read CSV from stdin")?;
        Table::from_csv(csv_data)
    };

    let defaults = match &args.defaults {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .context(format!("Failed to read defaults file {}", path.display()))?;
            serde_json::from_str(&text).context("Failed to parse defaults file")?
        }
        None => ChartDefaults::default(),
    };

    // Parse the DSL string; trailing garbage is a parse error, not a warning
    let chart_spec = match parser::parse_chart_spec(&args.dsl) {
        Ok((_, chart_spec)) => chart_spec,
        Err(e) => {
            eprintln!("Parse error: {:?}", e);
            std::process::exit(1);
        }
    };

    // Render the chart
    match render_chart(&chart_spec, &table, &defaults, args.seed)
        .context("Failed to render chart")?
    {
        ChartOutcome::Image(png_bytes) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&png_bytes)
                .context("Failed to write PNG to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
        ChartOutcome::Prompt(message) => {
            println!("{}", message);
        }
    }

    Ok(())
}
