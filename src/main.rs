use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use timetable_extract::{detect_source, ColumnLayout, NamedTable, TimetableExtractor};

#[derive(Parser)]
#[command(name = "timetable-extract")]
#[command(version)]
#[command(about = "Extract course timetable records from per-course tables", long_about = None)]
struct Cli {
    /// CSV files or directories of CSV files (one table per file)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding the column layout
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Read numeric-looking fields as numbers
    #[arg(long)]
    infer_numbers: bool,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Write diagnostics (skipped tables, dropped tokens) as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    run_extract(&cli)
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run_extract(cli: &Cli) -> Result<()> {
    // 1. Layout
    let layout = match &cli.layout {
        Some(path) => ColumnLayout::from_file(path)?,
        None => ColumnLayout::default(),
    };

    // 2. Load tables
    let mut tables: Vec<NamedTable> = Vec::new();
    for input in &cli.inputs {
        log::info!("Reading {}...", input.display());
        let source = detect_source(input, cli.infer_numbers)?;
        tables.extend(source.load(input)?);
    }

    // 3. Extract
    let extractor = TimetableExtractor::new(layout);
    let report = extractor.extract_batch(&tables);

    // 4. Write
    match &cli.output {
        Some(path) => {
            log::info!("Writing data to {}...", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), &report.courses, cli.compact)?;
        }
        None => write_json(io::stdout().lock(), &report.courses, cli.compact)?,
    }

    if let Some(path) = &cli.report {
        write_report(path, &report.diagnostics)?;
    }

    log::info!("{}", report.summary());
    log::info!("Parsing completed successfully.");

    Ok(())
}

fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut writer, value).context("Failed to serialize records")?;
    } else {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        value
            .serialize(&mut serializer)
            .context("Failed to serialize records")?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn write_report<T: Serialize>(path: &Path, diagnostics: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    write_json(BufWriter::new(file), diagnostics, false)
}
