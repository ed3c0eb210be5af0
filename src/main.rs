use anyhow::{Context, Result};
use clap::Parser;
use cmdbench::cli::{Cli, OutputFormat};
use cmdbench::csv_output::{CsvKind, CsvSink};
use cmdbench::error::{BenchError, EXIT_RUNTIME};
use cmdbench::json_output::JsonReport;
use cmdbench::runner::run_benchmark;
use cmdbench::text_output::{write_ranking, write_summary};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Create a CSV sink at `path` if one was requested
fn open_sink(path: Option<&Path>, kind: CsvKind) -> Result<Option<CsvSink<BufWriter<File>>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = File::create(path)
        .map_err(|e| BenchError::io(format!("cannot create {}", path.display()), e))?;
    Ok(Some(CsvSink::new(BufWriter::new(file), kind)?))
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.format;
    let raw_path = cli.csv.clone();
    let summary_path = cli.summary_csv.clone();
    let config = cli.into_config()?;

    let mut raw_csv = open_sink(raw_path.as_deref(), CsvKind::Samples)?;
    let mut summary_csv = open_sink(summary_path.as_deref(), CsvKind::Summaries)?;

    let report = run_benchmark(&config, |summary, samples| {
        if let Some(sink) = raw_csv.as_mut() {
            sink.record(summary, samples)?;
        }
        if let Some(sink) = summary_csv.as_mut() {
            sink.record(summary, samples)?;
        }
        if format == OutputFormat::Text {
            let mut out = io::stdout().lock();
            write_summary(&mut out, summary)
                .and_then(|_| out.flush())
                .map_err(|e| BenchError::io("failed to write summary", e))?;
        }
        Ok(())
    })?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            write_ranking(&mut out, &report.summaries, &report.ranking)
                .context("failed to write ranking")?;
        }
        OutputFormat::Json => {
            let json = JsonReport::from_report(&report)
                .to_json()
                .context("failed to serialize JSON report")?;
            writeln!(out, "{}", json).context("failed to write JSON report")?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        // BenchError messages already embed their cause ahead of any hint
        let code = match err.downcast_ref::<BenchError>() {
            Some(bench_err) => {
                eprintln!("cmdbench: {}", bench_err);
                bench_err.exit_code()
            }
            None => {
                eprintln!("cmdbench: {:#}", err);
                EXIT_RUNTIME
            }
        };
        std::process::exit(code);
    }
}
