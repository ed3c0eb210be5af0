//! CLI argument parsing for cmdbench

use crate::config::{CommandSet, Config};
use crate::error::{BenchError, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Output format for stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cmdbench")]
#[command(version)]
#[command(about = "Benchmark shell commands by resource usage", long_about = None)]
pub struct Cli {
    /// Timed runs per command
    #[arg(short = 'r', long = "runs", value_name = "N", default_value = "10")]
    pub runs: usize,

    /// Untimed warmup runs per command
    #[arg(short = 'w', long = "warmup", value_name = "N", default_value = "0")]
    pub warmup: usize,

    /// Shell used to run each command (e.g. "bash -c")
    #[arg(short = 's', long = "shell", value_name = "SHELL")]
    pub shell: Option<String>,

    /// Keep measuring when a command exits with a non-zero status
    #[arg(short = 'i', long = "ignore-failure")]
    pub ignore_failure: bool,

    /// Show command output instead of discarding it
    #[arg(short = 'o', long = "show-output")]
    pub show_output: bool,

    /// Read commands from a file, one per line ("-" for stdin)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Treat blank lines in the command file as group separators
    #[arg(short = 'g', long = "grouped")]
    pub grouped: bool,

    /// Write every timed run as CSV
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write per-command summaries as CSV
    #[arg(long = "summary-csv", value_name = "PATH")]
    pub summary_csv: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// Commands to benchmark
    pub commands: Vec<String>,
}

impl Cli {
    /// Resolve arguments into a benchmark configuration
    pub fn into_config(self) -> Result<Config> {
        if self.grouped && self.file.is_none() {
            return Err(BenchError::Usage("--grouped requires --file".to_string()));
        }

        let mut commands = CommandSet::single_group(self.commands);
        if let Some(path) = &self.file {
            let from_file = if path.as_os_str() == "-" {
                CommandSet::from_reader(std::io::stdin().lock(), self.grouped)?
            } else {
                let file = File::open(path).map_err(|e| {
                    BenchError::io(format!("cannot open command file {}", path.display()), e)
                })?;
                CommandSet::from_reader(BufReader::new(file), self.grouped)?
            };
            commands.extend(from_file);
        }

        let config = Config {
            commands,
            shell: self.shell,
            warmup: self.warmup,
            runs: self.runs,
            ignore_failure: self.ignore_failure,
            show_output: self.show_output,
        };
        config.validate()?;
        Ok(config)
    }
}
