//! CSV records for raw samples and per-command summaries
//!
//! Rows are written as soon as a command finishes so a later fatal error
//! does not lose completed results. Rows can be parsed back with the same
//! field order.

use crate::error::{BenchError, Result};
use crate::sample::{Metric, Sample};
use crate::stats::{Measures, Normality, Summary};
use std::io::Write;

/// Column names of a raw sample row
pub const SAMPLE_HEADER: &str = "command,shell,exit_code,user_us,system_us,maxrss_bytes,minflt,majflt,vcsw,icsw,wall_us,total_us,tcsw";

/// Number of columns per metric in a summary row
const MEASURE_FIELDS: usize = 6;

/// Column names of a summary row
pub fn summary_header() -> String {
    let mut headers = vec![
        "command".to_string(),
        "shell".to_string(),
        "runs".to_string(),
        "failures".to_string(),
    ];
    for metric in Metric::REPORT_ORDER {
        for column in ["mode", "min", "median", "p95", "p99", "max"] {
            headers.push(format!("{}_{}", metric.name(), column));
        }
    }
    headers.extend(["mean", "stddev", "ad_score", "p_normal"].map(String::from));
    headers.join(",")
}

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Format a sample as a CSV row
pub fn format_sample(sample: &Sample) -> String {
    let fields = [
        escape_field(&sample.command),
        escape_field(&sample.shell),
        sample.exit_code.to_string(),
        sample.user_us.to_string(),
        sample.system_us.to_string(),
        sample.maxrss_bytes.to_string(),
        sample.minflt.to_string(),
        sample.majflt.to_string(),
        sample.vcsw.to_string(),
        sample.icsw.to_string(),
        sample.wall_us.to_string(),
        sample.total_us().to_string(),
        sample.tcsw().to_string(),
    ];
    fields.join(",")
}

/// Format a summary as a CSV row
pub fn format_summary(summary: &Summary) -> String {
    let mut fields = vec![
        escape_field(&summary.command),
        escape_field(&summary.shell),
        summary.runs.to_string(),
        summary.failures.to_string(),
    ];
    for metric in Metric::REPORT_ORDER {
        let m = summary.measures(metric);
        fields.push(m.mode.to_string());
        fields.push(m.min.to_string());
        fields.push(m.median.to_string());
        fields.push(optional(m.p95));
        fields.push(optional(m.p99));
        fields.push(m.max.to_string());
    }
    let n = &summary.normality;
    fields.push(n.mean.to_string());
    fields.push(n.stddev.to_string());
    fields.push(n.ad_score.to_string());
    fields.push(n.p_normal.to_string());
    fields.join(",")
}

/// Split one CSV row into unescaped fields
pub fn split_row(row: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = row.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => quoted = false,
                other => current.push(other),
            }
        } else {
            match c {
                ',' => fields.push(std::mem::take(&mut current)),
                '"' if current.is_empty() => quoted = true,
                other => current.push(other),
            }
        }
    }
    if quoted {
        return Err(BenchError::Usage(format!("unterminated quoted field in '{}'", row)));
    }
    fields.push(current);
    Ok(fields)
}

fn parse_field<T: std::str::FromStr>(fields: &[String], index: usize, name: &str) -> Result<T> {
    fields[index]
        .parse()
        .map_err(|_| BenchError::Usage(format!("invalid {} field '{}'", name, fields[index])))
}

fn parse_optional(fields: &[String], index: usize, name: &str) -> Result<Option<i64>> {
    if fields[index].is_empty() {
        Ok(None)
    } else {
        parse_field(fields, index, name).map(Some)
    }
}

fn expect_columns(fields: &[String], expected: usize) -> Result<()> {
    if fields.len() != expected {
        return Err(BenchError::Usage(format!(
            "expected {} columns, found {}",
            expected,
            fields.len()
        )));
    }
    Ok(())
}

/// Parse a raw sample row; derived columns are checked against the parts
pub fn parse_sample_row(row: &str) -> Result<Sample> {
    let f = split_row(row)?;
    expect_columns(&f, 13)?;
    let sample = Sample {
        command: f[0].clone(),
        shell: f[1].clone(),
        exit_code: parse_field(&f, 2, "exit_code")?,
        user_us: parse_field(&f, 3, "user_us")?,
        system_us: parse_field(&f, 4, "system_us")?,
        maxrss_bytes: parse_field(&f, 5, "maxrss_bytes")?,
        minflt: parse_field(&f, 6, "minflt")?,
        majflt: parse_field(&f, 7, "majflt")?,
        vcsw: parse_field(&f, 8, "vcsw")?,
        icsw: parse_field(&f, 9, "icsw")?,
        wall_us: parse_field(&f, 10, "wall_us")?,
    };
    let total: i64 = parse_field(&f, 11, "total_us")?;
    let tcsw: i64 = parse_field(&f, 12, "tcsw")?;
    if total != sample.total_us() || tcsw != sample.tcsw() {
        return Err(BenchError::Usage(format!(
            "derived columns do not match in '{}'",
            row
        )));
    }
    Ok(sample)
}

/// Parse a summary row produced by `format_summary`
pub fn parse_summary_row(row: &str) -> Result<Summary> {
    let f = split_row(row)?;
    let metrics_end = 4 + MEASURE_FIELDS * Metric::REPORT_ORDER.len();
    expect_columns(&f, metrics_end + 4)?;

    let mut summary = Summary {
        command: f[0].clone(),
        shell: f[1].clone(),
        runs: parse_field(&f, 2, "runs")?,
        failures: parse_field(&f, 3, "failures")?,
        total: Measures::default(),
        user: Measures::default(),
        system: Measures::default(),
        wall: Measures::default(),
        maxrss: Measures::default(),
        vcsw: Measures::default(),
        icsw: Measures::default(),
        tcsw: Measures::default(),
        normality: Normality::default(),
    };

    for (k, metric) in Metric::REPORT_ORDER.into_iter().enumerate() {
        let base = 4 + k * MEASURE_FIELDS;
        *summary.measures_mut(metric) = Measures {
            mode: parse_field(&f, base, "mode")?,
            min: parse_field(&f, base + 1, "min")?,
            median: parse_field(&f, base + 2, "median")?,
            p95: parse_optional(&f, base + 3, "p95")?,
            p99: parse_optional(&f, base + 4, "p99")?,
            max: parse_field(&f, base + 5, "max")?,
        };
    }

    summary.normality = Normality {
        mean: parse_field(&f, metrics_end, "mean")?,
        stddev: parse_field(&f, metrics_end + 1, "stddev")?,
        ad_score: parse_field(&f, metrics_end + 2, "ad_score")?,
        p_normal: parse_field(&f, metrics_end + 3, "p_normal")?,
    };
    Ok(summary)
}

/// Which record shape a `CsvSink` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvKind {
    Samples,
    Summaries,
}

/// Incremental CSV writer that flushes after every command
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
    kind: CsvKind,
}

impl<W: Write> CsvSink<W> {
    /// Create the sink and write the header row
    pub fn new(mut writer: W, kind: CsvKind) -> Result<Self> {
        let header = match kind {
            CsvKind::Samples => SAMPLE_HEADER.to_string(),
            CsvKind::Summaries => summary_header(),
        };
        writeln!(writer, "{}", header)
            .map_err(|e| BenchError::io("failed to write CSV header", e))?;
        Ok(Self { writer, kind })
    }

    /// Append the rows for one finished command
    pub fn record(&mut self, summary: &Summary, samples: &[Sample]) -> Result<()> {
        let io_err = |e| BenchError::io("failed to write CSV row", e);
        match self.kind {
            CsvKind::Samples => {
                for sample in samples {
                    writeln!(self.writer, "{}", format_sample(sample)).map_err(io_err)?;
                }
            }
            CsvKind::Summaries => {
                writeln!(self.writer, "{}", format_summary(summary)).map_err(io_err)?;
            }
        }
        self.writer.flush().map_err(io_err)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
