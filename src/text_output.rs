//! Plain terminal output of summaries and rankings

use crate::ranking::Ranking;
use crate::sample::Metric;
use crate::stats::Summary;
use std::io::{self, Write};

fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Write one command's summary
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    if summary.shell.is_empty() {
        writeln!(out, "Command: {}", summary.command)?;
    } else {
        writeln!(out, "Command: {} (shell: {})", summary.command, summary.shell)?;
    }
    writeln!(out, "  Runs: {}  Failures: {}", summary.runs, summary.failures)?;
    writeln!(
        out,
        "  {:<12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "", "mode", "min", "median", "p95", "p99", "max"
    )?;

    for metric in Metric::REPORT_ORDER {
        let m = summary.measures(metric);
        let label = if metric.unit().is_empty() {
            metric.name().to_string()
        } else {
            format!("{} {}", metric.name(), metric.unit())
        };
        writeln!(
            out,
            "  {:<12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            label,
            m.mode,
            m.min,
            m.median,
            optional(m.p95),
            optional(m.p99),
            m.max
        )?;
    }

    let n = &summary.normality;
    if n.stddev > 0.0 {
        writeln!(
            out,
            "  Total time mean {:.1} us, stddev {:.1} us, A² {:.3}, p(normal) {:.4}",
            n.mean, n.stddev, n.ad_score, n.p_normal
        )?;
        if summary.is_non_normal() {
            writeln!(out, "  ⚠️  Total time is not normally distributed")?;
        }
    }
    writeln!(out)
}

/// Write the fastest command of each group and how much slower the rest are
pub fn write_ranking<W: Write>(
    out: &mut W,
    summaries: &[Summary],
    ranking: &Ranking,
) -> io::Result<()> {
    for group in &ranking.groups {
        let fastest = &summaries[group.fastest];
        writeln!(
            out,
            "Fastest: {} ({} us modal total)",
            fastest.command,
            fastest.modal_total()
        )?;
        for cmp in &group.slower {
            writeln!(
                out,
                "  {:.2} times slower: {}",
                cmp.factor, summaries[cmp.index].command
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
