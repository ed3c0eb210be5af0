// Per-command summaries built from a contiguous range of the sample store

use super::mode::half_sample_mode;
use super::normality::{anderson_darling, Normality};
use super::order::{median, percentile, sort_indices_by_key};
use crate::error::{BenchError, Result};
use crate::sample::{Metric, Sample, SampleStore};
use serde::{Deserialize, Serialize};

/// Aggregate of one metric across a command's runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measures {
    pub min: i64,
    pub max: i64,
    pub median: i64,
    pub mode: i64,
    /// `None` below 20 runs
    pub p95: Option<i64>,
    /// `None` below 100 runs
    pub p99: Option<i64>,
}

impl Measures {
    /// Compute measures from ascending values; `None` when empty
    pub fn from_sorted(sorted: &[i64]) -> Option<Self> {
        Some(Self {
            min: *sorted.first()?,
            max: *sorted.last()?,
            median: median(sorted)?,
            mode: half_sample_mode(sorted)?,
            p95: percentile(95, sorted),
            p99: percentile(99, sorted),
        })
    }
}

/// Statistical summary of all timed runs of one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub command: String,
    pub shell: String,
    pub runs: usize,
    pub failures: usize,
    pub total: Measures,
    pub user: Measures,
    pub system: Measures,
    pub wall: Measures,
    pub maxrss: Measures,
    pub vcsw: Measures,
    pub icsw: Measures,
    pub tcsw: Measures,
    /// Normality of total CPU time
    pub normality: Normality,
}

impl Summary {
    pub fn measures(&self, metric: Metric) -> &Measures {
        match metric {
            Metric::Total => &self.total,
            Metric::User => &self.user,
            Metric::System => &self.system,
            Metric::Wall => &self.wall,
            Metric::MaxRss => &self.maxrss,
            Metric::Vcsw => &self.vcsw,
            Metric::Icsw => &self.icsw,
            Metric::Tcsw => &self.tcsw,
        }
    }

    pub fn measures_mut(&mut self, metric: Metric) -> &mut Measures {
        match metric {
            Metric::Total => &mut self.total,
            Metric::User => &mut self.user,
            Metric::System => &mut self.system,
            Metric::Wall => &mut self.wall,
            Metric::MaxRss => &mut self.maxrss,
            Metric::Vcsw => &mut self.vcsw,
            Metric::Icsw => &mut self.icsw,
            Metric::Tcsw => &mut self.tcsw,
        }
    }

    /// Modal total CPU time, the ranking key
    pub fn modal_total(&self) -> i64 {
        self.total.mode
    }

    /// Whether the normality test rejected a normal distribution at 5%
    pub fn is_non_normal(&self) -> bool {
        self.normality.p_normal < 0.05
    }
}

/// Summarize the run of samples that starts at `cursor`
///
/// Consecutive samples with the same command text form the run. On return
/// `cursor` points just past it. A cursor outside the store is an internal
/// error.
pub fn summarize(store: &SampleStore, cursor: &mut usize) -> Result<Summary> {
    let samples = store.as_slice();
    let start = *cursor;
    let first = samples.get(start).ok_or_else(|| {
        BenchError::Internal(format!(
            "summarize cursor {} outside store of {} samples",
            start,
            samples.len()
        ))
    })?;

    let mut end = start;
    let mut failures = 0;
    while let Some(sample) = samples.get(end) {
        if sample.command != first.command {
            break;
        }
        if sample.failed() {
            failures += 1;
        }
        end += 1;
    }
    *cursor = end;

    let range = &samples[start..end];
    let mut summary = Summary {
        command: first.command.clone(),
        shell: first.shell.clone(),
        runs: range.len(),
        failures,
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

    for metric in Metric::REPORT_ORDER {
        let sorted = sorted_values(range, metric);
        *summary.measures_mut(metric) = Measures::from_sorted(&sorted)
            .ok_or_else(|| BenchError::Internal("empty sample range".to_string()))?;
        if metric == Metric::Total {
            summary.normality = anderson_darling(&sorted);
        }
    }

    Ok(summary)
}

fn sorted_values(range: &[Sample], metric: Metric) -> Vec<i64> {
    sort_indices_by_key(range, |s| s.metric(metric))
        .into_iter()
        .map(|i| range[i].metric(metric))
        .collect()
}
