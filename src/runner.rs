//! Run driver: warmups, timed runs and per-command summaries
//!
//! Execution is strictly sequential. A child is always reaped before the
//! next one starts so concurrent processes never perturb the measurements.

use crate::config::Config;
use crate::error::Result;
use crate::executor::execute;
use crate::ranking::{rank, Ranking};
use crate::sample::{Sample, SampleStore};
use crate::stats::{summarize, Summary};
use tracing::{debug, info};

/// Executes commands and owns the sample store for one benchmark
#[derive(Debug)]
pub struct Runner<'a> {
    config: &'a Config,
    store: SampleStore,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            store: SampleStore::new(),
        }
    }

    /// Run one command `warmup` times untimed and `runs` times timed
    ///
    /// Timed samples are appended to the store and summarized; the modal
    /// total time used for ranking is `Summary::modal_total`.
    pub fn run_command(&mut self, command: &str, warmup: usize, runs: usize) -> Result<Summary> {
        let shell = self.config.shell.as_deref();
        let show_output = self.config.show_output;
        let ignore_failure = self.config.ignore_failure;

        for i in 0..warmup {
            let (code, _) = execute(command, shell, show_output, ignore_failure)?;
            debug!(command, iteration = i, exit_code = code, "warmup run");
        }

        let mut cursor = self.store.len();
        for _ in 0..runs {
            let (_, sample) = execute(command, shell, show_output, ignore_failure)?;
            self.store.push(sample);
        }

        let summary = summarize(&self.store, &mut cursor)?;
        info!(
            command,
            runs = summary.runs,
            failures = summary.failures,
            modal_total_us = summary.modal_total(),
            "command summarized"
        );
        Ok(summary)
    }

    /// Samples recorded so far, in execution order
    pub fn samples(&self) -> &SampleStore {
        &self.store
    }

    pub fn into_samples(self) -> SampleStore {
        self.store
    }
}

/// Everything produced by a complete benchmark
#[derive(Debug, Clone)]
pub struct Report {
    pub summaries: Vec<Summary>,
    pub ranking: Ranking,
    pub samples: SampleStore,
}

/// Benchmark every configured command in order, then rank them
///
/// `on_command` sees each summary and its timed samples as soon as the
/// command finishes, so output for completed commands survives a later
/// fatal error.
pub fn run_benchmark<F>(config: &Config, mut on_command: F) -> Result<Report>
where
    F: FnMut(&Summary, &[Sample]) -> Result<()>,
{
    config.validate()?;

    let mut runner = Runner::new(config);
    let mut summaries = Vec::with_capacity(config.commands.len());

    for command in &config.commands.commands {
        let start = runner.samples().len();
        let summary = runner.run_command(command, config.warmup, config.runs)?;
        on_command(&summary, &runner.samples().as_slice()[start..])?;
        summaries.push(summary);
    }

    let ranking = rank(&summaries, &config.commands.groups)?;
    Ok(Report {
        summaries,
        ranking,
        samples: runner.into_samples(),
    })
}
