//! cmdbench - benchmark shell commands by OS resource usage
//!
//! Commands are executed repeatedly and one at a time. Each run's resource
//! usage (CPU time, wall time, max RSS, page faults, context switches) is
//! collected with `wait4`, reduced into robust per-command summaries
//! (half-sample mode, median, nearest-rank percentiles, Anderson-Darling
//! normality) and ranked by modal total CPU time.

pub mod argv;
pub mod cdf;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod executor;
pub mod json_output;
pub mod ranking;
pub mod runner;
pub mod sample;
pub mod stats;
pub mod text_output;

pub use config::{CommandSet, Config};
pub use error::{BenchError, Result};
pub use ranking::{rank, Ranking};
pub use runner::{run_benchmark, Report, Runner};
pub use sample::{Metric, Sample, SampleStore};
pub use stats::{summarize, Measures, Summary};
