//! Reduction of per-run samples into robust summaries
//!
//! - `order`: index sorting, median and nearest-rank percentiles
//! - `mode`: half-sample mode estimator
//! - `normality`: Anderson-Darling test against a fitted normal
//! - `summary`: per-command `Summary` built from a contiguous store range

mod mode;
mod normality;
mod order;
mod summary;

pub use mode::half_sample_mode;
pub use normality::{anderson_darling, p_value, Normality, MIN_NORMALITY_RUNS};
pub use order::{median, percentile, sort_indices_by_key};
pub use summary::{summarize, Measures, Summary};
