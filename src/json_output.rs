//! JSON document of summaries and ranking

use crate::ranking::Ranking;
use crate::runner::Report;
use crate::stats::Summary;
use serde::{Deserialize, Serialize};

/// A slowdown entry with the command text resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparison {
    pub command: String,
    pub times_slower: f64,
}

/// Ranking of one group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonGroup {
    pub fastest: String,
    pub modal_total_us: i64,
    pub slower: Vec<JsonComparison>,
}

/// Complete benchmark result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub summaries: Vec<Summary>,
    pub ranking: Vec<JsonGroup>,
}

impl JsonReport {
    pub fn new(summaries: &[Summary], ranking: &Ranking) -> Self {
        let groups = ranking
            .groups
            .iter()
            .map(|group| JsonGroup {
                fastest: summaries[group.fastest].command.clone(),
                modal_total_us: summaries[group.fastest].modal_total(),
                slower: group
                    .slower
                    .iter()
                    .map(|c| JsonComparison {
                        command: summaries[c.index].command.clone(),
                        times_slower: c.factor,
                    })
                    .collect(),
            })
            .collect();

        Self {
            summaries: summaries.to_vec(),
            ranking: groups,
        }
    }

    pub fn from_report(report: &Report) -> Self {
        Self::new(&report.summaries, &report.ranking)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
