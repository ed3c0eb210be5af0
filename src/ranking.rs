//! Cross-command ranking by modal total CPU time

use crate::error::{BenchError, Result};
use crate::stats::Summary;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::warn;

/// How much slower one command is than its group's fastest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Index into the summaries
    pub index: usize,
    /// `other.mode / fastest.mode`
    pub factor: f64,
}

/// Ranking result for one comparison group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRanking {
    pub range: Range<usize>,
    /// Index of the fastest summary
    pub fastest: usize,
    /// Every other member, in summary order
    pub slower: Vec<Comparison>,
}

/// Fastest command and slowdown factors per group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub groups: Vec<GroupRanking>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Rank summaries within each group
///
/// Groups with fewer than two members produce no comparison. Ties for
/// fastest go to the earlier command. A group whose fastest modal time is
/// zero cannot express a slowdown factor and is skipped.
pub fn rank(summaries: &[Summary], groups: &[Range<usize>]) -> Result<Ranking> {
    let mut ranking = Ranking::default();

    for group in groups {
        if group.start > group.end || group.end > summaries.len() {
            return Err(BenchError::Internal(format!(
                "group {:?} outside {} summaries",
                group,
                summaries.len()
            )));
        }
        if group.len() < 2 {
            continue;
        }

        let mut fastest = group.start;
        for i in group.clone() {
            if summaries[i].modal_total() < summaries[fastest].modal_total() {
                fastest = i;
            }
        }

        let best = summaries[fastest].modal_total();
        if best <= 0 {
            warn!(
                command = %summaries[fastest].command,
                "fastest modal time is zero, skipping group comparison"
            );
            continue;
        }

        let slower = group
            .clone()
            .filter(|&i| i != fastest)
            .map(|i| Comparison {
                index: i,
                factor: summaries[i].modal_total() as f64 / best as f64,
            })
            .collect();

        ranking.groups.push(GroupRanking {
            range: group.clone(),
            fastest,
            slower,
        });
    }

    Ok(ranking)
}
