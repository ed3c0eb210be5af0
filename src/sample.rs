//! Per-run measurement records and the append-only store that holds them

use serde::{Deserialize, Serialize};

/// Resource usage and outcome of one execution of a command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Command text as given by the user
    pub command: String,
    /// Shell used to run the command (empty when executed directly)
    pub shell: String,
    pub exit_code: i32,
    /// User CPU time (microseconds)
    pub user_us: i64,
    /// System CPU time (microseconds)
    pub system_us: i64,
    /// Wall-clock time (microseconds)
    pub wall_us: i64,
    /// Maximum resident set size (bytes)
    pub maxrss_bytes: i64,
    pub minflt: i64,
    pub majflt: i64,
    /// Voluntary context switches
    pub vcsw: i64,
    /// Involuntary context switches
    pub icsw: i64,
}

impl Sample {
    /// User plus system CPU time
    pub fn total_us(&self) -> i64 {
        self.user_us + self.system_us
    }

    /// Voluntary plus involuntary context switches
    pub fn tcsw(&self) -> i64 {
        self.vcsw + self.icsw
    }

    pub fn failed(&self) -> bool {
        self.exit_code != 0
    }

    /// Read the value of one metric
    pub fn metric(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Total => self.total_us(),
            Metric::User => self.user_us,
            Metric::System => self.system_us,
            Metric::Wall => self.wall_us,
            Metric::MaxRss => self.maxrss_bytes,
            Metric::Vcsw => self.vcsw,
            Metric::Icsw => self.icsw,
            Metric::Tcsw => self.tcsw(),
        }
    }
}

/// Metrics that are reduced into summary measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Total,
    User,
    System,
    Wall,
    MaxRss,
    Vcsw,
    Icsw,
    Tcsw,
}

impl Metric {
    /// Order used by summary records
    pub const REPORT_ORDER: [Metric; 8] = [
        Metric::Total,
        Metric::User,
        Metric::System,
        Metric::MaxRss,
        Metric::Vcsw,
        Metric::Icsw,
        Metric::Tcsw,
        Metric::Wall,
    ];

    /// Column prefix used in record headers
    pub fn name(self) -> &'static str {
        match self {
            Metric::Total => "total",
            Metric::User => "user",
            Metric::System => "system",
            Metric::Wall => "wall",
            Metric::MaxRss => "maxrss",
            Metric::Vcsw => "vcsw",
            Metric::Icsw => "icsw",
            Metric::Tcsw => "tcsw",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Total | Metric::User | Metric::System | Metric::Wall => "us",
            Metric::MaxRss => "bytes",
            Metric::Vcsw | Metric::Icsw | Metric::Tcsw => "",
        }
    }
}

/// Ordered, append-only collection of samples
///
/// Indices are stable once assigned; samples are never reordered or removed.
#[derive(Debug, Default, Clone)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample and return its index
    pub fn push(&mut self, sample: Sample) -> usize {
        self.samples.push(sample);
        self.samples.len() - 1
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(command: &str, user: i64, system: i64) -> Sample {
        Sample {
            command: command.to_string(),
            user_us: user,
            system_us: system,
            vcsw: 3,
            icsw: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_fields() {
        let s = sample("a", 100, 50);
        assert_eq!(s.total_us(), 150);
        assert_eq!(s.tcsw(), 7);
        assert_eq!(s.metric(Metric::Total), 150);
        assert_eq!(s.metric(Metric::Tcsw), 7);
        assert_eq!(s.metric(Metric::User), 100);
    }

    #[test]
    fn test_store_indices_are_stable() {
        let mut store = SampleStore::new();
        assert!(store.is_empty());
        assert_eq!(store.push(sample("a", 1, 0)), 0);
        assert_eq!(store.push(sample("b", 2, 0)), 1);
        assert_eq!(store.push(sample("c", 3, 0)), 2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().command, "b");
        assert!(store.get(3).is_none());
    }

    #[test]
    fn test_failed_flag() {
        let mut s = sample("a", 0, 0);
        assert!(!s.failed());
        s.exit_code = 7;
        assert!(s.failed());
    }

    #[test]
    fn test_report_order_covers_every_metric_once() {
        let names: Vec<_> = Metric::REPORT_ORDER.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            ["total", "user", "system", "maxrss", "vcsw", "icsw", "tcsw", "wall"]
        );
    }
}
