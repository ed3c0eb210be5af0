//! Benchmark configuration
//!
//! A `Config` is resolved once (from the command line or programmatically)
//! and then passed by reference into the runner. Nothing in the library
//! reads ambient global state.

use crate::argv::build_argv;
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::ops::Range;

/// Ordered commands partitioned into contiguous comparison groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    pub commands: Vec<String>,
    pub groups: Vec<Range<usize>>,
}

impl CommandSet {
    /// All commands in one implicit group
    pub fn single_group(commands: Vec<String>) -> Self {
        let groups = if commands.is_empty() {
            Vec::new()
        } else {
            vec![0..commands.len()]
        };
        Self { commands, groups }
    }

    /// Read commands one per line
    ///
    /// When `grouped` is set, runs of blank lines close the current group;
    /// otherwise blank lines are skipped and everything forms one group.
    pub fn from_reader<R: BufRead>(reader: R, grouped: bool) -> Result<Self> {
        let mut set = CommandSet::default();
        let mut group_start = 0;

        for line in reader.lines() {
            let line = line.map_err(|e| BenchError::io("failed to read commands", e))?;
            let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');

            if line.trim().is_empty() {
                if grouped && set.commands.len() > group_start {
                    set.groups.push(group_start..set.commands.len());
                    group_start = set.commands.len();
                }
                continue;
            }
            set.commands.push(line.to_string());
        }

        if set.commands.len() > group_start {
            set.groups.push(group_start..set.commands.len());
        }
        Ok(set)
    }

    /// Append another set, keeping its groups separate from ours
    pub fn extend(&mut self, other: CommandSet) {
        let offset = self.commands.len();
        self.groups
            .extend(other.groups.into_iter().map(|g| g.start + offset..g.end + offset));
        self.commands.extend(other.commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Fully resolved benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Commands to benchmark, in execution order, with their groups
    pub commands: CommandSet,
    /// Shell used to run every command (e.g. `sh -c`)
    pub shell: Option<String>,
    /// Untimed runs per command before measurement
    pub warmup: usize,
    /// Timed runs per command
    pub runs: usize,
    /// Keep measuring when a command exits non-zero
    pub ignore_failure: bool,
    /// Let child output reach the terminal instead of the null device
    pub show_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commands: CommandSet::default(),
            shell: None,
            warmup: 0,
            runs: 10,
            ignore_failure: false,
            show_output: false,
        }
    }
}

impl Config {
    /// Configuration for the given commands in a single group
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: CommandSet::single_group(commands.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_ignore_failure(mut self, ignore: bool) -> Self {
        self.ignore_failure = ignore;
        self
    }

    pub fn with_show_output(mut self, show: bool) -> Self {
        self.show_output = show;
        self
    }

    /// Validate configuration before any measurement starts
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(BenchError::Usage("number of runs must be at least 1".to_string()));
        }

        if self.commands.is_empty() {
            return Err(BenchError::Usage("no commands to benchmark".to_string()));
        }

        if let Some(shell) = &self.shell {
            if shell.trim().is_empty() {
                return Err(BenchError::Usage("shell must not be empty".to_string()));
            }
        }

        for command in &self.commands.commands {
            build_argv(command, self.shell.as_deref())?;
        }

        let mut expected_start = 0;
        for group in &self.commands.groups {
            if group.is_empty() {
                return Err(BenchError::Usage(format!("empty command group {:?}", group)));
            }
            if group.start != expected_start || group.end > self.commands.len() {
                return Err(BenchError::Usage(format!(
                    "command group {:?} is not contiguous within {} commands",
                    group,
                    self.commands.len()
                )));
            }
            expected_start = group.end;
        }
        if expected_start != self.commands.len() {
            return Err(BenchError::Usage(format!(
                "command groups cover {} of {} commands",
                expected_start,
                self.commands.len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.runs, 10);
        assert_eq!(config.warmup, 0);
        assert!(!config.ignore_failure);
        assert!(!config.show_output);
        assert!(config.shell.is_none());
    }

    #[test]
    fn test_new_builds_single_group() {
        let config = Config::new(["a", "b", "c"]);
        assert_eq!(config.commands.groups, vec![0..3]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_runs_rejected() {
        let config = Config::new(["true"]).with_runs(0);
        assert!(matches!(config.validate(), Err(BenchError::Usage(_))));
    }

    #[test]
    fn test_no_commands_rejected() {
        let config = Config::new(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(BenchError::Usage(_))));
    }

    #[test]
    fn test_blank_shell_rejected() {
        let config = Config::new(["true"]).with_shell(" ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unbalanced_quotes_rejected_up_front() {
        let config = Config::new(["echo 'unbalanced"]);
        assert!(matches!(config.validate(), Err(BenchError::Usage(_))));
        // Under a shell the command text is passed through untouched
        assert!(config.with_shell("sh -c").validate().is_ok());
    }

    #[test]
    fn test_gapped_groups_rejected() {
        let mut config = Config::new(["a", "b", "c"]);
        config.commands.groups = vec![0..1, 2..3];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_bounds_group_rejected() {
        let mut config = Config::new(["a", "b"]);
        config.commands.groups = vec![0..3];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reader_ungrouped_skips_blank_lines() {
        let input = "echo a\n\n\necho b\r\n  \necho c\n";
        let set = CommandSet::from_reader(Cursor::new(input), false).unwrap();
        assert_eq!(set.commands, vec!["echo a", "echo b", "echo c"]);
        assert_eq!(set.groups, vec![0..3]);
    }

    #[test]
    fn test_reader_grouped_splits_on_blank_runs() {
        let input = "\na1\na2\n\n\nb1\n\nc1\nc2\nc3\n\n";
        let set = CommandSet::from_reader(Cursor::new(input), true).unwrap();
        assert_eq!(set.commands.len(), 6);
        assert_eq!(set.groups, vec![0..2, 2..3, 3..6]);
    }

    #[test]
    fn test_extend_offsets_groups() {
        let mut set = CommandSet::single_group(vec!["x".into()]);
        let file = CommandSet::from_reader(Cursor::new("a\n\nb\nc\n"), true).unwrap();
        set.extend(file);
        assert_eq!(set.commands, vec!["x", "a", "b", "c"]);
        assert_eq!(set.groups, vec![0..1, 1..2, 2..4]);
    }

    #[test]
    fn test_config_serializes() {
        let config = Config::new(["true"]).with_shell("sh -c").with_runs(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
