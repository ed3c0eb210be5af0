//! Error taxonomy for benchmark runs
//!
//! Three classes of failure exist: usage errors (bad configuration caught
//! before anything runs), runtime errors (a child could not be launched,
//! was killed, or failed) and internal errors (a broken invariant).

use thiserror::Error;

/// Exit status for malformed configuration
pub const EXIT_USAGE: i32 = 2;
/// Exit status for failures while measuring
pub const EXIT_RUNTIME: i32 = 1;
/// Exit status for violated internal invariants
pub const EXIT_INTERNAL: i32 = 3;

/// Errors produced while configuring, running, or summarizing a benchmark
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("failed to launch {}: {source}{}", describe(.command, .shell.as_deref()), launch_hint(.command, .shell.as_deref()))]
    Spawn {
        command: String,
        shell: Option<String>,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for {}: {source}", describe(.command, .shell.as_deref()))]
    Wait {
        command: String,
        shell: Option<String>,
        #[source]
        source: nix::Error,
    },

    #[error("{} terminated abnormally ({reason}){}", describe(.command, .shell.as_deref()), abnormal_hint(.shell.as_deref()))]
    Abnormal {
        command: String,
        shell: Option<String>,
        reason: String,
    },

    #[error("{} exited with status {code}; pass --ignore-failure to keep measuring{}", describe(.command, .shell.as_deref()), exit_hint(.shell.as_deref()))]
    NonZeroExit {
        command: String,
        shell: Option<String>,
        code: i32,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl BenchError {
    /// Process exit status for this error class
    pub fn exit_code(&self) -> i32 {
        match self {
            BenchError::Usage(_) => EXIT_USAGE,
            BenchError::Internal(_) => EXIT_INTERNAL,
            _ => EXIT_RUNTIME,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        BenchError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;

fn describe(command: &str, shell: Option<&str>) -> String {
    match shell {
        Some(shell) => format!("shell '{}' running '{}'", shell, command),
        None => format!("command '{}'", command),
    }
}

fn launch_hint(command: &str, shell: Option<&str>) -> &'static str {
    if command.trim().is_empty() {
        "\nhint: blank lines only separate command groups when --grouped is given"
    } else if shell.is_none() {
        "\nhint: no shell is configured; builtins, pipes and redirects need --shell"
    } else {
        ""
    }
}

fn abnormal_hint(shell: Option<&str>) -> &'static str {
    if shell.is_none() {
        "\nhint: no shell is configured; the command was executed directly"
    } else {
        ""
    }
}

fn exit_hint(shell: Option<&str>) -> &'static str {
    if shell.is_some() {
        "\nhint: most shells need an explicit flag to run a string, e.g. --shell 'sh -c'"
    } else {
        ""
    }
}
