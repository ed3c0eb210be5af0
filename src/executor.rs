//! Single execution of a command with resource accounting
//!
//! The child is spawned and then reaped with `wait4`, so the resource usage
//! comes back atomically with the exit status. There are no before/after
//! `getrusage` snapshots that a sibling process or PID reuse could skew.

use crate::argv::build_argv;
use crate::error::{BenchError, Result};
use crate::sample::Sample;
use nix::errno::Errno;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::trace;

/// Run `command` once and measure it
///
/// Returns the exit code along with the measured sample. A child killed by a
/// signal is always fatal; a non-zero exit is fatal unless `ignore_failure`
/// is set, in which case the run is still fully measured.
pub fn execute(
    command: &str,
    shell: Option<&str>,
    show_output: bool,
    ignore_failure: bool,
) -> Result<(i32, Sample)> {
    let owned_shell = shell.map(str::to_string);
    let argv = build_argv(command, shell)?;

    let Some((program, args)) = argv.split_first() else {
        return Err(BenchError::Spawn {
            command: command.to_string(),
            shell: owned_shell,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    let mut cmd = Command::new(program);
    cmd.args(args);
    if !show_output {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
    }

    trace!(?argv, "spawning child");
    let start = Instant::now();
    let child = cmd.spawn().map_err(|source| BenchError::Spawn {
        command: command.to_string(),
        shell: owned_shell.clone(),
        source,
    })?;
    let pid = Pid::from_raw(child.id() as i32);

    let (status, usage) = wait_with_usage(pid).map_err(|source| BenchError::Wait {
        command: command.to_string(),
        shell: owned_shell.clone(),
        source,
    })?;
    let wall_us = start.elapsed().as_micros() as i64;
    drop(child);

    let exit_code = match status {
        WaitStatus::Exited(_, code) => code,
        WaitStatus::Signaled(_, signal, core_dumped) => {
            let reason = if core_dumped {
                format!("killed by {}, core dumped", signal.as_str())
            } else {
                format!("killed by {}", signal.as_str())
            };
            return Err(BenchError::Abnormal {
                command: command.to_string(),
                shell: owned_shell,
                reason,
            });
        }
        other => {
            return Err(BenchError::Abnormal {
                command: command.to_string(),
                shell: owned_shell,
                reason: format!("unexpected wait status {:?}", other),
            });
        }
    };
    trace!(pid = pid.as_raw(), exit_code, wall_us, "child reaped");

    if exit_code != 0 && !ignore_failure {
        return Err(BenchError::NonZeroExit {
            command: command.to_string(),
            shell: owned_shell,
            code: exit_code,
        });
    }

    let sample = Sample {
        command: command.to_string(),
        shell: owned_shell.unwrap_or_default(),
        exit_code,
        user_us: timeval_us(&usage.ru_utime),
        system_us: timeval_us(&usage.ru_stime),
        wall_us,
        maxrss_bytes: maxrss_bytes(usage.ru_maxrss as i64),
        minflt: usage.ru_minflt as i64,
        majflt: usage.ru_majflt as i64,
        vcsw: usage.ru_nvcsw as i64,
        icsw: usage.ru_nivcsw as i64,
    };
    Ok((exit_code, sample))
}

/// Block until `pid` terminates, returning its status and resource usage
fn wait_with_usage(pid: Pid) -> nix::Result<(WaitStatus, libc::rusage)> {
    let mut status: libc::c_int = 0;
    // SAFETY: rusage is plain old data, all-zero is a valid value
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };

    loop {
        // SAFETY: both out-pointers reference live locals for the whole call
        let ret = unsafe { libc::wait4(pid.as_raw(), &mut status, 0, &mut usage) };
        match Errno::result(ret) {
            Ok(_) => break,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok((WaitStatus::from_raw(pid, status)?, usage))
}

fn timeval_us(tv: &libc::timeval) -> i64 {
    tv.tv_sec as i64 * 1_000_000 + tv.tv_usec as i64
}

/// `ru_maxrss` is kilobytes on Linux and bytes on macOS
fn maxrss_bytes(raw: i64) -> i64 {
    if cfg!(target_os = "macos") {
        raw
    } else {
        raw * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_true_succeeds() {
        let (code, sample) = execute("true", None, false, false).unwrap();
        assert_eq!(code, 0);
        assert_eq!(sample.exit_code, 0);
        assert_eq!(sample.command, "true");
        assert_eq!(sample.shell, "");
        assert!(sample.maxrss_bytes > 0);
    }

    #[test]
    fn test_execute_measures_wall_time() {
        let (_, sample) = execute("sleep 0.05", None, false, false).unwrap();
        assert!(sample.wall_us >= 50_000, "wall_us = {}", sample.wall_us);
    }

    #[test]
    fn test_nonzero_exit_is_fatal_by_default() {
        let err = execute("sh -c 'exit 7'", None, false, false).unwrap_err();
        match err {
            BenchError::NonZeroExit { code, .. } => assert_eq!(code, 7),
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_exit_measured_when_ignored() {
        let (code, sample) = execute("sh -c 'exit 7'", None, false, true).unwrap();
        assert_eq!(code, 7);
        assert_eq!(sample.exit_code, 7);
        assert!(sample.failed());
    }

    #[test]
    fn test_shell_receives_raw_command() {
        let (code, sample) = execute("exit 3", Some("sh -c"), false, true).unwrap();
        assert_eq!(code, 3);
        assert_eq!(sample.shell, "sh -c");
        assert_eq!(sample.command, "exit 3");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = execute("/nonexistent/definitely-not-here", None, false, false).unwrap_err();
        assert!(matches!(err, BenchError::Spawn { .. }));
    }

    #[test]
    fn test_empty_command_is_spawn_error() {
        let err = execute("   ", None, false, false).unwrap_err();
        assert!(matches!(err, BenchError::Spawn { .. }));
        assert!(err.to_string().contains("--grouped"));
    }

    #[test]
    fn test_signaled_child_is_abnormal() {
        let err = execute("kill -9 $$", Some("sh -c"), false, true).unwrap_err();
        match err {
            BenchError::Abnormal { reason, .. } => assert!(reason.contains("SIGKILL")),
            other => panic!("expected Abnormal, got {:?}", other),
        }
    }

    #[test]
    fn test_timeval_conversion() {
        let tv = libc::timeval {
            tv_sec: 2,
            tv_usec: 500,
        };
        assert_eq!(timeval_us(&tv), 2_000_500);
    }
}
