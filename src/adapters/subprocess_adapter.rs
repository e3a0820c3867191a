//! `std::process` implementation of the process port.

use crate::domain::error::StrategyCliError;
use crate::ports::process_port::{ProcessOutcome, ProcessPort, ProcessSpec};
use std::io;
use std::process::Command;
use tracing::debug;

/// Runs children with inherited stdio and waits for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessRunner;

impl ProcessPort for SubprocessRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutcome, StrategyCliError> {
        debug!(command = %spec, cwd = %spec.working_dir.display(), "spawning");
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .status()
            .map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("failed to run {}: {}", spec.program, e),
                )
            })?;
        debug!(%status, "child exited");

        Ok(match status.code() {
            Some(code) => ProcessOutcome::Exited(code),
            None => ProcessOutcome::Terminated,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh(script: &str) -> ProcessSpec {
        ProcessSpec {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            working_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn propagates_exit_code() {
        assert_eq!(SubprocessRunner.run(&sh("exit 0")).unwrap(), ProcessOutcome::Exited(0));
        assert_eq!(SubprocessRunner.run(&sh("exit 7")).unwrap(), ProcessOutcome::Exited(7));
    }

    #[test]
    fn runs_in_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut spec = sh("test -f marker");
        spec.working_dir = dir.path().to_path_buf();
        assert_eq!(SubprocessRunner.run(&spec).unwrap(), ProcessOutcome::Exited(1));
        std::fs::write(dir.path().join("marker"), "").unwrap();
        assert_eq!(SubprocessRunner.run(&spec).unwrap(), ProcessOutcome::Exited(0));
    }

    #[test]
    fn signal_is_terminated() {
        assert_eq!(
            SubprocessRunner.run(&sh("kill -9 $$")).unwrap(),
            ProcessOutcome::Terminated
        );
    }

    #[test]
    fn missing_program_is_io_error() {
        let spec = ProcessSpec {
            program: "definitely-not-a-real-program-xyz".into(),
            args: vec![],
            working_dir: PathBuf::from("."),
        };
        let err = SubprocessRunner.run(&spec).unwrap_err();
        assert!(matches!(err, StrategyCliError::Io(_)));
        assert!(err.to_string().contains("failed to run definitely-not-a-real-program-xyz"));
    }
}
