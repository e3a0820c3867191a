//! External process port trait.

use crate::domain::error::StrategyCliError;
use std::fmt;
use std::path::PathBuf;

/// One external command to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How a finished child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Exited(i32),
    /// Terminated without an exit code (e.g. killed by a signal).
    Terminated,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ProcessOutcome::Exited(0))
    }
}

impl From<ProcessOutcome> for std::process::ExitCode {
    fn from(outcome: ProcessOutcome) -> Self {
        match outcome {
            ProcessOutcome::Exited(code) => {
                std::process::ExitCode::from(u8::try_from(code).unwrap_or(1))
            }
            ProcessOutcome::Terminated => std::process::ExitCode::from(1),
        }
    }
}

pub trait ProcessPort {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutcome, StrategyCliError>;
}
