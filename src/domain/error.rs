//! Domain error types.

use crate::domain::naming::NameError;

/// Top-level error type for strategy-cli.
#[derive(Debug, thiserror::Error)]
pub enum StrategyCliError {
    #[error("invalid strategy name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: NameError,
    },

    #[error("{kind} already exists: {path} (use --force to overwrite)")]
    NameCollision { kind: String, path: String },

    #[error("{what} not found: {path}")]
    NotFound { what: String, path: String },

    #[error(
        "invalid data source {value:?} (expected one of: auto, local_csv, local_parquet, http_csv, synthetic)"
    )]
    InvalidSource { value: String },

    #[error("invalid strategy reference {value:?}: {reason}")]
    InvalidStrategyRef { value: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StrategyCliError {
    pub fn not_found(what: &str, path: &std::path::Path) -> Self {
        StrategyCliError::NotFound {
            what: what.to_string(),
            path: path.display().to_string(),
        }
    }
}

impl From<&StrategyCliError> for std::process::ExitCode {
    fn from(err: &StrategyCliError) -> Self {
        let code: u8 = match err {
            StrategyCliError::Io(_) => 1,
            StrategyCliError::InvalidName { .. }
            | StrategyCliError::NameCollision { .. }
            | StrategyCliError::InvalidSource { .. }
            | StrategyCliError::InvalidStrategyRef { .. }
            | StrategyCliError::ConfigParse { .. } => 2,
            StrategyCliError::NotFound { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
