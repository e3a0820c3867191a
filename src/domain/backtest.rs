//! Backtest launch planning.
//!
//! The CLI never simulates anything itself: it checks its inputs, then hands
//! the engine's backtest runner a config path, a data-source selector, a row
//! count and a strategy reference.

use crate::domain::data_source::DataSource;
use crate::domain::error::StrategyCliError;
use crate::domain::strategy_ref::StrategyRef;
use crate::ports::config_port::ConfigPort;
use crate::ports::process_port::ProcessSpec;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "configs/default.yaml";
pub const DEFAULT_ROWS: u32 = 500;
pub const RUNNER_MODULE: &str = "runners.backtest_runner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestPlan {
    pub engine_root: PathBuf,
    pub strategy: StrategyRef,
    pub source: DataSource,
    /// Config path as handed to the runner (relative paths are relative to
    /// the engine root).
    pub config: PathBuf,
    pub rows: u32,
}

impl BacktestPlan {
    pub fn runner_command(&self, python: &str) -> ProcessSpec {
        ProcessSpec {
            program: python.to_string(),
            args: vec![
                "-m".to_string(),
                RUNNER_MODULE.to_string(),
                self.config.display().to_string(),
                "--source".to_string(),
                self.source.to_string(),
                "--rows".to_string(),
                self.rows.to_string(),
                "--strategy".to_string(),
                self.strategy.to_string(),
            ],
            working_dir: self.engine_root.clone(),
        }
    }
}

/// Where the config file lives on disk: relative paths resolve against the
/// engine root, where the runner executes.
pub fn resolve_config_path(engine_root: &Path, config: &Path) -> PathBuf {
    if config.is_absolute() {
        config.to_path_buf()
    } else {
        engine_root.join(config)
    }
}

pub fn check_engine_root(engine_root: &Path) -> Result<(), StrategyCliError> {
    if engine_root.is_dir() {
        Ok(())
    } else {
        Err(StrategyCliError::not_found("engine root", engine_root))
    }
}

pub fn check_config_file(config_path: &Path) -> Result<(), StrategyCliError> {
    if config_path.is_file() {
        Ok(())
    } else {
        Err(StrategyCliError::not_found("config", config_path))
    }
}

/// `--rows` wins; otherwise `backtest.rows` from the config; otherwise 500.
/// A configured value that is not a positive integer is an error.
pub fn resolve_rows(
    rows_override: Option<u32>,
    config: &dyn ConfigPort,
    config_file: &str,
) -> Result<u32, StrategyCliError> {
    if let Some(rows) = rows_override {
        return Ok(rows);
    }
    let Some(raw) = config.get_string("backtest", "rows") else {
        return Ok(DEFAULT_ROWS);
    };
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| StrategyCliError::ConfigParse {
            file: config_file.to_string(),
            reason: format!("backtest.rows must be a positive integer, got {raw}"),
        })
}
