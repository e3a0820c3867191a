#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use strategy_cli::cli::{BacktestArgs, TestArgs};
use strategy_cli::domain::error::StrategyCliError;
use strategy_cli::ports::process_port::{ProcessOutcome, ProcessPort, ProcessSpec};

/// Records every launch and answers with a fixed outcome.
pub struct MockProcessRunner {
    pub outcome: ProcessOutcome,
    pub spawn_error: Option<String>,
    pub calls: RefCell<Vec<ProcessSpec>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self {
            outcome: ProcessOutcome::Exited(0),
            spawn_error: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_outcome(mut self, outcome: ProcessOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_spawn_error(mut self, reason: &str) -> Self {
        self.spawn_error = Some(reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ProcessSpec> {
        self.calls.borrow().clone()
    }
}

impl ProcessPort for MockProcessRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutcome, StrategyCliError> {
        self.calls.borrow_mut().push(spec.clone());
        match &self.spawn_error {
            Some(reason) => Err(StrategyCliError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                reason.clone(),
            ))),
            None => Ok(self.outcome),
        }
    }
}

pub const VALID_STRATEGY: &str = "\
from trading_sdk.base_strategy import BaseStrategy
from trading_sdk.structs import OrderSignal


class OkStrategy(BaseStrategy):
    def setup(self, config):
        self.config = config

    def set_adapter(self, adapter):
        self.adapter = adapter

    def next_signal(self, market_data, account_data):
        return OrderSignal(action='WAIT', quantity=0.0)
";

pub fn manifest_for(entry: &str, target: &str) -> String {
    format!(
        "[project]\n\
         name = 'strategy-pack'\n\
         version = '0.1.0'\n\
         dependencies = ['trading-sdk>=0.1.0']\n\
         [project.entry-points.\"trading_system.strategies\"]\n\
         {entry} = '{target}'\n"
    )
}

/// Write a pack with one strategy module `<module>.py` and a manifest
/// registering `class_name` from it.
pub fn write_pack(root: &Path, module: &str, source: &str, class_name: &str) {
    let strategies = root.join("strategy_pack").join("strategies");
    fs::create_dir_all(&strategies).unwrap();
    fs::write(root.join("strategy_pack").join("__init__.py"), "").unwrap();
    fs::write(strategies.join("__init__.py"), "").unwrap();
    fs::write(strategies.join(format!("{module}.py")), source).unwrap();
    fs::write(
        root.join("pyproject.toml"),
        manifest_for(
            module,
            &format!("strategy_pack.strategies.{module}:{class_name}"),
        ),
    )
    .unwrap();
}

/// An engine checkout with `configs/default.yaml`.
pub fn write_engine(root: &Path, config: &str) -> PathBuf {
    let configs = root.join("configs");
    fs::create_dir_all(&configs).unwrap();
    let path = configs.join("default.yaml");
    fs::write(&path, config).unwrap();
    path
}

pub fn backtest_args(engine_root: &Path) -> BacktestArgs {
    BacktestArgs {
        engine_root: engine_root.to_path_buf(),
        strategy: "strategies.momentum:MomentumStrategy".to_string(),
        source: "auto".to_string(),
        config: PathBuf::from("configs/default.yaml"),
        rows: None,
        python: "python3".to_string(),
        dry_run: false,
    }
}

pub fn test_args(path: &Path) -> TestArgs {
    TestArgs {
        path: path.to_path_buf(),
        python: "python3".to_string(),
        pytest_args: Vec::new(),
    }
}

/// `ExitCode` has no `PartialEq`; compare its debug rendering.
pub fn assert_exit(code: std::process::ExitCode, expected: u8) {
    assert_eq!(
        format!("{code:?}"),
        format!("{:?}", std::process::ExitCode::from(expected))
    );
}
