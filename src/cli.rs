//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::adapters::logging::{init_logging, level_for};
use crate::adapters::subprocess_adapter::SubprocessRunner;
use crate::adapters::yaml_config_adapter::YamlConfigAdapter;
use crate::domain::backtest::{
    BacktestPlan, DEFAULT_CONFIG, check_config_file, check_engine_root, resolve_config_path,
    resolve_rows,
};
use crate::domain::data_source::DataSource;
use crate::domain::error::StrategyCliError;
use crate::domain::layout::PackLayout;
use crate::domain::pack_validation::validate_pack;
use crate::domain::scaffold::{ScaffoldRequest, scaffold};
use crate::domain::strategy_ref::StrategyRef;
use crate::domain::templates::DEFAULT_PACKAGE;
use crate::ports::process_port::{ProcessPort, ProcessSpec};

pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Parser, Debug)]
#[command(name = "strategy", about = "Strategy Pack development CLI", version)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create strategy and test templates
    New(NewArgs),
    /// Validate strategy-pack constraints
    Validate(ValidateArgs),
    /// Run strategy-pack tests
    Test(TestArgs),
    /// Run the engine backtest command
    Backtest(BacktestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Strategy name (snake case or free text)
    pub name: String,
    /// Strategy-pack root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
    /// Python package name
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    pub package: String,
    /// Class name (default: derived from the strategy name)
    #[arg(long)]
    pub class_name: Option<String>,
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Strategy-pack root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
    /// Python package name
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    pub package: String,
}

#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Strategy-pack root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
    /// Python interpreter used to run pytest
    #[arg(long, env = "STRATEGY_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,
    /// Arguments forwarded to pytest
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub pytest_args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct BacktestArgs {
    /// Trading engine repository root
    #[arg(long)]
    pub engine_root: PathBuf,
    /// Strategy reference as module:Class
    #[arg(long)]
    pub strategy: String,
    /// Data source: auto, local_csv, local_parquet, http_csv or synthetic
    #[arg(long, default_value = "auto")]
    pub source: String,
    /// Engine config path (relative paths resolve against the engine root)
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
    /// Number of bars (default: backtest.rows from the config, else 500)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: Option<u32>,
    /// Python interpreter used to run the engine
    #[arg(long, env = "STRATEGY_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,
    /// Check everything and print the engine command without running it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(level_for(cli.verbose, cli.quiet));
    dispatch(cli.command, &SubprocessRunner)
}

pub fn dispatch(command: Command, runner: &dyn ProcessPort) -> ExitCode {
    match command {
        Command::New(args) => run_new(&args),
        Command::Validate(args) => run_validate(&args),
        Command::Test(args) => run_test(&args, runner),
        Command::Backtest(args) => run_backtest(&args, runner),
    }
}

fn fail(err: StrategyCliError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

fn run_new(args: &NewArgs) -> ExitCode {
    let layout = PackLayout::new(&args.path, &args.package);
    let request = ScaffoldRequest {
        name: args.name.clone(),
        class_name: args.class_name.clone(),
        force: args.force,
    };
    if args.force {
        warn!("--force: existing strategy and test files will be overwritten");
    }

    let output = match scaffold(&layout, &request) {
        Ok(o) => o,
        Err(e) => return fail(e),
    };
    info!(
        module = %output.name.module_name,
        class = %output.name.class_name,
        "scaffolded strategy"
    );

    println!("created strategy: {}", output.strategy_file.display());
    println!("created test: {}", output.test_file.display());
    println!(
        "next: add entrypoint in {}:\n{}",
        layout.manifest().display(),
        output.entrypoint_hint
    );
    ExitCode::SUCCESS
}

fn run_validate(args: &ValidateArgs) -> ExitCode {
    let layout = PackLayout::new(&args.path, &args.package);
    info!(root = %layout.root.display(), package = %layout.package, "validating strategy pack");

    let report = match validate_pack(&layout) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };
    debug!(files = report.files_checked, issues = report.issues.len(), "validation finished");

    if report.passed() {
        println!("validation passed");
        ExitCode::SUCCESS
    } else {
        println!("validation failed:");
        for issue in &report.issues {
            println!("- {issue}");
        }
        ExitCode::from(1)
    }
}

/// `<python> -m pytest <args…>` in the pack root.
pub fn test_command(args: &TestArgs) -> Result<ProcessSpec, StrategyCliError> {
    if !args.path.is_dir() {
        return Err(StrategyCliError::not_found("strategy-pack root", &args.path));
    }
    let mut cmd_args = vec!["-m".to_string(), "pytest".to_string()];
    cmd_args.extend(args.pytest_args.iter().cloned());
    Ok(ProcessSpec {
        program: args.python.clone(),
        args: cmd_args,
        working_dir: args.path.clone(),
    })
}

fn run_test(args: &TestArgs, runner: &dyn ProcessPort) -> ExitCode {
    let spec = match test_command(args) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    info!(command = %spec, cwd = %spec.working_dir.display(), "running tests");

    match runner.run(&spec) {
        Ok(outcome) => {
            if !outcome.success() {
                warn!(?outcome, "tests failed");
            }
            outcome.into()
        }
        Err(e) => fail(e),
    }
}

/// Check every backtest input and work out what to hand the engine.
pub fn plan_backtest(args: &BacktestArgs) -> Result<BacktestPlan, StrategyCliError> {
    // Stage 1: selector and strategy reference
    let source: DataSource = args.source.parse()?;
    let strategy: StrategyRef = args.strategy.parse()?;

    // Stage 2: engine root and config file
    check_engine_root(&args.engine_root)?;
    let config_path = resolve_config_path(&args.engine_root, &args.config);
    check_config_file(&config_path)?;

    // Stage 3: load config
    info!(config = %config_path.display(), "loading config");
    let config_file = config_path.display().to_string();
    let config = YamlConfigAdapter::from_file(&config_path).map_err(|e| {
        StrategyCliError::ConfigParse {
            file: config_file.clone(),
            reason: e.to_string(),
        }
    })?;
    debug!(sections = ?config.sections(), "config loaded");

    // Stage 4: rows
    let rows = resolve_rows(args.rows, &config, &config_file)?;

    Ok(BacktestPlan {
        engine_root: args.engine_root.clone(),
        strategy,
        source,
        config: args.config.clone(),
        rows,
    })
}

fn run_backtest(args: &BacktestArgs, runner: &dyn ProcessPort) -> ExitCode {
    let plan = match plan_backtest(args) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };
    let spec = plan.runner_command(&args.python);

    if args.dry_run {
        println!("engine root: {}", plan.engine_root.display());
        println!("strategy module: {}", plan.strategy.module);
        println!("strategy class: {}", plan.strategy.class);
        println!("source: {}", plan.source);
        println!("config: {}", plan.config.display());
        println!("rows: {}", plan.rows);
        println!("command: {spec}");
        return ExitCode::SUCCESS;
    }

    info!(
        engine_root = %plan.engine_root.display(),
        strategy = %plan.strategy,
        source = %plan.source,
        rows = plan.rows,
        "launching engine backtest"
    );
    match runner.run(&spec) {
        Ok(outcome) => {
            if !outcome.success() {
                warn!(?outcome, "engine backtest failed");
            }
            outcome.into()
        }
        Err(e) => fail(e),
    }
}
