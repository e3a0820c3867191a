//! Strategy-pack conformance checks run by `strategy validate`.
//!
//! Every Python file under the package directory is scanned for forbidden
//! imports and for `BaseStrategy` subclasses missing `next_signal`; the
//! manifest checks live in [`crate::domain::manifest`].

use crate::domain::error::StrategyCliError;
use crate::domain::layout::PackLayout;
use crate::domain::manifest::validate_manifest;
use crate::domain::naming::check_package;
use crate::domain::python_source::{self, ImportKind, PythonModule};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Exchange client library strategies must not talk to directly.
pub const FORBIDDEN_MODULE: &str = "ccxt";
/// Engine internals strategies must not import.
pub const ENGINE_MODULE: &str = "core";
pub const STRATEGY_BASE: &str = "BaseStrategy";
pub const SIGNAL_METHOD: &str = "next_signal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(file: &Path, message: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(file: &Path, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file.display(), line, self.message),
            None => write!(f, "{}: {}", self.file.display(), self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub files_checked: usize,
    pub issues: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn validate_pack(layout: &PackLayout) -> Result<ValidationReport, StrategyCliError> {
    if !layout.root.exists() {
        return Err(StrategyCliError::not_found("strategy-pack root", &layout.root));
    }
    check_package(&layout.package).map_err(|source| StrategyCliError::InvalidName {
        name: layout.package.clone(),
        source,
    })?;
    let package_dir = layout.package_dir();
    if !package_dir.is_dir() {
        return Err(StrategyCliError::not_found("package directory", &package_dir));
    }

    let mut report = ValidationReport::default();
    for path in python_files(&package_dir)? {
        let source = fs::read_to_string(&path)?;
        let module = python_source::scan(&source);
        report.issues.extend(import_violations(&path, &module));
        report.issues.extend(strategy_class_issues(&path, &module));
        report.files_checked += 1;
    }
    report.issues.extend(validate_manifest(layout));

    Ok(report)
}

fn is_module_or_child(module: &str, root: &str) -> bool {
    module == root
        || module
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('.'))
}

pub fn import_violations(path: &Path, module: &PythonModule) -> Vec<Diagnostic> {
    let mut issues = Vec::new();
    for import in &module.imports {
        let name = &import.module;
        match import.kind {
            ImportKind::Import => {
                if is_module_or_child(name, FORBIDDEN_MODULE) {
                    issues.push(Diagnostic::at_line(
                        path,
                        import.line,
                        format!("forbidden import '{name}'"),
                    ));
                }
                // `import core_utils` is rejected too: any module named core*
                if name.starts_with(ENGINE_MODULE) {
                    issues.push(Diagnostic::at_line(
                        path,
                        import.line,
                        format!("engine dependency import '{name}'"),
                    ));
                }
            }
            ImportKind::From => {
                if is_module_or_child(name, FORBIDDEN_MODULE) {
                    issues.push(Diagnostic::at_line(
                        path,
                        import.line,
                        format!("forbidden import from '{name}'"),
                    ));
                }
                if is_module_or_child(name, ENGINE_MODULE) {
                    issues.push(Diagnostic::at_line(
                        path,
                        import.line,
                        format!("engine dependency import from '{name}'"),
                    ));
                }
            }
        }
    }
    issues
}

pub fn strategy_class_issues(path: &Path, module: &PythonModule) -> Vec<Diagnostic> {
    module
        .classes
        .iter()
        .filter(|class| class.has_base(STRATEGY_BASE) && !class.has_method(SIGNAL_METHOD))
        .map(|class| {
            Diagnostic::at_line(
                path,
                class.line,
                format!("{} must define {SIGNAL_METHOD}", class.name),
            )
        })
        .collect()
}

/// All `*.py` files below `dir`, sorted. Symlinked directories are not
/// descended into; symlinked files are read.
fn python_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "py") && path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::python_source::scan;

    fn messages(issues: &[Diagnostic]) -> Vec<String> {
        issues.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn flags_ccxt_imports() {
        let module = scan("import ccxt\nimport ccxt.pro\nfrom ccxt.base import errors\n");
        assert_eq!(
            messages(&import_violations(Path::new("bad.py"), &module)),
            vec![
                "forbidden import 'ccxt'",
                "forbidden import 'ccxt.pro'",
                "forbidden import from 'ccxt.base'",
            ]
        );
    }

    #[test]
    fn flags_engine_imports() {
        let module = scan("import core.engine\nfrom core import broker\n");
        assert_eq!(
            messages(&import_violations(Path::new("bad.py"), &module)),
            vec![
                "engine dependency import 'core.engine'",
                "engine dependency import from 'core'",
            ]
        );
    }

    #[test]
    fn lookalike_modules_are_allowed_in_from_imports() {
        let module = scan("from ccxtools import x\nfrom core_utils import y\nimport ccxtools\n");
        assert!(import_violations(Path::new("ok.py"), &module).is_empty());
    }

    #[test]
    fn sdk_imports_are_allowed() {
        let module = scan("from trading_sdk.base_strategy import BaseStrategy\nimport pandas as pd\n");
        assert!(import_violations(Path::new("ok.py"), &module).is_empty());
    }

    #[test]
    fn strategy_without_next_signal() {
        let module = scan(
            "class BadStrategy(BaseStrategy):\n    def setup(self, config):\n        pass\n\nclass Helper:\n    pass\n",
        );
        let issues = strategy_class_issues(Path::new("bad.py"), &module);
        assert_eq!(messages(&issues), vec!["BadStrategy must define next_signal"]);
        assert_eq!(issues[0].to_string(), "bad.py:1: BadStrategy must define next_signal");
    }

    fn pack(files: &[(&str, &str)]) -> (tempfile::TempDir, PackLayout) {
        let dir = tempfile::TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        fs::create_dir_all(layout.strategies_dir()).unwrap();
        for (name, source) in files {
            fs::write(layout.strategies_dir().join(name), source).unwrap();
        }
        (dir, layout)
    }

    #[test]
    fn import_behind_try_is_flagged() {
        let (_dir, layout) = pack(&[("feed.py", "try: import ccxt\nexcept ImportError: pass\n")]);
        let report = validate_pack(&layout).unwrap();
        assert!(!report.passed());
        assert!(messages(&report.issues).contains(&"forbidden import 'ccxt'".to_string()));
    }

    #[test]
    fn package_must_be_identifier() {
        let (dir, _layout) = pack(&[]);
        let layout = PackLayout::new(dir.path(), "../strategy_pack");
        assert!(matches!(
            validate_pack(&layout),
            Err(StrategyCliError::InvalidName { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_not_followed() {
        let (_dir, layout) = pack(&[("ok.py", "import os\n")]);
        std::os::unix::fs::symlink("..", layout.strategies_dir().join("up_a")).unwrap();
        std::os::unix::fs::symlink("..", layout.strategies_dir().join("up_b")).unwrap();

        let report = validate_pack(&layout).unwrap();
        assert_eq!(report.files_checked, 1);
    }

    #[test]
    fn diagnostic_display_without_line() {
        let d = Diagnostic::new(Path::new("pyproject.toml"), "missing");
        assert_eq!(d.to_string(), "pyproject.toml: missing");
    }
}
