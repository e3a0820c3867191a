//! Filesystem layout of a strategy pack.

use crate::domain::naming::StrategyName;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "pyproject.toml";

#[derive(Debug, Clone)]
pub struct PackLayout {
    pub root: PathBuf,
    pub package: String,
}

impl PackLayout {
    pub fn new(root: impl Into<PathBuf>, package: &str) -> Self {
        Self {
            root: root.into(),
            package: package.to_string(),
        }
    }

    pub fn package_dir(&self) -> PathBuf {
        self.root.join(&self.package)
    }

    pub fn strategies_dir(&self) -> PathBuf {
        self.package_dir().join("strategies")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("tests")
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn strategy_file(&self, name: &StrategyName) -> PathBuf {
        self.strategies_dir().join(format!("{}.py", name.module_name))
    }

    pub fn test_file(&self, name: &StrategyName) -> PathBuf {
        self.tests_dir().join(format!("test_{}.py", name.module_name))
    }

    /// Path of the source file for a dotted module name, relative to the root.
    pub fn module_path(&self, module: &str) -> PathBuf {
        module_to_path(&self.root, module)
    }
}

pub fn module_to_path(root: &Path, module: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in module.split('.') {
        path.push(part);
    }
    path.set_extension("py");
    path
}
