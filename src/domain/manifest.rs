//! `pyproject.toml` checks for a strategy pack.

use crate::domain::layout::PackLayout;
use crate::domain::pack_validation::Diagnostic;
use crate::domain::templates::ENTRYPOINT_GROUP;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

pub const SDK_DEPENDENCY: &str = "trading-sdk";

#[derive(Debug, Default, Deserialize)]
pub struct PyProject {
    #[serde(default)]
    pub project: Project,
}

#[derive(Debug, Default, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub dependencies: Vec<toml::Value>,
    #[serde(default, rename = "entry-points")]
    pub entry_points: BTreeMap<String, BTreeMap<String, toml::Value>>,
}

impl PyProject {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn strategy_entrypoints(&self) -> Option<&BTreeMap<String, toml::Value>> {
        self.project.entry_points.get(ENTRYPOINT_GROUP)
    }
}

fn value_text(value: &toml::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Validate the manifest at `layout.manifest()`.
pub fn validate_manifest(layout: &PackLayout) -> Vec<Diagnostic> {
    let path = layout.manifest();
    if !path.exists() {
        return vec![Diagnostic::new(&path, "missing")];
    }

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => return vec![Diagnostic::new(&path, format!("unreadable: {e}"))],
    };
    let manifest = match PyProject::parse(&content) {
        Ok(m) => m,
        Err(e) => {
            return vec![Diagnostic::new(
                &path,
                format!("cannot parse: {}", e.message()),
            )];
        }
    };

    check_manifest(layout, &manifest)
}

pub fn check_manifest(layout: &PackLayout, manifest: &PyProject) -> Vec<Diagnostic> {
    let path = layout.manifest();
    let mut issues = Vec::new();

    let has_sdk = manifest
        .project
        .dependencies
        .iter()
        .any(|dep| value_text(dep).starts_with(SDK_DEPENDENCY));
    if !has_sdk {
        issues.push(Diagnostic::new(
            &path,
            format!("dependency '{SDK_DEPENDENCY}' is required"),
        ));
    }

    let group = match manifest.strategy_entrypoints() {
        Some(group) if !group.is_empty() => group,
        _ => {
            issues.push(Diagnostic::new(
                &path,
                format!("entrypoint group '{ENTRYPOINT_GROUP}' has no registrations"),
            ));
            return issues;
        }
    };

    for (name, target) in group {
        let target = value_text(target);
        let Some((module, _class)) = target
            .split_once(':')
            .filter(|(module, _)| !module.trim().is_empty())
        else {
            issues.push(Diagnostic::new(
                &path,
                format!("invalid entrypoint target for '{name}'"),
            ));
            continue;
        };

        let module_path = layout.module_path(module);
        if !module_path.exists() {
            issues.push(Diagnostic::new(
                &path,
                format!("entrypoint module not found '{}'", module_path.display()),
            ));
        }
        if !module.starts_with(&layout.package) {
            issues.push(Diagnostic::new(
                &path,
                format!(
                    "entrypoint '{name}' should be under package '{}'",
                    layout.package
                ),
            ));
        }
    }

    issues
}
