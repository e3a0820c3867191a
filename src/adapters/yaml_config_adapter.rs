//! YAML file configuration adapter for engine configs.

use crate::ports::config_port::ConfigPort;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum YamlConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("top level must be a mapping")]
    NotAMapping,
}

pub struct YamlConfigAdapter {
    root: Value,
}

impl YamlConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, YamlConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_string(&content)
    }

    /// An empty document is an empty config.
    pub fn from_string(content: &str) -> Result<Self, YamlConfigError> {
        let root: Value = serde_yaml::from_str(content)?;
        match root {
            Value::Mapping(_) => Ok(Self { root }),
            Value::Null => Ok(Self {
                root: Value::Mapping(Default::default()),
            }),
            _ => Err(YamlConfigError::NotAMapping),
        }
    }

    /// Top-level keys, in document order.
    pub fn sections(&self) -> Vec<String> {
        match &self.root {
            Value::Mapping(map) => map
                .keys()
                .filter_map(|k| k.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&Value> {
        self.root.get(section)?.get(key)
    }
}

impl ConfigPort for YamlConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match self.lookup(section, key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => serde_yaml::to_string(other)
                .ok()
                .map(|s| s.trim().to_string()),
        }
    }
}
