//! `module:Class` references naming a strategy class for the engine to load.

use crate::domain::error::StrategyCliError;
use crate::domain::naming::is_identifier;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRef {
    pub module: String,
    pub class: String,
}

impl fmt::Display for StrategyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.class)
    }
}

impl FromStr for StrategyRef {
    type Err = StrategyCliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StrategyCliError::InvalidStrategyRef {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (module, class) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected module:Class"))?;
        if module.is_empty() || !module.split('.').all(is_identifier) {
            return Err(invalid("module must be a dotted Python module path"));
        }
        if !is_identifier(class) {
            return Err(invalid("class must be a Python identifier"));
        }

        Ok(Self {
            module: module.to_string(),
            class: class.to_string(),
        })
    }
}
