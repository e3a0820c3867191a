//! Market-data source selector forwarded to the engine's backtest runner.

use crate::domain::error::StrategyCliError;
use std::fmt;
use std::str::FromStr;

/// Where the engine reads bars from. `Auto` is resolved by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataSource {
    #[default]
    Auto,
    LocalCsv,
    LocalParquet,
    HttpCsv,
    Synthetic,
}

impl DataSource {
    pub const ALL: [DataSource; 5] = [
        DataSource::Auto,
        DataSource::LocalCsv,
        DataSource::LocalParquet,
        DataSource::HttpCsv,
        DataSource::Synthetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Auto => "auto",
            DataSource::LocalCsv => "local_csv",
            DataSource::LocalParquet => "local_parquet",
            DataSource::HttpCsv => "http_csv",
            DataSource::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = StrategyCliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| StrategyCliError::InvalidSource {
                value: s.to_string(),
            })
    }
}
