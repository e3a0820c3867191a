//! Core domain types and logic.

pub mod naming;
pub mod templates;
pub mod layout;
pub mod scaffold;
pub mod python_source;
pub mod manifest;
pub mod pack_validation;
pub mod data_source;
pub mod strategy_ref;
pub mod backtest;
pub mod error;
