//! Configuration errors.
//!
//! Gameplay itself never fails: invalid actions are silent no-ops. Only loading
//! tuning and settings from disk/JSON can go wrong.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("'{name}' = {value} is outside {expected}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
}
