//! Application configuration.
//!
//! Loaded from an optional TOML file; the CLI may override individual values.
//!
//! ```toml
//! log_level = "info"
//! latency_ms = 250
//!
//! [unknown_type]
//! policy = "fallback"
//! fallback = "CARD"
//!
//! [fees.bank]
//! kind = "fixed"
//! amount = 300
//! ```

use crate::domain::fee::{FeePolicy, FeeRule};
use crate::domain::payment::{PaymentType, UnknownTypePolicy};
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Log levels accepted by the configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(PaymentError::ConfigError(format!(
                "Invalid log level: {s}. Must be one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Per-type overrides of the standard fee table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeeOverrides {
    pub card: Option<FeeRule>,
    pub bank: Option<FeeRule>,
    pub cash: Option<FeeRule>,
    pub gift: Option<FeeRule>,
}

impl FeeOverrides {
    /// Builds the fee policy: the standard table with every override applied.
    pub fn to_policy(&self) -> Result<FeePolicy> {
        let mut policy = FeePolicy::standard();
        for (payment_type, rule) in [
            (PaymentType::Card, self.card),
            (PaymentType::Bank, self.bank),
            (PaymentType::Cash, self.cash),
            (PaymentType::Gift, self.gift),
        ] {
            if let Some(rule) = rule {
                policy = policy.with_strategy(payment_type, rule.validated()?);
            }
        }
        Ok(policy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub unknown_type: UnknownTypePolicy,
    pub fees: FeeOverrides,
    /// Simulated record store latency in milliseconds.
    pub latency_ms: Option<u64>,
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PaymentError::ConfigError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            PaymentError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    pub fn latency(&self) -> Option<Duration> {
        self.latency_ms.map(Duration::from_millis)
    }

    pub fn fee_policy(&self) -> Result<FeePolicy> {
        self.fees.to_policy()
    }
}
