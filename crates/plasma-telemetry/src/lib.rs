//! # Plasma Telemetry
//!
//! Structured logging for the plasma subsystems.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plasma_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_subsystem("05", "aggregator");
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PC_SERVICE_NAME` | `plasma-chain` | Service name |
//! | `PC_SUBSYSTEM_ID` | `00` | Subsystem identifier |
//! | `PC_LOG_LEVEL` | `info` | Log level filter |
//! | `PC_JSON_LOGS` | `false` | JSON output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
