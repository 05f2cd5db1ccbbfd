//! # RC Telemetry
//!
//! Logging bootstrap for header-sync hosts, relayers and tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RC_SERVICE_NAME` | `rc-header-sync` | Service name in logs |
//! | `RC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `RC_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `RC_JSON_LOGS` | `false` (`true` in containers) | JSON formatted events |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{init_logging, init_test_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Log level directive did not parse.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// Subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}
