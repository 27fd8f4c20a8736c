//! # SIWS Telemetry
//!
//! Structured logging for services that embed SIWS verification.
//!
//! The verification crate only emits `tracing` events. This crate installs
//! the subscriber that formats them: pretty output for development, JSON
//! lines for log shippers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use siws_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//!     // Authentication events are now written to stdout
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SIWS_SERVICE_NAME` | `siws-auth` | Service name stamped on events |
//! | `SIWS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SIWS_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `SIWS_CONSOLE_OUTPUT` | `true` | Write events to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Log an authentication event with the component and service fields.
///
/// # Example
///
/// ```rust,ignore
/// use siws_telemetry::log_auth_event;
///
/// log_auth_event!(info, "login-route", "Session issued", address = %address);
/// ```
#[macro_export]
macro_rules! log_auth_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}
