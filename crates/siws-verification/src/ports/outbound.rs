//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits for what the authenticator needs from its environment.

use chrono::{DateTime, Utc};

/// Source of the verification instant used for expiry checks.
///
/// Production code uses [`SystemClock`](crate::SystemClock); tests pin time
/// with [`FixedClock`](crate::FixedClock).
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}
