//! Verification configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use siws_verification::SiwsConfigBuilder;
//!
//! let config = SiwsConfigBuilder::new()
//!     .expected_domain("siws.xyz")
//!     .max_message_bytes(4096)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use super::errors::SiwsError;
use super::signature::SUBSTRATE_SIGNING_CONTEXT;

/// SIWS verification configuration.
///
/// The defaults reproduce what polkadot.js wallets sign: the `substrate`
/// signing context, no size cap and no domain pinning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiwsConfig {
    /// sr25519 signing context label
    pub signing_context: String,
    /// Reject raw messages longer than this many bytes
    pub max_message_bytes: Option<usize>,
    /// Only accept messages whose domain equals this value
    pub expected_domain: Option<String>,
}

impl Default for SiwsConfig {
    fn default() -> Self {
        Self {
            signing_context: SUBSTRATE_SIGNING_CONTEXT.to_string(),
            max_message_bytes: None,
            expected_domain: None,
        }
    }
}

impl SiwsConfig {
    /// Create a new configuration with validation
    pub fn new(
        signing_context: impl Into<String>,
        max_message_bytes: Option<usize>,
        expected_domain: Option<String>,
    ) -> Result<Self, SiwsError> {
        let config = Self {
            signing_context: signing_context.into(),
            max_message_bytes,
            expected_domain,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIWS_SIGNING_CONTEXT`: sr25519 signing context (default: substrate)
    /// - `SIWS_MAX_MESSAGE_BYTES`: message size cap (default: unlimited)
    /// - `SIWS_EXPECTED_DOMAIN`: required message domain (default: any)
    ///
    /// Unparseable or empty values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            signing_context: env::var("SIWS_SIGNING_CONTEXT")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| SUBSTRATE_SIGNING_CONTEXT.to_string()),

            max_message_bytes: env::var("SIWS_MAX_MESSAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&max: &usize| max > 0),

            expected_domain: env::var("SIWS_EXPECTED_DOMAIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), SiwsError> {
        if self.signing_context.is_empty() {
            return Err(SiwsError::InvalidConfig(
                "signing context must not be empty".to_string(),
            ));
        }

        if self.max_message_bytes == Some(0) {
            return Err(SiwsError::InvalidConfig(
                "max_message_bytes must be greater than zero".to_string(),
            ));
        }

        if let Some(domain) = &self.expected_domain {
            if domain.trim().is_empty() {
                return Err(SiwsError::InvalidConfig(
                    "expected_domain must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for SiwsConfig with fluent API
#[derive(Clone, Debug, Default)]
pub struct SiwsConfigBuilder {
    config: SiwsConfig,
}

impl SiwsConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sr25519 signing context
    pub fn signing_context(mut self, context: impl Into<String>) -> Self {
        self.config.signing_context = context.into();
        self
    }

    /// Cap the raw message size
    pub fn max_message_bytes(mut self, max: usize) -> Self {
        self.config.max_message_bytes = Some(max);
        self
    }

    /// Require a specific message domain
    pub fn expected_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.expected_domain = Some(domain.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SiwsConfig, SiwsError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
