//! # SIWS Verification
//!
//! Verifies "Sign-In With Substrate" logins: a wallet extension signs a
//! human-readable message with an sr25519 key, and this crate checks that the
//! holder of the claimed SS58 address produced that signature.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): SS58 codec, message grammar, signature
//!   transcript. Pure computation, no I/O
//! - **Ports Layer** (`ports/`): Inbound authentication API, outbound clock
//! - **Adapters Layer** (`adapters/`): System and fixed clocks
//! - **Service Layer** (`service.rs`): `SiwsAuthenticator`, which runs the
//!   parse → address match → decode → verify pipeline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use siws_verification::{SiwsAuthenticationApi, SiwsAuthenticator, SiwsConfig};
//!
//! let authenticator = SiwsAuthenticator::new(SiwsConfig::from_env());
//! let outcome = authenticator.authenticate(&message, &address, &signature_hex)?;
//! if outcome.verified {
//!     // hand outcome.address / outcome.message to session issuance
//! }
//! ```
//!
//! ## Error Semantics
//!
//! - A malformed input (bad address, bad grammar, bad hex) is an `Err`
//! - A well-formed signature that does not match is `Ok(false)`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::clock::{FixedClock, SystemClock};
pub use domain::config::{SiwsConfig, SiwsConfigBuilder};
pub use domain::entities::{
    AuthStage, AuthenticationOutcome, DecodedAddress, MessageField, SignatureBytes, SiwsMessage,
};
pub use domain::errors::{SiwsError, Ss58Error};
pub use domain::message::MessageParser;
pub use domain::signature::{wrap_message, SignatureVerifier, SUBSTRATE_SIGNING_CONTEXT};
pub use domain::ss58::Ss58Codec;
pub use ports::inbound::SiwsAuthenticationApi;
pub use ports::outbound::Clock;
pub use service::SiwsAuthenticator;
