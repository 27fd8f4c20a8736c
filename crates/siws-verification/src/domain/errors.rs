//! # Verification Errors
//!
//! Error types for address decoding, message parsing and signature
//! verification.
//!
//! Structural problems with the input are errors. A well-formed signature
//! that simply does not match is not an error; it is reported as
//! `Ok(false)` by the verifier.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::entities::MessageField;

/// Decoded byte lengths accepted by the SS58 codec.
pub const ALLOWED_DECODED_LENGTHS: [usize; 8] = [3, 4, 6, 10, 35, 36, 37, 38];

/// Errors produced by the SS58 address codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Ss58Error {
    /// The address is not valid base58
    #[error("Invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded address has a length no SS58 form can produce
    #[error("Invalid decoded address length {length}, allowed decoded lengths {ALLOWED_DECODED_LENGTHS:?}")]
    InvalidLength { length: usize },

    /// Checksum mismatch, reserved prefix byte, or high bit set on the prefix
    #[error("Invalid address checksum")]
    InvalidChecksum,

    /// Network identifier cannot be encoded (reserved, or wider than 14 bits)
    #[error("Invalid network prefix: {0}")]
    InvalidPrefix(u16),
}

/// Errors that can occur while authenticating a SIWS login.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SiwsError {
    /// A mandatory message field is absent
    #[error("Missing field `{0}`")]
    MissingField(MessageField),

    /// A timestamp field is not RFC 3339
    #[error("Malformed timestamp in `{field}`: {reason}")]
    MalformedTimestamp { field: MessageField, reason: String },

    /// The message's expiration time is not after the verification instant
    #[error("The message has expired at: {expired_at}")]
    MessageExpired { expired_at: DateTime<Utc> },

    /// The domain is not a bare URL authority
    #[error("Invalid format for field `domain`: {0}")]
    InvalidDomain(String),

    /// The domain is well formed but not the one this service expects
    #[error("Domain mismatch: expected {expected}, got {actual}")]
    DomainMismatch { expected: String, actual: String },

    /// The URI does not conform to RFC 3986
    #[error("Failed to parse URI `{uri}` according to RFC3986: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The account address could not be decoded
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] Ss58Error),

    /// The message was signed for a different account than the one claimed
    #[error("Address mismatch: message address {message_address}, claimed {claimed_address}")]
    AddressMismatch {
        message_address: String,
        claimed_address: String,
    },

    /// The signature is not `0x` followed by 64 hex-encoded bytes, or not an sr25519 signature
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(String),

    /// The public key bytes are not a valid sr25519 public key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The signature library failed for a reason other than a mismatch
    #[error("Signature verification failed: {0}")]
    VerificationFailed(String),

    /// The raw message exceeds the configured size cap
    #[error("Message too large: {size} > {max} bytes")]
    MessageTooLarge { size: usize, max: usize },

    /// A configuration value was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SiwsError {
    /// Whether the error was caused by the client's input (as opposed to a
    /// library failure). Callers map these to a client-error response.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            SiwsError::VerificationFailed(_) | SiwsError::InvalidConfig(_)
        )
    }
}
