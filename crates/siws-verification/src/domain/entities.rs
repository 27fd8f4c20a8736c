//! # Domain Entities
//!
//! Core data structures for SIWS verification. All of them are plain values,
//! built and consumed within a single verification call.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as, Bytes};

// =============================================================================
// SS58 Types
// =============================================================================

/// An SS58 address after base58 decoding and checksum validation.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedAddress {
    /// Number of prefix bytes (1 or 2)
    pub prefix_length: u8,
    /// Network identifier (14 bits at most)
    pub network_id: u16,
    /// Payload between the prefix and the checksum
    #[serde_as(as = "Hex")]
    pub public_key: Vec<u8>,
    /// Whether the payload is a 32/33-byte public key (two checksum bytes)
    /// rather than a short account index (one checksum byte)
    pub is_public_key_form: bool,
}

impl DecodedAddress {
    /// The payload as a 32-byte public key, if it is one.
    pub fn public_key_array(&self) -> Option<[u8; 32]> {
        <[u8; 32]>::try_from(self.public_key.as_slice()).ok()
    }

    /// The payload as `0x`-prefixed lowercase hex.
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.public_key))
    }
}

// =============================================================================
// Message Types
// =============================================================================

/// Named fields of a SIWS message, used in error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageField {
    Domain,
    Account,
    Uri,
    Nonce,
    IssuedAt,
    ExpireAt,
}

impl MessageField {
    /// Field name as it appears in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageField::Domain => "domain",
            MessageField::Account => "account",
            MessageField::Uri => "uri",
            MessageField::Nonce => "nonce",
            MessageField::IssuedAt => "issuedAt",
            MessageField::ExpireAt => "expireAt",
        }
    }
}

impl fmt::Display for MessageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed and validated SIWS message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiwsMessage {
    /// Authority requesting the sign-in (e.g. `siws.xyz`)
    pub domain: String,
    /// Chain name from the header line (e.g. `Polkadot`)
    pub chain_name: String,
    /// SS58 address of the signing account
    pub address: String,
    /// Optional human-readable statement
    pub statement: Option<String>,
    /// RFC 3986 URI of the resource requesting the sign-in
    pub uri: String,
    /// Optional message version
    pub version: Option<String>,
    /// Server-issued nonce, opaque to this crate
    pub nonce: String,
    /// When the message was issued
    pub issued_at: DateTime<Utc>,
    /// When the message stops being valid
    pub expire_at: DateTime<Utc>,
}

impl fmt::Display for SiwsMessage {
    /// Renders the message in the grammar accepted by the parser.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} wants you to sign in with your {} account:",
            self.domain, self.chain_name
        )?;
        writeln!(f, "{}", self.address)?;
        writeln!(f)?;
        if let Some(statement) = &self.statement {
            writeln!(f, "{statement}")?;
            writeln!(f)?;
        }
        writeln!(f, "URI: {}", self.uri)?;
        if let Some(version) = &self.version {
            writeln!(f, "Version: {version}")?;
        }
        writeln!(f, "Nonce: {}", self.nonce)?;
        writeln!(
            f,
            "Issued At: {}",
            self.issued_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )?;
        write!(
            f,
            "Expiration Time: {}",
            self.expire_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

impl SiwsMessage {
    /// Render the message text a wallet is asked to sign.
    pub fn to_message_string(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// Signature Types
// =============================================================================

/// Raw sr25519 signature (64 bytes).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBytes {
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 64],
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Stages of the authentication pipeline, in order.
///
/// A failure at any stage terminates the pipeline with the stage's error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AuthStage {
    Received,
    Parsed,
    AddressDecoded,
    SignatureVerified,
    Authenticated,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthStage::Received => "received",
            AuthStage::Parsed => "parsed",
            AuthStage::AddressDecoded => "address_decoded",
            AuthStage::SignatureVerified => "signature_verified",
            AuthStage::Authenticated => "authenticated",
        };
        f.write_str(name)
    }
}

/// Result of a structurally valid login attempt.
///
/// `verified == false` means the signature was well formed but did not match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationOutcome {
    /// Whether the signature matched
    pub verified: bool,
    /// Last stage the pipeline reached
    pub stage: AuthStage,
    /// The parsed message, for session issuance
    pub message: SiwsMessage,
    /// The decoded claimed address
    pub address: DecodedAddress,
}
