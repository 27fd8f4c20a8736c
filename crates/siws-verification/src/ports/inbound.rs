//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of SIWS verification.

use crate::domain::entities::{AuthenticationOutcome, DecodedAddress, SiwsMessage};
use crate::domain::errors::SiwsError;

/// Primary SIWS Authentication API.
///
/// Every operation is a pure computation over its arguments, so
/// implementations must be thread-safe (`Send + Sync`) and may be shared
/// across request handlers.
pub trait SiwsAuthenticationApi: Send + Sync {
    /// Run the full login pipeline: parse, match and decode the address,
    /// then verify the signature over the raw message text.
    ///
    /// # Errors
    /// Structural problems with any input. A signature that simply does not
    /// match is reported through `AuthenticationOutcome::verified == false`.
    fn authenticate(
        &self,
        raw_message: &str,
        claimed_address: &str,
        signature_hex: &str,
    ) -> Result<AuthenticationOutcome, SiwsError>;

    /// Same pipeline as [`authenticate`](Self::authenticate), reduced to
    /// the verified flag.
    fn verify_login(
        &self,
        raw_message: &str,
        claimed_address: &str,
        signature_hex: &str,
    ) -> Result<bool, SiwsError>;

    /// Parse and validate a SIWS message at the current instant.
    fn parse_message(&self, raw_message: &str) -> Result<SiwsMessage, SiwsError>;

    /// Decode an SS58 address.
    fn decode_address(&self, address: &str) -> Result<DecodedAddress, SiwsError>;

    /// Verify a wallet signature over `message` for a raw public key.
    fn verify_signature(
        &self,
        message: &str,
        public_key: &[u8],
        signature_hex: &str,
    ) -> Result<bool, SiwsError>;
}
