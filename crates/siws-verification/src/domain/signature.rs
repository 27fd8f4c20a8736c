//! # sr25519 Signature Verification
//!
//! Browser wallets (polkadot.js `signRaw`) never sign the message text
//! directly. They wrap it as `<Bytes>{message}</Bytes>` and sign the wrapped
//! bytes under the `substrate` signing context. Verification rebuilds the
//! same transcript.
//!
//! A signature that is well formed but does not match is `Ok(false)`.
//! Malformed hex, keys or signature encodings are errors.

use schnorrkel::{signing_context, PublicKey, Signature, SignatureError};

use super::entities::SignatureBytes;
use super::errors::SiwsError;

/// Signing context used by polkadot.js.
pub const SUBSTRATE_SIGNING_CONTEXT: &str = "substrate";

const WRAP_OPEN: &str = "<Bytes>";
const WRAP_CLOSE: &str = "</Bytes>";

/// Wrap `message` the way wallet extensions do before signing.
pub fn wrap_message(message: &str) -> String {
    format!("{WRAP_OPEN}{message}{WRAP_CLOSE}")
}

/// Decode a `0x`-prefixed 128-character hex signature.
pub fn parse_signature_hex(signature_hex: &str) -> Result<SignatureBytes, SiwsError> {
    let digits = signature_hex.strip_prefix("0x").ok_or_else(|| {
        SiwsError::InvalidSignatureFormat("signature must start with '0x'".to_string())
    })?;

    let decoded = hex::decode(digits)
        .map_err(|e| SiwsError::InvalidSignatureFormat(format!("invalid hex: {e}")))?;

    let bytes = <[u8; 64]>::try_from(decoded.as_slice()).map_err(|_| {
        SiwsError::InvalidSignatureFormat(format!(
            "expected 64 signature bytes, got {}",
            decoded.len()
        ))
    })?;

    Ok(SignatureBytes { bytes })
}

/// Verifies wallet signatures over SIWS messages.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    signing_context: Vec<u8>,
}

impl Default for SignatureVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier {
    /// Verifier using the `substrate` signing context.
    pub fn new() -> Self {
        Self::with_context(SUBSTRATE_SIGNING_CONTEXT)
    }

    /// Verifier using a custom signing context.
    pub fn with_context(context: impl AsRef<[u8]>) -> Self {
        Self {
            signing_context: context.as_ref().to_vec(),
        }
    }

    /// Verify `signature_hex` over the wrapped `message` for `public_key`.
    ///
    /// The signature format is checked before any curve arithmetic.
    pub fn verify(
        &self,
        message: &str,
        public_key: &[u8],
        signature_hex: &str,
    ) -> Result<bool, SiwsError> {
        let signature_bytes = parse_signature_hex(signature_hex)?;

        let public_key = PublicKey::from_bytes(public_key)
            .map_err(|e| SiwsError::InvalidPublicKey(e.to_string()))?;

        let signature = Signature::from_bytes(&signature_bytes.bytes)
            .map_err(|e| SiwsError::InvalidSignatureFormat(e.to_string()))?;

        let wrapped = wrap_message(message);
        let transcript = signing_context(&self.signing_context).bytes(wrapped.as_bytes());

        match public_key.verify(transcript, &signature) {
            Ok(()) => Ok(true),
            Err(SignatureError::EquationFalse) => Ok(false),
            Err(e) => Err(SiwsError::VerificationFailed(e.to_string())),
        }
    }
}

/// Verify with the `substrate` signing context.
pub fn verify(message: &str, public_key: &[u8], signature_hex: &str) -> Result<bool, SiwsError> {
    SignatureVerifier::new().verify(message, public_key, signature_hex)
}
