//! # SS58 Address Codec
//!
//! SS58 is the Substrate-specific human-readable format for public keys:
//!
//! > base58(concat(prefix, payload, checksum))
//!
//! - The prefix is 1 byte for network identifiers below 64 and 2 bytes for
//!   identifiers up to 16383. Bit 6 of the first byte selects the 2-byte form.
//! - The checksum is the leading bytes of `blake2b_512("SS58PRE" || prefix || payload)`.
//!   It is 2 bytes long for 32/33-byte public keys and 1 byte long for short
//!   account indices.
//!
//! The decoding rules mirror polkadot.js `decodeAddress`, so any address a
//! browser wallet displays decodes here to the same public key.
//!
//! ## Validation
//!
//! - Decoded length must be one of [`ALLOWED_DECODED_LENGTHS`]
//! - First byte must not have its high bit set and must not be 46 or 47
//!   (reserved prefixes)
//! - Checksum bytes must match

use blake2::{Blake2b512, Digest};

use super::entities::DecodedAddress;
use super::errors::{Ss58Error, ALLOWED_DECODED_LENGTHS};

/// Tag prepended to the hashed bytes when computing the checksum.
pub const SS58_CHECKSUM_TAG: &[u8] = b"SS58PRE";

/// Largest network identifier the 2-byte prefix can carry.
pub const MAX_NETWORK_ID: u16 = 0b0011_1111_1111_1111;

/// First-byte values reserved by the SS58 registry.
const RESERVED_PREFIXES: [u8; 2] = [46, 47];

/// Payload lengths `encode` accepts: account indices and 32/33-byte keys.
const ENCODABLE_PAYLOAD_LENGTHS: [usize; 6] = [1, 2, 4, 8, 32, 33];

// =============================================================================
// SS58 CODEC
// =============================================================================

/// SS58 address codec.
///
/// Stateless; construct once and share by reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ss58Codec;

impl Ss58Codec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }

    /// Decode an SS58 address, validating its checksum.
    pub fn decode(&self, address: &str) -> Result<DecodedAddress, Ss58Error> {
        decode(address)
    }

    /// Encode a payload under a network identifier.
    pub fn encode(&self, public_key: &[u8], network_id: u16) -> Result<String, Ss58Error> {
        encode(public_key, network_id)
    }

    /// Decode an address and return its payload as `0x`-prefixed hex.
    pub fn decode_hex(&self, address: &str) -> Result<String, Ss58Error> {
        decode(address).map(|decoded| decoded.public_key_hex())
    }

    /// Encode a `0x`-prefixed (or bare) hex public key under a network identifier.
    pub fn encode_hex(&self, public_key_hex: &str, network_id: u16) -> Result<String, Ss58Error> {
        let stripped = public_key_hex
            .strip_prefix("0x")
            .unwrap_or(public_key_hex);
        let public_key =
            hex::decode(stripped).map_err(|e| Ss58Error::InvalidEncoding(e.to_string()))?;
        encode(&public_key, network_id)
    }
}

// =============================================================================
// CORE CODEC FUNCTIONS
// =============================================================================

/// Decode an SS58 address into its network identifier and payload.
pub fn decode(address: &str) -> Result<DecodedAddress, Ss58Error> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| Ss58Error::InvalidEncoding(e.to_string()))?;

    if !ALLOWED_DECODED_LENGTHS.contains(&decoded.len()) {
        return Err(Ss58Error::InvalidLength {
            length: decoded.len(),
        });
    }

    let (prefix_length, network_id) = read_prefix(&decoded);

    // 32/33 bytes public key + 2 bytes checksum + prefix
    let is_public_key_form =
        decoded.len() == 34 + prefix_length || decoded.len() == 35 + prefix_length;
    let checksum_length = if is_public_key_form { 2 } else { 1 };
    let payload_end = decoded.len() - checksum_length;

    let hash = ss58_hash(&decoded[..payload_end]);
    let valid = decoded[0] & 0b1000_0000 == 0
        && !RESERVED_PREFIXES.contains(&decoded[0])
        && decoded[payload_end..] == hash[..checksum_length];

    if !valid {
        return Err(Ss58Error::InvalidChecksum);
    }

    Ok(DecodedAddress {
        prefix_length: prefix_length as u8,
        network_id,
        public_key: decoded[prefix_length..payload_end].to_vec(),
        is_public_key_form,
    })
}

/// Encode a payload as an SS58 address under `network_id`.
///
/// Rejects identifiers that decoding would refuse (reserved or wider than
/// 14 bits) and payloads that are neither account indices (1, 2, 4 or 8
/// bytes) nor 32/33-byte keys.
pub fn encode(public_key: &[u8], network_id: u16) -> Result<String, Ss58Error> {
    let reserved = RESERVED_PREFIXES
        .iter()
        .any(|&prefix| u16::from(prefix) == network_id);
    if network_id > MAX_NETWORK_ID || reserved {
        return Err(Ss58Error::InvalidPrefix(network_id));
    }

    let mut data = Vec::with_capacity(public_key.len() + 4);
    write_prefix(&mut data, network_id);
    data.extend_from_slice(public_key);

    let checksum_length = match public_key.len() {
        32 | 33 => 2,
        _ => 1,
    };
    let total = data.len() + checksum_length;
    if !ENCODABLE_PAYLOAD_LENGTHS.contains(&public_key.len())
        || !ALLOWED_DECODED_LENGTHS.contains(&total)
    {
        return Err(Ss58Error::InvalidLength { length: total });
    }

    let hash = ss58_hash(&data);
    data.extend_from_slice(&hash[..checksum_length]);

    Ok(bs58::encode(data).into_string())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Blake2b-512 over `"SS58PRE" || data`.
pub fn ss58_hash(data: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_CHECKSUM_TAG);
    hasher.update(data);
    let mut hash = [0u8; 64];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// Read the prefix length and network identifier from a decoded address.
///
/// Callers guarantee at least 3 bytes.
fn read_prefix(decoded: &[u8]) -> (usize, u16) {
    let first = u16::from(decoded[0]);
    if decoded[0] & 0b0100_0000 == 0 {
        return (1, first);
    }

    let second = u16::from(decoded[1]);
    let network_id = ((first & 0b0011_1111) << 2) | (second >> 6) | ((second & 0b0011_1111) << 8);
    (2, network_id)
}

/// Append the 1 or 2 byte prefix for `network_id`.
fn write_prefix(out: &mut Vec<u8>, network_id: u16) {
    if network_id < 64 {
        out.push(network_id as u8);
    } else {
        out.push((((network_id & 0b0000_0000_1111_1100) >> 2) as u8) | 0b0100_0000);
        out.push(((network_id >> 8) as u8) | (((network_id & 0b0000_0000_0000_0011) << 6) as u8));
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
