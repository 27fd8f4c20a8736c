//! Fuzz target for SS58 address decoding.
//!
//! ## Running
//!
//! ```bash
//! cd crates/siws-verification
//! cargo +nightly fuzz run fuzz_ss58_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use siws_verification::Ss58Codec;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    address: String,
    payload: Vec<u8>,
    network_id: u16,
}

fuzz_target!(|input: FuzzInput| {
    let codec = Ss58Codec::new();

    // Arbitrary text must never panic.
    if let Ok(decoded) = codec.decode(&input.address) {
        assert!(decoded.prefix_length == 1 || decoded.prefix_length == 2);
        assert!(decoded.network_id <= 0x3FFF);
    }

    // Anything that encodes must decode back to the same payload and network.
    if let Ok(address) = codec.encode(&input.payload, input.network_id) {
        let decoded = codec.decode(&address).expect("encoded address decodes");
        assert_eq!(decoded.public_key, input.payload);
        assert_eq!(decoded.network_id, input.network_id);
    }
});
