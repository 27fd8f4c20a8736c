//! Fuzz target for the full login pipeline.
//!
//! ## Running
//!
//! ```bash
//! cd crates/siws-verification
//! cargo +nightly fuzz run fuzz_authenticate
//! ```

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use siws_verification::{FixedClock, SiwsAuthenticationApi, SiwsAuthenticator, SiwsConfig};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message: String,
    address: String,
    signature: String,
}

fuzz_target!(|input: FuzzInput| {
    let clock = FixedClock::new(Utc.timestamp_opt(1_715_500_000, 0).unwrap());
    let authenticator = SiwsAuthenticator::with_clock(SiwsConfig::default(), clock);

    let result = authenticator.verify_login(&input.message, &input.address, &input.signature);

    // Deterministic for identical input
    let again = authenticator.verify_login(&input.message, &input.address, &input.signature);
    assert_eq!(result, again);
});
