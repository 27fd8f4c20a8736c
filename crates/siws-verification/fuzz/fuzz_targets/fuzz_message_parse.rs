//! Fuzz target for the SIWS message grammar.
//!
//! ## Running
//!
//! ```bash
//! cd crates/siws-verification
//! cargo +nightly fuzz run fuzz_message_parse
//! ```

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use siws_verification::MessageParser;

fuzz_target!(|text: &str| {
    let parser = MessageParser::default();
    let now = Utc.timestamp_opt(1_715_500_000, 0).unwrap();

    let first = parser.parse_at(text, now);
    let second = parser.parse_at(text, now);
    assert_eq!(first, second);

    // A parsed message renders to text that parses to the same message.
    if let Ok(message) = first {
        assert!(message.expire_at > now);
        let rendered = message.to_message_string();
        assert_eq!(parser.parse_at(&rendered, now), Ok(message));
    }
});
