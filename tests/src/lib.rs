//! # SIWS Verification Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs      # Wallet simulation: keypairs, challenges, signing
//! ├── benchmarks/      # Criterion benchmarks per pipeline stage
//! └── integration/     # End-to-end login flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p siws-tests
//!
//! # By category
//! cargo test -p siws-tests integration::
//!
//! # Benchmarks
//! cargo bench -p siws-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
