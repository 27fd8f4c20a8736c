//! # Integration Tests
//!
//! End-to-end login flows through the public API, the way a login route
//! drives it.

mod login_flow;
