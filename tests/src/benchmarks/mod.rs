//! # SIWS Benchmarks
//!
//! One benchmark group per pipeline stage plus the full login.
