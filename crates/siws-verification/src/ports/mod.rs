//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the login route calls
//! - **Outbound (Driven)**: Dependencies the authenticator needs

pub mod inbound;
pub mod outbound;
