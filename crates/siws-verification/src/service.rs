//! # SIWS Authentication Service
//!
//! Application service layer that implements the `SiwsAuthenticationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SiwsAuthenticationApi`)
//! - Uses the outbound port (`Clock`) for the verification instant
//! - Delegates parsing, address decoding and signature checks to the domain layer
//!
//! ## Pipeline
//!
//! ```text
//! Received → Parsed → AddressDecoded → SignatureVerified → Authenticated
//! ```
//!
//! The first failing stage ends the call. Nothing is retried or cached, so
//! identical inputs at the same instant always give identical results.

use tracing::{info, instrument, warn};

use crate::adapters::clock::SystemClock;
use crate::domain::config::SiwsConfig;
use crate::domain::entities::{AuthStage, AuthenticationOutcome, DecodedAddress, SiwsMessage};
use crate::domain::errors::SiwsError;
use crate::domain::message::MessageParser;
use crate::domain::signature::SignatureVerifier;
use crate::domain::ss58::Ss58Codec;
use crate::ports::inbound::SiwsAuthenticationApi;
use crate::ports::outbound::Clock;

/// SIWS login authenticator.
///
/// Built once in the composition root and shared by reference; it holds no
/// mutable state.
#[derive(Clone, Debug)]
pub struct SiwsAuthenticator<C: Clock = SystemClock> {
    config: SiwsConfig,
    parser: MessageParser,
    verifier: SignatureVerifier,
    codec: Ss58Codec,
    clock: C,
}

impl SiwsAuthenticator<SystemClock> {
    /// Create an authenticator that checks expiry against wall-clock time.
    pub fn new(config: SiwsConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for SiwsAuthenticator<SystemClock> {
    fn default() -> Self {
        Self::new(SiwsConfig::default())
    }
}

impl<C: Clock> SiwsAuthenticator<C> {
    /// Create an authenticator with an explicit clock.
    pub fn with_clock(config: SiwsConfig, clock: C) -> Self {
        Self {
            parser: MessageParser::new(&config),
            verifier: SignatureVerifier::with_context(&config.signing_context),
            codec: Ss58Codec::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &SiwsConfig {
        &self.config
    }

    fn run_pipeline(
        &self,
        raw_message: &str,
        claimed_address: &str,
        signature_hex: &str,
        stage: &mut AuthStage,
    ) -> Result<AuthenticationOutcome, SiwsError> {
        let message = self.parser.parse_at(raw_message, self.clock.now())?;
        *stage = AuthStage::Parsed;

        // The signed text must name the account claiming the login.
        if message.address != claimed_address {
            return Err(SiwsError::AddressMismatch {
                message_address: message.address,
                claimed_address: claimed_address.to_string(),
            });
        }

        let address = self.codec.decode(claimed_address)?;
        *stage = AuthStage::AddressDecoded;

        let verified = self
            .verifier
            .verify(raw_message, &address.public_key, signature_hex)?;
        *stage = AuthStage::SignatureVerified;

        if verified {
            *stage = AuthStage::Authenticated;
        }

        Ok(AuthenticationOutcome {
            verified,
            stage: *stage,
            message,
            address,
        })
    }
}

impl<C: Clock> SiwsAuthenticationApi for SiwsAuthenticator<C> {
    #[instrument(skip_all, fields(claimed_address = %claimed_address))]
    fn authenticate(
        &self,
        raw_message: &str,
        claimed_address: &str,
        signature_hex: &str,
    ) -> Result<AuthenticationOutcome, SiwsError> {
        let mut stage = AuthStage::Received;
        let result = self.run_pipeline(raw_message, claimed_address, signature_hex, &mut stage);

        match &result {
            Ok(outcome) if outcome.verified => info!(
                domain = %outcome.message.domain,
                network_id = outcome.address.network_id,
                "SIWS login authenticated"
            ),
            Ok(outcome) => warn!(stage = %outcome.stage, "SIWS signature did not match"),
            Err(err) => warn!(stage = %stage, error = %err, "SIWS login rejected"),
        }

        result
    }

    fn verify_login(
        &self,
        raw_message: &str,
        claimed_address: &str,
        signature_hex: &str,
    ) -> Result<bool, SiwsError> {
        self.authenticate(raw_message, claimed_address, signature_hex)
            .map(|outcome| outcome.verified)
    }

    fn parse_message(&self, raw_message: &str) -> Result<SiwsMessage, SiwsError> {
        self.parser.parse_at(raw_message, self.clock.now())
    }

    fn decode_address(&self, address: &str) -> Result<DecodedAddress, SiwsError> {
        Ok(self.codec.decode(address)?)
    }

    fn verify_signature(
        &self,
        message: &str,
        public_key: &[u8],
        signature_hex: &str,
    ) -> Result<bool, SiwsError> {
        self.verifier.verify(message, public_key, signature_hex)
    }
}
