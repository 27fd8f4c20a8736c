//! # Login Flow
//!
//! The route issues a challenge, the wallet signs it, and the route hands
//! message, address and signature to the authenticator.
//!
//! ## Flows Tested
//!
//! 1. **Happy path**: wallet-signed challenge authenticates
//! 2. **Denied**: well-formed but non-matching signatures return `false`
//! 3. **Rejected**: malformed or stale input returns a typed error

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use siws_telemetry::{init_logging, log_auth_event, TelemetryConfig};
    use siws_verification::{
        AuthStage, FixedClock, MessageField, SiwsAuthenticationApi, SiwsAuthenticator,
        SiwsConfig, SiwsConfigBuilder, SiwsError, Ss58Error,
    };

    use crate::fixtures::{demo_instant, TestWallet, DEMO_ADDRESS, DEMO_MESSAGE, DEMO_SIGNATURE};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn authenticator_at_demo_time() -> SiwsAuthenticator<FixedClock> {
        // Several tests race to install the subscriber; only one wins.
        let _ = init_logging(&TelemetryConfig {
            log_level: "siws_verification=debug".to_string(),
            console_output: false,
            ..TelemetryConfig::default()
        });
        SiwsAuthenticator::with_clock(SiwsConfig::default(), FixedClock::new(demo_instant()))
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[test]
    fn test_polkadot_js_login_authenticates() {
        let authenticator = authenticator_at_demo_time();

        let outcome = authenticator
            .authenticate(DEMO_MESSAGE, DEMO_ADDRESS, DEMO_SIGNATURE)
            .expect("structurally valid login");

        assert!(outcome.verified);
        assert_eq!(outcome.stage, AuthStage::Authenticated);
        assert_eq!(outcome.message.domain, "siws.xyz");
        assert_eq!(outcome.message.chain_name, "Polkadot");
        assert_eq!(outcome.address.network_id, 0);

        log_auth_event!(
            info,
            "login-route",
            "Session issued",
            nonce = %outcome.message.nonce
        );
    }

    #[test]
    fn test_issued_challenge_round_trip() {
        let authenticator = authenticator_at_demo_time();
        let wallet = TestWallet::random();

        // Route renders the challenge; wallet signs the rendered text.
        let challenge = wallet.challenge(demo_instant(), Duration::minutes(5));
        let text = challenge.to_message_string();
        let signature = wallet.sign(&text);

        let outcome = authenticator
            .authenticate(&text, &wallet.address, &signature)
            .unwrap();
        assert!(outcome.verified);
        assert_eq!(outcome.message, challenge);
        assert_eq!(
            outcome.address.public_key_array(),
            Some(wallet.keypair.public.to_bytes())
        );
    }

    #[test]
    fn test_wallets_on_other_networks() {
        let authenticator = authenticator_at_demo_time();

        for network_id in [0u16, 2, 42, 1284, 16_383] {
            let wallet = TestWallet::from_seed([network_id as u8; 32], network_id);
            let text = wallet
                .challenge(demo_instant(), Duration::minutes(1))
                .to_message_string();

            assert_eq!(
                authenticator.verify_login(&text, &wallet.address, &wallet.sign(&text)),
                Ok(true),
                "network {network_id}"
            );
        }
    }

    #[test]
    fn test_outcome_serializes_for_session_issuance() {
        let outcome = authenticator_at_demo_time()
            .authenticate(DEMO_MESSAGE, DEMO_ADDRESS, DEMO_SIGNATURE)
            .unwrap();

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["verified"], true);
        assert_eq!(json["message"]["nonce"], "833a9f02-14d3-4fe9-a0d3-d93db5aedb5a");
        assert_eq!(
            json["address"]["public_key"],
            "3e1348b20635ec3870024d2400f521012e8e43ad413c1f1a5c2e37e3b2503815"
        );
    }

    // =============================================================================
    // DENIED: VERIFIED == FALSE
    // =============================================================================

    #[test]
    fn test_signature_from_another_wallet_is_denied() {
        let authenticator = authenticator_at_demo_time();
        let victim = TestWallet::random();
        let attacker = TestWallet::random();

        let text = victim
            .challenge(demo_instant(), Duration::minutes(5))
            .to_message_string();
        let forged = attacker.sign(&text);

        assert_eq!(
            authenticator.verify_login(&text, &victim.address, &forged),
            Ok(false)
        );
    }

    #[test]
    fn test_unwrapped_signature_is_denied() {
        let authenticator = authenticator_at_demo_time();
        let wallet = TestWallet::random();
        let text = wallet
            .challenge(demo_instant(), Duration::minutes(5))
            .to_message_string();

        assert_eq!(
            authenticator.verify_login(&text, &wallet.address, &wallet.sign_unwrapped(&text)),
            Ok(false)
        );
    }

    #[test]
    fn test_edited_statement_is_denied() {
        let authenticator = authenticator_at_demo_time();
        let edited = DEMO_MESSAGE.replace("Welcome to SIWS!", "Welcome to SIWS?");

        let outcome = authenticator
            .authenticate(&edited, DEMO_ADDRESS, DEMO_SIGNATURE)
            .unwrap();
        assert!(!outcome.verified);
        assert_eq!(outcome.stage, AuthStage::SignatureVerified);
    }

    // =============================================================================
    // REJECTED: TYPED ERRORS
    // =============================================================================

    #[test]
    fn test_address_substitution_rejected() {
        let authenticator = authenticator_at_demo_time();
        let wallet = TestWallet::random();

        // Valid signature for the demo account, but the route is told another account.
        let result = authenticator.verify_login(DEMO_MESSAGE, &wallet.address, DEMO_SIGNATURE);
        assert!(matches!(result, Err(SiwsError::AddressMismatch { .. })));
    }

    #[test]
    fn test_stale_challenge_rejected() {
        let wallet = TestWallet::random();
        let text = wallet
            .challenge(demo_instant() - Duration::minutes(10), Duration::minutes(2))
            .to_message_string();

        let result = authenticator_at_demo_time().verify_login(&text, &wallet.address, &wallet.sign(&text));
        assert!(matches!(result, Err(SiwsError::MessageExpired { .. })));
    }

    #[test]
    fn test_missing_nonce_rejected() {
        let text = DEMO_MESSAGE.replace("Nonce: 833a9f02-14d3-4fe9-a0d3-d93db5aedb5a\n", "");
        assert_eq!(
            authenticator_at_demo_time().verify_login(&text, DEMO_ADDRESS, DEMO_SIGNATURE),
            Err(SiwsError::MissingField(MessageField::Nonce))
        );
    }

    #[test]
    fn test_corrupted_account_rejected() {
        let corrupted = "12QPhT1S2hdUqv9b9RXMVHNizq7xhNnh5WG8Gudf6zJjPtwk";
        let text = DEMO_MESSAGE.replace(DEMO_ADDRESS, corrupted);

        assert_eq!(
            authenticator_at_demo_time().verify_login(&text, corrupted, DEMO_SIGNATURE),
            Err(SiwsError::InvalidAddress(Ss58Error::InvalidChecksum))
        );
    }

    #[test]
    fn test_malformed_signatures_rejected() {
        let authenticator = authenticator_at_demo_time();
        let no_prefix = DEMO_SIGNATURE.trim_start_matches("0x");
        let short = &DEMO_SIGNATURE[..DEMO_SIGNATURE.len() - 2];

        for signature in [no_prefix, short, "0x", "0xnothex"] {
            let result = authenticator.verify_login(DEMO_MESSAGE, DEMO_ADDRESS, signature);
            assert!(
                matches!(result, Err(SiwsError::InvalidSignatureFormat(_))),
                "{signature}"
            );
            assert!(result.unwrap_err().is_client_error());
        }
    }

    #[test]
    fn test_service_pinned_to_its_domain() {
        let config = SiwsConfigBuilder::new()
            .expected_domain("tasks.example.com")
            .max_message_bytes(1024)
            .build()
            .unwrap();
        let authenticator = SiwsAuthenticator::with_clock(config, FixedClock::new(demo_instant()));

        // Demo message was issued for siws.xyz
        assert!(matches!(
            authenticator.verify_login(DEMO_MESSAGE, DEMO_ADDRESS, DEMO_SIGNATURE),
            Err(SiwsError::DomainMismatch { .. })
        ));

        let wallet = TestWallet::random();
        let text = wallet
            .challenge(demo_instant(), Duration::minutes(5))
            .to_message_string();
        assert_eq!(
            authenticator.verify_login(&text, &wallet.address, &wallet.sign(&text)),
            Ok(true)
        );

        let oversized = format!("{text}\n{}", "x".repeat(2048));
        assert!(matches!(
            authenticator.verify_login(&oversized, &wallet.address, &wallet.sign(&oversized)),
            Err(SiwsError::MessageTooLarge { max: 1024, .. })
        ));
    }
}
