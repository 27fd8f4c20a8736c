//! Wallet simulation for end-to-end tests.
//!
//! A [`TestWallet`] plays the browser extension: it holds an sr25519
//! keypair, shows an SS58 address, and signs SIWS challenges the way
//! polkadot.js `signRaw` does.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::RngCore;
use schnorrkel::{signing_context, ExpansionMode, Keypair, MiniSecretKey};
use siws_verification::{wrap_message, SiwsMessage, Ss58Codec, SUBSTRATE_SIGNING_CONTEXT};

/// Wallet-produced login from the siws.xyz demo, signed by a Polkadot account.
pub const DEMO_MESSAGE: &str = "siws.xyz wants you to sign in with your Polkadot account:\n12QPhT1S2hdUqv9b9RXMVHNizq7xhNnh5WG8Gudf6zJjPtwj\n\nWelcome to SIWS! Sign in to see how it works.\n\nURI: https://siws.xyz\nNonce: 833a9f02-14d3-4fe9-a0d3-d93db5aedb5a\nIssued At: 2024-05-12T07:46:36.931Z\nExpiration Time: 2024-05-12T07:48:36.931Z";
pub const DEMO_ADDRESS: &str = "12QPhT1S2hdUqv9b9RXMVHNizq7xhNnh5WG8Gudf6zJjPtwj";
pub const DEMO_SIGNATURE: &str = "0x3ec017c1107815bd2bf01725b65406b7e2beda496ae6c4ba0d5602a70dc01368fe744f6810f75d40b66ecf123bb044dfb2608d6006aa5233551e12dbc2743c8a";

/// An instant inside the demo message's validity window.
pub fn demo_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 12, 7, 47, 0).unwrap()
}

/// Simulated browser wallet.
pub struct TestWallet {
    pub keypair: Keypair,
    pub address: String,
}

impl TestWallet {
    /// Random wallet on the generic Substrate network (42).
    pub fn random() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::from_seed(seed, 42)
    }

    /// Deterministic wallet on `network_id`.
    pub fn from_seed(seed: [u8; 32], network_id: u16) -> Self {
        let keypair = MiniSecretKey::from_bytes(&seed)
            .expect("32-byte seed")
            .expand_to_keypair(ExpansionMode::Ed25519);
        let address = Ss58Codec::new()
            .encode(&keypair.public.to_bytes(), network_id)
            .expect("public key encodes");
        Self { keypair, address }
    }

    /// Sign `message` the way polkadot.js does.
    pub fn sign(&self, message: &str) -> String {
        let wrapped = wrap_message(message);
        let signature = self
            .keypair
            .sign(signing_context(SUBSTRATE_SIGNING_CONTEXT.as_bytes()).bytes(wrapped.as_bytes()));
        format!("0x{}", hex::encode(signature.to_bytes()))
    }

    /// Sign without the `<Bytes>` wrapping, as a careless client would.
    pub fn sign_unwrapped(&self, message: &str) -> String {
        let signature = self
            .keypair
            .sign(signing_context(SUBSTRATE_SIGNING_CONTEXT.as_bytes()).bytes(message.as_bytes()));
        format!("0x{}", hex::encode(signature.to_bytes()))
    }

    /// A login challenge for this wallet, valid for `ttl` from `issued_at`.
    pub fn challenge(&self, issued_at: DateTime<Utc>, ttl: Duration) -> SiwsMessage {
        SiwsMessage {
            domain: "tasks.example.com".to_string(),
            chain_name: "Substrate".to_string(),
            address: self.address.clone(),
            statement: Some("Sign in to the task board.".to_string()),
            uri: "https://tasks.example.com/api/v1/auth".to_string(),
            version: Some("1".to_string()),
            nonce: format!("{:016x}", rand::thread_rng().next_u64()),
            issued_at,
            expire_at: issued_at + ttl,
        }
    }
}
