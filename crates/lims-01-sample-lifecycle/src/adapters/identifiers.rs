//! Random identifier generation
//!
//! Identifiers and api keys are base64 of fresh random bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;

use crate::ports::outbound::IdentifierGenerator;

/// Random bytes behind a sample identifier.
pub const IDENTIFIER_BYTES: usize = 14;

/// Random bytes behind a client api key.
pub const API_KEY_BYTES: usize = 16;

/// `IdentifierGenerator` backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentifierGenerator;

impl RandomIdentifierGenerator {
    pub fn new() -> Self {
        Self
    }

    fn random_base64(len: usize) -> String {
        let mut bytes = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}

impl IdentifierGenerator for RandomIdentifierGenerator {
    fn sample_identifier(&self) -> String {
        Self::random_base64(IDENTIFIER_BYTES)
    }

    fn api_key(&self) -> String {
        Self::random_base64(API_KEY_BYTES)
    }
}
