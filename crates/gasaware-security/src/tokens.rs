//! Random opaque tokens

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::Rng;

const REFRESH_TOKEN_BYTES: usize = 64;
const VERIFICATION_TOKEN_BYTES: usize = 32;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill(bytes.as_mut_slice());
    bytes
}

/// 64 random bytes, standard base64
pub fn generate_refresh_token() -> String {
    STANDARD.encode(random_bytes(REFRESH_TOKEN_BYTES))
}

/// 32 random bytes, URL-safe base64 so it can travel in a query string
pub fn generate_verification_token() -> String {
    URL_SAFE_NO_PAD.encode(random_bytes(VERIFICATION_TOKEN_BYTES))
}
