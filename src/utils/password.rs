//! Salted PBKDF2-HMAC-SHA256 password digests.
//!
//! Digest format: `base64(salt) + "." + base64(derived_key)`.

use base64::{Engine, engine::general_purpose::STANDARD};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

const SALT_LEN: usize = 128 / 8;
const KEY_LEN: usize = 256 / 8;
const ITERATIONS: u32 = 100_000;

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);
    key
}

/// Hash a password under a fresh random salt
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(password, &salt);
    format!("{}.{}", STANDARD.encode(salt), STANDARD.encode(key))
}

/// Check `candidate` against a stored digest.
///
/// Returns false for any malformed digest instead of failing.
pub fn verify_password(digest: &str, candidate: &str) -> bool {
    let Some((salt_b64, key_b64)) = digest.split_once('.') else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = STANDARD.decode(key_b64) else {
        return false;
    };
    derive_key(candidate, &salt).as_slice() == expected.as_slice()
}
