// src/key_ops.rs
//! Key generation and representation utilities
//!
//! Keys travel as URL-safe base64 text (44 chars with padding), the same
//! shape users already keep in `PLAINCONF_FERNET_KEY`.

use aescrypt_rs::aliases::Password;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::aliases::{RandomKey32, SecretKey32, SecureConversionsExt, SecureRandomExt};
use crate::consts::KEY_LENGTH_BYTES;
use crate::error::{ConfError, Result};

pub type Key = SecretKey32;

/// Generate a new random 256-bit key
#[inline]
pub fn generate_key() -> Key {
    Key::new(**RandomKey32::new())
}

/// Render a key as padded URL-safe base64
pub fn encode_key(key: &Key) -> String {
    URL_SAFE.encode(key.expose_secret())
}

/// Parse a key from URL-safe base64, padded or not
pub fn parse_key(text: &str) -> Result<Key> {
    let text = text.trim();
    let bytes = URL_SAFE
        .decode(text)
        .or_else(|_| URL_SAFE_NO_PAD.decode(text))
        .map_err(|e| ConfError::InvalidKey(format!("not URL-safe base64: {e}")))?;

    let len = bytes.len();
    let array: [u8; KEY_LENGTH_BYTES] = bytes.try_into().map_err(|_| {
        ConfError::InvalidKey(format!("expected {KEY_LENGTH_BYTES} bytes, got {len}"))
    })?;
    Ok(Key::new(array))
}

/// Password handed to aescrypt for every leaf encrypted under `key`
pub(crate) fn leaf_password(key: &Key) -> Password {
    Password::new(key.expose_secret().to_hex())
}
