// src/crypto/mod.rs
//! Leaf-level encryption of secrets documents (no file I/O)
//!
//! Each string leaf is sealed on its own as an AES Crypt v3 blob and stored
//! as URL-safe base64 text, so a single value can be rotated without
//! touching its siblings. Tables and arrays are walked, including arrays
//! of tables; non-string leaves pass through unchanged.
//!
//! Decryption also accepts Fernet tokens made with the same key text, so
//! secrets files written by Fernet-based tooling load as they are.
mod decrypt;
mod encrypt;

use aescrypt_rs::aliases::Password;
use fernet::Fernet;

use crate::error::{ConfError, Result};
use crate::key_ops::{encode_key, leaf_password, Key};

pub use decrypt::{decrypt_fernet_value, decrypt_leaves, decrypt_value};
pub use encrypt::{encrypt_leaves, encrypt_value};

/// Everything one key can open
struct LeafKeys {
    password: Password,
    fernet: Fernet,
}

impl LeafKeys {
    fn new(key: &Key) -> Result<Self> {
        let fernet = Fernet::new(&encode_key(key))
            .ok_or_else(|| ConfError::InvalidKey("not usable as a Fernet key".into()))?;
        Ok(Self {
            password: leaf_password(key),
            fernet,
        })
    }
}

fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
