// src/crypto/encrypt.rs
use std::io::Cursor;

use aescrypt_rs::aliases::Password;
use aescrypt_rs::encrypt;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use toml::Value;

use crate::consts::LEAF_KDF_ITERATIONS;
use crate::env_path::NestedMapping;
use crate::error::{ConfError, Result};
use crate::key_ops::{leaf_password, Key};

/// Encrypt one plaintext value → base64 AES Crypt v3 text
pub fn encrypt_value(plaintext: &str, password: &Password) -> Result<String> {
    let mut out = Vec::new();
    encrypt(
        Cursor::new(plaintext.as_bytes()),
        &mut out,
        password,
        LEAF_KDF_ITERATIONS,
    )
    .map_err(ConfError::Crypto)?;
    Ok(URL_SAFE.encode(out))
}

/// Encrypt every string leaf of `mapping` in place, recursing into tables
/// and arrays
pub fn encrypt_leaves(mapping: &mut NestedMapping, key: &Key) -> Result<()> {
    let password = leaf_password(key);
    for (_, value) in mapping.iter_mut() {
        encrypt_node(value, &password)?;
    }
    Ok(())
}

fn encrypt_node(value: &mut Value, password: &Password) -> Result<()> {
    match value {
        Value::String(plain) => *plain = encrypt_value(plain, password)?,
        Value::Table(table) => {
            for (_, nested) in table.iter_mut() {
                encrypt_node(nested, password)?;
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                encrypt_node(item, password)?;
            }
        }
        _ => {}
    }
    Ok(())
}
