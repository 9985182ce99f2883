// src/crypto/decrypt.rs
use std::io::Cursor;

use aescrypt_rs::aliases::Password;
use aescrypt_rs::decrypt;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use fernet::Fernet;
use toml::Value;

use super::{child_path, LeafKeys};
use crate::consts::FERNET_VERSION;
use crate::env_path::NestedMapping;
use crate::error::{ConfError, Result};
use crate::key_ops::Key;

/// Decrypt one base64 AES Crypt v3 value → plaintext
pub fn decrypt_value(ciphertext: &str, password: &Password) -> Result<String> {
    open_aescrypt(decode_text(ciphertext)?, password)
}

/// Decrypt one Fernet token → plaintext (no TTL check)
pub fn decrypt_fernet_value(token: &str, fernet: &Fernet) -> Result<String> {
    let plain = fernet
        .decrypt(token.trim())
        .map_err(|_| ConfError::Decryption("Fernet token rejected".into()))?;
    utf8(plain)
}

/// Decrypt every string leaf of `mapping`, recursing into tables and arrays.
///
/// Each leaf may be either an AES Crypt value or a Fernet token.
/// All-or-nothing: if any leaf fails, `mapping` is left as it was.
pub fn decrypt_leaves(mapping: &mut NestedMapping, key: &Key) -> Result<()> {
    let keys = LeafKeys::new(key)?;
    let mut decrypted = mapping.clone();
    for (name, value) in decrypted.iter_mut() {
        decrypt_node(value, &keys, name)?;
    }
    *mapping = decrypted;
    Ok(())
}

fn decrypt_node(value: &mut Value, keys: &LeafKeys, path: &str) -> Result<()> {
    match value {
        Value::String(cipher) => {
            *cipher = decrypt_leaf(cipher, keys).map_err(|e| match e {
                ConfError::Decryption(reason) => ConfError::Decryption(format!("{path}: {reason}")),
                other => other,
            })?
        }
        Value::Table(table) => {
            for (name, nested) in table.iter_mut() {
                decrypt_node(nested, keys, &child_path(path, name))?;
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                decrypt_node(item, keys, &format!("{path}[{i}]"))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn decrypt_leaf(text: &str, keys: &LeafKeys) -> Result<String> {
    let blob = decode_text(text)?;
    if blob.first() == Some(&FERNET_VERSION) {
        decrypt_fernet_value(text, &keys.fernet)
    } else {
        open_aescrypt(blob, &keys.password)
    }
}

fn decode_text(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    URL_SAFE
        .decode(text)
        .or_else(|_| URL_SAFE_NO_PAD.decode(text))
        .map_err(|_| ConfError::Decryption("value is not encrypted text".into()))
}

fn open_aescrypt(blob: Vec<u8>, password: &Password) -> Result<String> {
    let mut out = Vec::new();
    decrypt(Cursor::new(blob), &mut out, password)
        .map_err(|e| ConfError::Decryption(e.to_string()))?;
    utf8(out)
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| ConfError::Decryption("plaintext is not UTF-8".into()))
}
