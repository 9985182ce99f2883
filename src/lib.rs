// src/lib.rs
//! plainconf — layered configuration from TOML files and a secret store
//!
//! Features:
//! - Dotted environment paths (`prod.eu-west`) with inherited values
//! - Optional secrets file with per-value AES Crypt v3 encryption
//!   (Fernet tokens under the same key are read too)
//! - Vault-compatible KV v2 / v1 secret store
//! - Precedence: settings file < secret store < secrets file

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod env_path;
pub mod file_ops;
pub mod key_ops;
pub mod vault;

pub mod error;

// Re-export everything users need at the crate root
pub use config::{Assembler, Config, Options};
pub use env_path::{resolve, EnvironmentPath, LeafSet, NestedMapping};
pub use error::{ConfError, Result, VaultError};
pub use file_ops::{encrypt_file, encrypted_sibling_path, load_file, EncryptTarget};
pub use key_ops::{encode_key, generate_key, parse_key, Key};
pub use toml::Value;
