// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! Everything sensitive that passes through a load (the codec key, vault
//! tokens and login credentials) is held in one of these wrappers so it is
//! zeroized on drop and never printed by accident.

pub use secure_gate::{
    dynamic_alias, fixed_alias, random_alias, SecureConversionsExt, SecureRandomExt,
};

// Fixed-size secrets
fixed_alias!(SecretKey32, 32); // 256-bit key for secrets-file leaf encryption

// Dynamic secrets
dynamic_alias!(VaultToken, String); // session token sent as X-Vault-Token
dynamic_alias!(VaultSecret, String); // userpass password or approle secret_id

// Random secrets
random_alias!(RandomKey32, 32); // source of fresh secrets-file keys
