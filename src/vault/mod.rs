// src/vault/mod.rs
//! Remote secret store (Vault-compatible KV engine)
//!
//! [`fetch_secrets`] is the only thing the assembler needs: it reads a
//! path from a KV v2 mount, falls back to the v1 API when the path does not
//! exist there, and returns the payload as flat leaves. Transport sits
//! behind [`KvBackend`] so the fallback logic does not care whether it is
//! talking HTTP or to an in-memory store.

mod auth;
mod client;
mod kv;

pub use auth::{AuthMethod, CredentialFields, Credentials};
pub use client::{Connector, HttpClient, HttpConnector};
pub use kv::{fetch_secrets, KvBackend};
