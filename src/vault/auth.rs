// src/vault/auth.rs
//! Credential selection for the secret store
//!
//! Exactly one method is used per load. Priority: token, then approle,
//! then userpass. A credential pair only counts when both halves are set.

use std::fmt;

use crate::aliases::{VaultSecret, VaultToken};

/// Which login exchange produced the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Token,
    AppRole,
    UserPass,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthMethod::Token => "token",
            AuthMethod::AppRole => "approle",
            AuthMethod::UserPass => "userpass",
        })
    }
}

/// Raw credential inputs as resolved from options and environment
#[derive(Default)]
pub struct CredentialFields {
    pub token: Option<String>,
    pub approle_id: Option<String>,
    pub approle_secret_id: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

pub enum Credentials {
    Token(VaultToken),
    AppRole {
        role_id: String,
        secret_id: VaultSecret,
    },
    UserPass {
        username: String,
        password: VaultSecret,
    },
}

impl Credentials {
    /// Pick the single credential to authenticate with, if any
    pub fn select(fields: CredentialFields) -> Option<Self> {
        let CredentialFields {
            token,
            approle_id,
            approle_secret_id,
            user,
            pass,
        } = fields;

        if let Some(token) = token {
            return Some(Credentials::Token(VaultToken::new(token)));
        }
        if let (Some(role_id), Some(secret_id)) = (approle_id, approle_secret_id) {
            return Some(Credentials::AppRole {
                role_id,
                secret_id: VaultSecret::new(secret_id),
            });
        }
        if let (Some(username), Some(password)) = (user, pass) {
            return Some(Credentials::UserPass {
                username,
                password: VaultSecret::new(password),
            });
        }
        None
    }

    pub fn method(&self) -> AuthMethod {
        match self {
            Credentials::Token(_) => AuthMethod::Token,
            Credentials::AppRole { .. } => AuthMethod::AppRole,
            Credentials::UserPass { .. } => AuthMethod::UserPass,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("method", &self.method())
            .finish_non_exhaustive()
    }
}
