// src/error.rs
//! Public error types for the entire crate

use std::path::PathBuf;

use aescrypt_rs::AescryptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("configuration does not match the requested shape: {0}")]
    Extract(#[source] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("environment '{environment}' not configured: missing key '{segment}'")]
    PathNotFound {
        environment: String,
        segment: String,
    },

    #[error("secret store error: {0}")]
    SecretStore(#[from] VaultError),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("Crypto operation failed: {0}")]
    Crypto(AescryptError),

    #[error("invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<AescryptError> for ConfError {
    fn from(err: AescryptError) -> Self {
        ConfError::Crypto(err)
    }
}

/// Failures talking to the remote secret store
#[derive(Error, Debug)]
pub enum VaultError {
    /// Nothing stored at this path for the requested KV API version
    #[error("invalid path for this KV version: {0}")]
    InvalidPath(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, ConfError>;
