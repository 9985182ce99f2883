// src/config/defaults.rs
use std::path::PathBuf;

use crate::consts::{DEFAULT_ENVIRONMENT, DEFAULT_VAULT_MOUNT_POINT};
use crate::error::Result;

pub fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.into()
}

pub fn default_mount_point() -> String {
    DEFAULT_VAULT_MOUNT_POINT.into()
}

/// KV path defaults to the environment name
pub fn default_vault_path(environment: &str) -> String {
    environment.into()
}

pub fn default_base_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}
