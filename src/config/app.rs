// src/config/app.rs
//! Layered configuration assembly
//!
//! Sources in ascending precedence: settings file, secret store, secrets
//! file. Later sources overwrite earlier ones key by key. Every source is
//! optional; a configured file that does not exist is skipped with a
//! warning, anything else that goes wrong aborts the load.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use toml::Value;
use tracing::{debug, info, warn};

use super::defaults::default_base_dir;
use super::options::{Options, Resolved};
use crate::consts::DOTENV_FILENAME;
use crate::crypto::decrypt_leaves;
use crate::env_path::{EnvironmentPath, LeafSet, NestedMapping};
use crate::error::{ConfError, Result};
use crate::file_ops::load_file;
use crate::key_ops::{parse_key, Key};
use crate::vault::{fetch_secrets, Connector, Credentials, HttpConnector};

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Merged configuration for one environment
///
/// Only resolved leaves are exposed; credentials used to reach the secret
/// store and the decryption key never end up in here.
#[derive(Clone, PartialEq)]
pub struct Config {
    environment: String,
    values: LeafSet,
}

impl Config {
    /// Load with default wiring: process environment, `.env`, HTTP secret store
    pub fn build(options: &Options) -> Result<Self> {
        Assembler::new().build(options)
    }

    /// [`Config::build`] with no explicit options
    pub fn load() -> Result<Self> {
        Self::build(&Options::default())
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String leaf, `None` if absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Deserialize the merged leaves into a fixed-schema struct
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        Value::Table(self.values.clone())
            .try_into::<T>()
            .map_err(ConfError::Extract)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builds [`Config`] values; swap out the environment or the secret store
/// transport for testing or embedding.
pub struct Assembler {
    env: EnvLookup,
    connector: Box<dyn Connector>,
    dotenv: bool,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            env: Box::new(|name| std::env::var(name).ok()),
            connector: Box::new(HttpConnector::default()),
            dotenv: true,
        }
    }

    /// Replace process-environment lookup; also disables `.env` loading
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.env = Box::new(env);
        self.dotenv = false;
        self
    }

    pub fn with_connector<C: Connector + 'static>(mut self, connector: C) -> Self {
        self.connector = Box::new(connector);
        self
    }

    pub fn without_dotenv(mut self) -> Self {
        self.dotenv = false;
        self
    }

    pub fn build(&self, options: &Options) -> Result<Config> {
        let base_dir = match &options.base_dir {
            Some(dir) => dir.clone(),
            None => default_base_dir()?,
        };
        if self.dotenv {
            load_dotenv(&base_dir)?;
        }

        let mut resolved = options.resolve(self.env.as_ref());
        let credentials = Credentials::select(std::mem::take(&mut resolved.credentials));
        let key = resolved.fernet_key.as_deref().map(parse_key).transpose()?;
        let path = EnvironmentPath::new(&resolved.environment);
        let mut values = LeafSet::new();

        if let Some(file) = &resolved.settings_file {
            if let Some(leaves) = file_leaves(&base_dir, file, &path, None)? {
                debug!(file = %file, keys = leaves.len(), "merging settings file");
                values.extend(leaves);
            }
        }

        if let Some(leaves) = self.store_leaves(&resolved, credentials)? {
            debug!(keys = leaves.len(), "merging secret store");
            values.extend(leaves);
        }

        if let Some(file) = &resolved.secrets_file {
            if let Some(leaves) = file_leaves(&base_dir, file, &path, key.as_ref())? {
                debug!(file = %file, keys = leaves.len(), "merging secrets file");
                values.extend(leaves);
            }
        }

        info!(environment = %resolved.environment, keys = values.len(), "configuration loaded");
        Ok(Config {
            environment: resolved.environment,
            values,
        })
    }

    fn store_leaves(
        &self,
        resolved: &Resolved,
        credentials: Option<Credentials>,
    ) -> Result<Option<LeafSet>> {
        let Some(url) = &resolved.vault_url else {
            return Ok(None);
        };

        if credentials.is_none() {
            warn!(url = %url, "no secret store credentials configured, reading unauthenticated");
        }

        let backend = self.connector.connect(url, credentials.as_ref())?;
        let leaves = fetch_secrets(
            backend.as_ref(),
            &resolved.vault_mount_point,
            &resolved.vault_path,
        )?;
        Ok(Some(leaves))
    }
}

/// Load `file`, resolve the environment and decrypt if a key is given.
/// `Ok(None)` when the file does not exist.
fn file_leaves(
    base_dir: &Path,
    file: &str,
    env_path: &EnvironmentPath,
    key: Option<&Key>,
) -> Result<Option<LeafSet>> {
    let mapping: NestedMapping = match load_file(base_dir, file) {
        Ok(mapping) => mapping,
        Err(ConfError::FileNotFound { path }) => {
            warn!(path = %path.display(), "configuration file not found, skipping");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let mut leaves = env_path.resolve(&mapping)?;
    if let Some(key) = key {
        decrypt_leaves(&mut leaves, key)?;
    }
    Ok(Some(leaves))
}

fn load_dotenv(base_dir: &Path) -> Result<()> {
    let dotenv = base_dir.join(DOTENV_FILENAME);
    if dotenv.is_file() {
        dotenvy::from_path(&dotenv)?;
        debug!(path = %dotenv.display(), "loaded .env");
    }
    Ok(())
}
