// src/config/options.rs
//! Load options and their resolution against the environment
//!
//! Every field resolves as: explicit option > `PLAINCONF_*` variable >
//! default. Empty strings count as unset at both levels.

use std::path::PathBuf;

use super::defaults::{default_environment, default_mount_point, default_vault_path};
use crate::consts::*;
use crate::vault::CredentialFields;

/// Inputs to a configuration load
///
/// Holds credentials, so it deliberately has no `Debug` impl.
#[derive(Clone, Default)]
pub struct Options {
    pub environment: Option<String>,
    pub settings_file: Option<String>,
    pub secrets_file: Option<String>,
    pub vault_url: Option<String>,
    pub vault_mount_point: Option<String>,
    pub vault_path: Option<String>,
    pub vault_token: Option<String>,
    pub vault_user: Option<String>,
    pub vault_pass: Option<String>,
    pub vault_approle_id: Option<String>,
    pub vault_approle_secret_id: Option<String>,
    pub fernet_key: Option<String>,
    /// Directory relative file paths and `.env` are taken from (default: cwd)
    pub base_dir: Option<PathBuf>,
}

macro_rules! setters {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    setters!(
        environment,
        settings_file,
        secrets_file,
        vault_url,
        vault_mount_point,
        vault_path,
        vault_token,
        vault_user,
        vault_pass,
        vault_approle_id,
        vault_approle_secret_id,
        fernet_key,
    );

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub(crate) fn resolve(&self, env: &dyn Fn(&str) -> Option<String>) -> Resolved {
        let pick = |explicit: &Option<String>, var: &str| {
            non_empty(explicit.clone()).or_else(|| non_empty(env(var)))
        };

        let environment = pick(&self.environment, ENV_ENVIRONMENT).unwrap_or_else(default_environment);
        let vault_path = pick(&self.vault_path, ENV_VAULT_PATH)
            .unwrap_or_else(|| default_vault_path(&environment));

        Resolved {
            settings_file: pick(&self.settings_file, ENV_SETTINGS_FILE),
            secrets_file: pick(&self.secrets_file, ENV_SECRETS_FILE),
            vault_url: pick(&self.vault_url, ENV_VAULT_URL),
            vault_mount_point: pick(&self.vault_mount_point, ENV_VAULT_MOUNT_POINT)
                .unwrap_or_else(default_mount_point),
            vault_path,
            credentials: CredentialFields {
                token: pick(&self.vault_token, ENV_VAULT_TOKEN),
                approle_id: pick(&self.vault_approle_id, ENV_APPROLE_ID),
                approle_secret_id: pick(&self.vault_approle_secret_id, ENV_APPROLE_SECRET_ID),
                user: pick(&self.vault_user, ENV_VAULT_USER),
                pass: pick(&self.vault_pass, ENV_VAULT_PASS),
            },
            fernet_key: pick(&self.fernet_key, ENV_FERNET_KEY),
            environment,
        }
    }
}

/// Options after resolution, alive for one load only
pub(crate) struct Resolved {
    pub environment: String,
    pub settings_file: Option<String>,
    pub secrets_file: Option<String>,
    pub vault_url: Option<String>,
    pub vault_mount_point: String,
    pub vault_path: String,
    pub credentials: CredentialFields,
    pub fernet_key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
