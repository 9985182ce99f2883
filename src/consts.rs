// src/consts.rs
//! Shared constants: environment variable names, defaults, crypto parameters

/// Environment used when nothing selects one explicitly
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Default mount point of the KV secrets engine
pub const DEFAULT_VAULT_MOUNT_POINT: &str = "/kv";

/// Separator between environment path segments ("prod.eu-west")
pub const ENVIRONMENT_SEPARATOR: char = '.';

/// Suffix inserted before the extension of a sibling encrypted file
pub const ENCRYPTED_SUFFIX: &str = "_enc";

/// File read from the base directory before environment lookup
pub const DOTENV_FILENAME: &str = ".env";

/// KDF iterations for per-leaf AES Crypt v3 blobs
// The password is the hex form of a random 256-bit key, so stretching adds nothing
pub const LEAF_KDF_ITERATIONS: u32 = 1;

/// First byte of every decoded Fernet token
pub const FERNET_VERSION: u8 = 0x80;

/// Length in bytes of the secrets-file encryption key
pub const KEY_LENGTH_BYTES: usize = 32;

/// Default timeout for a single request to the secret store
pub const VAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header carrying the session token on secret store requests
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

// Recognized environment variables
pub const ENV_ENVIRONMENT: &str = "PLAINCONF_ENVIRONMENT";
pub const ENV_SETTINGS_FILE: &str = "PLAINCONF_SETTINGS_FILE";
pub const ENV_SECRETS_FILE: &str = "PLAINCONF_SECRETS_FILE";
pub const ENV_VAULT_URL: &str = "PLAINCONF_VAULT_URL";
pub const ENV_VAULT_MOUNT_POINT: &str = "PLAINCONF_VAULT_MOUNT_POINT";
pub const ENV_VAULT_PATH: &str = "PLAINCONF_VAULT_PATH";
pub const ENV_VAULT_TOKEN: &str = "PLAINCONF_VAULT_TOKEN";
pub const ENV_VAULT_USER: &str = "PLAINCONF_VAULT_USER";
pub const ENV_VAULT_PASS: &str = "PLAINCONF_VAULT_PASS";
pub const ENV_APPROLE_ID: &str = "PLAINCONF_APPROLE_ID";
pub const ENV_APPROLE_SECRET_ID: &str = "PLAINCONF_APPROLE_SECRET_ID";
pub const ENV_FERNET_KEY: &str = "PLAINCONF_FERNET_KEY";
