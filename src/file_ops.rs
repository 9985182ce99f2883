// src/file_ops.rs
//! File-level operations on settings and secrets documents
//!
//! Loading TOML from disk, naming the encrypted sibling of a secrets file,
//! and encrypting/decrypting whole documents on top of the leaf codec in
//! crypto/.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::consts::ENCRYPTED_SUFFIX;
use crate::crypto::{decrypt_leaves, encrypt_leaves};
use crate::env_path::NestedMapping;
use crate::error::{ConfError, Result};
use crate::key_ops::Key;

/// Where `encrypt_file` writes its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncryptTarget {
    /// `name.ext` → `name_enc.ext` next to the input
    #[default]
    Sibling,
    /// Overwrite the input file
    InPlace,
}

/// Read and parse a TOML document.
///
/// Relative paths are taken from `base_dir`. A missing file is reported as
/// [`ConfError::FileNotFound`] so callers can treat the source as absent.
pub fn load_file<P: AsRef<Path>>(base_dir: &Path, file_path: P) -> Result<NestedMapping> {
    let path = base_dir.join(file_path.as_ref());
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfError::FileNotFound { path })
        }
        Err(e) => return Err(ConfError::Io(e)),
    };

    let mapping: NestedMapping =
        toml::from_str(&content).map_err(|source| ConfError::Parse {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), keys = mapping.len(), "loaded TOML file");
    Ok(mapping)
}

/// Insert `_enc` before the final extension: `secrets.toml` → `secrets_enc.toml`
pub fn encrypted_sibling_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{ENCRYPTED_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{ENCRYPTED_SUFFIX}"),
    };
    path.with_file_name(name)
}

/// Encrypt every string leaf of a TOML file
///
/// Returns the path that was written.
pub fn encrypt_file<P: AsRef<Path>>(path: P, key: &Key, target: EncryptTarget) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut mapping = load_file(Path::new(""), path)?;
    encrypt_leaves(&mut mapping, key)?;

    let output = match target {
        EncryptTarget::Sibling => encrypted_sibling_path(path),
        EncryptTarget::InPlace => path.to_path_buf(),
    };
    write_toml(&output, &mapping)?;
    debug!(input = %path.display(), output = %output.display(), "encrypted secrets file");
    Ok(output)
}

/// Load a TOML file and decrypt its leaves in memory; nothing is written
pub fn decrypt_file<P: AsRef<Path>>(path: P, key: &Key) -> Result<NestedMapping> {
    let mut mapping = load_file(Path::new(""), path)?;
    decrypt_leaves(&mut mapping, key)?;
    Ok(mapping)
}

/// Serialize `mapping` and atomically replace `path` with it
pub fn write_toml(path: &Path, mapping: &NestedMapping) -> Result<()> {
    let rendered = toml::to_string(mapping)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(rendered.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ConfError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
