// src/env_path.rs
//! Environment path resolution
//!
//! An environment identifier such as `"prod.eu-west"` selects the table
//! `[prod.eu-west]` of a settings or secrets document. Resolution collects
//! the plain (non-table) values of every table on the way down, so values
//! set on `[prod]` are inherited by `[prod.eu-west]` unless it overrides
//! them. Tables nested below the selected one are not descended into.

use std::fmt;

use toml::{Table, Value};

use crate::consts::ENVIRONMENT_SEPARATOR;
use crate::error::{ConfError, Result};

/// Parsed TOML document: string keys to leaves or nested tables
pub type NestedMapping = Table;

/// Flat key → leaf value result of resolving an environment path (sorted by key)
pub type LeafSet = Table;

/// Dotted environment identifier split into its segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPath {
    raw: String,
    segments: Vec<String>,
}

impl EnvironmentPath {
    pub fn new(environment: &str) -> Self {
        Self {
            raw: environment.to_string(),
            segments: environment
                .split(ENVIRONMENT_SEPARATOR)
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk `root` along this path and collect the inherited + selected leaves
    pub fn resolve(&self, root: &NestedMapping) -> Result<LeafSet> {
        resolve(self, root)
    }
}

impl fmt::Display for EnvironmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for EnvironmentPath {
    fn from(environment: &str) -> Self {
        Self::new(environment)
    }
}

/// Resolve `path` against `root` without touching either.
///
/// Every call starts from an empty result, so repeated calls on the same
/// mapping return the same leaves. Deeper tables override inherited keys.
pub fn resolve(path: &EnvironmentPath, root: &NestedMapping) -> Result<LeafSet> {
    let mut leaves = LeafSet::new();
    let mut level = root;

    for segment in path.segments() {
        level = match level.get(segment) {
            Some(Value::Table(table)) => table,
            _ => {
                return Err(ConfError::PathNotFound {
                    environment: path.as_str().to_string(),
                    segment: segment.clone(),
                })
            }
        };
        collect_leaves(level, &mut leaves);
    }

    Ok(leaves)
}

fn collect_leaves(table: &Table, leaves: &mut LeafSet) {
    for (key, value) in table {
        if !value.is_table() {
            leaves.insert(key.clone(), value.clone());
        }
    }
}
