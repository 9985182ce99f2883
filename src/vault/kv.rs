// src/vault/kv.rs
use serde_json::Value as JsonValue;
use toml::Value;
use tracing::debug;

use crate::env_path::LeafSet;
use crate::error::VaultError;

/// Raw reads against a KV secrets engine
///
/// Both methods return the full JSON response body. A path that does not
/// exist for that API version must be reported as
/// [`VaultError::InvalidPath`].
pub trait KvBackend {
    fn read_v2(&self, mount_point: &str, path: &str) -> Result<JsonValue, VaultError>;
    fn read_v1(&self, mount_point: &str, path: &str) -> Result<JsonValue, VaultError>;
}

/// Read `path` under `mount_point`, v2 first, v1 on `InvalidPath`
pub fn fetch_secrets<B: KvBackend + ?Sized>(
    backend: &B,
    mount_point: &str,
    path: &str,
) -> Result<LeafSet, VaultError> {
    match backend.read_v2(mount_point, path) {
        Ok(body) => payload(&body, "/data/data"),
        Err(VaultError::InvalidPath(_)) => {
            debug!(mount_point, path, "no KV v2 secret, retrying with KV v1");
            let body = backend.read_v1(mount_point, path)?;
            payload(&body, "/data")
        }
        Err(e) => Err(e),
    }
}

fn payload(body: &JsonValue, pointer: &str) -> Result<LeafSet, VaultError> {
    let data = body
        .pointer(pointer)
        .and_then(JsonValue::as_object)
        .ok_or_else(|| VaultError::MalformedResponse(format!("no object at '{pointer}'")))?;

    Ok(data
        .iter()
        .filter_map(|(key, value)| json_to_leaf(value).map(|leaf| (key.clone(), leaf)))
        .collect())
}

fn json_to_leaf(value: &JsonValue) -> Option<Value> {
    match value {
        JsonValue::Null => None,
        JsonValue::Bool(b) => Some(Value::Boolean(*b)),
        JsonValue::String(s) => Some(Value::String(s.clone())),
        JsonValue::Number(n) => Some(match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n
                .as_f64()
                .map(Value::Float)
                .unwrap_or_else(|| Value::String(n.to_string())),
        }),
        JsonValue::Array(_) | JsonValue::Object(_) => Some(Value::String(value.to_string())),
    }
}
