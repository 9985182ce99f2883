// src/vault/client.rs
//! Blocking HTTP transport for the secret store

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use super::auth::{AuthMethod, Credentials};
use super::kv::KvBackend;
use crate::aliases::VaultToken;
use crate::consts::{VAULT_REQUEST_TIMEOUT_SECS, VAULT_TOKEN_HEADER};
use crate::error::VaultError;

/// Builds a [`KvBackend`] for a given server and credential
pub trait Connector {
    fn connect(
        &self,
        url: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Box<dyn KvBackend>, VaultError>;
}

/// Default connector: real HTTP with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpConnector {
    timeout: Duration,
}

impl HttpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(VAULT_REQUEST_TIMEOUT_SECS))
    }
}

impl Connector for HttpConnector {
    fn connect(
        &self,
        url: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Box<dyn KvBackend>, VaultError> {
        let mut client = HttpClient::with_timeout(url, self.timeout)?;
        if let Some(credentials) = credentials {
            client.login(credentials)?;
        }
        Ok(Box::new(client))
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: Option<LoginAuth>,
}

#[derive(Deserialize)]
struct LoginAuth {
    client_token: String,
}

pub struct HttpClient {
    http: Client,
    base_url: String,
    token: Option<VaultToken>,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, VaultError> {
        Self::with_timeout(base_url, Duration::from_secs(VAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, VaultError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Exchange `credentials` for a session token used by later reads
    pub fn login(&mut self, credentials: &Credentials) -> Result<(), VaultError> {
        let token = match credentials {
            Credentials::Token(token) => VaultToken::new(token.expose_secret().clone()),
            Credentials::AppRole { role_id, secret_id } => self.exchange(
                AuthMethod::AppRole,
                self.api_url(&["auth/approle/login"]),
                json!({ "role_id": role_id, "secret_id": secret_id.expose_secret() }),
            )?,
            Credentials::UserPass { username, password } => self.exchange(
                AuthMethod::UserPass,
                self.api_url(&["auth/userpass/login", username.as_str()]),
                json!({ "password": password.expose_secret() }),
            )?,
        };
        debug!(method = %credentials.method(), "authenticated with secret store");
        self.token = Some(token);
        Ok(())
    }

    fn exchange(
        &self,
        method: AuthMethod,
        url: String,
        body: JsonValue,
    ) -> Result<VaultToken, VaultError> {
        let response = self.http.post(&url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(VaultError::Auth(format!(
                "{method} login returned {}",
                status.as_u16()
            )));
        }

        let login: LoginResponse = response
            .json()
            .map_err(|e| VaultError::MalformedResponse(e.to_string()))?;
        login
            .auth
            .map(|auth| VaultToken::new(auth.client_token))
            .ok_or_else(|| VaultError::Auth(format!("{method} login returned no client token")))
    }

    fn read(&self, url: String) -> Result<JsonValue, VaultError> {
        let response = self.authorized(self.http.get(&url)).send()?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(VaultError::InvalidPath(url)),
            status if status.is_success() => response
                .json()
                .map_err(|e| VaultError::MalformedResponse(e.to_string())),
            status => Err(VaultError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(VAULT_TOKEN_HEADER, token.expose_secret().as_str()),
            None => request,
        }
    }

    fn api_url(&self, parts: &[&str]) -> String {
        build_url(&self.base_url, parts)
    }
}

impl KvBackend for HttpClient {
    fn read_v2(&self, mount_point: &str, path: &str) -> Result<JsonValue, VaultError> {
        self.read(self.api_url(&[mount_point, "data", path]))
    }

    fn read_v1(&self, mount_point: &str, path: &str) -> Result<JsonValue, VaultError> {
        self.read(self.api_url(&[mount_point, path]))
    }
}

fn build_url(base_url: &str, parts: &[&str]) -> String {
    let mut url = format!("{base_url}/v1");
    for part in parts.iter().map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        url.push('/');
        url.push_str(part);
    }
    url
}
