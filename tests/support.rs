// tests/support.rs
//! Test utilities: fixture files, an in-memory secret store and a local
//! HTTP stub

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use plainconf::error::VaultError;
use plainconf::vault::{AuthMethod, Connector, Credentials, KvBackend};
use serde_json::{json, Value as JsonValue};

/// Write `content` to `dir/name` and return the full path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Environment lookup backed by a fixed list of pairs
#[allow(dead_code)]
pub fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + 'static {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

/// KV store held in memory; records which API versions were read
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MemoryStore {
    v2: HashMap<(String, String), JsonValue>,
    v1: HashMap<(String, String), JsonValue>,
    deny: bool,
    pub reads: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_v2(mut self, mount: &str, path: &str, data: JsonValue) -> Self {
        self.v2.insert((mount.to_string(), path.to_string()), data);
        self
    }

    pub fn with_v1(mut self, mount: &str, path: &str, data: JsonValue) -> Self {
        self.v1.insert((mount.to_string(), path.to_string()), data);
        self
    }

    /// Every read fails with 403
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    fn record(&self, what: String) {
        self.reads.lock().unwrap().push(what);
    }
}

impl KvBackend for MemoryStore {
    fn read_v2(&self, mount_point: &str, path: &str) -> Result<JsonValue, VaultError> {
        self.record(format!("v2:{mount_point}:{path}"));
        if self.deny {
            return Err(VaultError::Status {
                status: 403,
                url: path.to_string(),
            });
        }
        match self.v2.get(&(mount_point.to_string(), path.to_string())) {
            Some(data) => Ok(json!({ "data": { "data": data, "metadata": { "version": 1 } } })),
            None => Err(VaultError::InvalidPath(path.to_string())),
        }
    }

    fn read_v1(&self, mount_point: &str, path: &str) -> Result<JsonValue, VaultError> {
        self.record(format!("v1:{mount_point}:{path}"));
        match self.v1.get(&(mount_point.to_string(), path.to_string())) {
            Some(data) => Ok(json!({ "data": data, "lease_duration": 0 })),
            None => Err(VaultError::InvalidPath(path.to_string())),
        }
    }
}

/// Hands out clones of one [`MemoryStore`]; remembers each connect call
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MemoryConnector {
    pub store: MemoryStore,
    pub connects: Arc<Mutex<Vec<(String, Option<AuthMethod>)>>>,
}

#[allow(dead_code)]
impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            connects: Arc::default(),
        }
    }

    pub fn connects(&self) -> Vec<(String, Option<AuthMethod>)> {
        self.connects.lock().unwrap().clone()
    }
}

impl Connector for MemoryConnector {
    fn connect(
        &self,
        url: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Box<dyn KvBackend>, VaultError> {
        self.connects
            .lock()
            .unwrap()
            .push((url.to_string(), credentials.map(Credentials::method)));
        Ok(Box::new(self.store.clone()))
    }
}

/// One request as seen by [`StubServer`]
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[allow(dead_code)]
impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> JsonValue {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// HTTP/1.1 server on 127.0.0.1 answering canned JSON per `METHOD path`.
/// Unrouted requests get 404. One request per connection.
#[allow(dead_code)]
pub struct StubServer {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

#[allow(dead_code)]
impl StubServer {
    pub fn start(routes: &[(&str, &str, u16, JsonValue)]) -> Self {
        let routes: HashMap<(String, String), (u16, String)> = routes
            .iter()
            .map(|(method, path, status, body)| {
                (
                    (method.to_string(), path.to_string()),
                    (*status, body.to_string()),
                )
            })
            .collect();
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let url = format!("http://{}", listener.local_addr().expect("stub addr"));
        let seen: Arc<Mutex<Vec<SeenRequest>>> = Arc::default();

        let log = Arc::clone(&seen);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let Some(request) = read_request(&stream) else {
                    continue;
                };
                let (status, body) = routes
                    .get(&(request.method.clone(), request.path.clone()))
                    .cloned()
                    .unwrap_or((404, "{\"errors\":[]}".to_string()));
                log.lock().unwrap().push(request);
                write_response(stream, status, &body);
            }
        });

        Self { url, seen }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

fn read_request(stream: &TcpStream) -> Option<SeenRequest> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(SeenRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_response(mut stream: TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {status} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
