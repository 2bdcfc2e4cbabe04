//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use image_proxy::source::store::BoxError;
use image_proxy::{ObjectStore, StoredObject};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned response served by the mock origin backend.
#[derive(Clone)]
pub struct OriginResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub cache_control: Option<&'static str>,
    pub body: &'static [u8],
}

impl OriginResponse {
    #[allow(dead_code)]
    pub fn ok(content_type: &'static str, body: &'static [u8]) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type),
            cache_control: None,
            body,
        }
    }
}

/// Handle onto a running mock origin backend.
pub struct OriginBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl OriginBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request lines seen so far, e.g. `GET /a.jpg?w=200 HTTP/1.1`.
    #[allow(dead_code)]
    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}

/// Start a mock origin backend that returns a fixed response.
pub async fn start_origin_backend(response: OriginResponse) -> OriginBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let request_lines = Arc::new(Mutex::new(Vec::new()));

    let task_hits = hits.clone();
    let task_lines = request_lines.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    task_hits.fetch_add(1, Ordering::SeqCst);
                    let response = response.clone();
                    let lines = task_lines.clone();
                    tokio::spawn(async move {
                        // Read the request head before answering.
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }
                        if let Some(line) = String::from_utf8_lossy(&buf).lines().next() {
                            lines.lock().unwrap().push(line.to_string());
                        }

                        let status_text = match response.status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let mut head = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                            status_text,
                            response.body.len()
                        );
                        if let Some(ct) = response.content_type {
                            head.push_str(&format!("Content-Type: {}\r\n", ct));
                        }
                        if let Some(cc) = response.cache_control {
                            head.push_str(&format!("Cache-Control: {}\r\n", cc));
                        }
                        head.push_str("\r\n");

                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(response.body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    OriginBackend {
        addr,
        hits,
        request_lines,
    }
}

/// In-memory object store double keyed by (bucket, key).
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    gets: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        cache_control: Option<&str>,
        body: &[u8],
    ) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                content_type: content_type.map(str::to_string),
                cache_control: cache_control.map(str::to_string),
                body: Bytes::copy_from_slice(body),
            },
        );
    }

    pub fn gets(&self) -> u32 {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<StoredObject>, BoxError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned())
    }
}
