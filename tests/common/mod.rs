//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use launch_proxy::config::{ApiToken, ProxyConfig};
use launch_proxy::HttpServer;

pub const TEST_TOKEN: &str = "test-secret-token";

/// A canned upstream reply.
#[derive(Clone, Debug)]
pub struct MockReply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl MockReply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// Handle to a running mock upstream.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}/2.2.0", self.addr)
    }

    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far (request line + headers).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Start a programmable mock upstream on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockUpstream
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockReply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let upstream = MockUpstream {
        addr,
        hits: Arc::new(AtomicU32::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let f = Arc::new(f);
    let state = upstream.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let state = state.clone();
                    tokio::spawn(async move {
                        let mut head = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => head.extend_from_slice(&buf[..n]),
                            }
                        }
                        state.hits.fetch_add(1, Ordering::SeqCst);
                        state
                            .requests
                            .lock()
                            .unwrap()
                            .push(String::from_utf8_lossy(&head).into_owned());

                        let reply = f().await;
                        let mut response = format!("HTTP/1.1 {} {}\r\n", reply.status, reason(reply.status));
                        for (name, value) in &reply.headers {
                            response.push_str(&format!("{}: {}\r\n", name, value));
                        }
                        response.push_str(&format!(
                            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            reply.body.len(),
                            reply.body
                        ));
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    upstream
}

/// Start a mock upstream that always sends the same reply.
pub async fn start_mock_backend(reply: MockReply) -> MockUpstream {
    start_programmable_backend(move || {
        let reply = reply.clone();
        async move { reply }
    })
    .await
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Proxy config pointed at `base_url` with test-friendly settings.
pub fn proxy_config(base_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = base_url.to_string();
    config.upstream.system_proxy = false;
    config.upstream.request_timeout_secs = 5;
    config
}

pub fn server(config: ProxyConfig) -> HttpServer {
    HttpServer::new(config, ApiToken::new(TEST_TOKEN)).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A two-launch page in the upstream's list format.
pub fn launch_page() -> String {
    serde_json::json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": "a1",
                "name": "Falcon 9 Block 5 | Starlink Group 6-39",
                "net": "2024-03-02T03:30:00Z",
                "status": { "id": 1, "name": "Go for Launch", "abbrev": "Go", "description": "Go." },
                "launch_service_provider": { "id": 121, "name": "SpaceX", "type": "Commercial" },
                "rocket": { "id": 1, "configuration": { "name": "Falcon 9", "full_name": "Falcon 9 Block 5", "variant": "Block 5" } },
                "mission": null,
                "pad": { "id": 80, "name": "SLC-40", "location": { "id": 12, "name": "Cape Canaveral, FL, USA" } },
                "image": null,
                "vidURLs": [],
                "webcast_live": false,
                "probability": 90
            },
            {
                "id": "b2",
                "name": "Atlas V 551 | Kuiper",
                "net": "2024-03-05T18:00:00Z",
                "status": { "id": 2, "name": "To Be Determined", "abbrev": "TBD", "description": "TBD." },
                "launch_service_provider": { "id": 124, "name": "United Launch Alliance", "type": "Commercial" },
                "rocket": null,
                "mission": { "name": "Kuiper", "description": "Prototype.", "type": "Communications", "orbit": null },
                "pad": null,
                "image": "https://example.com/atlas.jpeg",
                "webcast_live": true
            }
        ]
    })
    .to_string()
}
