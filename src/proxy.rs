//! Local HTTP proxy in front of the problem scraper.
//!
//! Browsers cannot fetch judge pages cross-origin, so the web client asks
//! this server instead: `GET /api/parse?url=<target>&platform=<platform>`.
//! Requests are accepted on a blocking tiny_http thread and handed to the
//! async side over a channel.

use std::io;
use std::sync::Arc;
use std::thread;

use log::{error, info, warn};
use serde_json::json;
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};
use tokio::sync::{Notify, mpsc};
use url::Url;

use crate::problem::{self, PageFetcher, ProblemError, ProblemRequest};

pub const DEFAULT_PORT: u16 = 3001;
pub const PARSE_PATH: &str = "/api/parse";

const FETCH_FAILED_MESSAGE: &str = "Failed to fetch the problem. Check the URL.";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to bind port {port}: {reason}")]
    PortBinding { port: u16, reason: String },

    #[error("proxy I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Status and JSON body for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    fn json(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }
}

/// Handle for stopping a running proxy.
#[derive(Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
    server: Arc<Server>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.notify.notify_one();
        self.server.unblock();
    }
}

pub struct ProxyServer {
    server: Arc<Server>,
    port: u16,
    shutdown: ShutdownHandle,
}

impl ProxyServer {
    /// Bind on localhost. Port 0 picks a free port.
    pub fn bind(port: u16) -> Result<Self, ProxyError> {
        let server = Server::http(("127.0.0.1", port)).map_err(|e| ProxyError::PortBinding {
            port,
            reason: e.to_string(),
        })?;
        let bound = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .ok_or_else(|| ProxyError::PortBinding {
                port,
                reason: "unable to determine bound port".into(),
            })?;

        let server = Arc::new(server);
        let shutdown = ShutdownHandle {
            notify: Arc::new(Notify::new()),
            server: server.clone(),
        };
        Ok(Self {
            server,
            port: bound,
            shutdown,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Serve until [`ShutdownHandle::shutdown`] is called.
    pub async fn serve<F: PageFetcher>(self, fetcher: F) -> Result<(), ProxyError> {
        info!("Proxy server is running on http://localhost:{}", self.port);

        let (tx, mut rx) = mpsc::channel::<Request>(16);
        let server = self.server.clone();
        thread::Builder::new()
            .name("proxy-accept".into())
            .spawn(move || {
                while let Ok(request) = server.recv() {
                    if tx.blocking_send(request).is_err() {
                        break;
                    }
                }
            })?;

        let notify = self.shutdown.notify.clone();
        loop {
            tokio::select! {
                _ = notify.notified() => break,
                maybe_req = rx.recv() => {
                    let Some(req) = maybe_req else { break };
                    let reply = route(&fetcher, req.method(), req.url()).await;
                    let response = to_response(&reply);
                    let outcome = tokio::task::spawn_blocking(move || req.respond(response)).await;
                    match outcome {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => warn!("failed to write proxy response: {}", e),
                        Err(e) => warn!("proxy responder panicked: {}", e),
                    }
                }
            }
        }

        info!("Proxy server on port {} stopped", self.port);
        Ok(())
    }
}

/// Decide the reply for one request. `raw_url` is the request target as
/// sent (path plus query).
pub async fn route<F: PageFetcher>(fetcher: &F, method: &Method, raw_url: &str) -> Reply {
    let Ok(url) = Url::parse(&format!("http://localhost{raw_url}")) else {
        return Reply::error(400, "Malformed request URL");
    };

    if url.path() != PARSE_PATH {
        return Reply::error(404, "Not found");
    }
    match method {
        Method::Options => return Reply::json(204, serde_json::Value::Null),
        Method::Get => {}
        _ => return Reply::error(405, "Method not allowed"),
    }

    let query = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };
    let target = query("url").unwrap_or_default();
    let platform = query("platform");

    let request = match ProblemRequest::resolve(&target, platform.as_deref()) {
        Ok(request) => request,
        Err(e @ ProblemError::MissingTarget) | Err(e @ ProblemError::UnsupportedPlatform(_)) => {
            return Reply::error(400, &e.to_string());
        }
        Err(e) => return Reply::error(500, &e.to_string()),
    };

    match problem::scrape(fetcher, &request).await {
        Ok(statement) => Reply::json(200, json!({ "content": statement.to_bundle() })),
        Err(e) => {
            error!("{}", e);
            Reply::json(
                500,
                json!({ "error": FETCH_FAILED_MESSAGE, "detail": e.to_string() }),
            )
        }
    }
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn to_response(reply: &Reply) -> Response<io::Cursor<Vec<u8>>> {
    let body = if reply.body.is_null() {
        String::new()
    } else {
        reply.body.to_string()
    };

    let headers = [
        ("Content-Type", "application/json; charset=utf-8"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ];
    headers
        .iter()
        .filter_map(|(name, value)| header(name, value))
        .fold(
            Response::from_string(body).with_status_code(reply.status),
            |response, header| response.with_header(header),
        )
}
