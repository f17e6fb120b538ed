//! 本地 HTTP 桩服务：按路径返回固定响应，并记录收到的请求

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
}

pub struct StubServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

/// 测试环境可能配置了 HTTP 代理，桩服务在本机，直接连接
pub fn bypass_proxy() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    std::env::set_var("no_proxy", "127.0.0.1,localhost");
}

impl StubServer {
    /// routes: 路径（含 query）-> 响应；未命中返回 404
    pub async fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        let routes: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, status, body)| {
                (
                    path.to_string(),
                    Route {
                        status,
                        body: body.to_string(),
                    },
                )
            })
            .collect();
        let routes = Arc::new(routes);
        bypass_proxy();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    handle(stream, routes, recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    mut stream: TcpStream,
    routes: Arc<HashMap<String, Route>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        body.extend_from_slice(&chunk[..n]);
    }

    recorded.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        body: r#"{"message":"Not Found"}"#.to_string(),
    });
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub const RUN_JSON: &str = r#"{
    "id": 42,
    "run_number": 14,
    "html_url": "https://github.com/octo/widgets/actions/runs/42",
    "head_branch": "feature",
    "created_at": "2024-03-01T10:00:00Z",
    "updated_at": "2024-03-01T10:01:30Z",
    "event": "pull_request",
    "name": "CI",
    "repository": {
        "full_name": "octo/widgets",
        "html_url": "https://github.com/octo/widgets",
        "url": "https://api.github.com/repos/octo/widgets"
    },
    "pull_requests": [
        {"number": 5, "head": {"ref": "feature"}, "base": {"ref": "main", "repo": {"url": "https://api.github.com/repos/octo/widgets"}}},
        {"number": 6, "head": {"ref": "feature"}, "base": {"ref": "release", "repo": {"url": "https://api.github.com/repos/octo/widgets"}}}
    ]
}"#;

pub const COMMIT_JSON: &str = r#"{
    "sha": "0123456789abcdef0123456789abcdef01234567",
    "html_url": "https://github.com/octo/widgets/commit/0123456789abcdef0123456789abcdef01234567",
    "commit": {"message": "Add widgets"}
}"#;

pub const JOBS_JSON: &str = r#"{
    "total_count": 4,
    "jobs": [
        {"name": "build", "html_url": "https://github.com/octo/widgets/actions/runs/42/job/1",
         "status": "completed", "conclusion": "success",
         "started_at": "2024-03-01T10:00:05Z", "completed_at": "2024-03-01T10:01:10Z"},
        {"name": "docs", "html_url": "https://github.com/octo/widgets/actions/runs/42/job/2",
         "status": "completed", "conclusion": "skipped",
         "started_at": "2024-03-01T10:00:05Z", "completed_at": "2024-03-01T10:00:05Z"},
        {"name": "test", "html_url": "https://github.com/octo/widgets/actions/runs/42/job/3",
         "status": "completed", "conclusion": "failure",
         "started_at": "2024-03-01T10:00:05Z", "completed_at": "2024-03-01T10:00:50Z"},
        {"name": "notify", "html_url": "https://github.com/octo/widgets/actions/runs/42/job/4",
         "status": "in_progress", "conclusion": null,
         "started_at": "2024-03-01T10:01:20Z", "completed_at": null}
    ]
}"#;

pub const PULL_JSON: &str = r#"{"number": 5, "title": "Add widgets"}"#;
