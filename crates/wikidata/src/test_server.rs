// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! A minimal local HTTP server serving canned responses
//!

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned response, served for requests whose request line contains
/// `matches`.  Clones share the hit counter.
#[derive(Debug, Clone)]
pub struct Route {
    matches: &'static str,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    hits: Arc<AtomicUsize>,
}

impl Route {
    pub fn new(
        matches: &'static str,
        status: u16,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Self {
        Self {
            matches,
            status,
            content_type,
            body,
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Serve a file from `test-data/` as SPARQL JSON results
    pub fn fixture(matches: &'static str, file_name: &str) -> Self {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test-data")
            .join(file_name);
        let body = fs::read(path).unwrap();
        Self::new(matches, 200, "application/sparql-results+json", body)
    }

    /// How many requests this route has served
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serves the first matching [`Route`] for each request (404 if none match)
pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let routes = Arc::new(routes);

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                tokio::spawn(async move {
                    // Only GETs are sent, so the request ends with the headers
                    let mut request = Vec::new();
                    let mut buffer = [0; 1024];
                    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                        match stream.read(&mut buffer).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buffer[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&request);
                    let request_line = request.lines().next().unwrap_or_default();

                    let (status, content_type, body) = match routes
                        .iter()
                        .find(|route| request_line.contains(route.matches))
                    {
                        Some(route) => {
                            route.hits.fetch_add(1, Ordering::SeqCst);
                            (route.status, route.content_type, route.body.clone())
                        }
                        None => (404, "text/plain", b"Not Found".to_vec()),
                    };

                    let head = format!(
                        "HTTP/1.1 {status} Canned\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = stream.write_all(head.as_bytes()).await;
                    let _ = stream.write_all(&body).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{address}"),
        }
    }

    /// The full URL of a path on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
