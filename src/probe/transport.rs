use async_trait::async_trait;
use reqwest::Client;

use crate::error::TransportError;

/// Status line and length header of an existence-only request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    pub content_length: Option<u64>,
}

/// Issues one existence-only request. Implementations must not read a body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn head(&self, url: &str) -> Result<HeadResponse, TransportError>;
}

/// HEAD requests over a shared, pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn head(&self, url: &str) -> Result<HeadResponse, TransportError> {
        let resp = self.client.head(url).send().await?;
        // resp.content_length() reports the (empty) HEAD body, not the header
        let content_length = resp
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok());
        Ok(HeadResponse { status: resp.status().as_u16(), content_length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::create_client;
    use crate::probe::{ProbeOutcome, Prober};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal HTTP/1.1 server with one canned response per path. Returns the
    /// base URL and a channel of request lines seen.
    async fn serve() -> (String, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else { break };
                let tx = tx.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match sock.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&buf).to_string();
                    let line = request.lines().next().unwrap_or_default().to_string();
                    let path = line.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let _ = tx.send(line);
                    let response = match path.as_str() {
                        "/sized" => "HTTP/1.1 200 OK\r\nContent-Length: 1234\r\nConnection: close\r\n\r\n",
                        "/unsized" => "HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n",
                        "/empty" => "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n",
                        "/moved" => "HTTP/1.1 302 Found\r\nLocation: /sized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                        _ => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    };
                    let _ = sock.write_all(response.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });
        (format!("http://{addr}"), rx)
    }

    fn transport() -> ReqwestTransport {
        let client = create_client(Duration::from_secs(5), Duration::from_secs(2), "path-hunter-test").unwrap();
        ReqwestTransport::new(client)
    }

    #[tokio::test]
    async fn reads_status_and_length_header_from_head() {
        let (base, mut requests) = serve().await;
        let t = transport();

        let sized = t.head(&format!("{base}/sized")).await.unwrap();
        assert_eq!(sized, HeadResponse { status: 200, content_length: Some(1234) });
        assert!(requests.recv().await.unwrap().starts_with("HEAD /sized "));

        let unsized_ = t.head(&format!("{base}/unsized")).await.unwrap();
        assert_eq!(unsized_, HeadResponse { status: 200, content_length: None });
    }

    #[tokio::test]
    async fn non_200_and_redirects_are_misses() {
        let (base, mut requests) = serve().await;
        let prober = Prober::new(Arc::new(transport()), Duration::from_secs(5));

        let empty = prober.probe("empty", format!("{base}/empty")).await;
        assert!(matches!(empty, ProbeOutcome::Miss { status: 204, .. }));

        let moved = prober.probe("moved", format!("{base}/moved")).await;
        assert!(matches!(moved, ProbeOutcome::Miss { status: 302, .. }));

        // The redirect target was never requested.
        let mut seen = Vec::new();
        while let Ok(line) = requests.try_recv() {
            seen.push(line);
        }
        assert_eq!(seen.len(), 2, "{seen:?}");
        assert!(seen.iter().all(|l| !l.contains("/sized")));
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        let err = transport().head("http://127.0.0.1:1/admin").await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "{err:?}");

        let prober = Prober::new(Arc::new(transport()), Duration::from_secs(5));
        let out = prober.probe("admin", "http://127.0.0.1:1/admin".into()).await;
        assert!(matches!(out, ProbeOutcome::Error { .. }));
    }
}
