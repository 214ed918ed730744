use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::probe::transport::Transport;

/// A candidate that answered with status 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitRecord {
    pub filename: String,
    pub status: u16,
    pub url: String,
    pub content_length: Option<u64>,
}

/// Terminal state of one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Hit(HitRecord),
    Miss { filename: String, status: u16, url: String },
    Error { filename: String, url: String, reason: String },
}

impl ProbeOutcome {
    pub fn filename(&self) -> &str {
        match self {
            ProbeOutcome::Hit(hit) => &hit.filename,
            ProbeOutcome::Miss { filename, .. } | ProbeOutcome::Error { filename, .. } => filename,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ProbeOutcome::Hit(hit) => &hit.url,
            ProbeOutcome::Miss { url, .. } | ProbeOutcome::Error { url, .. } => url,
        }
    }

    pub fn as_hit(&self) -> Option<&HitRecord> {
        match self {
            ProbeOutcome::Hit(hit) => Some(hit),
            _ => None,
        }
    }
}

/// Runs one existence check and classifies it. Only exactly 200 is a hit;
/// other 2xx codes count as misses.
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl Prober {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn probe(&self, filename: &str, url: String) -> ProbeOutcome {
        let res = tokio::time::timeout(self.timeout, self.transport.head(&url)).await;
        match res {
            Ok(Ok(resp)) if resp.status == 200 => ProbeOutcome::Hit(HitRecord {
                filename: filename.to_string(),
                status: resp.status,
                url,
                content_length: resp.content_length,
            }),
            Ok(Ok(resp)) => ProbeOutcome::Miss { filename: filename.to_string(), status: resp.status, url },
            Ok(Err(e)) => ProbeOutcome::Error { filename: filename.to_string(), url, reason: e.to_string() },
            Err(_) => ProbeOutcome::Error {
                filename: filename.to_string(),
                url,
                reason: format!("no response within {}ms", self.timeout.as_millis()),
            },
        }
    }
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober").field("timeout", &self.timeout).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::probe::transport::HeadResponse;
    use async_trait::async_trait;

    struct Fixed(Result<HeadResponse, TransportError>);

    #[async_trait]
    impl Transport for Fixed {
        async fn head(&self, _url: &str) -> Result<HeadResponse, TransportError> {
            self.0.clone()
        }
    }

    struct Hang;

    #[async_trait]
    impl Transport for Hang {
        async fn head(&self, _url: &str) -> Result<HeadResponse, TransportError> {
            futures::future::pending().await
        }
    }

    fn prober(t: impl Transport + 'static) -> Prober {
        Prober::new(Arc::new(t), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn status_200_is_hit_with_length() {
        let p = prober(Fixed(Ok(HeadResponse { status: 200, content_length: Some(42) })));
        let out = p.probe("admin", "http://h/admin".into()).await;
        assert_eq!(
            out,
            ProbeOutcome::Hit(HitRecord {
                filename: "admin".into(),
                status: 200,
                url: "http://h/admin".into(),
                content_length: Some(42),
            })
        );
    }

    #[tokio::test]
    async fn missing_length_header_is_none() {
        let p = prober(Fixed(Ok(HeadResponse { status: 200, content_length: None })));
        let out = p.probe("admin", "http://h/admin".into()).await;
        assert_eq!(out.as_hit().unwrap().content_length, None);
    }

    #[tokio::test]
    async fn other_success_codes_are_misses() {
        for status in [201, 204, 301, 403, 404, 500] {
            let p = prober(Fixed(Ok(HeadResponse { status, content_length: Some(1) })));
            let out = p.probe("x", "http://h/x".into()).await;
            assert!(matches!(out, ProbeOutcome::Miss { status: s, .. } if s == status));
        }
    }

    #[tokio::test]
    async fn transport_failure_is_contained() {
        let p = prober(Fixed(Err(TransportError::Connect("refused".into()))));
        let out = p.probe("x", "http://h/x".into()).await;
        match out {
            ProbeOutcome::Error { reason, .. } => assert!(reason.contains("refused")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn hung_request_times_out() {
        let p = prober(Hang);
        assert_eq!(p.timeout(), Duration::from_millis(50));
        let out = p.probe("slow", "http://h/slow".into()).await;
        assert!(matches!(out, ProbeOutcome::Error { .. }));
        assert_eq!(out.filename(), "slow");
        assert_eq!(out.url(), "http://h/slow");
    }
}
