use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::collector::ResultCollector;
use crate::concurrent::{self, ProbeJob, RunSummary};
use crate::config::Concurrency;
use crate::probe::Prober;
use crate::sink::EventSink;
use crate::target::Target;

/// Probes a candidate set against one target.
///
/// The engine holds no per-run state: results go to the collector passed to
/// each run, so two runs with fresh collectors cannot see each other's hits.
pub struct Engine {
    job: Arc<ProbeJob>,
    concurrency: Concurrency,
}

impl Engine {
    pub fn new(target: Target, prober: Prober, sink: Arc<dyn EventSink>) -> Self {
        Self { job: Arc::new(ProbeJob::new(target, prober, sink)), concurrency: Concurrency::default() }
    }

    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn target(&self) -> &Target {
        self.job.target()
    }

    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    pub async fn run(&self, candidates: Vec<String>, collector: &ResultCollector) -> RunSummary {
        self.run_until_cancelled(candidates, collector, &CancellationToken::new()).await
    }

    /// Stops launching probes once `cancel` fires; probes already in flight are aborted.
    pub async fn run_until_cancelled(
        &self,
        candidates: Vec<String>,
        collector: &ResultCollector,
        cancel: &CancellationToken,
    ) -> RunSummary {
        tracing::debug!(host=%self.job.target(), candidates = candidates.len(), mode = ?self.concurrency, "starting run");
        let scan = concurrent::strategy(self.job.clone(), self.concurrency);
        let summary = scan.scan(candidates, collector, cancel).await;
        tracing::debug!(?summary, "run finished");
        summary
    }
}
