//! Scan strategies: how the candidate set is turned into probes.
//!
//! Every strategy probes each candidate at most once and reports each outcome
//! exactly once, to the sink and (for hits) to the collector, as soon as it is
//! classified. Completion order between candidates is unspecified.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{AbortHandle, JoinError};
use tokio_util::sync::CancellationToken;

use crate::collector::ResultCollector;
use crate::config::Concurrency;
use crate::probe::{ProbeOutcome, Prober};
use crate::sink::EventSink;
use crate::target::Target;

/// Counts for one finished (or cancelled) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub probed: usize,
    pub hits: usize,
    pub misses: usize,
    pub errors: usize,
    pub cancelled: bool,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
struct Tally {
    hits: AtomicUsize,
    misses: AtomicUsize,
    errors: AtomicUsize,
}

impl Tally {
    fn summary(&self, total: usize, cancelled: bool, elapsed: Duration) -> RunSummary {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let errors = self.errors.load(Ordering::Relaxed);
        RunSummary { total, probed: hits + misses + errors, hits, misses, errors, cancelled, elapsed }
    }
}

/// Everything a single probe needs, shared by all probes of a run.
pub struct ProbeJob {
    target: Target,
    prober: Prober,
    sink: Arc<dyn EventSink>,
}

impl ProbeJob {
    pub fn new(target: Target, prober: Prober, sink: Arc<dyn EventSink>) -> Self {
        Self { target, prober, sink }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    async fn probe_and_report(&self, candidate: &str, collector: &ResultCollector, tally: &Tally) {
        let url = self.target.url_for(candidate);
        let outcome = self.prober.probe(candidate, url).await;
        self.deliver(outcome, collector, tally);
    }

    fn deliver(&self, outcome: ProbeOutcome, collector: &ResultCollector, tally: &Tally) {
        // A hit is in the collector before the sink hears about it.
        if let ProbeOutcome::Hit(hit) = &outcome {
            collector.push(hit.clone());
        }
        self.sink.record(&outcome);
        match outcome {
            ProbeOutcome::Hit(_) => {
                tally.hits.fetch_add(1, Ordering::Relaxed);
            }
            ProbeOutcome::Miss { .. } => {
                tally.misses.fetch_add(1, Ordering::Relaxed);
            }
            ProbeOutcome::Error { .. } => {
                tally.errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// A way of probing a whole candidate set.
#[async_trait]
pub trait Scan: Send + Sync {
    async fn scan(
        &self,
        candidates: Vec<String>,
        collector: &ResultCollector,
        cancel: &CancellationToken,
    ) -> RunSummary;
}

/// One probe at a time in word-list order. Kept as a baseline for comparison.
pub struct SequentialScan {
    job: Arc<ProbeJob>,
}

impl SequentialScan {
    pub fn new(job: Arc<ProbeJob>) -> Self {
        Self { job }
    }
}

#[async_trait]
impl Scan for SequentialScan {
    async fn scan(
        &self,
        candidates: Vec<String>,
        collector: &ResultCollector,
        cancel: &CancellationToken,
    ) -> RunSummary {
        let start = Instant::now();
        let total = candidates.len();
        let tally = Tally::default();
        let mut cancelled = false;

        for candidate in &candidates {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                _ = self.job.probe_and_report(candidate, collector, &tally) => {}
            }
        }

        tally.summary(total, cancelled, start.elapsed())
    }
}

/// Admission gate: a counting semaphore in bounded mode, open otherwise.
struct Gate {
    semaphore: Option<Arc<Semaphore>>,
}

impl Gate {
    fn new(concurrency: Concurrency) -> Self {
        let semaphore = match concurrency {
            Concurrency::Bounded(limit) => Some(Arc::new(Semaphore::new(limit.get()))),
            Concurrency::Unbounded | Concurrency::Sequential => None,
        };
        Self { semaphore }
    }

    /// The semaphore is never closed, so acquisition only ever waits.
    async fn admit(&self) -> Option<OwnedSemaphorePermit> {
        match &self.semaphore {
            Some(sem) => sem.clone().acquire_owned().await.ok(),
            None => None,
        }
    }
}

/// Probes run as tokio tasks, either all at once or behind a counting gate.
pub struct ConcurrentScan {
    job: Arc<ProbeJob>,
    concurrency: Concurrency,
}

impl ConcurrentScan {
    pub fn new(job: Arc<ProbeJob>, concurrency: Concurrency) -> Self {
        Self { job, concurrency }
    }
}

#[async_trait]
impl Scan for ConcurrentScan {
    async fn scan(
        &self,
        candidates: Vec<String>,
        collector: &ResultCollector,
        cancel: &CancellationToken,
    ) -> RunSummary {
        let start = Instant::now();
        let total = candidates.len();
        let tally = Arc::new(Tally::default());
        let gate = Gate::new(self.concurrency);

        let mut pending = candidates.into_iter().peekable();
        let mut in_flight: FuturesUnordered<BoxFuture<'static, (String, Result<(), JoinError>)>> =
            FuturesUnordered::new();
        let mut aborts: Vec<AbortHandle> = Vec::new();
        let mut cancelled = false;

        loop {
            if pending.peek().is_none() && in_flight.is_empty() {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                Some((candidate, joined)) = in_flight.next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            // The task died before reporting; report on its behalf.
                            tracing::error!(file=%candidate, "probe task panicked");
                            let outcome = ProbeOutcome::Error {
                                url: self.job.target.url_for(&candidate),
                                filename: candidate,
                                reason: "probe task panicked".to_string(),
                            };
                            self.job.deliver(outcome, collector, &tally);
                        }
                    }
                }
                permit = gate.admit(), if pending.peek().is_some() => {
                    let Some(candidate) = pending.next() else { continue };
                    let job = self.job.clone();
                    let collector = collector.clone();
                    let tally = tally.clone();
                    let name = candidate.clone();
                    let handle = tokio::spawn(async move {
                        let _permit = permit;
                        job.probe_and_report(&candidate, &collector, &tally).await;
                    });
                    aborts.push(handle.abort_handle());
                    in_flight.push(Box::pin(async move { (name, handle.await) }));
                }
            }
        }

        if cancelled {
            for handle in &aborts {
                handle.abort();
            }
            tracing::debug!(abandoned = in_flight.len(), "run cancelled, in-flight probes aborted");
        }

        tally.summary(total, cancelled, start.elapsed())
    }
}

/// Pick the strategy for a concurrency mode.
pub fn strategy(job: Arc<ProbeJob>, concurrency: Concurrency) -> Box<dyn Scan> {
    match concurrency {
        Concurrency::Sequential => Box::new(SequentialScan::new(job)),
        mode => Box::new(ConcurrentScan::new(job, mode)),
    }
}
