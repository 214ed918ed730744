//! Receivers for per-probe events.
//!
//! A sink sees every terminal outcome at the moment it is classified. It has
//! no way to influence the run: `record` returns nothing and must not block.

use tokio::sync::mpsc::UnboundedSender;

use crate::probe::ProbeOutcome;

pub trait EventSink: Send + Sync {
    fn record(&self, outcome: &ProbeOutcome);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _outcome: &ProbeOutcome) {}
}

/// Hits at info, misses at debug, failures at warn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Hit(hit) => {
                let length = hit.content_length.map(|l| l.to_string()).unwrap_or_else(|| "None".into());
                tracing::info!(
                    "file: {}, status: {}, url: {}, length: {}",
                    hit.filename, hit.status, hit.url, length
                );
            }
            ProbeOutcome::Miss { filename, status, url } => {
                tracing::debug!(file=%filename, status, url=%url, "miss");
            }
            ProbeOutcome::Error { filename, url, reason } => {
                tracing::warn!(file=%filename, url=%url, reason=%reason, "probe failed");
            }
        }
    }
}

/// Forwards a copy of each outcome to a channel. A closed receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<ProbeOutcome>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ProbeOutcome>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn record(&self, outcome: &ProbeOutcome) {
        let _ = self.tx.send(outcome.clone());
    }
}

/// Fans each event out to several sinks in order.
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for FanoutSink {
    fn record(&self, outcome: &ProbeOutcome) {
        for sink in &self.sinks {
            sink.record(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_survives_closed_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        drop(rx);
        sink.record(&ProbeOutcome::Miss { filename: "a".into(), status: 404, url: "http://h/a".into() });
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let (tx1, mut rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx2) = tokio::sync::mpsc::unbounded_channel();
        let sink = FanoutSink::new(vec![
            Box::new(ChannelSink::new(tx1)),
            Box::new(NoopSink),
            Box::new(ChannelSink::new(tx2)),
        ]);
        let ev = ProbeOutcome::Error { filename: "a".into(), url: "http://h/a".into(), reason: "reset".into() };
        sink.record(&ev);
        assert_eq!(rx1.try_recv().unwrap(), ev);
        assert_eq!(rx2.try_recv().unwrap(), ev);
    }
}
