use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::probe::ProbeOutcome;

/// Spawn a background task that appends each hit received on `rx` as one JSON line to `path`.
/// Misses and failures are ignored. The task ends once every sender is dropped.
pub fn spawn_jsonl_writer(path: PathBuf, mut rx: mpsc::UnboundedReceiver<ProbeOutcome>) -> tokio::task::JoinHandle<usize> {
    tokio::spawn(async move {
        let mut written = 0usize;
        match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(mut f) => {
                while let Some(outcome) = rx.recv().await {
                    let Some(hit) = outcome.as_hit() else { continue };
                    match serde_json::to_vec(hit) {
                        Ok(mut line) => {
                            line.push(b'\n');
                            if let Err(e) = f.write_all(&line).await {
                                tracing::error!(error=%e, "failed to write jsonl line");
                            } else {
                                written += 1;
                            }
                        }
                        Err(e) => {
                            tracing::error!(error=%e, "failed to serialize hit");
                        }
                    }
                }
                // flush on close
                if let Err(e) = f.flush().await {
                    tracing::error!(error=%e, "failed to flush jsonl writer");
                }
            }
            Err(e) => {
                tracing::error!(error=%e, path=%path.display(), "failed to open jsonl output file");
            }
        }
        written
    })
}
