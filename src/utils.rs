use std::future::Future;
use std::time::Instant;

/// Await `fut`, logging how long it took.
pub async fn timed<F: Future>(label: &str, fut: F) -> F::Output {
    tracing::info!("'{}' is running...", label);
    let start = Instant::now();
    let out = fut.await;
    let secs = start.elapsed().as_secs_f64();
    tracing::info!("Done in {:.2}s ({})", secs, hms(secs as u64));
    out
}

pub fn hms(total_secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60)
}
