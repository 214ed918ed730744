use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Commands};
use path_hunter::probe::{Prober, ReqwestTransport};
use path_hunter::sink::{ChannelSink, EventSink, FanoutSink, TracingSink};
use path_hunter::{Config, Engine, ResultCollector, Target};

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Keep reqwest/hyper at INFO so per-connection chatter doesn't drown the hits.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!("path_hunter={crate},reqwest=info,hyper=info,h2=info", crate = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Brute { host, wordlist, dir, limit, concurrency, unbounded, sequential, timeout, out, config } => {
            let mut cfg = match config {
                Some(path) => Config::from_json_file(&path)?,
                None => Config::default(),
            };
            if let Some(host) = host { cfg.host = host; }
            if let Some(wordlist) = wordlist { cfg.wordlist_file = wordlist; }
            if let Some(dir) = dir { cfg.wordlist_dir = dir; }
            if limit.is_some() { cfg.limit = limit; }
            if concurrency.is_some() { cfg.concurrency = concurrency; }
            if unbounded { cfg.concurrency = None; }
            if sequential { cfg.sequential = true; }
            if let Some(timeout) = timeout { cfg.timeout_secs = timeout; }

            run_brute(cfg, out).await?;
        }
    }
    Ok(())
}

async fn run_brute(cfg: Config, out: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    // Everything that can be misconfigured fails here, before the first probe.
    cfg.validate()?;
    let target = Target::parse(&cfg.host)?;
    let mode = cfg.concurrency_mode()?;
    let candidates = path_hunter::wordlist::load_candidates(&cfg.wordlist_dir, &cfg.wordlist_file, cfg.limit)?;

    tracing::info!(host=%target, candidates = candidates.len(), mode = ?mode, timeout = cfg.timeout_secs, "Starting brute");

    let client = path_hunter::http_client::create_probe_client(&cfg).context("failed to build HTTP client")?;
    let prober = Prober::new(Arc::new(ReqwestTransport::new(client)), cfg.timeout());

    let mut sinks: Vec<Box<dyn EventSink>> = vec![Box::new(TracingSink)];
    let writer = match out {
        Some(path) => {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            sinks.push(Box::new(ChannelSink::new(tx)));
            Some(path_hunter::output::spawn_jsonl_writer(path, rx))
        }
        None => None,
    };

    let engine = Engine::new(target, prober, Arc::new(FanoutSink::new(sinks))).with_concurrency(mode);
    let collector = ResultCollector::new();

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, stopping run");
                cancel.cancel();
            }
        })
    };

    let summary = path_hunter::utils::timed("brute", engine.run_until_cancelled(candidates, &collector, &cancel)).await;
    ctrl_c.abort();
    // Releases the pooled session and closes the output channel.
    drop(engine);

    if let Some(writer) = writer {
        match writer.await {
            Ok(written) => tracing::info!(written, "hits written"),
            Err(e) => tracing::error!(error=%e, "jsonl writer task failed"),
        }
    }

    let results = collector.snapshot();
    println!("{}", serde_json::to_string_pretty(&results)?);

    if summary.cancelled {
        eprintln!("[!] Cancelled after {}/{} probes", summary.probed, summary.total);
    }
    eprintln!(
        "[+] {} probed: {} found, {} not found, {} failed",
        summary.probed, summary.hits, summary.misses, summary.errors
    );
    Ok(())
}
