pub mod collector;
pub mod concurrent;
pub mod config;
pub mod engine;
pub mod error;
pub mod http_client;
pub mod output;
pub mod probe;
pub mod sink;
pub mod target;
pub mod utils;
pub mod wordlist;

// re-export the types most callers need
pub use crate::collector::ResultCollector;
pub use crate::concurrent::RunSummary;
pub use crate::config::{Concurrency, Config};
pub use crate::engine::Engine;
pub use crate::error::{BruteError, TransportError};
pub use crate::probe::{HitRecord, ProbeOutcome, Prober, Transport};
pub use crate::sink::EventSink;
pub use crate::target::Target;
