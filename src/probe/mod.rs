pub mod prober;
pub mod transport;

pub use prober::{HitRecord, ProbeOutcome, Prober};
pub use transport::{HeadResponse, ReqwestTransport, Transport};
