// src/probe/mod.rs
mod outcome;
mod prober;
mod target;
mod transport;

pub use outcome::ProbeOutcome;
pub use prober::{Prober, PROBE_TIMEOUT};
pub use target::{ProbeTarget, TargetError, PROBE_PATH};
pub use transport::{
    HttpTransport, ProbeRequest, ProbeResponse, ReqwestTransport, TransportError,
};
