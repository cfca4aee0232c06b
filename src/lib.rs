// src/lib.rs
pub mod config;
pub mod identity;
pub mod metrics;
pub mod probe;

pub use identity::ProductHeader;
pub use probe::{ProbeOutcome, ProbeTarget, Prober};
