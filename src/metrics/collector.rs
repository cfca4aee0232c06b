// src/metrics/collector.rs
use crate::probe::ProbeOutcome;
use anyhow::Result;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<ProbeMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(ProbeMetrics::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<ProbeMetrics> {
        self.collector.clone()
    }

    /// Text exposition format of everything registered.
    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct ProbeMetrics {
    pub outcomes_total: IntCounterVec,
    pub duration_seconds: Histogram,
}

impl ProbeMetrics {
    pub fn new(registry: &Registry) -> Result<Self> {
        let outcomes_total = IntCounterVec::new(
            Opts::new("probe_outcomes_total", "Completed probes by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(outcomes_total.clone()))?;

        let duration_seconds = Histogram::with_opts(
            HistogramOpts::new("probe_duration_seconds", "Probe duration in seconds")
                .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0]),
        )?;
        registry.register(Box::new(duration_seconds.clone()))?;

        Ok(Self {
            outcomes_total,
            duration_seconds,
        })
    }

    pub fn record(&self, outcome: ProbeOutcome, elapsed: Duration) {
        self.outcomes_total
            .with_label_values(&[outcome.as_str()])
            .inc();
        self.duration_seconds.observe(elapsed.as_secs_f64());
    }

    pub fn count(&self, outcome: ProbeOutcome) -> u64 {
        self.outcomes_total
            .with_label_values(&[outcome.as_str()])
            .get()
    }
}
