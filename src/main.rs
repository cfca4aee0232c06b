// src/main.rs
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use enterprise_probe::{
    config::{self, Config},
    metrics::MetricsRegistry,
    ProbeOutcome, ProbeTarget, Prober,
};
use serde::Serialize;
use std::process::ExitCode;
use tracing::info;

#[derive(Serialize)]
struct ProbeReport<'a> {
    target: &'a str,
    outcome: ProbeOutcome,
    checked_at: String,
}

fn exit_code(outcome: ProbeOutcome) -> ExitCode {
    match outcome {
        ProbeOutcome::Matched => ExitCode::SUCCESS,
        ProbeOutcome::Reachable => ExitCode::from(3),
        ProbeOutcome::Unreachable => ExitCode::from(4),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .context("Usage: enterprise-probe <base-url> [config-path]")?;

    let config = match args.next() {
        Some(path) => config::load_config(&path).await?,
        None => Config::default(),
    };

    // Initialize tracing
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in config.logging.directives()? {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let target = ProbeTarget::parse(&base_url)?;
    let product = config.product_header()?;

    let mut prober = Prober::with_default_transport(product)?;
    let registry = if config.metrics.enabled {
        let registry = MetricsRegistry::new()?;
        prober = prober.with_metrics(registry.collector());
        Some(registry)
    } else {
        None
    };

    info!("Probing {} as {}", target, prober.product());
    let outcome = prober.probe(&target).await;
    info!("Probe of {} finished: {}", target, outcome);

    let report = ProbeReport {
        target: target.base_url().as_str(),
        outcome,
        checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(registry) = registry {
        eprint!("{}", String::from_utf8_lossy(&registry.gather()?));
    }

    Ok(exit_code(outcome))
}
