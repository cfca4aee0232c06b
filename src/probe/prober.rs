// src/probe/prober.rs
use super::outcome::ProbeOutcome;
use super::target::ProbeTarget;
use super::transport::{HttpTransport, ProbeRequest, ReqwestTransport, TransportError};
use crate::identity::ProductHeader;
use crate::metrics::ProbeMetrics;
use std::sync::Arc;
use tokio::time::{timeout, Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Upper bound on the wait for a probe response.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct Prober {
    transport: Arc<dyn HttpTransport>,
    product: ProductHeader,
    metrics: Option<Arc<ProbeMetrics>>,
}

impl Prober {
    pub fn new(transport: Arc<dyn HttpTransport>, product: ProductHeader) -> Self {
        Self {
            transport,
            product,
            metrics: None,
        }
    }

    /// Prober over a fresh `reqwest` client with redirects disabled.
    pub fn with_default_transport(product: ProductHeader) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(Arc::new(transport), product))
    }

    pub fn with_metrics(mut self, metrics: Arc<ProbeMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn product(&self) -> &ProductHeader {
        &self.product
    }

    pub fn request_for(&self, target: &ProbeTarget) -> ProbeRequest {
        ProbeRequest {
            url: target.probe_url(),
            user_agent: self.product.to_string(),
            timeout: PROBE_TIMEOUT,
        }
    }

    /// Probe `target` once. Never fails: transport errors and timeouts are
    /// reported as `ProbeOutcome::Unreachable`.
    pub async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome {
        let probe_id = Uuid::new_v4();
        let request = self.request_for(target);
        let start = Instant::now();

        debug!(%probe_id, url = %request.url, "Sending probe request");

        // The transport also gets the timeout, but the bound is enforced here
        // regardless of how it honours it.
        let result = timeout(PROBE_TIMEOUT, self.transport.send(request)).await;

        let outcome = match result {
            Ok(Ok(response)) => {
                debug!(%probe_id, status = %response.status, "Probe got a response");
                ProbeOutcome::from_status(response.status)
            }
            Ok(Err(e)) => {
                debug!(%probe_id, error = %e, "Probe request failed");
                ProbeOutcome::Unreachable
            }
            Err(_) => {
                debug!(%probe_id, "Probe timed out after {:?}", PROBE_TIMEOUT);
                ProbeOutcome::Unreachable
            }
        };

        let elapsed = start.elapsed();
        if let Some(metrics) = &self.metrics {
            metrics.record(outcome, elapsed);
        }

        debug!(%probe_id, %outcome, "Probe of {} finished in {:?}", target, elapsed);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRegistry;
    use crate::probe::transport::ProbeResponse;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    enum Behavior {
        Status(StatusCode),
        Fail(fn() -> TransportError),
        Delay(Duration, StatusCode),
    }

    struct ScriptedTransport {
        behavior: Behavior,
        seen: Mutex<Vec<ProbeRequest>>,
    }

    impl ScriptedTransport {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ProbeRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            match &self.behavior {
                Behavior::Status(status) => Ok(ProbeResponse { status: *status }),
                Behavior::Fail(make) => Err(make()),
                Behavior::Delay(delay, status) => {
                    tokio::time::sleep(*delay).await;
                    Ok(ProbeResponse { status: *status })
                }
            }
        }
    }

    fn product() -> ProductHeader {
        ProductHeader::new("GitHubVisualStudio", "2.0.0").unwrap()
    }

    fn target(url: &str) -> ProbeTarget {
        ProbeTarget::parse(url).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_is_matched() {
        let transport = ScriptedTransport::new(Behavior::Status(StatusCode::OK));
        let prober = Prober::new(transport.clone(), product());

        let outcome = prober.probe(&target("https://ghe.example.com")).await;

        assert_eq!(outcome, ProbeOutcome::Matched);
    }

    #[tokio::test]
    async fn test_not_found_and_redirect_are_reachable() {
        for status in [StatusCode::NOT_FOUND, StatusCode::FOUND] {
            let transport = ScriptedTransport::new(Behavior::Status(status));
            let prober = Prober::new(transport, product());
            let outcome = prober.probe(&target("https://example.com")).await;
            assert_eq!(outcome, ProbeOutcome::Reachable);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_unreachable() {
        let transport = ScriptedTransport::new(Behavior::Fail(|| {
            TransportError::Connect("dns error: no such host".to_string())
        }));
        let prober = Prober::new(transport, product());

        let outcome = prober.probe(&target("https://unreachable.invalid")).await;

        assert_eq!(outcome, ProbeOutcome::Unreachable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_response_is_unreachable_at_timeout() {
        let transport = ScriptedTransport::new(Behavior::Delay(
            Duration::from_secs(5),
            StatusCode::OK,
        ));
        let prober = Prober::new(transport, product());
        let start = Instant::now();

        let outcome = prober.probe(&target("https://slow.example.com")).await;

        assert_eq!(outcome, ProbeOutcome::Unreachable);
        let elapsed = start.elapsed();
        assert!(elapsed >= PROBE_TIMEOUT && elapsed < Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_just_inside_timeout_is_classified() {
        let transport = ScriptedTransport::new(Behavior::Delay(
            Duration::from_millis(2900),
            StatusCode::OK,
        ));
        let prober = Prober::new(transport, product());

        let outcome = prober.probe(&target("https://ghe.example.com")).await;

        assert_eq!(outcome, ProbeOutcome::Matched);
    }

    #[tokio::test]
    async fn test_request_shape_is_fixed() {
        let transport = ScriptedTransport::new(Behavior::Status(StatusCode::OK));
        let prober = Prober::new(transport.clone(), product());

        prober
            .probe(&target("https://ghe.example.com/api/v3?per_page=1"))
            .await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url.as_str(), "https://ghe.example.com/site/sha");
        assert_eq!(request.user_agent, "GitHubVisualStudio/2.0.0");
        assert_eq!(request.timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_outcomes_are_recorded_in_metrics() {
        let registry = MetricsRegistry::new().unwrap();
        let transport = ScriptedTransport::new(Behavior::Status(StatusCode::NOT_FOUND));
        let prober = Prober::new(transport, product()).with_metrics(registry.collector());

        prober.probe(&target("https://example.com")).await;
        prober.probe(&target("https://example.com")).await;

        assert_eq!(registry.collector().count(ProbeOutcome::Reachable), 2);
        assert_eq!(registry.collector().count(ProbeOutcome::Matched), 0);
    }
}
