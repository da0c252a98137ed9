//! Gateway fallback — ordered retry chain with per-gateway timeouts.
//!
//! When a gateway fails (timeout, rate limit, error), automatically tries
//! the next gateway in the configured chain. A single-entry chain is the
//! plain caller-imposed-timeout case: a slow call past its bound is treated
//! identically to any other gateway failure.

use admitdesk_core::error::GatewayError;
use admitdesk_core::gateway::{CompletionGateway, CompletionRequest};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A gateway that wraps an ordered list of gateways and falls back on failure.
pub struct GatewayChain {
    name: String,
    chain: Vec<ChainEntry>,
}

/// A single entry in the chain.
struct ChainEntry {
    gateway: Arc<dyn CompletionGateway>,
    timeout: Duration,
}

impl GatewayChain {
    /// Create a new chain with no entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain: Vec::new(),
        }
    }

    /// Add a gateway to the chain with a custom timeout.
    pub fn add(mut self, gateway: Arc<dyn CompletionGateway>, timeout: Duration) -> Self {
        self.chain.push(ChainEntry { gateway, timeout });
        self
    }

    /// Add a gateway with the default timeout (30s).
    pub fn add_default(self, gateway: Arc<dyn CompletionGateway>) -> Self {
        self.add(gateway, DEFAULT_TIMEOUT)
    }

    /// Number of gateways in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

#[async_trait]
impl CompletionGateway for GatewayChain {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let mut last_error = GatewayError::NotConfigured("No gateways in chain".into());

        for (i, entry) in self.chain.iter().enumerate() {
            let gateway_name = entry.gateway.name().to_string();

            info!(
                gateway = %gateway_name,
                attempt = i + 1,
                total = self.chain.len(),
                "Chain: trying gateway"
            );

            match tokio::time::timeout(entry.timeout, entry.gateway.complete(request.clone()))
                .await
            {
                Ok(Ok(text)) => return Ok(text),
                Ok(Err(e)) => {
                    warn!(
                        gateway = %gateway_name,
                        error = %e,
                        "Chain: gateway failed, trying next"
                    );
                    last_error = e;
                }
                Err(_) => {
                    warn!(
                        gateway = %gateway_name,
                        timeout_secs = entry.timeout.as_secs(),
                        "Chain: gateway timed out, trying next"
                    );
                    last_error = GatewayError::Timeout(format!(
                        "Gateway '{}' timed out after {}s",
                        gateway_name,
                        entry.timeout.as_secs()
                    ));
                }
            }
        }

        Err(last_error)
    }

    async fn health_check(&self) -> Result<bool, GatewayError> {
        for entry in &self.chain {
            if let Ok(true) = entry.gateway.health_check().await {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// A mock gateway that always fails.
    struct FailingGateway {
        name: String,
        error: GatewayError,
        call_count: Mutex<usize>,
    }

    impl FailingGateway {
        fn new(name: &str, error: GatewayError) -> Self {
            Self {
                name: name.into(),
                error,
                call_count: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl CompletionGateway for FailingGateway {
        fn name(&self) -> &str {
            &self.name
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<String, GatewayError> {
            *self.call_count.lock().unwrap() += 1;
            Err(self.error.clone())
        }

        async fn health_check(&self) -> Result<bool, GatewayError> {
            Ok(false)
        }
    }

    /// A mock gateway that always succeeds.
    struct SuccessGateway {
        name: String,
        call_count: Mutex<usize>,
    }

    impl SuccessGateway {
        fn new(name: &str) -> Self {
            Self {
                name: name.into(),
                call_count: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl CompletionGateway for SuccessGateway {
        fn name(&self) -> &str {
            &self.name
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<String, GatewayError> {
            *self.call_count.lock().unwrap() += 1;
            Ok("generated answer".into())
        }
    }

    /// A mock gateway that hangs forever (for timeout testing).
    struct HangingGateway;

    #[async_trait]
    impl CompletionGateway for HangingGateway {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }
    }

    fn test_request() -> CompletionRequest {
        CompletionRequest::new("tell me about the fee structure")
    }

    #[tokio::test]
    async fn first_gateway_succeeds() {
        let g1 = Arc::new(SuccessGateway::new("primary"));
        let g2 = Arc::new(SuccessGateway::new("secondary"));

        let chain = GatewayChain::new("test")
            .add_default(g1.clone())
            .add_default(g2.clone());

        let result = chain.complete(test_request()).await;
        assert_eq!(result.unwrap(), "generated answer");
        assert_eq!(g1.calls(), 1);
        assert_eq!(g2.calls(), 0);
    }

    #[tokio::test]
    async fn falls_back_on_failure() {
        let g1 = Arc::new(FailingGateway::new(
            "primary",
            GatewayError::ApiError {
                status_code: 500,
                message: "Internal Server Error".into(),
            },
        ));
        let g2 = Arc::new(SuccessGateway::new("secondary"));

        let chain = GatewayChain::new("test")
            .add_default(g1.clone())
            .add_default(g2.clone());

        let result = chain.complete(test_request()).await;
        assert_eq!(result.unwrap(), "generated answer");
        assert_eq!(g1.calls(), 1);
        assert_eq!(g2.calls(), 1);
    }

    #[tokio::test]
    async fn all_gateways_fail() {
        let g1 = Arc::new(FailingGateway::new(
            "primary",
            GatewayError::Network("conn refused".into()),
        ));
        let g2 = Arc::new(FailingGateway::new(
            "secondary",
            GatewayError::AuthenticationFailed("bad key".into()),
        ));

        let chain = GatewayChain::new("test")
            .add_default(g1.clone())
            .add_default(g2.clone());

        let result = chain.complete(test_request()).await;

        // Last error should be from the last gateway
        match result.unwrap_err() {
            GatewayError::AuthenticationFailed(_) => {}
            other => panic!("Expected AuthenticationFailed, got: {other:?}"),
        }
        assert_eq!(g1.calls(), 1);
        assert_eq!(g2.calls(), 1);
    }

    #[tokio::test]
    async fn timeout_triggers_fallback() {
        let g1 = Arc::new(HangingGateway);
        let g2 = Arc::new(SuccessGateway::new("secondary"));

        let chain = GatewayChain::new("test")
            .add(g1, Duration::from_millis(50))
            .add_default(g2.clone());

        let result = chain.complete(test_request()).await;
        assert!(result.is_ok());
        assert_eq!(g2.calls(), 1);
    }

    #[tokio::test]
    async fn single_entry_timeout_reported_as_timeout() {
        let chain = GatewayChain::new("test").add(Arc::new(HangingGateway), Duration::from_millis(50));

        match chain.complete(test_request()).await.unwrap_err() {
            GatewayError::Timeout(msg) => assert!(msg.contains("hanging")),
            other => panic!("Expected Timeout, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_chain_returns_not_configured() {
        let chain = GatewayChain::new("empty");
        match chain.complete(test_request()).await.unwrap_err() {
            GatewayError::NotConfigured(_) => {}
            other => panic!("Expected NotConfigured, got: {other:?}"),
        }
    }

    #[test]
    fn chain_length() {
        let chain = GatewayChain::new("test")
            .add_default(Arc::new(SuccessGateway::new("a")))
            .add_default(Arc::new(SuccessGateway::new("b")));
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }

    #[tokio::test]
    async fn health_check_any_healthy() {
        let chain = GatewayChain::new("test")
            .add_default(Arc::new(FailingGateway::new(
                "bad",
                GatewayError::Network("down".into()),
            )))
            .add_default(Arc::new(SuccessGateway::new("good")));

        assert!(chain.health_check().await.unwrap());
    }
}
