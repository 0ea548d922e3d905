mod request;
mod response;

use std::sync::Arc;
use std::time::Instant;

use apiprobe_core::{OperationDescriptor, TestData, TestExecutionResult, Variables};
use tracing::{debug, warn};

use crate::config::ExecutorConfig;
use crate::http::{HttpClient, HttpError, ReqwestHttpClient};

pub use request::{build_request, request_body};
pub use response::response_value;

/// Runs one operation against a live server. One request in, one classified
/// result out; never retries.
pub struct Executor {
    http: Arc<dyn HttpClient>,
    config: ExecutorConfig,
}

impl Executor {
    pub fn new(config: ExecutorConfig) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::for_execution(&config)?;
        Ok(Self::with_client(Arc::new(http), config))
    }

    pub fn with_client(http: Arc<dyn HttpClient>, config: ExecutorConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute `op`. Transport failures are folded into the returned result.
    pub async fn execute(
        &self,
        op: &OperationDescriptor,
        base_url: &str,
        variables: &Variables,
        test_data: &TestData,
    ) -> TestExecutionResult {
        let req = build_request(op, base_url, variables, test_data);
        debug!(method = %req.method, url = %req.url, "sending request");

        let started = Instant::now();
        match self.http.send(req, self.config.timeout).await {
            Ok(resp) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                let body = response_value(&resp);
                TestExecutionResult::completed(op, resp.status, elapsed_ms, Some(body))
            }
            Err(e) => {
                warn!(method = %op.method, path = %op.path, error = %e, "request failed");
                TestExecutionResult::transport_failure(op, e.to_string())
            }
        }
    }
}
