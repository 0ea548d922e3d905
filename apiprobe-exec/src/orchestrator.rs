use std::sync::Arc;

use apiprobe_core::{OperationDescriptor, TestData, TestExecutionResult, Variables};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::ExecutorConfig;
use crate::events::{Event, EventSink, NoOpEventSink};
use crate::executor::Executor;
use crate::http::{HttpClient, HttpError};
use crate::report::{RunReport, RunSummary};

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("no operation matches '{0}'")]
    InvalidOperation(String),
}

/// Drives the executor over a list of operations, one at a time, in list
/// order. A failing step never stops the run.
///
/// The HTTP client lives as long as the orchestrator and is shared by every
/// step it runs.
pub struct Orchestrator {
    executor: Executor,
    events: Arc<dyn EventSink>,
}

impl Orchestrator {
    pub fn new(config: ExecutorConfig) -> Result<Self, HttpError> {
        Ok(Self {
            executor: Executor::new(config)?,
            events: Arc::new(NoOpEventSink),
        })
    }

    pub fn with_client(http: Arc<dyn HttpClient>, config: ExecutorConfig) -> Self {
        Self {
            executor: Executor::with_client(http, config),
            events: Arc::new(NoOpEventSink),
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Run every operation and return one result per operation, in order.
    pub async fn run_all(
        &self,
        operations: &[OperationDescriptor],
        base_url: &str,
        variables: &Variables,
        test_data: &TestData,
    ) -> Vec<TestExecutionResult> {
        self.run_report(operations, base_url, variables, test_data)
            .await
            .results
    }

    /// Run a single operation. Callers chaining values between steps feed the
    /// updated variables/test data into the next call.
    pub async fn run_one(
        &self,
        operation: &OperationDescriptor,
        base_url: &str,
        variables: &Variables,
        test_data: &TestData,
    ) -> TestExecutionResult {
        self.step(Uuid::new_v4(), 0, operation, base_url, variables, test_data)
            .await
    }

    /// Run the operation whose key (operationId, or `METHOD_path`) is `key`.
    pub async fn run_by_id(
        &self,
        operations: &[OperationDescriptor],
        key: &str,
        base_url: &str,
        variables: &Variables,
        test_data: &TestData,
    ) -> Result<TestExecutionResult, ExecError> {
        let operation = find_operation(operations, key)
            .ok_or_else(|| ExecError::InvalidOperation(key.to_string()))?;
        Ok(self.run_one(operation, base_url, variables, test_data).await)
    }

    /// [`Orchestrator::run_all`] plus run id, timestamps and pass/fail counts.
    pub async fn run_report(
        &self,
        operations: &[OperationDescriptor],
        base_url: &str,
        variables: &Variables,
        test_data: &TestData,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, operations = operations.len(), base_url, "run started");
        self.events
            .emit(Event::RunStarted {
                run_id,
                operations: operations.len(),
            })
            .await;

        let mut results = Vec::with_capacity(operations.len());
        let mut summary = RunSummary::default();
        for (index, operation) in operations.iter().enumerate() {
            let result = self
                .step(run_id, index, operation, base_url, variables, test_data)
                .await;
            summary.record(&result);
            results.push(result);
        }

        info!(%run_id, passed = summary.passed, failed = summary.failed, "run finished");
        self.events
            .emit(Event::RunFinished {
                run_id,
                passed: summary.passed,
                failed: summary.failed,
            })
            .await;

        RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            summary,
            results,
        }
    }

    async fn step(
        &self,
        run_id: Uuid,
        index: usize,
        operation: &OperationDescriptor,
        base_url: &str,
        variables: &Variables,
        test_data: &TestData,
    ) -> TestExecutionResult {
        self.events
            .emit(Event::StepStarted {
                run_id,
                index,
                method: operation.method,
                path: operation.path.clone(),
            })
            .await;

        let result = self
            .executor
            .execute(operation, base_url, variables, test_data)
            .await;

        self.events
            .emit(Event::StepFinished {
                run_id,
                index,
                method: result.method,
                path: result.endpoint.clone(),
                status: result.status,
                passed: result.passed,
                time_ms: result.time,
            })
            .await;
        result
    }
}

/// First operation whose key equals `key`.
pub fn find_operation<'a>(
    operations: &'a [OperationDescriptor],
    key: &str,
) -> Option<&'a OperationDescriptor> {
    operations.iter().find(|op| op.key() == key)
}
