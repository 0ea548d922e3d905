use apiprobe_core::HttpMethod;
use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        operations: usize,
    },
    StepStarted {
        run_id: Uuid,
        index: usize,
        method: HttpMethod,
        path: String,
    },
    StepFinished {
        run_id: Uuid,
        index: usize,
        method: HttpMethod,
        path: String,
        status: u16,
        passed: bool,
        time_ms: f64,
    },
    RunFinished {
        run_id: Uuid,
        passed: usize,
        failed: usize,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::StepStarted { .. } => "step.started",
            Event::StepFinished { .. } => "step.finished",
            Event::RunFinished { .. } => "run.finished",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Event::RunStarted { run_id, operations } => {
                json!({
                    "type": self.kind(),
                    "run_id": run_id.to_string(),
                    "operations": operations,
                })
            }
            Event::StepStarted { run_id, index, method, path } => {
                json!({
                    "type": self.kind(),
                    "run_id": run_id.to_string(),
                    "index": index,
                    "method": method,
                    "path": path,
                })
            }
            Event::StepFinished { run_id, index, method, path, status, passed, time_ms } => {
                json!({
                    "type": self.kind(),
                    "run_id": run_id.to_string(),
                    "index": index,
                    "method": method,
                    "path": path,
                    "status": status,
                    "passed": passed,
                    "time_ms": time_ms,
                })
            }
            Event::RunFinished { run_id, passed, failed } => {
                json!({
                    "type": self.kind(),
                    "run_id": run_id.to_string(),
                    "passed": passed,
                    "failed": failed,
                })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        match &event {
            Event::StepFinished { method, path, status, passed, time_ms, .. } => {
                info!(%method, %path, status, passed, time_ms, "step finished");
            }
            other => info!(event = %other.to_json(), "{}", other.kind()),
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct Recorder(Arc<Mutex<Vec<&'static str>>>);

    #[async_trait]
    impl EventSink for Recorder {
        async fn emit(&self, event: Event) {
            self.0.lock().unwrap().push(event.kind());
        }
    }

    #[tokio::test]
    async fn composite_forwards_to_every_sink_in_order() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let mut sink = CompositeEventSink::new();
        sink.add(Box::new(Recorder(first.clone())));
        sink.add(Box::new(Recorder(second.clone())));

        let run_id = Uuid::new_v4();
        sink.emit(Event::RunStarted { run_id, operations: 2 }).await;
        sink.emit(Event::RunFinished { run_id, passed: 2, failed: 0 }).await;

        let expected = vec!["run.started", "run.finished"];
        assert_eq!(*first.lock().unwrap(), expected);
        assert_eq!(*second.lock().unwrap(), expected);
    }
}
