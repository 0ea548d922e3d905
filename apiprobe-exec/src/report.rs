use apiprobe_core::TestExecutionResult;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_time_ms: f64,
}

impl RunSummary {
    pub fn from_results(results: &[TestExecutionResult]) -> Self {
        let mut summary = Self::default();
        for r in results {
            summary.record(r);
        }
        summary
    }

    pub fn record(&mut self, result: &TestExecutionResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.total_time_ms += result.time;
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Everything a finished run produced, in execution order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub results: Vec<TestExecutionResult>,
}
