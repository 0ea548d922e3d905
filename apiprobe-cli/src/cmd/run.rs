use std::sync::Arc;

use apiprobe_core::{model_operations, TestData, TestExecutionResult};
use apiprobe_exec::collab::{generate_test_data, FileTestData};
use apiprobe_exec::events::{
    CompositeEventSink, EventSink, NoOpEventSink, StdoutEventSink, TracingEventSink,
};
use apiprobe_exec::{ExecError, Orchestrator, RunSummary};
use serde::Serialize;
use tracing::debug;

use crate::exit_codes;
use crate::output::{emit, print_error, OutputFormat};
use crate::{ContextArgs, DiscoveryArgs, ExecArgs, OutputArgs};

use super::config::{build_executor_config, load_context, locate_spec, merge_set_vars};

#[derive(Serialize)]
struct RunResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    run_id: Option<String>,
    base_url: String,
    summary: RunSummary,
    results: Vec<TestExecutionResult>,
}

#[allow(clippy::too_many_arguments)]
pub async fn run_cmd(
    source: &str,
    base_url: Option<&str>,
    operation: Option<&str>,
    events: &str,
    context: ContextArgs,
    discovery: DiscoveryArgs,
    exec: ExecArgs,
    output: OutputArgs,
) -> i32 {
    let doc = match locate_spec(source, &discovery, &output).await {
        Ok(d) => d,
        Err(code) => return code,
    };
    let operations = model_operations(&doc.raw);

    let base_url = match base_url.map(String::from).or_else(|| doc.default_base_url()) {
        Some(b) => b.trim_end_matches('/').to_string(),
        None => {
            print_error(
                &output,
                "no base URL: the description has no servers; pass --base-url",
            );
            return exit_codes::VALIDATION_FAILED;
        }
    };
    debug!(%base_url, operations = operations.len(), "resolved run target");

    let Some(mut variables) = load_context(context.variables.as_deref(), &output) else {
        return exit_codes::VALIDATION_FAILED;
    };
    merge_set_vars(&mut variables, &context.set_vars);

    let test_data = match &context.test_data {
        Some(path) => {
            let generator = FileTestData::new(path.clone());
            match generate_test_data(&generator, &operations).await {
                Ok(d) => d,
                Err(e) => {
                    print_error(&output, &format!("test data: {e}"));
                    return exit_codes::VALIDATION_FAILED;
                }
            }
        }
        None => TestData::new(),
    };

    let event_sink = match build_event_sink(events) {
        Ok(sink) => sink,
        Err(e) => {
            print_error(&output, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    if output.format == OutputFormat::Json && events.split(',').any(|s| s.trim() == "stdout") {
        print_error(&output, "--events stdout cannot be combined with --format json");
        return exit_codes::VALIDATION_FAILED;
    }

    let orchestrator = match Orchestrator::new(build_executor_config(&exec)) {
        Ok(o) => o.with_event_sink(event_sink),
        Err(e) => {
            print_error(&output, &format!("{e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let result = match operation {
        Some(key) => {
            match orchestrator
                .run_by_id(&operations, key, &base_url, &variables, &test_data)
                .await
            {
                Ok(r) => {
                    let results = vec![r];
                    RunResult {
                        run_id: None,
                        base_url,
                        summary: RunSummary::from_results(&results),
                        results,
                    }
                }
                Err(e @ ExecError::InvalidOperation(_)) => {
                    print_error(&output, &format!("{e}"));
                    return exit_codes::VALIDATION_FAILED;
                }
            }
        }
        None => {
            let report = orchestrator
                .run_report(&operations, &base_url, &variables, &test_data)
                .await;
            RunResult {
                run_id: Some(report.run_id.to_string()),
                base_url,
                summary: report.summary,
                results: report.results,
            }
        }
    };

    emit(&output, &result, print_text);

    if result.summary.all_passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

/// Build the sink for a comma-separated list of `none`, `stdout`, `tracing`.
fn build_event_sink(spec: &str) -> Result<Arc<dyn EventSink>, String> {
    let mut sinks: Vec<Box<dyn EventSink>> = Vec::new();
    for name in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name {
            "none" => {}
            "stdout" => sinks.push(Box::new(StdoutEventSink)),
            "tracing" => sinks.push(Box::new(TracingEventSink)),
            other => return Err(format!("unknown event sink: {other}")),
        }
    }
    Ok(match sinks.pop() {
        None => Arc::new(NoOpEventSink),
        Some(only) if sinks.is_empty() => Arc::from(only),
        Some(last) => {
            let mut composite = CompositeEventSink::new();
            for sink in sinks {
                composite.add(sink);
            }
            composite.add(last);
            Arc::new(composite)
        }
    })
}

fn print_text(result: &RunResult) {
    match &result.run_id {
        Some(id) => println!("Run {id} against {}", result.base_url),
        None => println!("Run against {}", result.base_url),
    }
    for r in &result.results {
        let mark = if r.passed { "PASS" } else { "FAIL" };
        println!(
            "  {mark} {:>3} {:<6} {} ({:.1} ms)",
            r.status,
            r.method.as_str(),
            r.endpoint,
            r.time
        );
        if let Some(err) = &r.error {
            println!("       {err}");
        }
    }
    println!(
        "  Passed: {}  Failed: {}  Total time: {:.1} ms",
        result.summary.passed, result.summary.failed, result.summary.total_time_ms
    );
}
