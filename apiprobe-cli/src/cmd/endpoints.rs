use apiprobe_core::{model_operations, EndpointSummary};
use serde::Serialize;

use crate::exit_codes;
use crate::output::emit;
use crate::{DiscoveryArgs, OutputArgs};

use super::config::locate_spec;

#[derive(Serialize)]
struct EndpointsResult {
    source_url: String,
    endpoints: Vec<EndpointSummary>,
}

pub async fn endpoints_cmd(source: &str, discovery: DiscoveryArgs, output: OutputArgs) -> i32 {
    let doc = match locate_spec(source, &discovery, &output).await {
        Ok(d) => d,
        Err(code) => return code,
    };

    let result = EndpointsResult {
        endpoints: model_operations(&doc.raw)
            .iter()
            .map(|op| op.to_summary())
            .collect(),
        source_url: doc.source_url,
    };

    emit(&output, &result, |r| {
        println!("Operations in {} (execution order):", r.source_url);
        for (i, ep) in r.endpoints.iter().enumerate() {
            println!("  {:>3}. {:<6} {} ({})", i + 1, ep.method.as_str(), ep.path, ep.operation_id);
        }
    });

    exit_codes::SUCCESS
}
