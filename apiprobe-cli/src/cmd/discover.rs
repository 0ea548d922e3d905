use serde::Serialize;

use crate::exit_codes;
use crate::output::emit;
use crate::{DiscoveryArgs, OutputArgs};

use super::config::locate_spec;

#[derive(Serialize)]
struct DiscoverResult {
    source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    document: serde_json::Value,
}

pub async fn discover_cmd(url: &str, discovery: DiscoveryArgs, output: OutputArgs) -> i32 {
    let doc = match locate_spec(url, &discovery, &output).await {
        Ok(d) => d,
        Err(code) => return code,
    };

    let result = DiscoverResult {
        title: doc.title().map(String::from),
        version: doc.version().map(String::from),
        base_url: doc.default_base_url(),
        source_url: doc.source_url,
        document: doc.raw,
    };

    emit(&output, &result, |r| {
        println!("Found description at {}", r.source_url);
        if let Some(title) = &r.title {
            println!("  Title: {title} {}", r.version.as_deref().unwrap_or(""));
        }
        if let Some(base) = &r.base_url {
            println!("  Base URL: {base}");
        }
        let paths = r
            .document
            .get("paths")
            .and_then(|p| p.as_object())
            .map_or(0, |p| p.len());
        println!("  Paths: {paths}");
    });

    exit_codes::SUCCESS
}
