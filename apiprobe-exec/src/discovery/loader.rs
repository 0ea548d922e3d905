use std::path::Path;

use apiprobe_core::{parse_document_str, DocumentFormat};
use serde_json::Value as JsonValue;

use crate::discovery::{DiscoveryError, SpecDocument};

pub(crate) fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Load a description from disk. JSON and YAML are both accepted.
pub fn load_spec_file(path: &Path) -> Result<SpecDocument, DiscoveryError> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| DiscoveryError::Load(format!("read {}: {e}", path.display())))?;
    let raw: JsonValue = parse_document_str(&body, DocumentFormat::Auto)
        .map_err(|e| DiscoveryError::Load(format!("parse {}: {e}", path.display())))?;
    Ok(SpecDocument {
        source_url: path.display().to_string(),
        raw,
    })
}
