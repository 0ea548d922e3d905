use std::collections::HashSet;

use serde_json::Value as JsonValue;

/// Follow a local `$ref` chain (`#/components/...`) to the object it names.
pub(crate) fn resolve_ref<'a>(
    doc: &'a JsonValue,
    ref_str: &str,
) -> Result<&'a JsonValue, RefError> {
    let mut visited = HashSet::new();
    let mut current = ref_str.to_string();
    loop {
        // Only local refs: "#/..."
        let Some(pointer) = current.strip_prefix('#') else {
            return Err(RefError::ExternalRef(current));
        };
        if !visited.insert(current.clone()) {
            return Err(RefError::Cycle(current));
        }
        let target = doc
            .pointer(pointer)
            .ok_or_else(|| RefError::NotFound(current.clone()))?;
        match target.get("$ref").and_then(|v| v.as_str()) {
            Some(next) => current = next.to_string(),
            None => return Ok(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
    #[error("unsupported external $ref: {0}")]
    ExternalRef(String),
    #[error("unresolvable $ref: {0}")]
    NotFound(String),
    #[error("cyclic $ref: {0}")]
    Cycle(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn follows_chained_refs() {
        let doc = json!({
            "components": {"parameters": {
                "a": {"$ref": "#/components/parameters/b"},
                "b": {"name": "id", "in": "path"}
            }}
        });
        let v = resolve_ref(&doc, "#/components/parameters/a").unwrap();
        assert_eq!(v["name"], "id");
    }

    #[test]
    fn detects_cycles_and_external_refs() {
        let doc = json!({"components": {"parameters": {
            "a": {"$ref": "#/components/parameters/b"},
            "b": {"$ref": "#/components/parameters/a"}
        }}});
        assert!(matches!(
            resolve_ref(&doc, "#/components/parameters/a"),
            Err(RefError::Cycle(_))
        ));
        assert!(matches!(
            resolve_ref(&doc, "other.yaml#/x"),
            Err(RefError::ExternalRef(_))
        ));
    }
}
