//! `{{key}}` / `{key}` substitution over a merged runtime context.

use serde_json::Value as JsonValue;

use crate::types::{TestData, Variables};

/// Variables and test data merged for one execution step.
///
/// Test data wins over variables when both define the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeContext {
    values: serde_json::Map<String, JsonValue>,
}

impl RuntimeContext {
    pub fn merge(variables: &Variables, test_data: &TestData) -> Self {
        let mut values = variables.clone();
        for (k, v) in test_data {
            values.insert(k.clone(), v.clone());
        }
        Self { values }
    }

    /// Look up a key. Null values count as absent.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// Replace `{{key}}` then `{key}` for every non-null key in the context.
    ///
    /// Placeholders whose key is missing or null are left as they are.
    pub fn resolve(&self, template: &str) -> String {
        let mut out = template.to_string();
        if !out.contains('{') {
            return out;
        }
        for (key, value) in &self.values {
            if value.is_null() {
                continue;
            }
            let rendered = value_to_string(value);
            out = out.replace(&format!("{{{{{key}}}}}"), &rendered);
            out = out.replace(&format!("{{{key}}}"), &rendered);
        }
        out
    }

    /// Single-brace replacement restricted to the given (declared path
    /// parameter) names. A no-op for names the generic pass already handled.
    pub fn resolve_path_params<'a>(
        &self,
        template: &str,
        names: impl IntoIterator<Item = &'a str>,
    ) -> String {
        let mut out = template.to_string();
        for name in names {
            if let Some(value) = self.get(name) {
                out = out.replace(&format!("{{{name}}}"), &value_to_string(value));
            }
        }
        out
    }
}

/// String form used when a value lands in a URL or header.
pub fn value_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
