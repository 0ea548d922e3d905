use std::borrow::Cow;
use std::fmt;

use serde_json::Value as JsonValue;

/// The HTTP methods an operation can be modeled with. Anything else found in a
/// path item (`head`, `options`, `trace`, ...) is dropped by the modeler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Map a path-item key to a method, ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Methods that carry a JSON request body when executed.
    pub fn sends_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// A declared operation parameter. `name` and `in` are lifted out; every other
/// field of the Parameter Object is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(flatten, default)]
    pub extra: serde_json::Map<String, JsonValue>,
}

impl ParameterSpec {
    /// Build from a raw Parameter Object. Returns `None` when `name` or `in` is
    /// missing or `in` is not a known location.
    pub fn from_raw(raw: &serde_json::Map<String, JsonValue>) -> Option<Self> {
        let name = raw.get("name")?.as_str()?.to_string();
        let location = raw
            .get("in")
            .and_then(|v| v.as_str())
            .and_then(ParameterLocation::from_str_opt)?;
        let extra = raw
            .iter()
            .filter(|(k, _)| k.as_str() != "name" && k.as_str() != "in")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Some(Self {
            name,
            location,
            extra,
        })
    }

    pub fn is_required(&self) -> bool {
        self.location == ParameterLocation::Path
            || self
                .extra
                .get("required")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
    }
}

/// One normalized `method + path` entry of an API description.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub path: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<JsonValue>,
    #[serde(default)]
    pub responses: serde_json::Map<String, JsonValue>,
    #[serde(default)]
    pub security: Vec<JsonValue>,
}

impl OperationDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            operation_id: None,
            summary: None,
            tags: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: serde_json::Map::new(),
            security: Vec::new(),
        }
    }

    /// The key this operation is looked up by: its `operationId`, or
    /// `METHOD_path` when the description does not declare one.
    pub fn key(&self) -> Cow<'_, str> {
        match &self.operation_id {
            Some(id) => Cow::Borrowed(id.as_str()),
            None => Cow::Owned(format!("{}_{}", self.method, self.path)),
        }
    }

    pub fn path_parameters(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Path)
    }

    /// Reduced view handed to the test-data generator and failure advisor.
    pub fn to_summary(&self) -> EndpointSummary {
        EndpointSummary {
            path: self.path.clone(),
            method: self.method,
            operation_id: self.key().into_owned(),
            parameters: self
                .parameters
                .iter()
                .filter(|p| {
                    matches!(p.location, ParameterLocation::Path | ParameterLocation::Query)
                })
                .map(|p| p.name.clone())
                .collect(),
            body_schema: self.request_body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    pub path: String,
    pub method: HttpMethod,
    /// Always populated; falls back to `METHOD_path`.
    pub operation_id: String,
    /// Names of path and query parameters only.
    pub parameters: Vec<String>,
    #[serde(rename = "body_schema", default, skip_serializing_if = "Option::is_none")]
    pub body_schema: Option<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_falls_back_to_method_and_path() {
        let mut op = OperationDescriptor::new(HttpMethod::Post, "/users");
        assert_eq!(op.key(), "POST_/users");
        op.operation_id = Some("createUser".to_string());
        assert_eq!(op.key(), "createUser");
    }

    #[test]
    fn method_keys_are_case_insensitive() {
        assert_eq!(HttpMethod::from_key("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("Patch"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_key("head"), None);
    }

    #[test]
    fn parameter_keeps_raw_fields() {
        let raw = json!({
            "name": "limit",
            "in": "query",
            "required": true,
            "schema": {"type": "integer"}
        });
        let p = ParameterSpec::from_raw(raw.as_object().unwrap()).unwrap();
        assert_eq!(p.location, ParameterLocation::Query);
        assert!(p.is_required());
        assert_eq!(p.extra["schema"]["type"], "integer");
        assert!(!p.extra.contains_key("name"));
    }

    #[test]
    fn summary_keeps_only_path_and_query_names() {
        let mut op = OperationDescriptor::new(HttpMethod::Get, "/users/{id}");
        for (name, loc) in [("id", "path"), ("verbose", "query"), ("X-Trace", "header")] {
            let raw = json!({"name": name, "in": loc});
            op.parameters
                .push(ParameterSpec::from_raw(raw.as_object().unwrap()).unwrap());
        }
        let s = op.to_summary();
        assert_eq!(s.operation_id, "GET_/users/{id}");
        assert_eq!(s.parameters, vec!["id".to_string(), "verbose".to_string()]);
    }
}
