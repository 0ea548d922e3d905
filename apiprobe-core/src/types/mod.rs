mod operation;
mod result;

pub use operation::{
    EndpointSummary, HttpMethod, OperationDescriptor, ParameterLocation, ParameterSpec,
};
pub use result::TestExecutionResult;

/// User-declared session variables, keyed by name.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Concrete test data keyed by operation key (operationId or `METHOD_path`),
/// plus free-form entries such as `headers`.
pub type TestData = serde_json::Map<String, serde_json::Value>;
