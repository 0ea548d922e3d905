#![forbid(unsafe_code)]

pub mod error;
pub mod modeler;
pub mod parser;
pub mod resolve;
pub mod types;

pub use crate::error::ParseError;
pub use crate::modeler::{model_operations, priority};
pub use crate::parser::{parse_document_str, parse_object_str, DocumentFormat};
pub use crate::resolve::{value_to_string, RuntimeContext};
pub use crate::types::{
    EndpointSummary, HttpMethod, OperationDescriptor, ParameterLocation, ParameterSpec, TestData,
    TestExecutionResult, Variables,
};
