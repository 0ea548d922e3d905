#![forbid(unsafe_code)]

//! Discovery and live execution for apiprobe.
//!
//! Pure modeling and placeholder resolution live in `apiprobe-core`; this
//! crate owns everything that touches the network.

pub mod collab;
pub mod config;
pub mod discovery;
pub mod events;
pub mod executor;
pub mod http;
pub mod orchestrator;
pub mod report;

pub use crate::config::{DiscoveryConfig, ExecutorConfig};
pub use crate::discovery::{candidates, DiscoveryError, SpecDiscoverer, SpecDocument};
pub use crate::executor::Executor;
pub use crate::http::{
    HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient,
};
pub use crate::orchestrator::{find_operation, ExecError, Orchestrator};
pub use crate::report::{RunReport, RunSummary};
