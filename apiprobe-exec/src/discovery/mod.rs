//! Locating a machine-readable API description from a user-supplied URL.

mod base_url;
mod candidates;
mod loader;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::DiscoveryConfig;
use crate::http::{HttpClient, HttpError, HttpRequestParts, ReqwestHttpClient};

pub use candidates::candidates;
pub use loader::load_spec_file;

/// A raw API description and the location it was obtained from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpecDocument {
    pub source_url: String,
    pub raw: JsonValue,
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("could not find a valid OpenAPI document in {attempted} locations")]
    NotFound { attempted: usize },
    #[error("failed to load description: {0}")]
    Load(String),
    #[error(transparent)]
    Client(#[from] HttpError),
}

/// Why a candidate did not win. Only ever logged.
#[derive(Debug)]
enum CandidateMiss {
    Status(u16),
    NotJson(String),
    Transport(HttpError),
}

impl std::fmt::Display for CandidateMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::NotJson(e) => write!(f, "body is not JSON: {e}"),
            Self::Transport(e) => write!(f, "{e}"),
        }
    }
}

pub struct SpecDiscoverer {
    http: Arc<dyn HttpClient>,
    config: DiscoveryConfig,
}

impl SpecDiscoverer {
    pub fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let http = ReqwestHttpClient::for_discovery(&config)?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    pub fn with_client(http: Arc<dyn HttpClient>, config: DiscoveryConfig) -> Self {
        Self { http, config }
    }

    /// Resolve `location` to a description: local paths are read from disk,
    /// URLs go through [`SpecDiscoverer::discover`].
    pub async fn locate(&self, location: &str) -> Result<SpecDocument, DiscoveryError> {
        if loader::is_remote(location) {
            self.discover(location).await
        } else {
            load_spec_file(Path::new(location))
        }
    }

    /// Fetch every candidate for `seed` concurrently and return the first one
    /// that answers 200 with a JSON object body. The remaining requests are
    /// aborted as soon as a winner is known.
    pub async fn discover(&self, seed: &str) -> Result<SpecDocument, DiscoveryError> {
        let urls = candidates(seed);
        let attempted = urls.len();

        let mut set = JoinSet::new();
        for url in urls {
            let http = Arc::clone(&self.http);
            let user_agent = self.config.user_agent.clone();
            let timeout = self.config.timeout;
            set.spawn(async move {
                debug!(url = %url, "checking candidate");
                let outcome = fetch_candidate(http.as_ref(), &url, &user_agent, timeout).await;
                (url, outcome)
            });
        }

        while let Some(joined) = set.join_next().await {
            let (url, outcome) = match joined {
                Ok(v) => v,
                Err(e) => {
                    debug!(error = %e, "candidate task did not complete");
                    continue;
                }
            };
            match outcome {
                Ok(raw) => {
                    set.abort_all();
                    info!(url = %url, "found API description");
                    return Ok(SpecDocument {
                        source_url: url,
                        raw,
                    });
                }
                Err(miss) => debug!(url = %url, reason = %miss, "candidate rejected"),
            }
        }

        Err(DiscoveryError::NotFound { attempted })
    }
}

async fn fetch_candidate(
    http: &dyn HttpClient,
    url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<JsonValue, CandidateMiss> {
    let mut req = HttpRequestParts::get(url);
    req.headers
        .insert("User-Agent".to_string(), user_agent.to_string());

    let resp = http
        .send(req, timeout)
        .await
        .map_err(CandidateMiss::Transport)?;
    if resp.status != 200 {
        return Err(CandidateMiss::Status(resp.status));
    }
    match serde_json::from_slice(&resp.body) {
        Ok(doc @ JsonValue::Object(_)) => Ok(doc),
        Ok(_) => Err(CandidateMiss::NotJson("root is not an object".to_string())),
        Err(e) => Err(CandidateMiss::NotJson(e.to_string())),
    }
}
