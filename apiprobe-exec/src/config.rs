use std::time::Duration;

/// User-Agent sent while probing for a description; some gateways reject
/// empty or unknown agents.
pub const BROWSER_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/124.0 Safari/537.36"
);

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Per-candidate timeout.
    pub timeout: Duration,
    pub user_agent: String,
    /// Accept self-signed certificates (internal staging hosts).
    pub accept_invalid_certs: bool,
    pub max_redirects: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept_invalid_certs: true,
            max_redirects: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Per-step request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("apiprobe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
