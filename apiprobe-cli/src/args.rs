use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DiscoveryArgs {
    /// Per-candidate timeout in milliseconds.
    #[arg(long, default_value_t = 5000)]
    pub discovery_timeout: u64,
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Reject self-signed certificates while probing.
    #[arg(long)]
    pub strict_tls: bool,
    #[arg(long, default_value_t = 10)]
    pub max_redirects: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExecArgs {
    /// Per-step request timeout in milliseconds.
    #[arg(long, default_value_t = 10000)]
    pub timeout: u64,
}

#[derive(Debug, Args, Clone)]
pub struct ContextArgs {
    /// JSON or YAML object of variables (including an optional `headers` map).
    #[arg(long)]
    pub variables: Option<PathBuf>,
    /// JSON or YAML object of test data keyed by operation.
    #[arg(long)]
    pub test_data: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_vars: Vec<String>,
}
