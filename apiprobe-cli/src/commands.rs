use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the URLs discovery would try for a seed, without fetching any.
    Candidates {
        url: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find the OpenAPI description behind a docs or spec URL.
    Discover {
        url: String,
        #[command(flatten)]
        discovery: DiscoveryArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List operations in the order `run` would execute them.
    Endpoints {
        /// URL or local JSON/YAML file.
        source: String,
        #[command(flatten)]
        discovery: DiscoveryArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Execute the operations against a live server.
    Run {
        /// URL or local JSON/YAML file.
        source: String,
        /// Defaults to the description's first server, or its origin.
        #[arg(long)]
        base_url: Option<String>,
        /// Run only this operation (operationId or METHOD_path).
        #[arg(long)]
        operation: Option<String>,
        /// Comma-separated event sinks: none, stdout, tracing.
        #[arg(long, default_value = "none")]
        events: String,
        #[command(flatten)]
        context: ContextArgs,
        #[command(flatten)]
        discovery: DiscoveryArgs,
        #[command(flatten)]
        exec: ExecArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
