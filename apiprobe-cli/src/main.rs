use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod logging;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(
    name = "apiprobe",
    version,
    about = "Discover an API's OpenAPI description and test it live"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Candidates { url, output } => cmd::candidates::candidates_cmd(&url, output),
        Command::Discover {
            url,
            discovery,
            output,
        } => cmd::discover::discover_cmd(&url, discovery, output).await,
        Command::Endpoints {
            source,
            discovery,
            output,
        } => cmd::endpoints::endpoints_cmd(&source, discovery, output).await,
        Command::Run {
            source,
            base_url,
            operation,
            events,
            context,
            discovery,
            exec,
            output,
        } => {
            cmd::run::run_cmd(
                &source,
                base_url.as_deref(),
                operation.as_deref(),
                &events,
                context,
                discovery,
                exec,
                output,
            )
            .await
        }
    }
}
