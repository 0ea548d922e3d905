use serde::Serialize;

use crate::OutputArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a command result: `text` renders it for humans, `--format json`
/// prints it as a single JSON line.
pub fn emit<T: Serialize>(output: &OutputArgs, result: &T, text: impl FnOnce(&T)) {
    if output.quiet {
        return;
    }
    match output.format {
        OutputFormat::Text => text(result),
        OutputFormat::Json => match serde_json::to_string(result) {
            Ok(json) => println!("{json}"),
            Err(e) => print_error(output, &format!("failed to serialize output: {e}")),
        },
    }
}

pub fn print_error(output: &OutputArgs, message: &str) {
    if output.quiet {
        return;
    }
    match output.format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
