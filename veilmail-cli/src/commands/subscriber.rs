// veilmail-cli/src/commands/subscriber.rs
use crate::output::{print_response, ExitCode, Response};
use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;
use veilmail_client::Config;

#[derive(Subcommand, Clone, Debug)]
pub enum SubscriberCommands {
    /// Export an audience's subscribers as CSV
    Export {
        audience_id: String,
        /// Only subscribers with this status
        #[arg(long)]
        status: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_subscriber(cmd: SubscriberCommands) -> Result<ExitCode> {
    let client = Config::load()?.client()?;

    match cmd {
        SubscriberCommands::Export {
            audience_id,
            status,
            output,
        } => {
            let csv = client
                .subscribers()
                .export(&audience_id, &json!({ "status": status }))
                .await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &csv)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    print_response(&Response::ok(json!({
                        "path": path.display().to_string(),
                        "bytes": csv.len(),
                        "rows": csv.lines().count().saturating_sub(1),
                    })))?;
                }
                // Raw CSV keeps the output pipeable
                None => print!("{csv}"),
            }
        }
    }

    Ok(ExitCode::Success)
}
