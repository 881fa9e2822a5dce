// veilmail-cli/src/commands/domain.rs
use crate::output::{print_response, ExitCode, Response};
use anyhow::Result;
use clap::Subcommand;
use veilmail_client::{Config, ListParams};

#[derive(Subcommand, Clone, Debug)]
pub enum DomainCommands {
    /// List sending domains
    List {
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Re-run DNS verification for a domain
    Verify { id: String },
}

pub async fn handle_domain(cmd: DomainCommands) -> Result<ExitCode> {
    let client = Config::load()?.client()?;
    let domains = client.domains();

    let result = match cmd {
        DomainCommands::List { limit, cursor } => {
            domains.list(&ListParams { limit, cursor }).await?
        }
        DomainCommands::Verify { id } => domains.verify(&id).await?,
    };

    print_response(&Response::ok(result))?;
    Ok(ExitCode::Success)
}
