mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    handle_domain, handle_email, handle_send, handle_subscriber, handle_webhook, run_setup,
    DomainCommands, EmailCommands, SendArgs, SubscriberCommands, WebhookCommands,
};
use output::{print_response, ErrorResponse, ExitCode, Response};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use veilmail_client::ApiError;

#[derive(Parser)]
#[command(name = "veilmail")]
#[command(about = "A command-line interface for the VeilMail API", long_about = None)]
struct Cli {
    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an API key and webhook secret
    Setup,
    /// Send an email
    Send(SendArgs),
    /// Email operations
    #[command(subcommand)]
    Email(EmailCommands),
    /// Sending domains
    #[command(subcommand)]
    Domain(DomainCommands),
    /// Audience subscribers
    #[command(subcommand)]
    Subscriber(SubscriberCommands),
    /// Webhook signatures
    #[command(subcommand)]
    Webhook(WebhookCommands),
}

fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // stdout carries the JSON envelope
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let exit = match run(cli.command).await {
        Ok(code) => code,
        Err(e) => report(&e)?,
    };

    if exit != ExitCode::Success {
        tracing::debug!(%exit, "exiting");
        std::process::exit(exit.code());
    }
    Ok(())
}

async fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Setup => run_setup().await,
        Commands::Send(args) => handle_send(args).await,
        Commands::Email(cmd) => handle_email(cmd).await,
        Commands::Domain(cmd) => handle_domain(cmd).await,
        Commands::Subscriber(cmd) => handle_subscriber(cmd).await,
        Commands::Webhook(cmd) => handle_webhook(cmd),
    }
}

/// Print a failed command as an error envelope
fn report(err: &anyhow::Error) -> Result<ExitCode> {
    let (error, exit) = match err.downcast_ref::<ApiError>() {
        Some(api) => (ErrorResponse::from_api(api), ExitCode::for_api_error(api)),
        None => (
            ErrorResponse::internal(format!("{err:#}")),
            ExitCode::PermanentError,
        ),
    };

    print_response(&Response::<()>::error(error))?;
    Ok(exit)
}
