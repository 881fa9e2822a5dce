// veilmail-cli/src/commands/setup.rs
use crate::output::{print_error, print_success, print_warning, ExitCode};
use anyhow::Result;
use dialoguer::Password;
use veilmail_client::{Config, ErrorKind, KeyEnvironment, ListParams};

/// Run the interactive setup command
pub async fn run_setup() -> Result<ExitCode> {
    println!("VeilMail CLI Setup");
    println!();

    let api_key = Password::new()
        .with_prompt("Enter your VeilMail API key")
        .interact()?;

    let environment = match KeyEnvironment::of(&api_key) {
        Ok(environment) => environment,
        Err(e) => {
            print_error(&e.to_string());
            return Ok(ExitCode::PermanentError);
        }
    };

    let webhook_secret = Password::new()
        .with_prompt("Webhook signing secret (leave empty to skip)")
        .allow_empty_password(true)
        .interact()?;

    // File values only, env overrides must not be persisted
    let existing = Config::config_path()
        .and_then(|path| Config::load_from(&path))
        .unwrap_or_default();
    let config = Config {
        api_key,
        webhook_secret: (!webhook_secret.is_empty())
            .then_some(webhook_secret)
            .or(existing.webhook_secret),
        ..existing
    };

    println!();
    println!("Validating credentials...");

    let client = config.client()?;
    match client.domains().list(&ListParams::default().limit(1)).await {
        Ok(_) => {}
        Err(e) if matches!(e.kind, ErrorKind::Authentication | ErrorKind::Forbidden) => {
            print_error(&e.to_string());
            eprintln!();
            eprintln!("Create an API key in the VeilMail dashboard under Settings > API Keys.");
            return Ok(ExitCode::PermanentError);
        }
        Err(e) => print_warning(&format!("Could not validate key: {e}")),
    }

    if let Err(e) = config.save() {
        print_error(&format!("Couldn't write config file: {e}"));
        return Ok(ExitCode::PermanentError);
    }

    if environment == KeyEnvironment::Test {
        print_warning("Test key: emails are accepted but never delivered");
    }
    print_success("Credentials saved!");
    println!();
    println!("Try: veilmail domain list");

    Ok(ExitCode::Success)
}
