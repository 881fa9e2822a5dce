// veilmail-cli/src/commands/webhook.rs
use crate::output::{print_response, ErrorResponse, ExitCode, Response};
use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use veilmail_client::{webhook, Config};

#[derive(Subcommand, Clone, Debug)]
pub enum WebhookCommands {
    /// Check a received payload against its X-Signature-Hash header
    Verify {
        /// Raw request body, `-` for stdin
        #[arg(long)]
        body: PathBuf,
        #[arg(long)]
        signature: String,
        /// Defaults to the configured webhook secret
        #[arg(long)]
        secret: Option<String>,
    },
    /// Compute the signature for a payload
    Sign {
        /// Raw request body, `-` for stdin
        #[arg(long)]
        body: PathBuf,
        #[arg(long)]
        secret: Option<String>,
    },
}

pub fn handle_webhook(cmd: WebhookCommands) -> Result<ExitCode> {
    match cmd {
        WebhookCommands::Verify {
            body,
            signature,
            secret,
        } => {
            let secret = resolve_secret(secret)?;
            let payload = read_body(&body)?;

            if !webhook::verify_signature(&payload, signature.trim(), &secret) {
                let resp = Response::<()>::error(ErrorResponse::signature_rejected(
                    "Signature does not match payload".to_string(),
                ));
                print_response(&resp)?;
                return Ok(ExitCode::SignatureRejected);
            }

            print_response(&Response::ok(json!({ "valid": true })))?;
        }
        WebhookCommands::Sign { body, secret } => {
            let secret = resolve_secret(secret)?;
            let payload = read_body(&body)?;

            print_response(&Response::ok(json!({
                "header": webhook::SIGNATURE_HEADER,
                "signature": webhook::sign(&payload, &secret),
            })))?;
        }
    }

    Ok(ExitCode::Success)
}

fn resolve_secret(secret: Option<String>) -> Result<String> {
    match secret {
        Some(secret) => Ok(secret),
        None => Ok(Config::load()?.webhook_secret()?.to_string()),
    }
}

/// Read the body byte for byte; any re-encoding breaks the signature
fn read_body(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
