// veilmail-cli/src/commands/email.rs
use crate::output::{print_response, ExitCode, Response};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};
use veilmail_client::{Config, SendEmail};

#[derive(Args, Clone, Debug)]
pub struct SendArgs {
    /// Sender address on a verified domain
    #[arg(long)]
    pub from: String,
    /// Recipient, repeat for several
    #[arg(long, required = true)]
    pub to: Vec<String>,
    #[arg(short, long)]
    pub subject: String,
    #[arg(long)]
    pub html: Option<String>,
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub cc: Vec<String>,
    #[arg(long)]
    pub bcc: Vec<String>,
    #[arg(long)]
    pub reply_to: Option<String>,
    /// Tag, repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// ISO 8601 timestamp
    #[arg(long)]
    pub scheduled_for: Option<String>,
    #[arg(long)]
    pub template_id: Option<String>,
    /// Template variables as a JSON object
    #[arg(long, requires = "template_id")]
    pub template_data: Option<String>,
    #[arg(long)]
    pub idempotency_key: Option<String>,
}

impl SendArgs {
    pub fn into_email(self) -> Result<SendEmail> {
        let mut email = SendEmail::new(self.from, self.to, self.subject);
        email.html = self.html;
        email.text = self.text;
        email.reply_to = self.reply_to;
        email.scheduled_for = self.scheduled_for;
        email.idempotency_key = self.idempotency_key;

        if !self.cc.is_empty() {
            email = email.cc(self.cc);
        }
        if !self.bcc.is_empty() {
            email = email.bcc(self.bcc);
        }
        if !self.tags.is_empty() {
            email = email.tags(self.tags);
        }
        if let Some(id) = self.template_id {
            let data = match self.template_data {
                Some(raw) => parse_object(&raw).context("--template-data")?,
                None => Map::new(),
            };
            email = email.template(id, data);
        }

        Ok(email)
    }
}

fn parse_object(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("expected a JSON object"),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum EmailCommands {
    /// List sent and scheduled emails
    List {
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        cursor: Option<String>,
        /// e.g. queued, sent, delivered, bounced
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one email
    Get { id: String },
    /// Cancel a scheduled email
    Cancel { id: String },
}

pub async fn handle_send(args: SendArgs) -> Result<ExitCode> {
    let email = args.into_email()?;
    let client = Config::load()?.client()?;

    let sent = client.emails().send(&email).await?;
    print_response(&Response::ok(sent))?;
    Ok(ExitCode::Success)
}

pub async fn handle_email(cmd: EmailCommands) -> Result<ExitCode> {
    let client = Config::load()?.client()?;
    let emails = client.emails();

    let result = match cmd {
        EmailCommands::List {
            limit,
            cursor,
            status,
            tag,
        } => {
            emails
                .list(&json!({
                    "limit": limit,
                    "cursor": cursor,
                    "status": status,
                    "tag": tag,
                }))
                .await?
        }
        EmailCommands::Get { id } => emails.get(&id).await?,
        EmailCommands::Cancel { id } => emails.cancel(&id).await?,
    };

    print_response(&Response::ok(result))?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SendArgs {
        SendArgs {
            from: "hi@acme.dev".to_string(),
            to: vec!["a@x.io".to_string()],
            subject: "Hello".to_string(),
            html: Some("<p>Hi</p>".to_string()),
            text: None,
            cc: vec![],
            bcc: vec![],
            reply_to: None,
            tags: vec!["welcome".to_string()],
            scheduled_for: None,
            template_id: None,
            template_data: None,
            idempotency_key: None,
        }
    }

    #[test]
    fn test_into_email_skips_empty_lists() {
        let email = args().into_email().unwrap();
        assert_eq!(email.to.as_slice(), ["a@x.io".to_string()]);
        assert!(email.cc.is_none());
        assert_eq!(email.tags, Some(vec!["welcome".to_string()]));
    }

    #[test]
    fn test_template_data_must_be_object() {
        let mut bad = args();
        bad.template_id = Some("tpl_1".to_string());
        bad.template_data = Some("[1, 2]".to_string());
        assert!(bad.into_email().is_err());

        let mut good = args();
        good.template_id = Some("tpl_1".to_string());
        good.template_data = Some(r#"{"name": "Ada"}"#.to_string());
        let email = good.into_email().unwrap();
        assert_eq!(email.template_data.unwrap()["name"], json!("Ada"));
    }
}
