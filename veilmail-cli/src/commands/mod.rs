// veilmail-cli/src/commands/mod.rs
pub mod domain;
pub mod email;
pub mod setup;
pub mod subscriber;
pub mod webhook;

pub use domain::{handle_domain, DomainCommands};
pub use email::{handle_email, handle_send, EmailCommands, SendArgs};
pub use setup::run_setup;
pub use subscriber::{handle_subscriber, SubscriberCommands};
pub use webhook::{handle_webhook, WebhookCommands};
