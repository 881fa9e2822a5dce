// veilmail-client/src/resources/mod.rs
pub mod account;
pub mod audiences;
pub mod campaigns;
pub mod content;
pub mod emails;

pub use account::{Domains, Webhooks};
pub use audiences::{Audiences, Properties, Subscribers, Topics};
pub use campaigns::{Analytics, Campaigns};
pub use content::{Feeds, Forms, Sequences, Templates};
pub use emails::{Attachment, Emails, Recipients, SendEmail};

use serde::Serialize;

/// Pagination shared by every list endpoint
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ListParams {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}
