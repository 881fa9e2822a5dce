// veilmail-client/src/resources/emails.rs
use crate::endpoint::{encode_body, resource, Endpoint};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use veilmail_api::{ApiError, HttpClient, JsonObject, Method, Query};

/// One address or several; always sent as a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Recipients::One(addr) => std::slice::from_ref(addr),
            Recipients::Many(addrs) => addrs,
        }
    }
}

impl Serialize for Recipients {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl From<&str> for Recipients {
    fn from(addr: &str) -> Self {
        Recipients::One(addr.to_string())
    }
}

impl From<String> for Recipients {
    fn from(addr: String) -> Self {
        Recipients::One(addr)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addrs: Vec<String>) -> Self {
        Recipients::Many(addrs)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addrs: Vec<&str>) -> Self {
        Recipients::Many(addrs.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Recipients {
    fn from(addrs: [&str; N]) -> Self {
        Recipients::Many(addrs.iter().map(|a| a.to_string()).collect())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    /// Base64 content; use `url` instead for hosted files
    pub content: Option<String>,
    pub url: Option<String>,
    pub content_type: String,
    pub content_id: Option<String>,
}

/// Parameters for sending one email.
///
/// Unset fields serialize as `null` and are dropped before the request is
/// sent.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendEmail {
    pub from: String,
    pub to: Recipients,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub cc: Option<Recipients>,
    pub bcc: Option<Recipients>,
    pub reply_to: Option<String>,
    pub template_id: Option<String>,
    pub template_data: Option<Map<String, Value>>,
    pub scheduled_for: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Map<String, Value>>,
    pub idempotency_key: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
    pub topic_id: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub unsubscribe_url: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
}

impl SendEmail {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<Recipients>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            html: None,
            text: None,
            cc: None,
            bcc: None,
            reply_to: None,
            template_id: None,
            template_data: None,
            scheduled_for: None,
            tags: None,
            metadata: None,
            idempotency_key: None,
            attachments: None,
            topic_id: None,
            type_: None,
            unsubscribe_url: None,
            headers: None,
        }
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn cc(mut self, cc: impl Into<Recipients>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    pub fn bcc(mut self, bcc: impl Into<Recipients>) -> Self {
        self.bcc = Some(bcc.into());
        self
    }

    pub fn reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    pub fn template(mut self, id: impl Into<String>, data: Map<String, Value>) -> Self {
        self.template_id = Some(id.into());
        self.template_data = Some(data);
        self
    }

    pub fn scheduled_for(mut self, when: impl Into<String>) -> Self {
        self.scheduled_for = Some(when.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

const SEND: Endpoint = Endpoint::new(Method::Post, "/v1/emails");
const SEND_BATCH: Endpoint = Endpoint::new(Method::Post, "/v1/emails/batch");

resource! {
    /// Email sending and management
    Emails {
        /// List emails, filtered by `limit`, `cursor`, `status`, `tag`, `after`, `before`
        query list() => Get "/v1/emails";
        call get(id) => Get "/v1/emails/{id}";
        /// Cancel a scheduled email
        call cancel(id) => Post "/v1/emails/{id}/cancel";
        /// Reschedule a scheduled email
        body update(id) => Patch "/v1/emails/{id}";
        /// Tracked link analytics
        query links(id) => Get "/v1/emails/{id}/links";
    }
}

impl<C: HttpClient> Emails<'_, C> {
    /// Send a single email
    pub async fn send(&self, email: &SendEmail) -> Result<JsonObject, ApiError> {
        let body = encode_body(email)?;
        SEND.call(self.transport, &[], &Query::new(), Some(body))
            .await
    }

    /// Send up to 100 emails in one request
    pub async fn send_batch(&self, emails: &[SendEmail]) -> Result<JsonObject, ApiError> {
        // Nulls inside lists survive the transport filter, so strip each entry here
        let emails = emails
            .iter()
            .map(encode_body)
            .collect::<Result<Vec<_>, _>>()?;
        SEND_BATCH
            .call(
                self.transport,
                &[],
                &Query::new(),
                Some(json!({ "emails": emails })),
            )
            .await
    }
}
