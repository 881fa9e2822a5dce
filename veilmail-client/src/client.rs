// veilmail-client/src/client.rs
use crate::resources::{
    Analytics, Audiences, Campaigns, Domains, Emails, Feeds, Forms, Properties, Sequences,
    Subscribers, Templates, Topics, Webhooks,
};
use std::time::Duration;
use thiserror::Error;
use veilmail_api::{HttpClient, Transport};

#[cfg(feature = "reqwest")]
use veilmail_api::ReqwestClient;

pub const DEFAULT_BASE_URL: &str = "https://api.veilmail.xyz";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const LIVE_KEY_PREFIX: &str = "veil_live_";
pub const TEST_KEY_PREFIX: &str = "veil_test_";

/// Client construction failures; nothing has touched the network yet
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API key format. Key must start with \"veil_live_\" or \"veil_test_\".")]
    InvalidApiKey,
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] veilmail_api::HttpError),
}

/// Which environment an API key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEnvironment {
    Live,
    Test,
}

impl KeyEnvironment {
    pub fn of(api_key: &str) -> Result<Self, ClientError> {
        if api_key.starts_with(LIVE_KEY_PREFIX) {
            Ok(Self::Live)
        } else if api_key.starts_with(TEST_KEY_PREFIX) {
            Ok(Self::Test)
        } else {
            Err(ClientError::InvalidApiKey)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Defaults to [`DEFAULT_BASE_URL`]
    pub base_url: Option<String>,
    /// Per-request timeout, defaults to [`DEFAULT_TIMEOUT`]
    pub timeout: Option<Duration>,
}

/// VeilMail API client.
///
/// ```no_run
/// use veilmail_client::{SendEmail, VeilMail};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = VeilMail::new("veil_live_xxxxx")?;
/// let email = SendEmail::new("hello@yourdomain.com", "user@example.com", "Hello from Rust!")
///     .html("<h1>Welcome!</h1>");
/// client.emails().send(&email).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct VeilMail<C: HttpClient> {
    transport: Transport<C>,
    environment: KeyEnvironment,
}

#[cfg(feature = "reqwest")]
impl VeilMail<ReqwestClient> {
    pub fn new(api_key: &str) -> Result<Self, ClientError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    pub fn with_options(api_key: &str, options: ClientOptions) -> Result<Self, ClientError> {
        // Validate before building anything that could reach the network
        KeyEnvironment::of(api_key)?;
        let http = ReqwestClient::new(options.timeout.unwrap_or(DEFAULT_TIMEOUT))?;
        let base_url = options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Self::with_http(api_key, base_url, http)
    }
}

impl<C: HttpClient> VeilMail<C> {
    /// Use a custom [`HttpClient`] implementation
    pub fn with_http(api_key: &str, base_url: &str, http: C) -> Result<Self, ClientError> {
        let environment = KeyEnvironment::of(api_key)?;
        Ok(Self {
            transport: Transport::new(http, api_key, base_url),
            environment,
        })
    }

    pub fn environment(&self) -> KeyEnvironment {
        self.environment
    }

    pub fn is_test_mode(&self) -> bool {
        self.environment == KeyEnvironment::Test
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Direct access for endpoints without a facade
    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    pub fn emails(&self) -> Emails<'_, C> {
        Emails::new(&self.transport)
    }

    pub fn domains(&self) -> Domains<'_, C> {
        Domains::new(&self.transport)
    }

    pub fn templates(&self) -> Templates<'_, C> {
        Templates::new(&self.transport)
    }

    pub fn audiences(&self) -> Audiences<'_, C> {
        Audiences::new(&self.transport)
    }

    pub fn subscribers(&self) -> Subscribers<'_, C> {
        Subscribers::new(&self.transport)
    }

    pub fn campaigns(&self) -> Campaigns<'_, C> {
        Campaigns::new(&self.transport)
    }

    pub fn webhooks(&self) -> Webhooks<'_, C> {
        Webhooks::new(&self.transport)
    }

    pub fn topics(&self) -> Topics<'_, C> {
        Topics::new(&self.transport)
    }

    pub fn properties(&self) -> Properties<'_, C> {
        Properties::new(&self.transport)
    }

    pub fn sequences(&self) -> Sequences<'_, C> {
        Sequences::new(&self.transport)
    }

    pub fn feeds(&self) -> Feeds<'_, C> {
        Feeds::new(&self.transport)
    }

    pub fn forms(&self) -> Forms<'_, C> {
        Forms::new(&self.transport)
    }

    pub fn analytics(&self) -> Analytics<'_, C> {
        Analytics::new(&self.transport)
    }
}
