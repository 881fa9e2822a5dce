pub mod client;
pub mod config;
pub(crate) mod endpoint;
pub mod resources;
pub mod webhook;

pub use client::{
    ClientError, ClientOptions, KeyEnvironment, VeilMail, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use config::Config;
pub use resources::{ListParams, Recipients, SendEmail};
pub use webhook::{sign, verify_signature, SIGNATURE_HEADER};

// Re-export transport types for convenience
pub use veilmail_api::{
    ApiError, ErrorKind, HttpClient, HttpError, HttpRequest, HttpResponse, JsonObject, Method,
    Query, Transport,
};

#[cfg(feature = "reqwest")]
pub use veilmail_api::ReqwestClient;
