// veilmail-api/src/lib.rs
pub mod error;
pub mod http;
pub mod payload;
pub mod transport;

pub use error::{ApiError, ErrorKind};
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, Method};
pub use payload::{strip_nulls, to_body, JsonObject, Query};
pub use transport::{Transport, USER_AGENT};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
