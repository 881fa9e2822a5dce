// veilmail-api/src/transport.rs
use crate::error::{ApiError, ErrorKind};
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method};
use crate::payload::{strip_nulls, JsonObject, Query};
use serde_json::Value;
use std::fmt;

pub const USER_AGENT: &str = concat!("veilmail-rust/", env!("CARGO_PKG_VERSION"));

/// Issues one request per call and classifies the answer.
///
/// Holds only read-only configuration, so a single instance can be shared by
/// every resource facade and across tasks.
pub struct Transport<C: HttpClient> {
    http: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClient> fmt::Debug for Transport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient> Transport<C> {
    pub fn new(http: C, api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http_client(&self) -> &C {
        &self.http
    }

    pub async fn get(&self, path: &str, query: &Query) -> Result<JsonObject, ApiError> {
        self.execute(Method::Get, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<JsonObject, ApiError> {
        self.execute(Method::Post, path, &Query::new(), body).await
    }

    pub async fn patch(&self, path: &str, body: Option<Value>) -> Result<JsonObject, ApiError> {
        self.execute(Method::Patch, path, &Query::new(), body).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<JsonObject, ApiError> {
        self.execute(Method::Put, path, &Query::new(), body).await
    }

    pub async fn delete(&self, path: &str) -> Result<JsonObject, ApiError> {
        self.execute(Method::Delete, path, &Query::new(), None).await
    }

    /// Make a JSON request
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Value>,
    ) -> Result<JsonObject, ApiError> {
        let body = match body {
            Some(body) if method.carries_body() => {
                let encoded = serde_json::to_vec(&strip_nulls(body)).map_err(|e| {
                    ApiError::new(
                        ErrorKind::Generic,
                        format!("Failed to encode request body: {e}"),
                    )
                })?;
                Some(encoded)
            }
            _ => None,
        };

        let request = HttpRequest {
            method,
            url: self.build_url(path, query),
            headers: self.build_headers(true, body.is_some()),
            body,
        };

        let resp = self.send(request, path).await?;

        if resp.status == 204 || resp.body.is_empty() {
            return Ok(JsonObject::new());
        }

        let data = match serde_json::from_slice::<Value>(&resp.body) {
            Ok(Value::Object(map)) => map,
            _ if resp.status >= 400 => return Err(ApiError::http_status(resp.status)),
            _ => return Ok(JsonObject::new()),
        };

        if resp.status >= 400 {
            return Err(self.reject(resp.status, &data));
        }

        Ok(data)
    }

    /// GET a non-JSON payload such as a CSV export
    pub async fn execute_raw(&self, path: &str, query: &Query) -> Result<String, ApiError> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.build_url(path, query),
            headers: self.build_headers(false, false),
            body: None,
        };

        let resp = self.send(request, path).await?;

        if resp.status >= 400 {
            return Err(match serde_json::from_slice::<Value>(&resp.body) {
                Ok(Value::Object(data)) => self.reject(resp.status, &data),
                _ => ApiError::http_status(resp.status),
            });
        }

        Ok(String::from_utf8_lossy(&resp.body).into_owned())
    }

    async fn send(&self, request: HttpRequest, path: &str) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        tracing::debug!(%method, path, "sending request");

        let resp = self.http.send(request).await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed");
            ApiError::network(&e)
        })?;

        tracing::debug!(%method, path, status = resp.status, "received response");
        Ok(resp)
    }

    fn reject(&self, status: u16, data: &JsonObject) -> ApiError {
        let err = ApiError::from_response(status, data);
        tracing::debug!(status, kind = ?err.kind, "API returned an error");
        err
    }

    fn build_url(&self, path: &str, query: &Query) -> String {
        match query.encode() {
            Some(qs) => format!("{}{}?{}", self.base_url, path, qs),
            None => format!("{}{}", self.base_url, path),
        }
    }

    fn build_headers(&self, json: bool, has_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key),
            ),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if json {
            headers.push(("Accept".to_string(), "application/json".to_string()));
        }
        if has_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every request and answers with a canned reply
    struct MockHttp {
        reply: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockHttp {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpResponse::new(status, body.as_bytes())),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: HttpError) -> Self {
            Self {
                reply: Err(err),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttp {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn transport(http: MockHttp) -> Transport<MockHttp> {
        Transport::new(http, "veil_test_abc", "https://api.example.test/")
    }

    #[tokio::test]
    async fn test_get_builds_url_and_headers() {
        let t = transport(MockHttp::replying(200, r#"{"data": [], "hasMore": false}"#));
        let query = Query::new()
            .with("limit", 25)
            .with("cursor", Value::Null)
            .with("processed", true);

        let data = t.get("/v1/feeds/f_1/items", &query).await.unwrap();
        assert_eq!(data.get("hasMore"), Some(&json!(false)));

        let req = t.http.last();
        assert_eq!(req.method, Method::Get);
        assert_eq!(
            req.url,
            "https://api.example.test/v1/feeds/f_1/items?limit=25&processed=true"
        );
        assert_eq!(req.header("authorization"), Some("Bearer veil_test_abc"));
        assert_eq!(req.header("user-agent"), Some(USER_AGENT));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_post_strips_nulls_from_body() {
        let t = transport(MockHttp::replying(201, r#"{"id": "e_1"}"#));
        let body = json!({
            "subject": "Hi",
            "html": null,
            "metadata": {"a": null, "b": 2},
            "tags": [null, "x"],
        });

        t.post("/v1/emails", Some(body)).await.unwrap();

        let req = t.http.last();
        assert_eq!(req.header("content-type"), Some("application/json"));
        let sent: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            sent,
            json!({"subject": "Hi", "metadata": {"b": 2}, "tags": [null, "x"]})
        );
    }

    #[tokio::test]
    async fn test_body_never_sent_for_get_or_delete() {
        let t = transport(MockHttp::replying(200, "{}"));
        t.execute(Method::Delete, "/v1/domains/d_1", &Query::new(), Some(json!({"x": 1})))
            .await
            .unwrap();
        let req = t.http.last();
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), None);
    }

    #[tokio::test]
    async fn test_post_without_body() {
        let t = transport(MockHttp::replying(200, r#"{"status": "cancelled"}"#));
        t.post("/v1/emails/e_1/cancel", None).await.unwrap();
        assert!(t.http.last().body.is_none());
    }

    #[tokio::test]
    async fn test_no_content_is_empty_success() {
        for method in [Method::Get, Method::Post, Method::Delete] {
            let t = transport(MockHttp::replying(204, ""));
            let data = t
                .execute(method, "/v1/x", &Query::new(), None)
                .await
                .unwrap();
            assert!(data.is_empty());
        }
        let t = transport(MockHttp::replying(200, ""));
        assert!(t.delete("/v1/x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_success_is_lenient() {
        let t = transport(MockHttp::replying(200, "not json"));
        assert!(t.get("/v1/x", &Query::new()).await.unwrap().is_empty());

        let t = transport(MockHttp::replying(200, "[1, 2]"));
        assert!(t.get("/v1/x", &Query::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_error_body_is_generic() {
        let t = transport(MockHttp::replying(502, "<html>Bad Gateway</html>"));
        let err = t.get("/v1/x", &Query::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Generic);
        assert_eq!(err.status, Some(502));
    }

    #[tokio::test]
    async fn test_error_body_is_dispatched() {
        let t = transport(MockHttp::replying(
            422,
            r#"{"error": {"message": "PII detected", "code": "pii_detected", "piiTypes": ["ssn"]}}"#,
        ));
        let err = t.post("/v1/emails", Some(json!({}))).await.unwrap_err();
        assert_eq!(err.pii_types(), Some(&["ssn".to_string()][..]));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let t = transport(MockHttp::failing(HttpError::Timeout));
        let err = t.get("/v1/x", &Query::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.status, None);
    }

    #[tokio::test]
    async fn test_raw_returns_body_verbatim() {
        let csv = "email,status\na@b.co,active\n";
        let t = transport(MockHttp::replying(200, csv));
        let query = Query::new().with("status", "active");
        let out = t
            .execute_raw("/v1/audiences/a_1/subscribers/export", &query)
            .await
            .unwrap();
        assert_eq!(out, csv);

        let req = t.http.last();
        assert_eq!(req.header("accept"), None);
        assert!(req.url.ends_with("/export?status=active"));
    }

    #[tokio::test]
    async fn test_raw_dispatches_errors() {
        let t = transport(MockHttp::replying(404, r#"{"message": "Audience not found"}"#));
        let err = t.execute_raw("/v1/x", &Query::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Audience not found");

        let t = transport(MockHttp::replying(500, "oops"));
        let err = t.execute_raw("/v1/x", &Query::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Generic);
        assert_eq!(err.status, Some(500));
    }

    #[test]
    fn test_debug_redacts_key() {
        let t = transport(MockHttp::replying(200, "{}"));
        let debug = format!("{t:?}");
        assert!(!debug.contains("veil_test_abc"));
        assert!(debug.contains("api.example.test"));
    }
}
