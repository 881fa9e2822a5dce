// veilmail-api/src/http/reqwest.rs
use super::{HttpClient, HttpError, HttpRequest, HttpResponse, Method};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client that enforces `timeout` on every request
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::InvalidRequest(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidRequest(e.to_string())
    } else {
        HttpError::Connection(e.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut req = self
            .inner
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(classify)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = ReqwestClient::new(Duration::from_secs(2)).unwrap();
        let request = HttpRequest {
            method: Method::Get,
            url: "http://127.0.0.1:1/v1/emails".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = client.send(request).await.unwrap_err();
        assert!(matches!(
            err,
            HttpError::Connection(_) | HttpError::Timeout
        ));
    }
}
