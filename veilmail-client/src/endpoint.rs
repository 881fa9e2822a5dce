// veilmail-client/src/endpoint.rs
//! Table-driven endpoint descriptors.
//!
//! Every facade method is a `{verb, path template, call shape}` row expanded
//! by [`resource!`] into a method that fills the template and hands the
//! request to the shared [`Transport`].

use serde::Serialize;
use serde_json::Value;
use veilmail_api::{to_body, ApiError, ErrorKind, HttpClient, JsonObject, Method, Query, Transport};

/// One API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    /// Path with `{name}` placeholders, filled in order
    pub path: &'static str,
    /// Return the `data` member of the response when it is an object
    pub unwrap_data: bool,
}

impl Endpoint {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            unwrap_data: false,
        }
    }

    pub const fn unwrap_data(mut self) -> Self {
        self.unwrap_data = true;
        self
    }

    /// Substitute `args` for the placeholders, left to right
    pub fn render(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.path.len() + 32);
        let mut args = args.iter();
        let mut rest = self.path;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            out.push_str(&rest[..open]);
            if let Some(arg) = args.next() {
                out.push_str(arg);
            }
            rest = &rest[open + close + 1..];
        }
        out.push_str(rest);
        out
    }

    pub async fn call<C: HttpClient>(
        &self,
        transport: &Transport<C>,
        args: &[&str],
        query: &Query,
        body: Option<Value>,
    ) -> Result<JsonObject, ApiError> {
        let data = transport
            .execute(self.method, &self.render(args), query, body)
            .await?;
        Ok(if self.unwrap_data {
            unwrap_data(data)
        } else {
            data
        })
    }

    pub async fn call_raw<C: HttpClient>(
        &self,
        transport: &Transport<C>,
        args: &[&str],
        query: &Query,
    ) -> Result<String, ApiError> {
        transport.execute_raw(&self.render(args), query).await
    }
}

fn unwrap_data(mut data: JsonObject) -> JsonObject {
    match data.remove("data") {
        Some(Value::Object(inner)) => inner,
        Some(other) => {
            data.insert("data".to_string(), other);
            data
        }
        None => data,
    }
}

fn encoding_error(what: &str, e: serde_json::Error) -> ApiError {
    ApiError::new(ErrorKind::Generic, format!("Failed to encode {what}: {e}"))
}

pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    to_body(body).map_err(|e| encoding_error("request body", e))
}

pub fn encode_query<Q: Serialize + ?Sized>(params: &Q) -> Result<Query, ApiError> {
    Query::from_serialize(params).map_err(|e| encoding_error("query parameters", e))
}

/// Declare a facade and its endpoints.
///
/// Call shapes:
/// - `call`: path arguments only
/// - `query`: path arguments plus a serializable query
/// - `body`: path arguments plus a serializable JSON body
/// - `raw`: like `query`, returning the body as text
///
/// A trailing `, data` unwraps the `data` member of the response.
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$fn_meta:meta])*
                $shape:ident $fn_name:ident($($arg:ident),*) => $method:ident $path:literal $(, $flag:ident)?;
            )*
        }
    ) => {
        $(#[$meta])*
        pub struct $name<'a, C: ::veilmail_api::HttpClient> {
            transport: &'a ::veilmail_api::Transport<C>,
        }

        impl<'a, C: ::veilmail_api::HttpClient> $name<'a, C> {
            pub(crate) fn new(transport: &'a ::veilmail_api::Transport<C>) -> Self {
                Self { transport }
            }

            $(
                $crate::endpoint::resource!(
                    @op $shape [$(#[$fn_meta])*] $fn_name ($($arg),*) $method $path [$($flag)?]
                );
            )*
        }
    };

    (@endpoint $method:ident $path:literal []) => {
        $crate::endpoint::Endpoint::new(::veilmail_api::Method::$method, $path)
    };
    (@endpoint $method:ident $path:literal [data]) => {
        $crate::endpoint::Endpoint::new(::veilmail_api::Method::$method, $path).unwrap_data()
    };

    (@op call [$(#[$m:meta])*] $fn_name:ident ($($arg:ident),*) $method:ident $path:literal [$($flag:ident)?]) => {
        $(#[$m])*
        pub async fn $fn_name(
            &self,
            $($arg: &str,)*
        ) -> Result<::veilmail_api::JsonObject, ::veilmail_api::ApiError> {
            $crate::endpoint::resource!(@endpoint $method $path [$($flag)?])
                .call(self.transport, &[$($arg),*], &::veilmail_api::Query::new(), None)
                .await
        }
    };
    (@op query [$(#[$m:meta])*] $fn_name:ident ($($arg:ident),*) $method:ident $path:literal [$($flag:ident)?]) => {
        $(#[$m])*
        pub async fn $fn_name<Q: ::serde::Serialize + ?Sized>(
            &self,
            $($arg: &str,)*
            params: &Q,
        ) -> Result<::veilmail_api::JsonObject, ::veilmail_api::ApiError> {
            let query = $crate::endpoint::encode_query(params)?;
            $crate::endpoint::resource!(@endpoint $method $path [$($flag)?])
                .call(self.transport, &[$($arg),*], &query, None)
                .await
        }
    };
    (@op body [$(#[$m:meta])*] $fn_name:ident ($($arg:ident),*) $method:ident $path:literal [$($flag:ident)?]) => {
        $(#[$m])*
        pub async fn $fn_name<B: ::serde::Serialize + ?Sized>(
            &self,
            $($arg: &str,)*
            body: &B,
        ) -> Result<::veilmail_api::JsonObject, ::veilmail_api::ApiError> {
            let body = $crate::endpoint::encode_body(body)?;
            $crate::endpoint::resource!(@endpoint $method $path [$($flag)?])
                .call(self.transport, &[$($arg),*], &::veilmail_api::Query::new(), Some(body))
                .await
        }
    };
    (@op raw [$(#[$m:meta])*] $fn_name:ident ($($arg:ident),*) $method:ident $path:literal [$($flag:ident)?]) => {
        $(#[$m])*
        pub async fn $fn_name<Q: ::serde::Serialize + ?Sized>(
            &self,
            $($arg: &str,)*
            params: &Q,
        ) -> Result<String, ::veilmail_api::ApiError> {
            let query = $crate::endpoint::encode_query(params)?;
            $crate::endpoint::resource!(@endpoint $method $path [$($flag)?])
                .call_raw(self.transport, &[$($arg),*], &query)
                .await
        }
    };
}

pub(crate) use resource;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_fills_placeholders_in_order() {
        let ep = Endpoint::new(
            Method::Get,
            "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/topics",
        );
        assert_eq!(
            ep.render(&["a_1", "s_9"]),
            "/v1/audiences/a_1/subscribers/s_9/topics"
        );
    }

    #[test]
    fn test_render_without_placeholders() {
        let ep = Endpoint::new(Method::Post, "/v1/emails/batch");
        assert_eq!(ep.render(&[]), "/v1/emails/batch");
    }

    #[test]
    fn test_unwrap_data_object() {
        let data = json!({"data": {"id": "d_1"}}).as_object().cloned().unwrap();
        assert_eq!(Value::Object(unwrap_data(data)), json!({"id": "d_1"}));
    }

    #[test]
    fn test_unwrap_data_keeps_lists_and_plain_objects() {
        let list = json!({"data": [1], "hasMore": false}).as_object().cloned().unwrap();
        assert_eq!(
            Value::Object(unwrap_data(list)),
            json!({"data": [1], "hasMore": false})
        );

        let plain = json!({"id": "d_1"}).as_object().cloned().unwrap();
        assert_eq!(Value::Object(unwrap_data(plain)), json!({"id": "d_1"}));
    }

    #[test]
    fn test_encode_query_rejects_non_objects() {
        let err = encode_query(&vec![1, 2]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Generic);
    }
}
