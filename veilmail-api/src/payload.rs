// veilmail-api/src/payload.rs
use serde::Serialize;
use serde_json::Value;

/// A decoded JSON object
pub type JsonObject = serde_json::Map<String, Value>;

/// Query parameters for a request.
///
/// Values are JSON scalars; `null` entries are dropped when the query string
/// is rendered, so unset filters never reach the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Build from any value serializing to a JSON object
    pub fn from_serialize<T: Serialize + ?Sized>(params: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(params)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Ok(Self::new()),
            other => Err(serde::ser::Error::custom(format!(
                "query parameters must serialize to an object, got {other}"
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, v)| v.is_null())
    }

    /// Render as an url-encoded query string, `None` when nothing is left
    pub fn encode(&self) -> Option<String> {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in &self.pairs {
            let rendered = match value {
                Value::Null => continue,
                Value::Bool(true) => "true".to_string(),
                Value::Bool(false) => "false".to_string(),
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            serializer.append_pair(key, &rendered);
            any = true;
        }
        any.then(|| serializer.finish())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Remove `null` members from every object, at any depth.
///
/// Arrays are left exactly as they are: neither their `null` elements nor
/// objects nested inside them are touched.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Serialize a request body and drop its unset fields
pub fn to_body<T: Serialize + ?Sized>(body: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(body).map(strip_nulls)
}
