// Response envelope decoding
//
// Every backend reply is wrapped as `{ statusCode, data, message, success }`,
// but the payload sits at a different depth per endpoint: `data`,
// `data.user`, `data.videos`, `data.comments`, `data[0]`. These decoders are
// the single place that knows about those shapes; endpoint methods pick
// one and return a normalized domain type.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::http::RawResponse;
use crate::models::ToggleReceipt;

impl RawResponse {
    /// The envelope's `data` member (`Null` when absent).
    pub fn data(&self) -> &Value {
        self.body.get("data").unwrap_or(&Value::Null)
    }
}

/// Decode `data` as `T`.
pub fn data<T: DeserializeOwned>(resp: &RawResponse) -> Result<T, Error> {
    decode(resp, resp.data())
}

/// Decode `data`, treating `null` as absent.
pub fn optional_data<T: DeserializeOwned>(resp: &RawResponse) -> Result<Option<T>, Error> {
    match resp.data() {
        Value::Null => Ok(None),
        value => decode(resp, value).map(Some),
    }
}

/// Decode `data.user` when present, otherwise `data` itself.
///
/// Login nests the identity next to its tokens; register returns it bare.
pub fn identity<T: DeserializeOwned>(resp: &RawResponse) -> Result<T, Error> {
    let data = resp.data();
    match data.get("user") {
        Some(user) if !user.is_null() => decode(resp, user),
        _ => decode(resp, data),
    }
}

/// Decode the first element of a `data` array (`None` for an empty or
/// missing array).
pub fn first<T: DeserializeOwned>(resp: &RawResponse) -> Result<Option<T>, Error> {
    match resp.data() {
        Value::Array(items) => items.first().map(|v| decode(resp, v)).transpose(),
        Value::Null => Ok(None),
        other => decode(resp, other).map(Some),
    }
}

/// Decode a `data` array strictly.
pub fn list<T: DeserializeOwned>(resp: &RawResponse) -> Result<Vec<T>, Error> {
    match resp.data() {
        Value::Null => Ok(Vec::new()),
        value => decode(resp, value),
    }
}

/// Decode `data.{field}` as a list, falling back to an empty list when the
/// shape is missing or malformed. Never fails.
pub fn nested_list_or_empty<T: DeserializeOwned>(resp: &RawResponse, field: &str) -> Vec<T> {
    lenient_list(resp, resp.data().get(field))
}

/// Decode `data` as a list, falling back to an empty list when it is not an
/// array or fails to decode. Never fails.
pub fn list_or_empty<T: DeserializeOwned>(resp: &RawResponse) -> Vec<T> {
    lenient_list(resp, Some(resp.data()))
}

/// Extract a boolean toggle result from `data.{field}`.
pub fn toggle(resp: &RawResponse, field: &str) -> ToggleReceipt {
    ToggleReceipt {
        state: resp.data().get(field).and_then(Value::as_bool),
    }
}

fn lenient_list<T: DeserializeOwned>(resp: &RawResponse, value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(_)) => {
            let value = value.cloned().unwrap_or(Value::Null);
            serde_json::from_value(value).unwrap_or_else(|e| {
                debug!(path = %resp.path, error = %e, "malformed list payload, treating as empty");
                Vec::new()
            })
        }
        _ => {
            debug!(path = %resp.path, "list payload missing, treating as empty");
            Vec::new()
        }
    }
}

fn decode<T: DeserializeOwned>(resp: &RawResponse, value: &Value) -> Result<T, Error> {
    T::deserialize(value).map_err(|e| Error::Deserialization {
        message: format!("{} {}: {e}", resp.method, resp.path),
        body: resp.body.to_string(),
    })
}
