//! JSON wire envelopes: request decoding, reply and error building.
//!
//! One request shape, two outbound shapes:
//!
//! - Request:  `{"method": string, "params": any?, "id": any?}`
//! - Response: `{"requested", "params", "value", "id"?}`
//! - Error:    `{"rawMessageReceived": [topic, body], "error": string}`
//!
//! The correlation `id` is opaque: it is echoed verbatim when the request
//! carried the key (even `"id": null`) and omitted entirely otherwise —
//! never emitted as a null placeholder.

use serde_json::{Map, Value};

use super::registry::Fault;

/// Literal acknowledgement marker used when a void operation replies.
pub const ACK_VALUE: &str = "OK";

/// A decoded inbound request.
#[derive(Debug, Clone)]
pub struct Request {
    /// Requested method name; `None` when the field is missing or not a
    /// string (classified as method-not-found downstream).
    pub method: Option<String>,
    /// Parameter value, `Value::Null` when absent.
    pub params: Value,
    /// Correlation id, `Some` iff the `id` key was present.
    pub id: Option<Value>,
}

/// Decode a raw message body into a [`Request`].
///
/// Only JSON syntax errors are reported here; structural problems
/// (missing method, bad params) surface as dispatch classifications.
pub fn parse_request(body: &[u8]) -> Result<Request, serde_json::Error> {
    let data: Value = serde_json::from_slice(body)?;
    Ok(Request {
        method: data
            .get("method")
            .and_then(Value::as_str)
            .map(str::to_owned),
        params: data.get("params").cloned().unwrap_or(Value::Null),
        id: data.get("id").cloned(),
    })
}

/// Build the response body for a completed invocation.
///
/// Echoes the requested method name and the original params so the
/// caller can match the reply to its own callback, then carries the
/// computed `value` (or the acknowledgement marker).
pub fn reply_body(
    requested: &str,
    params: &Value,
    value: Value,
    id: Option<&Value>,
) -> Result<Vec<u8>, serde_json::Error> {
    let mut obj = Map::new();
    obj.insert("requested".into(), Value::String(requested.to_owned()));
    obj.insert("params".into(), params.clone());
    obj.insert("value".into(), value);
    if let Some(id) = id {
        obj.insert("id".into(), id.clone());
    }
    serde_json::to_vec(&Value::Object(obj))
}

/// Build the error body for the private error channel.
///
/// Carries the literal arrival topic and raw body so the caller can
/// correlate. Never carries a correlation id.
pub fn error_body(topic: &str, body: &[u8], error: &str) -> Result<Vec<u8>, serde_json::Error> {
    let mut obj = Map::new();
    obj.insert(
        "rawMessageReceived".into(),
        Value::Array(vec![
            Value::String(topic.to_owned()),
            Value::String(String::from_utf8_lossy(body).into_owned()),
        ]),
    );
    obj.insert("error".into(), Value::String(error.to_owned()));
    serde_json::to_vec(&Value::Object(obj))
}

/// Positional string parameter accessor.
///
/// Indexing into a missing, short, or non-array `params` is an arity
/// fault; a present element of the wrong type is an operation fault.
pub fn positional_str(params: &Value, idx: usize) -> Result<&str, Fault> {
    let items = params.as_array().ok_or(Fault::ParamCount)?;
    let item = items.get(idx).ok_or(Fault::ParamCount)?;
    item.as_str()
        .ok_or_else(|| Fault::Operation(format!("parameter {idx} must be a string")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_full_request() {
        let req = parse_request(br#"{"method":"ping","params":[1,2],"id":7}"#).unwrap();
        assert_eq!(req.method.as_deref(), Some("ping"));
        assert_eq!(req.params, json!([1, 2]));
        assert_eq!(req.id, Some(json!(7)));
    }

    #[test]
    fn params_and_id_are_optional() {
        let req = parse_request(br#"{"method":"ping"}"#).unwrap();
        assert_eq!(req.params, Value::Null);
        assert!(req.id.is_none());
    }

    #[test]
    fn explicit_null_id_counts_as_present() {
        let req = parse_request(br#"{"method":"ping","id":null}"#).unwrap();
        assert_eq!(req.id, Some(Value::Null));
    }

    #[test]
    fn non_string_method_is_none() {
        let req = parse_request(br#"{"method":42}"#).unwrap();
        assert!(req.method.is_none());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(parse_request(b"{not json").is_err());
    }

    #[test]
    fn reply_omits_absent_id() {
        let body = reply_body("ping", &Value::Null, json!("dev"), None).unwrap();
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["requested"], "ping");
        assert_eq!(v["value"], "dev");
    }

    #[test]
    fn reply_echoes_id_verbatim() {
        let id = json!({"seq": 3});
        let body = reply_body("ping", &json!([1]), json!("dev"), Some(&id)).unwrap();
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["id"], id);
        assert_eq!(v["params"], json!([1]));
    }

    #[test]
    fn error_body_carries_raw_topic_and_body() {
        let body = error_body("dev/command", b"{bad", "boom").unwrap();
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["rawMessageReceived"], json!(["dev/command", "{bad"]));
        assert_eq!(v["error"], "boom");
    }

    #[test]
    fn positional_str_faults() {
        assert!(matches!(
            positional_str(&Value::Null, 0),
            Err(Fault::ParamCount)
        ));
        assert!(matches!(
            positional_str(&json!([]), 0),
            Err(Fault::ParamCount)
        ));
        assert!(matches!(
            positional_str(&json!([5]), 0),
            Err(Fault::Operation(_))
        ));
        assert_eq!(positional_str(&json!(["true"]), 0).unwrap(), "true");
    }
}
