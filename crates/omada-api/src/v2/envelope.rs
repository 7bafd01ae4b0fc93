// Result envelope decoding
//
// Every controller response is `{"errorCode": int, "msg"?: str, "result"?: ...}`.
// Decoding is kept free of I/O so it can be exercised directly.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Error;

/// The raw `{errorCode, msg, result}` wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub error_code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl Envelope {
    /// Parse a raw body. A body without an integer `errorCode` is a
    /// protocol error, never a success.
    pub fn parse(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(|e| Error::Protocol {
            message: format!("malformed envelope: {e} (body preview: {:?})", preview(body)),
            body: body.to_owned(),
        })
    }

    /// Return the payload on `errorCode == 0`, otherwise an `Error::Api`.
    ///
    /// An absent `result` is handed to the deserializer as JSON `null`,
    /// so `()`, `Option<_>` and `Value` callers get an explicit empty value.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, Error> {
        if self.error_code != 0 {
            return Err(Error::Api {
                error_code: self.error_code,
                msg: self.msg,
            });
        }
        let payload = self.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(payload).map_err(|e| Error::Protocol {
            message: format!("unexpected result shape: {e}"),
            body: String::new(),
        })
    }
}

/// Decode a raw response body straight into the success payload.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    Envelope::parse(body)?.into_result()
}

pub(crate) fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn success_returns_result() {
        let value: Value = decode(r#"{"errorCode":0,"msg":"Success.","result":{"a":1}}"#)
            .expect("success");
        assert_eq!(value, json!({ "a": 1 }));
    }

    #[test]
    fn success_without_result_is_null() {
        let value: Value = decode(r#"{"errorCode":0}"#).expect("success");
        assert!(value.is_null());
        decode::<()>(r#"{"errorCode":0,"msg":"Log out successfully."}"#).expect("unit");
    }

    #[test]
    fn nonzero_code_is_api_error_even_with_result() {
        let err = decode::<Value>(r#"{"errorCode":-1001,"msg":"Invalid request parameters.","result":{}}"#)
            .expect_err("failure");
        match err {
            Error::Api { error_code, msg } => {
                assert_eq!(error_code, -1001);
                assert_eq!(msg.as_deref(), Some("Invalid request parameters."));
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn missing_error_code_is_protocol_error() {
        let err = decode::<Value>(r#"{"result":{"a":1}}"#).expect_err("malformed");
        assert!(matches!(err, Error::Protocol { .. }), "got: {err:?}");
    }

    #[test]
    fn non_json_body_is_protocol_error() {
        let err = decode::<Value>("<html>502 Bad Gateway</html>").expect_err("malformed");
        match err {
            Error::Protocol { body, .. } => assert!(body.contains("502")),
            other => panic!("expected Protocol error, got: {other:?}"),
        }
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        assert!(preview(&body).len() <= 200);
    }
}
