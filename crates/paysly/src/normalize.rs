//! Reshapes failed HTTP exchanges into [`NormalizedError`].

use serde_json::{Map, Value};

use crate::constants::{REQUEST_FAILURE, RESPONSE_FAILURE, UNKNOWN_ERROR};
use crate::envelope::is_truthy;
use crate::error::NormalizedError;

/// How far an HTTP exchange got before it failed.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpFailure {
    /// The server answered with a non-success status.
    Response(FailedResponse),
    /// The request went out but no response came back.
    Request(SentRequest),
    /// Nothing was sent.
    Unknown { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Map<String, Value>,
    /// Decoded body, `None` when the body was empty.
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: String,
    pub url: String,
}

impl FailedResponse {
    /// The response itself as flat fields.
    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), Value::from(self.status));
        fields.insert(
            "statusText".to_string(),
            Value::String(self.status_text.clone()),
        );
        fields.insert("headers".to_string(), Value::Object(self.headers.clone()));
        fields
    }
}

impl SentRequest {
    fn to_value(&self) -> Value {
        serde_json::json!({
            "method": self.method,
            "url": self.url,
        })
    }
}

/// Map a failure to `{code, ...}`.
///
/// - response with a truthy decoded body: `response_failure` plus the body fields
/// - response with an absent or falsy body: `response_failure` plus the response fields
/// - request without a response: `request_failure` plus `request`
/// - anything else: `unknown_error` plus `message`
pub fn normalize(failure: HttpFailure) -> NormalizedError {
    match failure {
        HttpFailure::Response(response) => match response.data {
            Some(Value::Object(body)) => NormalizedError::merge(RESPONSE_FAILURE, body),
            Some(data) if is_truthy(&data) => {
                let mut fields = Map::new();
                fields.insert("data".to_string(), data);
                NormalizedError::merge(RESPONSE_FAILURE, fields)
            }
            _ => NormalizedError::merge(RESPONSE_FAILURE, response.to_fields()),
        },
        HttpFailure::Request(request) => {
            let mut fields = Map::new();
            fields.insert("request".to_string(), request.to_value());
            NormalizedError::merge(REQUEST_FAILURE, fields)
        }
        HttpFailure::Unknown { message } => {
            let mut fields = Map::new();
            fields.insert("message".to_string(), Value::String(message));
            NormalizedError::merge(UNKNOWN_ERROR, fields)
        }
    }
}
