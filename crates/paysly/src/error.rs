use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::{
    NO_SESSION_ON_PAGE, NO_SESSION_ON_PAGE_MESSAGE, PAYSLY_ERROR_TYPE, UNKNOWN_ERROR,
};
use crate::sdk::SdkError;

/// A backend failure reshaped into one flat record with a `code`.
///
/// Serializes as `{ "code": ..., ...details }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// Usually a string; a passthrough `code` keeps whatever JSON type the
    /// backend sent.
    pub code: Value,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl NormalizedError {
    /// Merge a discriminant with passthrough fields.
    ///
    /// Fields are laid over the discriminant, so a passthrough `code`
    /// replaces `code`.
    pub fn merge(code: &str, mut fields: Map<String, Value>) -> Self {
        let code = fields
            .remove("code")
            .unwrap_or_else(|| Value::String(code.to_string()));
        Self {
            code,
            details: fields,
        }
    }

    /// `{ code: "unknown_error", message }`.
    pub fn unknown(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("message".to_string(), Value::String(message.into()));
        Self::merge(UNKNOWN_ERROR, fields)
    }

    /// The code when it is a string.
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_str()
    }

    pub fn message(&self) -> Option<&str> {
        self.details.get("message").and_then(Value::as_str)
    }

    /// Flat JSON object form.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(self.details.len() + 1);
        map.insert("code".to_string(), self.code.clone());
        map.extend(self.details.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }
}

impl std::fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match &self.code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        match self.message() {
            Some(message) => write!(f, "{code}: {message}"),
            None => f.write_str(&code),
        }
    }
}

/// Every way an operation can be rejected.
///
/// The SDK channel and the backend channel are kept apart: an SDK error is
/// whatever the payment SDK reported, a backend error always carries a
/// `code`.
#[derive(Debug, Error)]
pub enum PayslyError {
    /// Reported by the payment SDK, untouched.
    #[error("sdk error: {0}")]
    Sdk(SdkError),

    /// The HTTP exchange itself failed.
    #[error("http error: {0}")]
    Http(NormalizedError),

    /// The backend answered with `success: false`; holds its payload.
    #[error("declined by backend: {}", summarize(.0))]
    Declined(Map<String, Value>),

    /// Checkout validation ran on a page without a session id.
    #[error("{}", NO_SESSION_ON_PAGE_MESSAGE)]
    NoSessionOnPage,
}

impl PayslyError {
    /// The `code` a caller would branch on, if the error has one.
    pub fn code(&self) -> Option<&str> {
        match self {
            PayslyError::Sdk(e) => e.code(),
            PayslyError::Http(e) => e.code_str(),
            PayslyError::Declined(payload) => payload.get("code").and_then(Value::as_str),
            PayslyError::NoSessionOnPage => Some(NO_SESSION_ON_PAGE),
        }
    }

    /// The rejection value as a plain JSON object.
    pub fn to_value(&self) -> Value {
        match self {
            PayslyError::Sdk(e) => Value::Object(e.fields().clone()),
            PayslyError::Http(e) => Value::Object(e.to_map()),
            PayslyError::Declined(payload) => Value::Object(payload.clone()),
            PayslyError::NoSessionOnPage => serde_json::json!({
                "type": PAYSLY_ERROR_TYPE,
                "code": NO_SESSION_ON_PAGE,
                "message": NO_SESSION_ON_PAGE_MESSAGE,
            }),
        }
    }

    pub fn is_sdk(&self) -> bool {
        matches!(self, PayslyError::Sdk(_))
    }
}

impl From<NormalizedError> for PayslyError {
    fn from(e: NormalizedError) -> Self {
        PayslyError::Http(e)
    }
}

impl From<SdkError> for PayslyError {
    fn from(e: SdkError) -> Self {
        PayslyError::Sdk(e)
    }
}

fn summarize(payload: &Map<String, Value>) -> String {
    let code = payload.get("code").and_then(Value::as_str);
    let message = payload.get("message").and_then(Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => "no details".to_string(),
    }
}
