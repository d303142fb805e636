//! Seam to the third-party payment SDK.
//!
//! The SDK is an external collaborator: this crate never tokenizes card data
//! itself. Implement [`PaymentSdk`] over the real SDK (or a test double) and
//! [`SdkLoader`] over however it is loaded for a publishable key.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error object reported by the payment SDK, kept exactly as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SdkError {
    fields: Map<String, Value>,
}

impl SdkError {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value. Non-object values are kept under `message`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            other => {
                let mut fields = Map::new();
                fields.insert("message".to_string(), other);
                Self { fields }
            }
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// The SDK's `type` field, e.g. `card_error`.
    pub fn error_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    pub fn code(&self) -> Option<&str> {
        self.fields.get("code").and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }
}

impl std::fmt::Display for SdkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self
            .error_type()
            .or_else(|| self.code())
            .unwrap_or("sdk_error");
        match self.message() {
            Some(message) => write!(f, "{label}: {message}"),
            None => f.write_str(label),
        }
    }
}

/// Arguments for the SDK's native hosted-checkout redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectOptions {
    pub session_id: String,
}

/// The capabilities of a loaded payment SDK handle this crate relies on.
pub trait PaymentSdk: Send + Sync {
    /// A mounted form element holding card input.
    type Element: ?Sized + Sync;
    /// Options for token creation (billing details and so on).
    type TokenOptions: ?Sized + Sync;
    /// Options for payment method creation.
    type PaymentMethodOptions: ?Sized + Sync;
    /// Opaque card token.
    type Token: Serialize + Send;
    /// Opaque payment method.
    type PaymentMethod: Serialize + Send;

    /// Tokenize the card details held by `element`.
    fn create_token(
        &self,
        element: &Self::Element,
        options: &Self::TokenOptions,
    ) -> impl Future<Output = Result<Self::Token, SdkError>> + Send;

    /// Create a reusable payment method.
    fn create_payment_method(
        &self,
        options: &Self::PaymentMethodOptions,
    ) -> impl Future<Output = Result<Self::PaymentMethod, SdkError>> + Send;

    /// Send the user to the hosted checkout page for a session.
    fn redirect_to_checkout(
        &self,
        options: &RedirectOptions,
    ) -> impl Future<Output = Result<(), SdkError>> + Send;
}

/// Loads a [`PaymentSdk`] handle for a publishable key.
pub trait SdkLoader: Send + Sync {
    type Sdk: PaymentSdk;

    fn load(
        &self,
        publishable_key: &str,
    ) -> impl Future<Output = Result<Self::Sdk, SdkError>> + Send;
}
