//! The augmented SDK handle.
//!
//! [`Paysly`] wraps a loaded [`PaymentSdk`] and adds four operations on
//! top of it. Each one is a short chain: at most one SDK call, then at most
//! one backend call. An SDK failure stops the chain before any request is
//! sent.

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::backend::BackendClient;
use crate::config::PayslyConfig;
use crate::constants::{
    BASIC_TOKENIZE_PATH, CREATE_CHECKOUT_PATH, RECURRING_TOKENIZE_PATH, SESSION_QUERY_PARAM,
    VALIDATE_CHECKOUT_PATH,
};
use crate::error::{NormalizedError, PayslyError};
use crate::location::{PageLocation, StaticLocation};
use crate::payload::{
    BasicTokenizeRequest, CreateCheckoutRequest, RecurringTokenizeRequest,
    ValidateCheckoutRequest,
};
use crate::sdk::{PaymentSdk, RedirectOptions, SdkLoader};

/// A payment SDK handle with the paysly operations attached.
///
/// Dereferences to the wrapped SDK, so its native methods stay reachable.
/// [`redirect_to_checkout`](Paysly::redirect_to_checkout) shadows the
/// SDK's own redirect: the native one is only called with a session id
/// issued by the backend.
pub struct Paysly<S> {
    sdk: S,
    publishable_key: String,
    backend: BackendClient,
    location: Arc<dyn PageLocation>,
}

impl<S> Deref for Paysly<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.sdk
    }
}

impl<S> std::fmt::Debug for Paysly<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paysly")
            .field("publishable_key", &self.publishable_key)
            .field("backend", &self.backend.base_url())
            .finish_non_exhaustive()
    }
}

impl<S: PaymentSdk> Paysly<S> {
    /// Wrap an already loaded SDK handle.
    pub fn new(
        sdk: S,
        publishable_key: impl Into<String>,
        backend: BackendClient,
        location: Arc<dyn PageLocation>,
    ) -> Self {
        Self {
            sdk,
            publishable_key: publishable_key.into(),
            backend,
            location,
        }
    }

    pub fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Give back the wrapped SDK handle.
    pub fn into_inner(self) -> S {
        self.sdk
    }

    /// Tokenize the card in `element` and charge it.
    pub async fn create_charge<C>(
        &self,
        element: &S::Element,
        token_options: &S::TokenOptions,
        charge_data: &C,
    ) -> Result<Map<String, Value>, PayslyError>
    where
        C: Serialize + ?Sized + Sync,
    {
        let token = self
            .sdk
            .create_token(element, token_options)
            .await
            .map_err(PayslyError::Sdk)?;

        debug!("card tokenized, submitting charge");
        let body = BasicTokenizeRequest {
            token: &token,
            charge_data,
            public_key: &self.publishable_key,
        };
        self.backend.post_enveloped(BASIC_TOKENIZE_PATH, &body).await
    }

    /// Create a payment method and set up a subscription for it.
    pub async fn create_recurring<C, D>(
        &self,
        payment_method_options: &S::PaymentMethodOptions,
        customer_data: &C,
        subscription_data: &D,
    ) -> Result<Map<String, Value>, PayslyError>
    where
        C: Serialize + ?Sized + Sync,
        D: Serialize + ?Sized + Sync,
    {
        let payment_method = self
            .sdk
            .create_payment_method(payment_method_options)
            .await
            .map_err(PayslyError::Sdk)?;

        debug!("payment method created, submitting subscription");
        let body = RecurringTokenizeRequest {
            payment_method: &payment_method,
            customer_data,
            subscription_data,
            public_key: &self.publishable_key,
        };
        self.backend
            .post_enveloped(RECURRING_TOKENIZE_PATH, &body)
            .await
    }

    /// Create a hosted checkout session and redirect to it.
    pub async fn redirect_to_checkout<D>(&self, checkout_data: &D) -> Result<(), PayslyError>
    where
        D: Serialize + ?Sized + Sync,
    {
        let body = CreateCheckoutRequest {
            checkout_data,
            public_key: &self.publishable_key,
        };
        let session = self
            .backend
            .post_enveloped(CREATE_CHECKOUT_PATH, &body)
            .await?;

        let session_id = session
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PayslyError::Http(NormalizedError::unknown(
                    "createCheckout response has no session id",
                ))
            })?;

        debug!(session_id, "redirecting to hosted checkout");
        self.sdk
            .redirect_to_checkout(&RedirectOptions {
                session_id: session_id.to_string(),
            })
            .await
            .map_err(PayslyError::Sdk)
    }

    /// Confirm the checkout session named in the page's query string.
    ///
    /// Fails with [`PayslyError::NoSessionOnPage`] without touching the
    /// network when the page has no `paysly_session_id`.
    pub async fn validate_checkout(&self) -> Result<Map<String, Value>, PayslyError> {
        let session_id = self
            .location
            .query_param(SESSION_QUERY_PARAM)
            .ok_or(PayslyError::NoSessionOnPage)?;

        let body = ValidateCheckoutRequest {
            session_id: &session_id,
            public_key: &self.publishable_key,
        };
        self.backend
            .post_enveloped(VALIDATE_CHECKOUT_PATH, &body)
            .await
    }
}

/// Builder for loading a [`Paysly`] handle with non-default settings.
pub struct PayslyBuilder {
    publishable_key: String,
    config: PayslyConfig,
    location: Arc<dyn PageLocation>,
    http: Option<reqwest::Client>,
}

impl PayslyBuilder {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            config: PayslyConfig::default(),
            location: Arc::new(StaticLocation::default()),
            http: None,
        }
    }

    pub fn config(mut self, config: PayslyConfig) -> Self {
        self.config = config;
        self
    }

    /// Where [`Paysly::validate_checkout`] reads the session id from.
    pub fn location(mut self, location: impl PageLocation + 'static) -> Self {
        self.location = Arc::new(location);
        self
    }

    /// Use an existing reqwest::Client instead of building one from the
    /// config. The config's `api_url` still applies.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Load the SDK for the publishable key and wrap it.
    ///
    /// A load failure is returned as [`PayslyError::Sdk`], unchanged.
    pub async fn load<L: SdkLoader>(self, loader: &L) -> Result<Paysly<L::Sdk>, PayslyError> {
        let backend = match self.http {
            Some(http) => BackendClient::with_http_client(&self.config.api_url, http),
            None => BackendClient::new(&self.config)?,
        };

        let sdk = loader
            .load(&self.publishable_key)
            .await
            .map_err(PayslyError::Sdk)?;

        debug!(backend = backend.base_url(), "payment sdk loaded");
        Ok(Paysly::new(sdk, self.publishable_key, backend, self.location))
    }
}

/// Load the SDK for `publishable_key` with default settings.
///
/// The default location has no query string; use [`PayslyBuilder`] to
/// supply the real one before calling [`Paysly::validate_checkout`].
pub async fn load<L: SdkLoader>(
    loader: &L,
    publishable_key: &str,
) -> Result<Paysly<L::Sdk>, PayslyError> {
    PayslyBuilder::new(publishable_key).load(loader).await
}

/// Fetch the publishable key from the default backend.
pub async fn public_key() -> Result<String, PayslyError> {
    public_key_with(&PayslyConfig::default()).await
}

/// Fetch the publishable key from the backend named in `config`.
pub async fn public_key_with(config: &PayslyConfig) -> Result<String, PayslyError> {
    BackendClient::new(config)?.public_key().await
}
