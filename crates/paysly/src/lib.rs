//! Paysly client integration for a hosted payment SDK.
//!
//! Wraps a loaded payment SDK handle with four operations that hand the
//! SDK's output to the paysly backend:
//!
//! - [`Paysly::create_charge`]: tokenize a card, then `POST /basicTokenize`
//! - [`Paysly::create_recurring`]: create a payment method, then `POST /recurringTokenize`
//! - [`Paysly::redirect_to_checkout`]: `POST /createCheckout`, then the SDK redirect
//! - [`Paysly::validate_checkout`]: read `paysly_session_id`, then `POST /validateCheckout`
//!
//! # Error channels
//!
//! Errors reported by the SDK come back as [`PayslyError::Sdk`] exactly as
//! the SDK produced them. Transport failures come back as
//! [`PayslyError::Http`] and always carry a `code`; an answer of
//! `success: false` comes back as [`PayslyError::Declined`] with the
//! backend's payload untouched.
//!
//! # Quick example
//!
//! ```no_run
//! # use paysly::{PaymentSdk, SdkLoader, StaticLocation, PayslyBuilder};
//! # async fn run<L: SdkLoader>(loader: L, element: &<L::Sdk as PaymentSdk>::Element,
//! #     options: &<L::Sdk as PaymentSdk>::TokenOptions) -> Result<(), paysly::PayslyError> {
//! let key = paysly::public_key().await?;
//! let paysly = PayslyBuilder::new(key)
//!     .location(StaticLocation::new("?paysly_session_id=cs_test_123"))
//!     .load(&loader)
//!     .await?;
//!
//! let charge = paysly
//!     .create_charge(element, options, &serde_json::json!({"amount": 1999}))
//!     .await?;
//! println!("charged: {charge:?}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod location;
pub mod normalize;
pub mod payload;
pub mod sdk;
pub mod session;

// Re-exports
pub use backend::BackendClient;
pub use config::PayslyConfig;
pub use constants::*;
pub use envelope::unwrap_envelope;
pub use error::{NormalizedError, PayslyError};
pub use location::{PageLocation, StaticLocation};
pub use normalize::{normalize, FailedResponse, HttpFailure, SentRequest};
pub use sdk::{PaymentSdk, RedirectOptions, SdkError, SdkLoader};
pub use session::{load, public_key, public_key_with, Paysly, PayslyBuilder};
