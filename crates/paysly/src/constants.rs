/// Backend origin every request is sent to unless overridden.
pub const DEFAULT_API_URL: &str = "https://us-central1-paysly-7e11b.cloudfunctions.net";

/// GET, returns `{ publicKey }`.
pub const PUBLIC_KEY_PATH: &str = "/publicKey";

/// POST, one-time charge from a card token.
pub const BASIC_TOKENIZE_PATH: &str = "/basicTokenize";

/// POST, customer + subscription from a payment method.
pub const RECURRING_TOKENIZE_PATH: &str = "/recurringTokenize";

/// POST, creates a hosted checkout session and returns its `id`.
pub const CREATE_CHECKOUT_PATH: &str = "/createCheckout";

/// POST, confirms a completed hosted checkout session.
pub const VALIDATE_CHECKOUT_PATH: &str = "/validateCheckout";

/// Query parameter the hosted checkout appends on its return URL.
pub const SESSION_QUERY_PARAM: &str = "paysly_session_id";

/// Error code for a non-2xx response.
pub const RESPONSE_FAILURE: &str = "response_failure";

/// Error code for a request that never got an answer.
pub const REQUEST_FAILURE: &str = "request_failure";

/// Error code for failures that happened before a request went out.
pub const UNKNOWN_ERROR: &str = "unknown_error";

/// Error code for checkout validation on a page without a session id.
pub const NO_SESSION_ON_PAGE: &str = "no_session_on_page";

/// `type` of errors raised locally by this crate.
pub const PAYSLY_ERROR_TYPE: &str = "paysly_error";

pub const NO_SESSION_ON_PAGE_MESSAGE: &str =
    "A completed checkout session was not found on this page.";
