//! HTTP client for the paysly backend.
//!
//! Every call goes through the same pipeline: transport failures are
//! reshaped by [`normalize`], and enveloped endpoints are split by
//! [`unwrap_envelope`]. Nothing is retried or cached.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::PayslyConfig;
use crate::constants::PUBLIC_KEY_PATH;
use crate::envelope::unwrap_envelope;
use crate::error::{NormalizedError, PayslyError};
use crate::normalize::{normalize, FailedResponse, HttpFailure, SentRequest};
use crate::payload::PublicKeyResponse;

/// Client for the fixed set of backend endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &PayslyConfig) -> Result<Self, PayslyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            PayslyError::Http(NormalizedError::unknown(format!(
                "failed to build HTTP client: {e}"
            )))
        })?;

        Ok(Self::with_http_client(&config.api_url, http))
    }

    /// Create a client with a custom reqwest::Client.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /publicKey` and return the `publicKey` field.
    ///
    /// This endpoint does not use the success envelope.
    pub async fn public_key(&self) -> Result<String, PayslyError> {
        let url = self.endpoint(PUBLIC_KEY_PATH);
        debug!(url = %url, "fetching publishable key");

        let body = self
            .exchange(Method::GET, &url, self.http.get(&url))
            .await
            .map_err(|failure| PayslyError::Http(normalize(failure)))?;

        let parsed: PublicKeyResponse = serde_json::from_value(body).map_err(|e| {
            PayslyError::Http(NormalizedError::unknown(format!(
                "publicKey response missing key: {e}"
            )))
        })?;
        Ok(parsed.public_key)
    }

    /// POST `body` as JSON to `path` and unwrap the success envelope.
    pub async fn post_enveloped<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Map<String, Value>, PayslyError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "posting to backend");

        let decoded = self
            .exchange(Method::POST, &url, self.http.post(&url).json(body))
            .await
            .map_err(|failure| PayslyError::Http(normalize(failure)))?;

        unwrap_envelope(decoded)
    }

    /// Send a request and decode a 2xx JSON body.
    async fn exchange(
        &self,
        method: Method,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, HttpFailure> {
        let resp = request.send().await.map_err(|e| {
            if e.is_builder() {
                HttpFailure::Unknown {
                    message: e.to_string(),
                }
            } else {
                HttpFailure::Request(SentRequest {
                    method: method.to_string(),
                    url: url.to_string(),
                })
            }
        })?;

        let status = resp.status();
        let headers = header_fields(resp.headers());
        debug!(url = %url, status = status.as_u16(), "backend responded");

        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) if status.is_success() => {
                return Err(HttpFailure::Unknown {
                    message: format!("failed to read response body: {e}"),
                })
            }
            Err(_) => String::new(),
        };

        if !status.is_success() {
            return Err(HttpFailure::Response(FailedResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                data: decode_error_body(&text),
            }));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| HttpFailure::Unknown {
            message: format!("invalid JSON body: {e}"),
        })
    }
}

/// Error bodies are decoded when they are JSON and kept as text otherwise.
fn decode_error_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn header_fields(headers: &reqwest::header::HeaderMap) -> Map<String, Value> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&PayslyConfig::default().with_api_url(server.base_url()))
            .expect("client")
    }

    #[test]
    fn test_decode_error_body() {
        assert_eq!(decode_error_body("  "), None);
        assert_eq!(decode_error_body(r#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(decode_error_body("oops"), Some(json!("oops")));
    }

    #[test]
    fn test_base_url_trimmed() {
        let client = BackendClient::with_http_client("http://localhost:5001/", reqwest::Client::new());
        assert_eq!(client.base_url(), "http://localhost:5001");
        assert_eq!(client.endpoint("/publicKey"), "http://localhost:5001/publicKey");
    }

    #[tokio::test]
    async fn test_public_key_returns_field() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/publicKey");
                then.status(200).json_body(json!({"publicKey": "pk_test_123"}));
            })
            .await;

        let key = client_for(&server).public_key().await.unwrap();
        assert_eq!(key, "pk_test_123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_public_key_is_not_cached() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/publicKey");
                then.status(200).json_body(json!({"publicKey": "pk_test_123"}));
            })
            .await;

        let client = client_for(&server);
        client.public_key().await.unwrap();
        client.public_key().await.unwrap();
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_public_key_missing_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/publicKey");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let err = client_for(&server).public_key().await.unwrap_err();
        assert_eq!(err.code(), Some("unknown_error"));
    }

    #[tokio::test]
    async fn test_error_status_with_json_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/basicTokenize");
                then.status(400)
                    .json_body(json!({"message": "amount must be positive"}));
            })
            .await;

        let err = client_for(&server)
            .post_enveloped("/basicTokenize", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_value(),
            json!({"code": "response_failure", "message": "amount must be positive"})
        );
    }

    #[tokio::test]
    async fn test_error_status_without_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/createCheckout");
                then.status(503);
            })
            .await;

        let err = client_for(&server)
            .post_enveloped("/createCheckout", &json!({}))
            .await
            .unwrap_err();
        let value = err.to_value();
        assert_eq!(value["code"], "response_failure");
        assert_eq!(value["status"], 503);
        assert_eq!(value["statusText"], "Service Unavailable");
        assert!(value["headers"].is_object());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_failure() {
        let client = BackendClient::new(
            &PayslyConfig::default().with_api_url("http://127.0.0.1:1"),
        )
        .unwrap();

        let err = client
            .post_enveloped("/validateCheckout", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_value(),
            json!({
                "code": "request_failure",
                "request": {"method": "POST", "url": "http://127.0.0.1:1/validateCheckout"}
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_json_success_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/validateCheckout");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server)
            .post_enveloped("/validateCheckout", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("unknown_error"));
    }

    #[tokio::test]
    async fn test_envelope_declined() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/recurringTokenize");
                then.status(200)
                    .json_body(json!({"success": false, "code": "customer_exists"}));
            })
            .await;

        let err = client_for(&server)
            .post_enveloped("/recurringTokenize", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, PayslyError::Declined(_)));
        assert_eq!(err.to_value(), json!({"code": "customer_exists"}));
    }
}
