use std::time::Duration;

use crate::constants::DEFAULT_API_URL;

/// Runtime configuration for the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslyConfig {
    /// Backend origin, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout. `None` leaves requests pending until the
    /// transport gives up on its own.
    pub timeout: Option<Duration>,
}

impl Default for PayslyConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl PayslyConfig {
    /// Read `PAYSLY_API_URL` and `PAYSLY_TIMEOUT_SECS` from the environment.
    ///
    /// Missing, empty or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("PAYSLY_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let timeout = lookup("PAYSLY_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self { api_url, timeout }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PayslyConfig::from_lookup(|_| None);
        assert_eq!(config, PayslyConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = PayslyConfig::from_lookup(lookup_from(&[
            ("PAYSLY_API_URL", "http://localhost:5001/"),
            ("PAYSLY_TIMEOUT_SECS", "15"),
        ]));
        assert_eq!(config.api_url, "http://localhost:5001/");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = PayslyConfig::from_lookup(lookup_from(&[
            ("PAYSLY_API_URL", "   "),
            ("PAYSLY_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.timeout.is_none());

        let zero = PayslyConfig::from_lookup(lookup_from(&[("PAYSLY_TIMEOUT_SECS", "0")]));
        assert!(zero.timeout.is_none());
    }
}
