use std::time::Duration;

use crate::errors::ChatError;

/// Endpoint the widget talks to when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.example.com/chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    /// Per-request limit for the native transport. The core never times out.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ChatError> {
        let endpoint = endpoint.into().trim().to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ChatError::InvalidEndpoint { endpoint });
        }
        Ok(Self { endpoint, timeout: None })
    }

    /// Reads `CHAT_ENDPOINT` and `CHAT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let endpoint = lookup("CHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let config = Self::new(endpoint)?;
        let timeout = lookup("CHAT_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Ok(Self { timeout, ..config })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), timeout: None }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_default_endpoint() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_endpoint_and_timeout() {
        let config = Config::from_lookup(lookup(&[
            ("CHAT_ENDPOINT", " http://localhost:8080/chat "),
            ("CHAT_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/chat");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn ignores_unusable_timeouts() {
        let zero = Config::from_lookup(lookup(&[("CHAT_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(zero.timeout, None);
        let junk = Config::from_lookup(lookup(&[("CHAT_TIMEOUT_SECS", "soon")])).unwrap();
        assert_eq!(junk.timeout, None);
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let err = Config::new("ftp://example.com/chat").unwrap_err();
        assert_eq!(
            err,
            ChatError::InvalidEndpoint { endpoint: "ftp://example.com/chat".into() }
        );
    }
}
