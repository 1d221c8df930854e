//! Client configuration loaded from environment variables

use crate::error::AzureError;
use std::time::Duration;

/// Environment variable holding the subscription ID.
pub const SUBSCRIPTION_ID_ENV: &str = "AZURE_SUBSCRIPTION_ID";
/// Environment variable holding the bearer token.
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";
/// Environment variable overriding the Resource Manager endpoint.
pub const ENDPOINT_ENV: &str = "AZURE_RESOURCE_MANAGER_ENDPOINT";
/// Environment variable overriding the per-request timeout, in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "AZURE_REQUEST_TIMEOUT_SECS";

/// Public-cloud Resource Manager endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`crate::AzureNetworkClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureClientConfig {
    /// Resource Manager base URL
    pub endpoint: String,
    /// Subscription the client operates in
    pub subscription_id: String,
    /// Bearer token for the Resource Manager audience
    pub access_token: String,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl AzureClientConfig {
    /// Creates a configuration for the public cloud.
    pub fn new(subscription_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscription_id: subscription_id.into(),
            access_token: access_token.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the Resource Manager endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, AzureError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AzureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AzureError::Config(format!("{key} environment variable is required")))
        };

        let subscription_id = required(SUBSCRIPTION_ID_ENV)?;
        let access_token = required(ACCESS_TOKEN_ENV)?;
        let endpoint = lookup(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let request_timeout = match lookup(REQUEST_TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| AzureError::Config(format!("{REQUEST_TIMEOUT_ENV} must be a number of seconds: {e}")))?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id,
            access_token,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = AzureClientConfig::from_lookup(lookup(&[
            (SUBSCRIPTION_ID_ENV, "123"),
            (ACCESS_TOKEN_ENV, "token"),
        ]))
        .unwrap();
        assert_eq!(config, AzureClientConfig::new("123", "token"));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AzureClientConfig::from_lookup(lookup(&[
            (SUBSCRIPTION_ID_ENV, "123"),
            (ACCESS_TOKEN_ENV, "token"),
            (ENDPOINT_ENV, "https://management.usgovcloudapi.net/"),
            (REQUEST_TIMEOUT_ENV, "90"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "https://management.usgovcloudapi.net");
        assert_eq!(config.request_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_from_lookup_requires_subscription_and_token() {
        let err = AzureClientConfig::from_lookup(lookup(&[(ACCESS_TOKEN_ENV, "token")])).unwrap_err();
        assert!(err.to_string().contains(SUBSCRIPTION_ID_ENV));

        let err = AzureClientConfig::from_lookup(lookup(&[(SUBSCRIPTION_ID_ENV, "123"), (ACCESS_TOKEN_ENV, " ")]))
            .unwrap_err();
        assert!(err.to_string().contains(ACCESS_TOKEN_ENV));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = AzureClientConfig::from_lookup(lookup(&[
            (SUBSCRIPTION_ID_ENV, "123"),
            (ACCESS_TOKEN_ENV, "token"),
            (REQUEST_TIMEOUT_ENV, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AzureError::Config(_)));
    }
}
