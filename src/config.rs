use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the backend host, e.g. `https://api.example.org`
pub const HOST_ENV: &str = "CREDENTIAL_BACKEND_HOST";

/// Environment variable holding the whole-request timeout in seconds
pub const TIMEOUT_ENV: &str = "CREDENTIAL_BACKEND_TIMEOUT_SECS";

/// Connection settings for the credential backend.
///
/// The host is resolved once and injected into the gateway; request paths are
/// appended to it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    host: String,
    timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Creates a new configuration for the given backend host
    ///
    /// # Arguments
    /// * `host` - Absolute `http` or `https` URL of the backend. Surrounding
    ///   whitespace and a trailing `/` are removed.
    pub fn new(host: impl AsRef<str>) -> Result<Self, ConfigError> {
        let trimmed = host.as_ref().trim();
        let host = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();

        let parsed = Url::parse(&host).map_err(|e| ConfigError::InvalidHost {
            host: host.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidHost {
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
                host,
            });
        }

        Ok(Self {
            host,
            timeout: None,
        })
    }

    /// Sets a timeout covering the whole request, from connect to body read.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads the configuration from `CREDENTIAL_BACKEND_HOST` and the optional
    /// `CREDENTIAL_BACKEND_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).ok_or_else(|| ConfigError::InvalidHost {
            host: String::new(),
            reason: format!("{HOST_ENV} is not set"),
        })?;

        let config = Self::new(host)?;

        match lookup(TIMEOUT_ENV) {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidSetting {
                    key: TIMEOUT_ENV.to_string(),
                    value: value.clone(),
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds the transport client for this configuration.
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
