use thiserror::Error;

/// Represents errors that may occur while talking to the credential backend
///
/// Every variant is returned to the immediate caller as-is; the gateway does
/// not recover from any of them. Fields cross the FFI boundary intact, so
/// foreign callers can branch on `error_code` and `status`.
#[derive(Error, Debug, uniffi::Error)]
pub enum RequestError {
    /// The request path is not root-relative
    #[error("Request path must start with '/': {0:?}")]
    InvalidPath(String),

    /// Failed to send the request or to read the response body
    #[error("Failed to send request: {0}")]
    Transport(String),

    /// The response body is not valid JSON
    #[error("Failed to parse response body: {0}")]
    Parse(String),

    /// Server answered with a status of 400 or above
    ///
    /// `message` is taken from the body's `message` field, falling back to
    /// its `error` field.
    #[error("{}", .message.as_deref().unwrap_or_default())]
    HttpStatus {
        status: u16,
        message: Option<String>,
    },

    /// Server answered successfully but reported an application error in the
    /// envelope's `errors` list
    #[error("{error_message}")]
    Backend {
        error_code: String,
        error_message: String,
    },

    /// The JSON body does not have the shape the caller asked for
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl RequestError {
    /// The backend's stable error code, for application errors only.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            RequestError::Backend { error_code, .. } => Some(error_code),
            _ => None,
        }
    }

    /// The HTTP status that caused the failure, if the server answered with
    /// an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn unexpected_shape(error: serde_json::Error) -> Self {
        RequestError::UnexpectedShape(error.to_string())
    }
}

/// Errors raised while building a gateway from configuration
#[derive(Error, Debug, uniffi::Error)]
pub enum ConfigError {
    /// The backend host is missing or is not an absolute http(s) URL
    #[error("Invalid backend host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    /// A numeric setting could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidSetting { key: String, value: String },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ConfigError {
    fn from(value: reqwest::Error) -> Self {
        ConfigError::Client(value.to_string())
    }
}
