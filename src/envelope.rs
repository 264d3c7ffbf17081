//! Response contracts of the credential issuance backend.
//!
//! Every endpoint except credential download wraps its payload in a
//! [`BackendEnvelope`]. The gateway returns untyped JSON; these types are what
//! callers narrow it to.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::RequestError;

/// An application error reported inside an envelope's `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseError {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
}

impl From<ResponseError> for RequestError {
    fn from(value: ResponseError) -> Self {
        RequestError::Backend {
            error_code: value.error_code,
            error_message: value.error_message,
        }
    }
}

/// Generic wrapper around every enveloped backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendEnvelope<T> {
    pub id: String,
    pub version: String,
    pub response: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ResponseError>>,
}

impl<T: DeserializeOwned> BackendEnvelope<T> {
    /// Narrows an untyped response body to this envelope.
    pub fn from_json(json: Json) -> Result<Self, RequestError> {
        serde_json::from_value(json).map_err(RequestError::unexpected_shape)
    }
}

impl<T> BackendEnvelope<T> {
    /// True when the envelope carries no application errors.
    pub fn is_success(&self) -> bool {
        self.errors.as_ref().map_or(true, Vec::is_empty)
    }

    /// The error the backend reported first; later entries are not surfaced.
    pub fn first_error(&self) -> Option<&ResponseError> {
        self.errors.as_ref().and_then(|errors| errors.first())
    }

    /// Consumes the envelope, yielding the payload or the first reported error.
    pub fn into_result(self) -> Result<T, RequestError> {
        match self.errors.and_then(|errors| errors.into_iter().next()) {
            Some(error) => Err(error.into()),
            None => Ok(self.response),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcGeneratePayload {
    /// Serialized verifiable credential
    pub vc: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestPayload {
    pub id: String,
    pub request_id: String,
}

/// Processing state of a credential request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatusCode {
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "ISSUED")]
    Issued,
    #[serde(rename = "printing")]
    Printing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatusPayload {
    pub status_code: CredentialStatusCode,
}

pub type OtpRequestResponse = BackendEnvelope<OtpRequestPayload>;
pub type VcGenerateResponse = BackendEnvelope<VcGeneratePayload>;
pub type CredentialRequestResponse = BackendEnvelope<CredentialRequestPayload>;
pub type CredentialStatusResponse = BackendEnvelope<CredentialStatusPayload>;

/// Decoded credential as produced by the backend. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedCredential(pub Json);

/// Verifiable credential document. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifiableCredential(pub Json);

/// Body of the credential download endpoint, which is not enveloped.
///
/// Both fields may be present at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDownloadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<DecodedCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifiable_credential: Option<VerifiableCredential>,
}

impl CredentialDownloadResponse {
    pub fn from_json(json: Json) -> Result<Self, RequestError> {
        serde_json::from_value(json).map_err(RequestError::unexpected_shape)
    }
}
