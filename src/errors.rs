use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError as UrlParseError;

/// Error payload carried under the `error` key of a failed response.
///
/// The container does not interpret `error_type` or `code`; both are kept
/// exactly as the backend sent them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error_type} ({code}): {message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: i64,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Configuration Error: Invalid end point: {0}")]
    BaseUrlInvalid(#[from] UrlParseError),

    #[error("Configuration Error: Failed to build HTTP client: {0}")]
    HttpClientBuildFailed(reqwest::Error),

    #[error("Configuration Error: API key is not a valid header value")]
    InvalidApiKey,

    #[error("Request Error: Invalid lambda name '{0}'")]
    InvalidLambdaName(String),

    #[error("Request Error: Failed to build or send the request: {0}")]
    RequestFailed(reqwest::Error),

    #[error("Network Error: Connection or timeout issue: {0}")]
    NetworkIssue(reqwest::Error),

    #[error("API Error: {0}")]
    Api(ApiError),

    #[error("HTTP Error: Server responded with status {status}: {body}")]
    HttpError {
        // non-2xx whose body is not JSON
        status: StatusCode,
        body: String,
        url: Option<String>,
    },

    #[error("Response Error: Failed to deserialize response body: {source}. Body snippet: '{body_snippet}'")]
    DeserializationFailed {
        source: serde_json::Error,
        body_snippet: String,
    },

    #[error("Response Error: Malformed response (status {status}): {reason}")]
    MalformedResponse { status: StatusCode, reason: String },
}

impl ContainerError {
    /// The backend error payload, when the failure came from the backend
    /// rather than from the transport or from decoding.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ContainerError::Api(err) => Some(err),
            _ => None,
        }
    }
}
