use crate::errors::{ApiError, ContainerError};
use crate::transport::TransportResponse;
use serde_json::Value;
use url::Url;

const BODY_SNIPPET_CHARS: usize = 200;

/// A backend response decoded by shape: exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success(Value),
    Failure(ApiError),
}

impl ApiResponse {
    /// Classifies a raw transport response.
    ///
    /// The status code is not consulted for classification; a 400 carrying
    /// `{"result": ...}` is still a success. It only decides how a body that
    /// is not JSON at all gets reported.
    pub fn decode(response: &TransportResponse, url: &Url) -> Result<Self, ContainerError> {
        let status = response.status;
        let value: Value = match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(source) if status.is_success() => {
                return Err(ContainerError::DeserializationFailed {
                    source,
                    body_snippet: snippet(&response.body),
                });
            }
            Err(_) => {
                return Err(ContainerError::HttpError {
                    status,
                    body: response.body.clone(),
                    url: Some(url.to_string()),
                });
            }
        };

        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ContainerError::MalformedResponse {
                    status,
                    reason: format!("expected a JSON object, got {}", json_kind(&other)),
                });
            }
        };

        match (object.remove("result"), object.remove("error")) {
            (Some(result), None) => Ok(ApiResponse::Success(result)),
            (None, Some(error)) => serde_json::from_value::<ApiError>(error)
                .map(ApiResponse::Failure)
                .map_err(|e| ContainerError::MalformedResponse {
                    status,
                    reason: format!("error payload is not {{type, code, message}}: {}", e),
                }),
            (Some(_), Some(_)) => Err(ContainerError::MalformedResponse {
                status,
                reason: "both 'result' and 'error' are present".to_string(),
            }),
            (None, None) => Err(ContainerError::MalformedResponse {
                status,
                reason: "neither 'result' nor 'error' is present".to_string(),
            }),
        }
    }

    pub fn into_result(self) -> Result<Value, ContainerError> {
        match self {
            ApiResponse::Success(value) => Ok(value),
            ApiResponse::Failure(err) => Err(ContainerError::Api(err)),
        }
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
