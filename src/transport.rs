use crate::errors::ContainerError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use url::Url;

/// A fully composed request, ready to hand to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub params: Map<String, Value>,
    pub headers: HeaderMap,
}

/// Raw status and body as the server returned them.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Issues one HTTP-like request and returns whatever came back.
///
/// Implementations must not interpret the body; non-2xx statuses are
/// returned as ordinary responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ContainerError>;
}
