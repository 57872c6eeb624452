use crate::errors::ContainerError;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::RequestBuilder;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] backed by a `reqwest` client. Params go out as a JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ContainerError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ContainerError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ContainerError::HttpClientBuildFailed)?;

        Ok(HttpTransport { http_client })
    }

    fn add_headers(&self, builder: RequestBuilder, headers: HeaderMap) -> RequestBuilder {
        if headers.is_empty() {
            builder
        } else {
            builder.headers(headers)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ContainerError> {
        let builder = self
            .http_client
            .request(request.method, request.url)
            .json(&request.params);
        let builder = self.add_headers(builder, request.headers);

        let response = match builder.send().await {
            Ok(res) => res,
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    return Err(ContainerError::NetworkIssue(e));
                }
                return Err(ContainerError::RequestFailed(e));
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(ContainerError::RequestFailed)?;

        Ok(TransportResponse { status, body })
    }
}
