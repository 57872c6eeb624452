use crate::client::HttpTransport;
use crate::config::ContainerConfig;
use crate::errors::ContainerError;
use crate::models::{Credentials, LambdaCall, Session, Signup};
use crate::response::ApiResponse;
use crate::transport::{Transport, TransportRequest};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::{ParseError, Url};

pub const API_KEY_HEADER: &str = "x-skygear-api-key";

const SIGNUP_ACTION: &str = "auth:signup";
const LOGIN_ACTION: &str = "auth:login";

/// Client for the backend's auth and lambda endpoints.
///
/// Every operation issues exactly one `POST`, then classifies the reply by
/// shape: `{"result": ...}` becomes `Ok`, `{"error": {...}}` becomes
/// [`ContainerError::Api`]. The API key is held per instance and attached to
/// each request made after [`Container::config_api_key`].
#[derive(Debug)]
pub struct Container<T: Transport = HttpTransport> {
    end_point: Url,
    api_key: Option<HeaderValue>,
    transport: T,
}

struct Reply {
    status: StatusCode,
    result: Value,
}

impl Container<HttpTransport> {
    pub fn new() -> Result<Self, ContainerError> {
        Self::from_config(ContainerConfig::default())
    }

    pub fn with_end_point(end_point: &str) -> Result<Self, ContainerError> {
        Self::from_config(ContainerConfig::default().with_end_point(end_point))
    }

    pub fn from_config(config: ContainerConfig) -> Result<Self, ContainerError> {
        let transport = HttpTransport::with_timeout(config.timeout)?;
        let mut container = Container::with_transport(&config.end_point, transport)?;
        if let Some(api_key) = config.api_key.as_deref() {
            container.config_api_key(api_key)?;
        }
        Ok(container)
    }
}

impl<T: Transport> Container<T> {
    pub fn with_transport(end_point: &str, transport: T) -> Result<Self, ContainerError> {
        Ok(Container {
            end_point: parse_end_point(end_point)?,
            api_key: None,
            transport,
        })
    }

    pub fn end_point(&self) -> &Url {
        &self.end_point
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().and_then(|value| value.to_str().ok())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replaces the API key sent with subsequent requests.
    pub fn config_api_key(&mut self, api_key: &str) -> Result<(), ContainerError> {
        let mut value =
            HeaderValue::from_str(api_key).map_err(|_| ContainerError::InvalidApiKey)?;
        value.set_sensitive(true);
        self.api_key = Some(value);
        debug!("API key configured");
        Ok(())
    }

    /// Signs up with `user_id` and `password`; resolves to the access token.
    /// `user_id` doubles as the account email.
    pub async fn signup(&self, user_id: &str, password: &str) -> Result<String, ContainerError> {
        let signup = Signup::new(Credentials::new(user_id, password)).with_email(user_id);
        Ok(self.signup_session(&signup).await?.access_token)
    }

    pub async fn signup_with_email(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ContainerError> {
        let signup = Signup::new(Credentials::new(user_id, password)).with_email(email);
        Ok(self.signup_session(&signup).await?.access_token)
    }

    pub async fn signup_session(&self, signup: &Signup) -> Result<Session, ContainerError> {
        let mut params = credential_params(&signup.credentials);
        if let Some(email) = &signup.email {
            params.insert("email".to_string(), Value::String(email.clone()));
        }
        let reply = self.make_request(SIGNUP_ACTION, params).await?;
        decode_session(reply)
    }

    /// Logs in; resolves to the access token.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<String, ContainerError> {
        let credentials = Credentials::new(user_id, password);
        Ok(self.login_session(&credentials).await?.access_token)
    }

    pub async fn login_session(&self, credentials: &Credentials) -> Result<Session, ContainerError> {
        let reply = self
            .make_request(LOGIN_ACTION, credential_params(credentials))
            .await?;
        decode_session(reply)
    }

    /// Invokes the lambda `name` (`"namespace:function"`, mapped to the path
    /// `namespace/function`). `args` is passed through untouched and omitted
    /// entirely when `None`.
    pub async fn lambda(&self, name: &str, args: Option<Value>) -> Result<Value, ContainerError> {
        let mut params = Map::new();
        if let Some(args) = args {
            params.insert("args".to_string(), args);
        }
        Ok(self.make_request(name, params).await?.result)
    }

    pub async fn call(&self, call: LambdaCall) -> Result<Value, ContainerError> {
        self.lambda(&call.name, call.args).await
    }

    pub fn build_url(&self, action: &str) -> Result<Url, ContainerError> {
        let segments: Vec<&str> = action.split(':').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ContainerError::InvalidLambdaName(action.to_string()));
        }

        let mut url = self.end_point.clone();
        url.path_segments_mut()
            .map_err(|_| ContainerError::BaseUrlInvalid(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert(API_KEY_HEADER, api_key.clone());
        }
        headers
    }

    async fn make_request(
        &self,
        action: &str,
        mut params: Map<String, Value>,
    ) -> Result<Reply, ContainerError> {
        let url = self.build_url(action)?;
        params.insert("action".to_string(), Value::String(action.to_string()));

        let request = TransportRequest {
            method: Method::POST,
            url: url.clone(),
            params,
            headers: self.headers(),
        };

        debug!(action, url = %url, "dispatching request");
        let response = self.transport.send(request).await?;
        debug!(action, status = %response.status, "received response");

        let decoded = ApiResponse::decode(&response, &url).inspect_err(|e| {
            if let ContainerError::MalformedResponse { reason, .. } = e {
                warn!(action, status = %response.status, reason = %reason, "malformed response");
            }
        })?;

        if let ApiResponse::Failure(err) = &decoded {
            debug!(action, error_type = %err.error_type, code = err.code, "backend returned error");
        }

        Ok(Reply {
            status: response.status,
            result: decoded.into_result()?,
        })
    }
}

fn parse_end_point(end_point: &str) -> Result<Url, ContainerError> {
    let mut url = Url::parse(end_point)?;
    if url.cannot_be_a_base() {
        return Err(ContainerError::BaseUrlInvalid(
            ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn credential_params(credentials: &Credentials) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert(
        "user_id".to_string(),
        Value::String(credentials.user_id.clone()),
    );
    params.insert(
        "password".to_string(),
        Value::String(credentials.password.clone()),
    );
    params
}

fn decode_session(reply: Reply) -> Result<Session, ContainerError> {
    let status = reply.status;
    serde_json::from_value::<Session>(reply.result).map_err(|e| {
        warn!(status = %status, "auth result is missing session fields");
        ContainerError::MalformedResponse {
            status,
            reason: format!("auth result is not {{user_id, access_token}}: {}", e),
        }
    })
}
