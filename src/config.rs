use crate::client::DEFAULT_TIMEOUT;
use std::env;
use std::time::Duration;

pub const DEFAULT_END_POINT: &str = "http://skygear.dev/";

pub const END_POINT_ENV: &str = "SKYGEAR_ENDPOINT";
pub const API_KEY_ENV: &str = "SKYGEAR_API_KEY";

/// Settings used to build a [`Container`](crate::Container) over HTTP.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub end_point: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        ContainerConfig {
            end_point: DEFAULT_END_POINT.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ContainerConfig {
    /// Defaults overridden by `SKYGEAR_ENDPOINT` and `SKYGEAR_API_KEY` when set
    /// and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = ContainerConfig::default();
        if let Some(end_point) = non_empty(END_POINT_ENV) {
            config.end_point = end_point;
        }
        config.api_key = non_empty(API_KEY_ENV);
        config
    }

    pub fn with_end_point(mut self, end_point: impl Into<String>) -> Self {
        self.end_point = end_point.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
