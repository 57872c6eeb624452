use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

/// Signup parameters. `email` is only sent when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub credentials: Credentials,
    pub email: Option<String>,
}

impl Signup {
    pub fn new(credentials: Credentials) -> Self {
        Signup {
            credentials,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Issued by a successful signup or login. Storing it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaCall {
    pub name: String,
    pub args: Option<Value>,
}

impl LambdaCall {
    pub fn new(name: impl Into<String>) -> Self {
        LambdaCall {
            name: name.into(),
            args: None,
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }
}
