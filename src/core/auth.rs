//! Default authorization mode of the API
//!
//! The binder never authenticates anything: the selected mode is handed to
//! the managed service unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization mode applied to every operation of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthorizationMode {
    /// Static API key
    #[default]
    #[serde(rename = "API_KEY")]
    ApiKey,

    /// Signed requests from IAM principals
    #[serde(rename = "AWS_IAM")]
    Iam,

    /// Tokens issued by a user pool
    #[serde(rename = "AMAZON_COGNITO_USER_POOLS")]
    UserPool,

    /// Tokens issued by an OpenID Connect provider
    #[serde(rename = "OPENID_CONNECT")]
    OpenIdConnect,

    /// Custom authorizer function
    #[serde(rename = "AWS_LAMBDA")]
    Lambda,
}

impl AuthorizationMode {
    /// Provider identifier for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationMode::ApiKey => "API_KEY",
            AuthorizationMode::Iam => "AWS_IAM",
            AuthorizationMode::UserPool => "AMAZON_COGNITO_USER_POOLS",
            AuthorizationMode::OpenIdConnect => "OPENID_CONNECT",
            AuthorizationMode::Lambda => "AWS_LAMBDA",
        }
    }
}

impl fmt::Display for AuthorizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
