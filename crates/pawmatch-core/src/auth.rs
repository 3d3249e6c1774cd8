//! Login flow
//!
//! Name and email are both required; nothing else is checked locally. The
//! session itself lives in the HTTP client's cookie jar.

use pawmatch_client::DogApi;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("name is required")]
    MissingName,

    #[error("email is required")]
    MissingEmail,
}

/// Name and email submitted by the login form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    name: String,
    email: String,
}

impl Credentials {
    pub fn new(name: &str, email: &str) -> Result<Self, CredentialsError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(CredentialsError::MissingName);
        }
        if email.is_empty() {
            return Err(CredentialsError::MissingEmail);
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    Rejected,
}

/// Exchange credentials for a session; any failure is a rejection.
pub async fn login(api: &dyn DogApi, credentials: &Credentials) -> LoginOutcome {
    match api.login(credentials.name(), credentials.email()).await {
        Ok(()) => {
            info!("Logged in as {}", credentials.name());
            LoginOutcome::LoggedIn
        }
        Err(e) => {
            warn!("Login failed: {}", e);
            LoginOutcome::Rejected
        }
    }
}
