//! GoTrue calls: credential sign-in, sign-up and session termination.
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Supabase;

/// The authenticated principal that owns tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An active login context issued by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: Identity,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// The request never completed.
    #[error("could not reach the authentication service: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider rejected the request; carries its own message so the
    /// user sees what the provider said.
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// GoTrue error payloads are not uniform across endpoints; the message can
/// arrive under any of these keys.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self, status: StatusCode) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .unwrap_or_else(|| format!("authentication failed ({status})"))
    }
}

/// Sign-up response: a full session when the project auto-confirms accounts,
/// otherwise just the unconfirmed user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Authenticated(Session),
    Unconfirmed(Identity),
}

impl Supabase {
    /// Exchanges credentials for a session via the password grant.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(self.auth_endpoint("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json::<Session>().await?)
    }

    /// Registers a new account. Returns the issued session, or `None` when
    /// the project requires email confirmation before a session exists.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        let response = self
            .http
            .post(self.auth_endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let response = check(response).await?;
        match response.json::<SignUpResponse>().await? {
            SignUpResponse::Authenticated(session) => Ok(Some(session)),
            SignUpResponse::Unconfirmed(_) => Ok(None),
        }
    }

    /// Asks the provider to revoke the session's tokens.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.auth_endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.into_message(status),
        Err(_) => format!("authentication failed ({status})"),
    };
    Err(AuthError::Rejected(message))
}
