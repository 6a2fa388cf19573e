//! Thin request/response client for the Supabase services the app consumes:
//! GoTrue for sessions and PostgREST for task rows. Only the wire contracts
//! matter here; durability, password checks and query execution are the
//! service's concern.
mod auth;
mod tasks;

pub use auth::{AuthError, Identity, Session};
pub use tasks::TaskApi;

use crate::config::AppConfig;

/// Handle to the Supabase project. Cheap to clone; every request carries the
/// project's anon key in the `apikey` header.
#[derive(Debug, Clone)]
pub struct Supabase {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl Supabase {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn rest_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }
}
