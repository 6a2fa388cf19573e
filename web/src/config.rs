use thiserror::Error;

/// Supabase connection settings captured from the build environment.
///
/// The bundle runs in the browser, so the endpoint and key are baked in at
/// compile time rather than read at runtime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Supabase project
    pub supabase_url: String,
    /// Public (anon) API key of the Supabase project
    pub supabase_anon_key: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SUPABASE_URL was not set when the bundle was built")]
    MissingUrl,
    #[error("SUPABASE_ANON_KEY was not set when the bundle was built")]
    MissingAnonKey,
}

impl AppConfig {
    /// Loads the configuration from build-time environment variables.
    ///
    /// Without these the service cannot be reached at all, so callers treat a
    /// failure here as fatal at startup.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let supabase_url = option_env!("SUPABASE_URL").ok_or(ConfigError::MissingUrl)?;
        let supabase_anon_key =
            option_env!("SUPABASE_ANON_KEY").ok_or(ConfigError::MissingAnonKey)?;
        Ok(Self {
            supabase_url: supabase_url.to_string(),
            supabase_anon_key: supabase_anon_key.to_string(),
        })
    }
}
