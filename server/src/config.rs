//! Server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
}

/// Which implementation backs the account provider and the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Firebase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_HTTP_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub database_url: String,
    /// Database secret or access token appended as `auth=`.
    pub database_auth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub cookie_secure: bool,
    pub backend: BackendKind,
    pub firebase: Option<FirebaseConfig>,
    pub timeouts: HttpTimeouts,
    pub seed_panels: bool,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: default false
    /// - `BACKEND`: `memory` (default) or `firebase`
    /// - `FIREBASE_API_KEY`, `FIREBASE_DATABASE_URL`: required for `firebase`
    /// - `FIREBASE_DATABASE_AUTH`: database credential
    /// - `HTTP_REQUEST_TIMEOUT_SECS`: default 30
    /// - `HTTP_CONNECT_TIMEOUT_SECS`: default 10
    /// - `SEED_PANELS`: default true
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable values or missing Firebase settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Parse(format!("invalid PORT: {raw}")))?,
            None => DEFAULT_PORT,
        };
        let cookie_secure = parse_bool(lookup("COOKIE_SECURE").as_deref()).unwrap_or(false);
        let seed_panels = parse_bool(lookup("SEED_PANELS").as_deref()).unwrap_or(true);
        let backend = parse_backend(lookup("BACKEND").as_deref())?;

        let firebase = match backend {
            BackendKind::Memory => None,
            BackendKind::Firebase => {
                let api_key = lookup("FIREBASE_API_KEY").ok_or(ConfigError::Missing { var: "FIREBASE_API_KEY" })?;
                let database_url = lookup("FIREBASE_DATABASE_URL")
                    .ok_or(ConfigError::Missing { var: "FIREBASE_DATABASE_URL" })?
                    .trim_end_matches('/')
                    .to_owned();
                let database_auth = lookup("FIREBASE_DATABASE_AUTH").filter(|v| !v.trim().is_empty());
                Some(FirebaseConfig { api_key, database_url, database_auth })
            }
        };

        let timeouts = HttpTimeouts {
            request_secs: parse_u64(lookup("HTTP_REQUEST_TIMEOUT_SECS"), DEFAULT_HTTP_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("HTTP_CONNECT_TIMEOUT_SECS"), DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { port, cookie_secure, backend, firebase, timeouts, seed_panels })
    }
}

pub(crate) fn parse_bool(raw: Option<&str>) -> Option<bool> {
    raw.and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_backend(raw: Option<&str>) -> Result<BackendKind, ConfigError> {
    match raw.map(str::trim).unwrap_or("memory") {
        "memory" => Ok(BackendKind::Memory),
        "firebase" => Ok(BackendKind::Firebase),
        other => Err(ConfigError::Parse(format!(
            "unsupported BACKEND '{other}' (expected 'memory' or 'firebase')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
