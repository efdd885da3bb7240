//! API credential loading.
//!
//! Credentials come from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`, or from a
//! key file named by `BINANCE_CREDENTIALS_FILE` with the layout
//!
//! ```text
//! api_key: <key>
//! api_sec: <secret>
//! ```
//!
//! The secret is kept in a `SecretString` so it never shows up in `Debug`
//! output and is zeroed on drop.

use secrecy::{ExposeSecret, SecretString};

use crate::exchanges::error::ConfigError;

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const SECRET_KEY_VAR: &str = "BINANCE_SECRET_KEY";
pub const CREDENTIALS_FILE_VAR: &str = "BINANCE_CREDENTIALS_FILE";

#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`.
    ///
    /// The variable pair wins when both are present (empty values included).
    /// Otherwise the credentials file is used if one is configured.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (lookup(API_KEY_VAR), lookup(SECRET_KEY_VAR)) {
            (Some(api_key), Some(secret_key)) => Ok(Self::new(api_key, secret_key)),
            (api_key, _) => match lookup(CREDENTIALS_FILE_VAR) {
                Some(path) => Self::from_file(&path),
                None if api_key.is_none() => Err(ConfigError::MissingEnvVar(API_KEY_VAR)),
                None => Err(ConfigError::MissingEnvVar(SECRET_KEY_VAR)),
            },
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|error| ConfigError::CredentialsFile {
                path: path.to_string(),
                error,
            })?;

        let (api_key, api_sec) = parse_credentials(&contents);
        let api_key = api_key.ok_or_else(|| ConfigError::IncompleteCredentialsFile {
            path: path.to_string(),
            field: "api_key",
        })?;
        let api_sec = api_sec.ok_or_else(|| ConfigError::IncompleteCredentialsFile {
            path: path.to_string(),
            field: "api_sec",
        })?;

        Ok(Self::new(api_key, api_sec))
    }

    /// The public API key, sent as `X-MBX-APIKEY`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Only for computing signatures. Never log the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

fn parse_credentials(contents: &str) -> (Option<String>, Option<String>) {
    let mut api_key = None;
    let mut api_sec = None;

    for line in contents.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("api_key:") {
            api_key = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("api_sec:") {
            api_sec = Some(value.trim().to_string());
        }
    }

    (api_key, api_sec)
}
