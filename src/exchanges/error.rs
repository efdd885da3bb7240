//! Failure kinds for configuration and for the signed transaction-history call.

use thiserror::Error;

/// Errors raised while loading credentials or client settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnvVar(&'static str),

    #[error("failed to read credentials file {path}: {error}")]
    CredentialsFile { path: String, error: std::io::Error },

    #[error("credentials file {path} has no `{field}:` line")]
    IncompleteCredentialsFile { path: String, field: &'static str },

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum PayError {
    /// The URL, header value or HTTP client could not be built.
    #[error("Error creating request: {0}")]
    RequestBuild(String),

    /// DNS, connect, TLS or timeout failure while sending.
    #[error("Error sending request: {0}")]
    Transport(reqwest::Error),

    /// The connection broke while the body was being read.
    #[error("Error reading response: {0}")]
    ReadBody(reqwest::Error),

    /// Body is not JSON or does not match the response shape.
    #[error("Error unmarshaling JSON: {0}")]
    Decode(serde_json::Error),

    /// Non-2xx status returned by the exchange.
    #[error("Binance API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },
}

// Not `#[from]`: the message already carries the cause.
impl From<serde_json::Error> for PayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

impl PayError {
    /// Build an `Api` error from a non-2xx response body.
    ///
    /// Binance reports failures as `{"code": -2015, "msg": "..."}`. Bodies
    /// without that shape are carried through verbatim.
    pub fn from_api_response(status: u16, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ApiError {
            code: i64,
            msg: String,
        }

        match serde_json::from_slice::<ApiError>(body) {
            Ok(err) => Self::Api {
                status,
                code: err.code,
                message: err.msg,
            },
            Err(_) => Self::Api {
                status,
                code: 0,
                message: String::from_utf8_lossy(body).trim().to_string(),
            },
        }
    }
}
