use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{StatusCode, Url};

use super::error::{ConfigError, PayError};
use super::signer::{build_signed_request, QueryParams, SignedRequest};
use crate::utils::api_key_man::ApiCredentials;
use crate::utils::transaction::{decode_response, PayTransactionsResponse};

const BINANCE_API_URL: &str = "https://api.binance.com";
const BINANCE_API_TIMEOUT: u64 = 5000;

pub const PAY_TRANSACTIONS_PATH: &str = "/sapi/v1/pay/transactions";
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

pub const BASE_URL_VAR: &str = "BINANCE_BASE_URL";
pub const TIMEOUT_VAR: &str = "BINANCE_API_TIMEOUT_MS";
pub const RECV_WINDOW_VAR: &str = "BINANCE_RECV_WINDOW";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as `recvWindow` when set.
    pub recv_window: Option<u64>,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE_API_URL.to_string(),
            timeout: Duration::from_millis(BINANCE_API_TIMEOUT),
            recv_window: None,
        }
    }
}

impl BinanceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset or empty variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(value) = get(TIMEOUT_VAR) {
            config.timeout = Duration::from_millis(parse_millis(TIMEOUT_VAR, &value)?);
        }
        if let Some(value) = get(RECV_WINDOW_VAR) {
            config.recv_window = Some(parse_millis(RECV_WINDOW_VAR, &value)?);
        }

        Ok(config)
    }
}

fn parse_millis(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Client for the signed Binance Pay history endpoint.
pub struct BinanceClient {
    http: reqwest::Client,
    config: BinanceConfig,
    credentials: ApiCredentials,
}

impl BinanceClient {
    pub fn new(config: BinanceConfig, credentials: ApiCredentials) -> Result<Self, PayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PayError::RequestBuild(e.to_string()))?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    /// Unsigned parameters for one history request.
    pub fn transactions_params(&self, timestamp_ms: i64) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("timestamp".to_string(), timestamp_ms.to_string());
        if let Some(recv_window) = self.config.recv_window {
            params.insert("recvWindow".to_string(), recv_window.to_string());
        }
        params
    }

    pub fn signed_transactions_request(&self, timestamp_ms: i64) -> SignedRequest {
        build_signed_request(
            &self.config.base_url,
            PAY_TRANSACTIONS_PATH,
            self.transactions_params(timestamp_ms),
            self.credentials.expose_secret(),
        )
    }

    /// Send one GET with the API key header and read the whole body.
    ///
    /// No retry. The body is fully buffered before returning, so the
    /// connection is released on every path.
    pub async fn execute(&self, url: &str, api_key: &str) -> Result<RawResponse, PayError> {
        let url = Url::parse(url).map_err(|e| PayError::RequestBuild(format!("{url}: {e}")))?;
        let api_key = HeaderValue::from_str(api_key)
            .map_err(|e| PayError::RequestBuild(format!("invalid {API_KEY_HEADER} value: {e}")))?;

        tracing::debug!(host = ?url.host_str(), path = %url.path(), "GET request");

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(PayError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(PayError::ReadBody)?.to_vec();

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        Ok(RawResponse { status, body })
    }

    /// Sign, send and decode a single transaction-history request.
    pub async fn fetch_transactions(&self) -> Result<PayTransactionsResponse, PayError> {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let request = self.signed_transactions_request(timestamp_ms);

        let raw = self.execute(&request.url, self.credentials.api_key()).await?;
        if !raw.status.is_success() {
            return Err(PayError::from_api_response(raw.status.as_u16(), &raw.body));
        }

        let response = decode_response(&raw.body)?;
        if !response.success {
            tracing::warn!(
                code = %response.code,
                message = %response.message,
                "Binance Pay reported an unsuccessful query"
            );
        }

        tracing::debug!(transactions = response.data.len(), "Decoded transactions");
        Ok(response)
    }
}

impl std::fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish()
    }
}
