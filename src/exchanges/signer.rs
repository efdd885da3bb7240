//! Canonical query encoding and HMAC-SHA256 request signing.
//!
//! Binance recomputes the signature over the exact query bytes it receives,
//! so the encoding here must be deterministic: parameters live in a
//! `BTreeMap` and are always serialized in ascending key order using
//! `application/x-www-form-urlencoded` rules.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Request parameters, ordered by key.
pub type QueryParams = BTreeMap<String, String>;

pub const SIGNATURE_PARAM: &str = "signature";

/// A signed request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// The caller's parameters plus `signature`.
    pub params: QueryParams,
    /// `{base}{path}?{encoded params}`
    pub url: String,
}

/// Serialize parameters into the canonical query string (no leading `?`).
pub fn encode_query(params: &QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Parse a query string back into parameters. A repeated key keeps its last value.
pub fn parse_query(query: &str) -> QueryParams {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}

/// HMAC-SHA256 of `message` keyed with `secret`, as lowercase hex.
///
/// An empty secret is accepted; the exchange decides whether it is valid.
pub fn sign(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Sign `params` and assemble the final request URL.
///
/// The signature covers the canonical encoding of `params` as given. Any
/// pre-existing `signature` entry is dropped first so it never signs itself.
pub fn build_signed_request(
    base_url: &str,
    path: &str,
    mut params: QueryParams,
    secret: &str,
) -> SignedRequest {
    params.remove(SIGNATURE_PARAM);

    let canonical = encode_query(&params);
    let signature = sign(secret, &canonical);
    params.insert(SIGNATURE_PARAM.to_string(), signature);

    let url = format!(
        "{}{}?{}",
        base_url.trim_end_matches('/'),
        path,
        encode_query(&params)
    );

    SignedRequest { params, url }
}
