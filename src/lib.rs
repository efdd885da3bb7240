//! Signed Binance Pay transaction-history query.
//!
//! [`exchanges::signer`] builds the canonical, HMAC-SHA256 signed query;
//! [`exchanges::binance`] sends it; [`utils::transaction`] decodes and
//! prints the returned records.

pub mod exchanges;
pub mod utils;
