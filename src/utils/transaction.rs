use std::io::{self, Write};

use serde::Deserialize;

use crate::exchanges::error::PayError;

/// One entry of the Binance Pay transaction history.
///
/// `amount` stays as the decimal text the API sent. `note` is optional
/// on the wire and renders empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub note: String,
    pub amount: String,
    pub currency: String,
    #[serde(rename = "transactionTime")]
    pub transaction_time: i64,
}

/// Body of `GET /sapi/v1/pay/transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayTransactionsResponse {
    pub code: String,
    pub message: String,
    pub success: bool,
    /// Absent and `null` both decode as empty.
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub data: Vec<Transaction>,
}

fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

pub fn decode_response(body: &[u8]) -> Result<PayTransactionsResponse, PayError> {
    Ok(serde_json::from_slice(body)?)
}

impl Transaction {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Note: {}", self.note)?;
        writeln!(out, "Amount: {}", self.amount)?;
        writeln!(out, "Currency: {}", self.currency)?;
        writeln!(out, "Transaction Time: {}", self.transaction_time)?;
        writeln!(out)
    }
}

/// Print every record in response order, each block followed by a blank line.
pub fn render_transactions<W: Write>(transactions: &[Transaction], out: &mut W) -> io::Result<()> {
    for tx in transactions {
        tx.render(out)?;
    }
    out.flush()
}
