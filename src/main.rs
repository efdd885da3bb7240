use std::process::ExitCode;

use anyhow::Context;

use paytx::exchanges::binance::{BinanceClient, BinanceConfig};
use paytx::utils::api_key_man::ApiCredentials;
use paytx::utils::logging::init_logging;
use paytx::utils::transaction::render_transactions;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // optional, missing .env is fine
    dotenvy::dotenv().ok();
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let credentials = ApiCredentials::from_env().context("Error loading credentials")?;
    let config = BinanceConfig::from_env().context("Error loading configuration")?;
    let client = BinanceClient::new(config, credentials)?;

    tracing::debug!(
        base_url = %client.config().base_url,
        timeout_ms = client.config().timeout.as_millis() as u64,
        "Querying Binance Pay transaction history"
    );

    let response = client.fetch_transactions().await?;

    let stdout = std::io::stdout();
    render_transactions(&response.data, &mut stdout.lock()).context("Error writing output")?;

    Ok(())
}
