//! x402-discover — list resources known to an x402 facilitator.
//!
//! Reads `CDP_API_KEY_ID` / `CDP_API_KEY_SECRET` (a `.env` file is honoured),
//! prints the listing to stdout and logs to stderr.
//!
//! Exit codes: 0 success, 1 listing failed, 2 configuration error.

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use x402_discovery::{
    render_listing, Credentials, DiscoveryClient, DiscoveryError, FacilitatorConfig,
    ResourceDiscovery,
};

/// Compact logs on stderr; `X402_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("x402_discovery=info,warn"));

    let json = std::env::var("X402_LOG_JSON").ok().as_deref() == Some("1");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn build_client() -> Result<DiscoveryClient, DiscoveryError> {
    let credentials = Credentials::from_env()?;
    let config = FacilitatorConfig::load()?;
    info!(
        key_id = credentials.key_id(),
        url = %config.base_url,
        timeout_s = config.timeout.as_secs(),
        "facilitator config loaded"
    );
    DiscoveryClient::new(credentials, config)
}

async fn run(discovery: &dyn ResourceDiscovery) -> anyhow::Result<()> {
    let listing = discovery
        .list_resources()
        .await
        .with_context(|| format!("listing resources from {}", discovery.name()))?;
    print!("{}", render_listing(&listing));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env when present; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    let client = match build_client() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "cannot start discovery");
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    match run(&client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "discovery failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
