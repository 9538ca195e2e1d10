//! GasGuard backend binary

use anyhow::Context;
use gasguard_api::{start_server, AppState};
use gasguard_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Used when RUST_LOG is unset or unparseable
const DEFAULT_LOG_DIRECTIVES: &str =
    "gasguard=debug,gasguard_api=debug,swap_optimizer=debug,okx_client=debug,info";

fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment is used as-is
    let dotenv = dotenvy::dotenv();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    tracing::info!("Starting GasGuard Swap Optimizer Backend");

    let config = AppConfig::from_env().context("invalid configuration")?;
    if !config.okx.has_credentials() {
        tracing::warn!(
            "OKX API credentials are not fully configured (OKX_API_KEY, OKX_SECRET_KEY, \
             OKX_API_PASSPHRASE). Provider requests will be rejected."
        );
    }

    let state = AppState::from_config(config).context("failed to create OKX client")?;
    start_server(state).await?;

    Ok(())
}
