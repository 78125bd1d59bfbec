// Smart grocery list organizer backed by an OpenAI-compatible vision model.

use anyhow::Context;
use grocery_organizer::{server, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env().context("invalid configuration")?;

    server::run(settings).await
}
