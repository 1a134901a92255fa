//! Greenlight bot binary.
//!
//! Loads configuration from the environment (with `.env` support), connects
//! to Discord, and runs until shutdown.

use greenlight_core::BotConfig;
use greenlight_social::GreenlightBot;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // Missing or malformed environment values are the only fatal errors.
    let config = BotConfig::from_env()?;
    info!(guild = %config.guild_name, "Configuration loaded");

    let mut bot = GreenlightBot::new(config).await?;
    bot.start().await?;

    Ok(())
}
