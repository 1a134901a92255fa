//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, GreenlightHandler};
use greenlight_core::BotConfig;
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord client for the Greenlight bot.
///
/// Wraps the Serenity client with the Greenlight event handler installed.
///
/// # Example
/// ```no_run
/// use greenlight_core::BotConfig;
/// use greenlight_social::GreenlightBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = BotConfig::from_env()?;
///     let mut bot = GreenlightBot::new(config).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct GreenlightBot {
    /// Serenity client instance
    client: Client,
}

impl GreenlightBot {
    /// Create a new GreenlightBot instance.
    ///
    /// # Errors
    /// Returns an error if the bot token is invalid or the Serenity client
    /// fails to initialize.
    #[instrument(skip(config), fields(guild = %config.guild_name))]
    pub async fn new(config: BotConfig) -> Result<Self, DiscordError> {
        info!("Initializing Greenlight Discord bot");

        let config = Arc::new(config);
        let handler = GreenlightHandler::new(Arc::clone(&config));
        let intents = GreenlightHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&config.token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");

        Ok(Self { client })
    }

    /// Start the Discord bot.
    ///
    /// This method blocks until the bot is shut down (e.g., via Ctrl+C).
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
