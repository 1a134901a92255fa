//! Serenity event handler for the Greenlight bot.
//!
//! Three responsibilities meet here: seeding vote reactions on new
//! suggestions, parsing the manual curation command, and running the
//! scheduled curation tick.

use super::curator::{SuggestionCurator, fetch_emoji};
use super::error::DiscordResult;
use chrono::{Local, Timelike};
use greenlight_core::BotConfig;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::{Message, ReactionType};
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::guild::Guild;
use serenity::model::id::GuildId;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Seconds between scheduler ticks. Together with the wall-clock hour gate
/// this approximates a once-per-day pass; the interval does not divide the
/// day evenly, so the pass fires "around" the configured hour.
const TICK_SECONDS: u64 = 1800;

/// Name of the manual curation command, invoked as `{prefix}curate`.
const CURATE_COMMAND: &str = "curate";

fn matches_command(content: &str, prefix: &str, command: &str) -> bool {
    content
        .trim()
        .strip_prefix(prefix)
        .is_some_and(|rest| rest == command)
}

/// Whether a scheduler tick at the given wall-clock hour should run the
/// curation pass. Strict hour equality: ticks during the other 23 hours do
/// nothing, which is what makes the half-hour interval a coarse daily
/// schedule.
fn hour_gate_open(hour: u32, curation_hour: u32) -> bool {
    hour == curation_hour
}

/// Event handler for the Greenlight Discord bot.
pub struct GreenlightHandler {
    config: Arc<BotConfig>,
    curator: Arc<SuggestionCurator>,
    /// Bot's own user id, learned from the ready event
    bot_user_id: AtomicU64,
    /// Id of the configured guild, learned from guild_create
    guild_id: Arc<AtomicU64>,
    /// Ready fires again on gateway reconnect; the scheduler spawns once
    scheduler_started: AtomicBool,
}

impl GreenlightHandler {
    /// Create a new handler for the given configuration.
    pub fn new(config: Arc<BotConfig>) -> Self {
        let curator = Arc::new(SuggestionCurator::new(config.curation.clone()));
        Self {
            config,
            curator,
            bot_user_id: AtomicU64::new(0),
            guild_id: Arc::new(AtomicU64::new(0)),
            scheduler_started: AtomicBool::new(false),
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }

    /// Whether the message author holds one of the curator roles.
    fn is_curator(&self, msg: &Message) -> bool {
        msg.member.as_ref().is_some_and(|member| {
            member
                .roles
                .iter()
                .any(|role| self.config.curator_role_ids.contains(&role.get()))
        })
    }

    /// Attach the upvote and downvote controls, in that order, to a freshly
    /// posted suggestion. Failures are logged and the message is left
    /// without controls; the process keeps running.
    async fn seed_votes(&self, ctx: &Context, msg: &Message) {
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        if let Err(e) = self.try_seed_votes(ctx, guild_id, msg).await {
            error!(message_id = %msg.id, error = %e, "Failed to seed vote reactions");
        }
    }

    async fn try_seed_votes(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        msg: &Message,
    ) -> DiscordResult<()> {
        let upvote = fetch_emoji(&ctx.http, guild_id, self.config.curation.upvote_emoji_id).await?;
        let downvote =
            fetch_emoji(&ctx.http, guild_id, self.config.curation.downvote_emoji_id).await?;
        msg.react(&ctx.http, ReactionType::from(upvote)).await?;
        msg.react(&ctx.http, ReactionType::from(downvote)).await?;
        debug!(message_id = %msg.id, "Seeded vote reactions");
        Ok(())
    }

    /// Handle the manual `!curate` command.
    async fn handle_curate(&self, ctx: &Context, msg: &Message) {
        if !self.is_curator(msg) {
            debug!(author_id = %msg.author.id, "Ignoring curate command from unauthorized caller");
            return;
        }

        info!(author_id = %msg.author.id, "Manual curation requested");
        if let Err(e) = msg
            .channel_id
            .say(
                &ctx.http,
                "Curation requested, I will evaluate the current suggestions \
                 and potentially greenlight some.",
            )
            .await
        {
            error!(error = %e, "Failed to acknowledge curate command");
        }

        let Some(guild_id) = msg.guild_id else {
            return;
        };
        if let Err(e) = self.curator.run(&ctx.http, guild_id).await {
            error!(error = %e, "Manual curation pass failed");
        }
    }

    /// Spawn the scheduled-curation loop.
    fn spawn_scheduler(&self, http: Arc<Http>) {
        if self.scheduler_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let config = Arc::clone(&self.config);
        let curator = Arc::clone(&self.curator);
        let guild_id = Arc::clone(&self.guild_id);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(TICK_SECONDS));
            loop {
                ticker.tick().await;
                let hour = Local::now().hour();
                debug!(hour, "Scheduler tick");
                if !hour_gate_open(hour, config.curation_hour) {
                    continue;
                }

                let guild = guild_id.load(Ordering::SeqCst);
                if guild == 0 {
                    warn!("Scheduled curation skipped, guild not available yet");
                    continue;
                }

                info!(hour, "Scheduled curation pass starting");
                if let Err(e) = curator.run(&http, GuildId::new(guild)).await {
                    error!(error = %e, "Scheduled curation pass failed");
                }
            }
        });
    }
}

#[async_trait]
impl EventHandler for GreenlightHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );
        self.bot_user_id.store(ready.user.id.get(), Ordering::SeqCst);
        self.spawn_scheduler(ctx.http.clone());
    }

    /// Called when a guild becomes available; records the id of the guild
    /// the bot is configured to serve.
    async fn guild_create(&self, _ctx: Context, guild: Guild, _is_new: Option<bool>) {
        if guild.name != self.config.guild_name {
            debug!(guild_id = %guild.id, guild_name = %guild.name, "Ignoring unrelated guild");
            return;
        }
        info!(guild_id = %guild.id, guild_name = %guild.name, "Guild available");
        self.guild_id.store(guild.id.get(), Ordering::SeqCst);
    }

    /// Called on every new message: seeds vote controls on suggestions and
    /// dispatches the manual curation command.
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.id.get() == self.bot_user_id.load(Ordering::SeqCst) {
            return;
        }

        if msg.channel_id.get() == self.config.curation.suggestion_channel_id {
            self.seed_votes(&ctx, &msg).await;
        }

        if matches_command(&msg.content, &self.config.command_prefix, CURATE_COMMAND) {
            self.handle_curate(&ctx, &msg).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{hour_gate_open, matches_command};

    #[test]
    fn command_matching_requires_the_prefix() {
        assert!(matches_command("!curate", "!", "curate"));
        assert!(matches_command("  !curate  ", "!", "curate"));
        assert!(!matches_command("curate", "!", "curate"));
        assert!(!matches_command("!curated", "!", "curate"));
        assert!(!matches_command("!curate now", "!", "curate"));
    }

    #[test]
    fn hour_gate_opens_only_on_equality() {
        assert!(hour_gate_open(6, 6));
        for hour in (0..24).filter(|&h| h != 6) {
            assert!(!hour_gate_open(hour, 6), "gate open at hour {hour}");
        }
        // The gate itself has no wrap-around smarts; midnight is just
        // another hour value.
        assert!(hour_gate_open(0, 0));
        assert!(!hour_gate_open(23, 0));
    }
}
