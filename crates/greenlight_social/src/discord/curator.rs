//! The curation pass over suggestion-channel history.
//!
//! Walks the suggestion channel newest-first, converts each message into a
//! domain [`Proposal`], and carries out whatever the policy in
//! `greenlight_core` decides: attach the outdated symbol, promote into the
//! greenlit channel, or stop the scan at the grace-window bound.

use super::{DiscordError, DiscordErrorKind, DiscordResult, conversions::proposal_from_message};
use chrono::Utc;
use greenlight_core::{CurationConfig, Verdict, VoteTally, assess};
use serenity::builder::GetMessages;
use serenity::http::Http;
use serenity::model::channel::{Message, ReactionType};
use serenity::model::guild::Emoji;
use serenity::model::id::{ChannelId, EmojiId, GuildId, MessageId};
use serenity::model::mention::Mentionable;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// History page size; the platform caps a single request at 100 messages.
const HISTORY_PAGE: u8 = 100;

/// Render the greenlit-channel summary for a promoted proposal: author
/// mention, the vote ratio as an integer percentage, the vote emojis with
/// their counts, and the permalink. Mention, emojis, and link arrive
/// pre-rendered in their platform display form.
fn promotion_summary(
    mention: &str,
    tally: VoteTally,
    upvote: &str,
    downvote: &str,
    link: &str,
) -> String {
    format!(
        "Suggestion by {} ({}% positive, {}{}/{}{}).\nLink: {}",
        mention,
        tally.percent(),
        upvote,
        tally.up,
        downvote,
        tally.down,
        link,
    )
}

/// Fetch a custom guild emoji by id.
pub(super) async fn fetch_emoji(
    http: &Arc<Http>,
    guild_id: GuildId,
    emoji_id: u64,
) -> DiscordResult<Emoji> {
    guild_id
        .emoji(http, EmojiId::new(emoji_id))
        .await
        .map_err(|e| {
            error!(emoji_id, error = %e, "Emoji lookup failed");
            DiscordError::new(DiscordErrorKind::EmojiNotFound(emoji_id))
        })
}

/// The three custom emoji handles a scan needs, fetched once per pass.
struct CurationEmojis {
    upvote: Emoji,
    downvote: Emoji,
    greenlit: Emoji,
}

impl CurationEmojis {
    async fn fetch(
        http: &Arc<Http>,
        guild_id: GuildId,
        config: &CurationConfig,
    ) -> DiscordResult<Self> {
        Ok(Self {
            upvote: fetch_emoji(http, guild_id, config.upvote_emoji_id).await?,
            downvote: fetch_emoji(http, guild_id, config.downvote_emoji_id).await?,
            greenlit: fetch_emoji(http, guild_id, config.greenlit_emoji_id).await?,
        })
    }
}

/// Runs curation passes over the suggestion channel.
///
/// Scans never overlap: the scheduled tick and the manual command both go
/// through [`SuggestionCurator::run`], and a trigger arriving while a scan
/// is in progress is rejected with a log line rather than interleaved.
pub struct SuggestionCurator {
    config: CurationConfig,
    scan_guard: Mutex<()>,
}

impl SuggestionCurator {
    /// Create a curator for the given configuration.
    pub fn new(config: CurationConfig) -> Self {
        Self {
            config,
            scan_guard: Mutex::new(()),
        }
    }

    /// Run one curation pass over the suggestion channel.
    ///
    /// # Errors
    /// Returns an error on any failed platform call; the caller logs it and
    /// abandons the pass. A rejected concurrent trigger is not an error.
    #[instrument(skip(self, http), fields(guild_id = %guild_id))]
    pub async fn run(&self, http: &Arc<Http>, guild_id: GuildId) -> DiscordResult<()> {
        let Ok(_guard) = self.scan_guard.try_lock() else {
            warn!("Curation scan already in progress, rejecting trigger");
            return Ok(());
        };

        info!("Curation scan starting");
        let emojis = CurationEmojis::fetch(http, guild_id, &self.config).await?;
        let suggestion_channel = ChannelId::new(self.config.suggestion_channel_id);
        let now = Utc::now();

        let mut before: Option<MessageId> = None;
        let mut scanned = 0usize;
        'scan: loop {
            let mut request = GetMessages::new().limit(HISTORY_PAGE);
            if let Some(last) = before {
                request = request.before(last);
            }
            let page = suggestion_channel.messages(http, request).await?;
            let Some(last) = page.last() else {
                break;
            };
            before = Some(last.id);

            for message in &page {
                scanned += 1;
                let proposal = proposal_from_message(message);
                match assess(&proposal, &self.config, now) {
                    Verdict::Skip => {}
                    Verdict::MarkOutdated => self.mark_outdated(http, message).await?,
                    Verdict::Promote => {
                        if let Some(tally) = VoteTally::from_proposal(&proposal) {
                            self.promote(http, message, tally, &emojis).await?;
                        }
                    }
                    Verdict::StopScanning => {
                        debug!(message_id = %message.id, "Reached the grace-window bound");
                        break 'scan;
                    }
                }
            }

            if page.len() < HISTORY_PAGE as usize {
                break;
            }
        }

        info!(scanned, "Curation scan finished");
        Ok(())
    }

    /// Attach the outdated symbol to a stale proposal.
    #[instrument(skip(self, http), fields(message_id = %message.id))]
    async fn mark_outdated(&self, http: &Arc<Http>, message: &Message) -> DiscordResult<()> {
        info!("Marking proposal outdated");
        message
            .react(
                http,
                ReactionType::Unicode(self.config.outdated_symbol.clone()),
            )
            .await?;
        Ok(())
    }

    /// Promote a proposal into the greenlit channel.
    ///
    /// Side effects, in order: mark the original with the greenlit emoji,
    /// post the vote summary, repost the proposal text as a quote, and seed
    /// fresh vote controls on the reposted copy.
    #[instrument(
        skip(self, http, tally, emojis),
        fields(message_id = %message.id, author_id = %message.author.id)
    )]
    async fn promote(
        &self,
        http: &Arc<Http>,
        message: &Message,
        tally: VoteTally,
        emojis: &CurationEmojis,
    ) -> DiscordResult<()> {
        info!(up = tally.up, down = tally.down, "Promoting proposal");

        let greenlit_channel = ChannelId::new(self.config.greenlit_channel_id);

        message
            .react(http, ReactionType::from(emojis.greenlit.clone()))
            .await?;

        let summary = promotion_summary(
            &message.author.mention().to_string(),
            tally,
            &emojis.upvote.to_string(),
            &emojis.downvote.to_string(),
            &message.link(),
        );
        greenlit_channel.say(http, summary).await?;

        let shared = greenlit_channel
            .say(http, format!("> {}", message.content))
            .await?;
        shared
            .react(http, ReactionType::from(emojis.upvote.clone()))
            .await?;
        shared
            .react(http, ReactionType::from(emojis.downvote.clone()))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::promotion_summary;
    use greenlight_core::VoteTally;

    #[test]
    fn summary_carries_mention_percentage_counts_and_link() {
        let summary = promotion_summary(
            "<@715>",
            VoteTally::new(4, 1),
            "<:upvote:1001>",
            "<:downvote:1002>",
            "https://discord.com/channels/1/100/42",
        );
        assert_eq!(
            summary,
            "Suggestion by <@715> (80% positive, <:upvote:1001>4/<:downvote:1002>1).\n\
             Link: https://discord.com/channels/1/100/42"
        );
    }

    #[test]
    fn summary_percentage_truncates() {
        let summary = promotion_summary("<@1>", VoteTally::new(2, 1), "U", "D", "L");
        assert_eq!(summary, "Suggestion by <@1> (66% positive, U2/D1).\nLink: L");
    }
}
