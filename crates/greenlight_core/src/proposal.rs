//! Proposal and reaction types.

use crate::EmojiIdentity;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A single reaction on a proposal: emoji identity plus count.
///
/// # Examples
///
/// ```
/// use greenlight_core::{EmojiIdentity, Reaction};
///
/// let upvote = Reaction::new(EmojiIdentity::Custom(1001), 4);
/// assert_eq!(upvote.count, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Reaction {
    /// The emoji this reaction was made with
    pub emoji: EmojiIdentity,
    /// How many members reacted with it
    pub count: u64,
}

/// A member-submitted suggestion message in the suggestion channel.
///
/// Curation state (pending, outdated, greenlit) is never stored on the
/// proposal; it is derived from which reactions are present at evaluation
/// time. Reaction order is the platform's: slots 0 and 1 are the seeded
/// upvote and downvote controls.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use greenlight_core::{EmojiIdentity, ProposalBuilder, Reaction};
///
/// let proposal = ProposalBuilder::default()
///     .id(42u64)
///     .author_id(7u64)
///     .created_at(Utc::now())
///     .content("add a practice room")
///     .reactions(vec![
///         Reaction::new(EmojiIdentity::Custom(1001), 5),
///         Reaction::new(EmojiIdentity::Custom(1002), 1),
///     ])
///     .build()
///     .unwrap();
///
/// assert!(proposal.has_custom_reaction(1001));
/// assert!(!proposal.has_custom_reaction(1003));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct Proposal {
    /// Channel-scoped message id
    pub id: u64,
    /// Author's user id
    pub author_id: u64,
    /// When the proposal was posted
    pub created_at: DateTime<Utc>,
    /// Raw text content
    #[builder(default)]
    pub content: String,
    /// Stable permalink to the original message
    #[builder(default)]
    pub link: String,
    /// Reactions in platform order
    #[builder(default)]
    pub reactions: Vec<Reaction>,
}

impl Proposal {
    /// Whether any reaction on this proposal uses the given custom emoji.
    ///
    /// Used to detect the greenlit marker; built-in symbols never match.
    pub fn has_custom_reaction(&self, emoji_id: u64) -> bool {
        self.reactions
            .iter()
            .any(|r| r.emoji.custom_id() == Some(emoji_id))
    }

    /// Whole seconds elapsed between posting and `now`.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds()
    }
}
