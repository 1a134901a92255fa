//! Serenity model to domain model conversions.

use chrono::{DateTime, Utc};
use greenlight_core::{EmojiIdentity, Proposal, Reaction};
use serenity::model::channel::{Message, ReactionType};

/// Map a Serenity reaction type onto the domain emoji identity.
pub fn reaction_identity(reaction: &ReactionType) -> EmojiIdentity {
    match reaction {
        ReactionType::Custom { id, .. } => EmojiIdentity::Custom(id.get()),
        ReactionType::Unicode(glyph) => EmojiIdentity::Unicode(glyph.clone()),
        // ReactionType is non-exhaustive; render anything unknown as its
        // display form so identity comparisons stay well-defined.
        other => EmojiIdentity::Unicode(other.to_string()),
    }
}

/// Build a domain [`Proposal`] from a suggestion-channel message.
///
/// Reaction order is preserved exactly as the platform reports it; the
/// policy reads the vote counts positionally from slots 0 and 1.
pub fn proposal_from_message(message: &Message) -> Proposal {
    let created_at = DateTime::from_timestamp(message.timestamp.unix_timestamp(), 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Proposal {
        id: message.id.get(),
        author_id: message.author.id.get(),
        created_at,
        content: message.content.clone(),
        link: message.link(),
        reactions: message
            .reactions
            .iter()
            .map(|r| Reaction::new(reaction_identity(&r.reaction_type), r.count))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::model::id::EmojiId;

    #[test]
    fn custom_reactions_map_to_their_id() {
        let reaction = ReactionType::Custom {
            animated: false,
            id: EmojiId::new(610325935),
            name: Some("upvote".to_string()),
        };
        assert_eq!(
            reaction_identity(&reaction),
            EmojiIdentity::Custom(610325935)
        );
    }

    #[test]
    fn unicode_reactions_map_to_their_glyph() {
        let reaction = ReactionType::Unicode("\u{1F480}".to_string());
        assert_eq!(
            reaction_identity(&reaction),
            EmojiIdentity::Unicode("\u{1F480}".to_string())
        );
    }
}
