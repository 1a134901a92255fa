//! Emoji identity types.

use serde::{Deserialize, Serialize};

/// Identity of a reaction emoji.
///
/// Custom guild emojis carry a stable numeric id; built-in symbols are
/// identified by their literal glyph.
///
/// # Examples
///
/// ```
/// use greenlight_core::EmojiIdentity;
///
/// let upvote = EmojiIdentity::Custom(610325935);
/// let skull = EmojiIdentity::Unicode("\u{1F480}".to_string());
/// assert_ne!(upvote, skull);
/// assert_eq!(upvote.custom_id(), Some(610325935));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum EmojiIdentity {
    /// Custom guild emoji with a stable numeric id
    #[display("custom emoji {_0}")]
    Custom(u64),
    /// Built-in unicode symbol, identified by its glyph
    #[display("{_0}")]
    Unicode(String),
}

impl EmojiIdentity {
    /// The custom emoji id, if this is a custom emoji.
    pub fn custom_id(&self) -> Option<u64> {
        match self {
            Self::Custom(id) => Some(*id),
            Self::Unicode(_) => None,
        }
    }
}
