//! Facade crate for the Greenlight curation bot.
//!
//! Re-exports the workspace layers under one roof:
//! - [`greenlight_error`]: foundation error types
//! - [`greenlight_core`]: domain model and the curation policy
//! - [`greenlight_social`]: the serenity-based Discord integration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use greenlight_core::{
    Action, BotConfig, CurationConfig, EmojiIdentity, Proposal, ProposalBuilder, Reaction,
    Verdict, VoteStatus, VoteTally, assess, evaluate,
};
pub use greenlight_error::{ConfigError, GreenlightError, GreenlightResult};
pub use greenlight_social::{DiscordError, DiscordErrorKind, GreenlightBot};
