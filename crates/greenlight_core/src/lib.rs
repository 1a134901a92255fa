//! Domain model and curation policy for the Greenlight bot.
//!
//! This crate holds everything that can be reasoned about without a Discord
//! connection: the proposal and reaction types, the immutable configuration,
//! and the curation decision policy. The `greenlight_social` crate feeds
//! platform data into these types and carries out the side effects the
//! policy asks for.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod emoji;
mod policy;
mod proposal;

pub use config::{BotConfig, CurationConfig, DEFAULT_CURATION_HOUR, OUTDATED_SYMBOL};
pub use emoji::EmojiIdentity;
pub use policy::{Action, SECONDS_PER_DAY, Verdict, VoteStatus, VoteTally, assess, evaluate};
pub use proposal::{Proposal, ProposalBuilder, ProposalBuilderError, Reaction};
