//! Discord integration for the Greenlight curation bot.
//!
//! Everything in this crate is thin I/O glue over the platform: the gateway
//! client, the event handler that seeds vote reactions and parses the manual
//! command, and the curator that walks channel history applying the policy
//! from `greenlight_core`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod discord;

pub use discord::{
    DiscordError, DiscordErrorKind, DiscordResult, GreenlightBot, GreenlightHandler,
    SuggestionCurator, proposal_from_message, reaction_identity,
};
