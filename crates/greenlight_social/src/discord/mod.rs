//! Discord integration built on the Serenity library.
//!
//! # Architecture
//!
//! ## Integration Layer
//! - **client**: Serenity client setup and lifecycle management
//! - **handler**: Event handler implementing Serenity's EventHandler trait
//! - **error**: Discord-specific error types
//!
//! ## Feature Layer
//! - **curator**: the curation pass over suggestion-channel history
//! - **conversions**: Serenity model to domain model conversions

mod client;
mod conversions;
mod curator;
mod error;
mod handler;

pub use client::GreenlightBot;
pub use conversions::{proposal_from_message, reaction_identity};
pub use curator::SuggestionCurator;
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::GreenlightHandler;
