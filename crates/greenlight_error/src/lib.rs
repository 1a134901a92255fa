//! Error types for the Greenlight curation bot.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Discord-specific errors live in `greenlight_social` next to the serenity
//! integration; this crate holds the platform-independent foundation.
//!
//! # Examples
//!
//! ```
//! use greenlight_error::{ConfigError, GreenlightResult};
//!
//! fn load_threshold() -> GreenlightResult<u32> {
//!     Err(ConfigError::new("VOTE_THRESHOLD is not set"))?
//! }
//!
//! assert!(load_threshold().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;

pub use config::ConfigError;
pub use error::{GreenlightError, GreenlightErrorKind, GreenlightResult};
