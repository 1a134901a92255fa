//! Bot configuration, sourced from the environment at startup.

use greenlight_error::{ConfigError, GreenlightResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unicode skull glyph used to mark proposals past their age window.
pub const OUTDATED_SYMBOL: &str = "\u{1F480}";

/// Default wall-clock hour for the scheduled curation pass (06:00 local,
/// which is midnight EST on the community's home server).
pub const DEFAULT_CURATION_HOUR: u32 = 6;

/// Immutable curation parameters.
///
/// Loaded once at process start and passed into the evaluator and seeder by
/// value; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Channel members post suggestions to
    pub suggestion_channel_id: u64,
    /// Channel promoted suggestions are reposted to
    pub greenlit_channel_id: u64,
    /// Custom emoji id for the upvote control
    pub upvote_emoji_id: u64,
    /// Custom emoji id for the downvote control
    pub downvote_emoji_id: u64,
    /// Custom emoji id marking an already-promoted proposal
    pub greenlit_emoji_id: u64,
    /// Built-in symbol attached to stale proposals
    pub outdated_symbol: String,
    /// Minimum combined upvote+downvote count before promotion is considered
    pub vote_threshold: u64,
    /// Minimum fraction of votes that must be upvotes, in [0, 1]
    pub positive_ratio: f64,
    /// Age in days at which a pending proposal is marked stale
    pub outdated_after_days: i64,
}

impl CurationConfig {
    /// Load curation parameters from the environment.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for any missing or malformed variable; this
    /// is the only class of error allowed to abort the process.
    pub fn from_env() -> GreenlightResult<Self> {
        let positive_ratio = validate_ratio(require_parsed("POSITIVE_RATIO")?)?;

        Ok(Self {
            suggestion_channel_id: require_parsed("SUGGESTION_VOTE_ID")?,
            greenlit_channel_id: require_parsed("GREENLIT_SUGGESTION_ID")?,
            upvote_emoji_id: require_parsed("UPVOTE_EMOJI_ID")?,
            downvote_emoji_id: require_parsed("DOWNVOTE_EMOJI_ID")?,
            greenlit_emoji_id: require_parsed("GREENLIT_EMOJI_ID")?,
            outdated_symbol: OUTDATED_SYMBOL.to_string(),
            vote_threshold: require_parsed("VOTE_THRESHOLD")?,
            positive_ratio,
            outdated_after_days: require_parsed("OUTDATED_AFTER_X_DAYS")?,
        })
    }
}

/// Process-wide bot configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    /// Discord bot token
    pub token: String,
    /// Name of the guild the bot serves
    pub guild_name: String,
    /// Prefix for text commands
    pub command_prefix: String,
    /// Wall-clock hour the scheduled pass fires on
    pub curation_hour: u32,
    /// Role ids allowed to trigger a manual curation pass
    pub curator_role_ids: Vec<u64>,
    /// Curation parameters
    pub curation: CurationConfig,
}

impl BotConfig {
    /// Load the full bot configuration from the environment.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for any missing or malformed variable.
    pub fn from_env() -> GreenlightResult<Self> {
        let curation_hour = match std::env::var("CURATION_HOUR") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::new(format!("CURATION_HOUR must be an hour (0-23), got {raw:?}"))
            })?,
            Err(_) => DEFAULT_CURATION_HOUR,
        };
        if curation_hour > 23 {
            return Err(ConfigError::new(format!(
                "CURATION_HOUR must be an hour (0-23), got {curation_hour}"
            ))
            .into());
        }

        Ok(Self {
            token: require("DISCORD_TOKEN")?,
            guild_name: require("DISCORD_GUILD_NAME")?,
            command_prefix: "!".to_string(),
            curation_hour,
            curator_role_ids: parse_role_ids(&require("CURATOR_ROLE_IDS")?)?,
            curation: CurationConfig::from_env()?,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::new(format!("Missing required variable: {name}")))
}

fn require_parsed<T: FromStr>(name: &str) -> Result<T, ConfigError> {
    let raw = require(name)?;
    raw.parse().map_err(|_| {
        ConfigError::new(format!(
            "{name} could not be parsed as {}: {raw:?}",
            std::any::type_name::<T>()
        ))
    })
}

fn validate_ratio(ratio: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(ConfigError::new(format!(
            "POSITIVE_RATIO must be in [0, 1], got {ratio}"
        )))
    }
}

fn parse_role_ids(raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| ConfigError::new(format!("CURATOR_ROLE_IDS entry is not an id: {s:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_parse_with_whitespace() {
        let ids = parse_role_ids("610250148525637633, 747283070931042345 ,824508548640931863")
            .unwrap();
        assert_eq!(
            ids,
            vec![610250148525637633, 747283070931042345, 824508548640931863]
        );
    }

    #[test]
    fn role_ids_reject_garbage() {
        assert!(parse_role_ids("123,abc").is_err());
    }

    #[test]
    fn empty_role_list_is_allowed() {
        assert!(parse_role_ids("").unwrap().is_empty());
    }

    #[test]
    fn ratio_bounds_are_enforced() {
        assert!(validate_ratio(0.0).is_ok());
        assert!(validate_ratio(0.6).is_ok());
        assert!(validate_ratio(1.0).is_ok());
        assert!(validate_ratio(1.01).is_err());
        assert!(validate_ratio(-0.1).is_err());
    }
}
