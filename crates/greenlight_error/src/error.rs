//! Top-level error wrapper types.

use crate::ConfigError;

/// Foundation error enum for the Greenlight workspace.
///
/// Integration crates define their own error types (e.g. `DiscordError` in
/// `greenlight_social`) and convert them at the boundary where needed.
///
/// # Examples
///
/// ```
/// use greenlight_error::{ConfigError, GreenlightError};
///
/// let config_err = ConfigError::new("POSITIVE_RATIO must be in [0, 1]");
/// let err: GreenlightError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GreenlightErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Greenlight error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Greenlight Error: {}", _0)]
pub struct GreenlightError(Box<GreenlightErrorKind>);

impl GreenlightError {
    /// Create a new error from a kind.
    pub fn new(kind: GreenlightErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GreenlightErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GreenlightErrorKind
impl<T> From<T> for GreenlightError
where
    T: Into<GreenlightErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Greenlight operations.
///
/// # Examples
///
/// ```
/// use greenlight_error::{ConfigError, GreenlightResult};
///
/// fn parse_hour(raw: &str) -> GreenlightResult<u32> {
///     raw.parse()
///         .map_err(|_| ConfigError::new("CURATION_HOUR must be an integer").into())
/// }
/// ```
pub type GreenlightResult<T> = std::result::Result<T, GreenlightError>;
