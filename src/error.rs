use thiserror::Error;

/// Errors raised while building the pattern configuration.
///
/// All of these surface before the first character is read; once a
/// dispatcher exists the matching itself cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Color token (after stripping a leading `+`) is not one of the eight names.
    #[error("invalid color '{0}', expected one of: black, red, green, yellow, blue, purple, cyan, white (prefix with '+' for bold)")]
    InvalidColor(String),
    #[error("pattern target must not be empty")]
    EmptyTarget,
    /// A `TARGET:COLOR` argument without the `:` separator.
    #[error("malformed pattern '{0}', expected TARGET:COLOR")]
    MalformedPattern(String),
}
