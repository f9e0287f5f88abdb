// Error type for navigation queries and configuration.
//
// Only caller contract violations and configuration problems are errors.
// "No path", "already there", exits with no origin, and an unresolvable
// map center are ordinary outcomes and never reach this type.

/// Errors surfaced by `Topography` and `NavConfig`.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// `path` was called with neither a source nor an actor to derive one from.
    #[error("path query needs a source or an actor to start from")]
    MissingSource,

    /// A configuration value is out of range.
    #[error("invalid nav config: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration JSON could not be parsed.
    #[error("failed to parse nav config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// The diagnostic graph dump could not be serialized.
    #[error("failed to serialize graph: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type NavResult<T> = Result<T, NavError>;
