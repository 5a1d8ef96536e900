//! Error types for the newsfront-upstream crate.
//!
//! Three kinds reach callers of the upstream client: a missing record, an
//! unusable upstream, and bad caller input. Configuration problems are
//! reported separately so they never masquerade as runtime failures.

/// Errors raised while talking to the upstream API or querying its data.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// A single-item lookup found no matching record.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Which collection was queried (`"company"` or `"article"`).
        entity: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },

    /// Transport failure, non-success status, or malformed payload.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// Caller supplied an identifier that is not a valid integer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid upstream client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl UpstreamError {
    /// Stable machine-readable name for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Unavailable(_) => "upstream_unavailable",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for newsfront-upstream results.
pub type Result<T> = std::result::Result<T, UpstreamError>;
