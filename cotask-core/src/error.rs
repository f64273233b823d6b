use thiserror::Error;

/// Errors raised while loading a block or generating its trials.
///
/// Everything here is a configuration or programming mistake. Generation
/// never substitutes a default for any of them.
#[derive(Debug, Error)]
pub enum Error {
    /// Distribution `type` is not one of `fixed`, `uniform`, `choice`
    #[error("unknown distribution type '{0}'")]
    UnknownDistributionType(String),

    /// Sequence type is not one of `Random`, `AABB`
    #[error("unknown sequence type '{0}'")]
    UnknownSequenceType(String),

    /// A direction needed by an active pathway was not supplied
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),

    /// Block configuration failed validation
    #[error("invalid value for '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Config JSON could not be parsed
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
