use thiserror::Error;

/// Every failure the reporting pipeline can surface.
///
/// All variants are fatal for a run unless the aggregator is in partial mode,
/// in which case a failed repository search is recorded in its bucket instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid time {value:?}: expected format {expected}")]
    InvalidTimeFormat { value: String, expected: &'static str },

    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("repository {repo:?} has no owner; pass --owner or use owner/name")]
    MissingOwner { repo: String },

    #[error("invalid repository {value:?}: expected owner/name")]
    InvalidRepository { value: String },

    #[error("no repositories specified and no default repositories configured")]
    NoRepositoriesSpecified,

    #[error("{repo}#{id} not found")]
    NotFound { repo: String, id: u64 },

    #[error("{context}: {message}")]
    Upstream { context: String, message: String },

    #[error("relay delivery failed: {message}")]
    RelayDelivery { message: String },

    #[error("writing report: {0}")]
    Output(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn upstream(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            context: context.into(),
            message: message.into(),
        }
    }

    pub(crate) fn relay(message: impl Into<String>) -> Self {
        Self::RelayDelivery {
            message: message.into(),
        }
    }
}
