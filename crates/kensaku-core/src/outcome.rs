use kensaku_api::{JikanError, MediaKind, MediaRecord};
use thiserror::Error;

/// Shown when the API rejects a request without explaining why.
pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// What the lookup screen shows. Result and error share one slot, so they
/// can never be displayed together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Idle,
    /// A request for `id` has been issued and nothing is shown yet.
    Pending { id: u64 },
    Found(MediaRecord),
    Failed(LookupFailure),
}

impl Outcome {
    pub fn record(&self) -> Option<&MediaRecord> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LookupFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The user-facing error line, if any.
    pub fn error_message(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }
}

/// Why a completed cycle shows no record. `Display` is the exact text the
/// user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("Please enter a valid numeric ID.")]
    InvalidId,

    #[error(
        "{kind} with ID {id} not found or API error ({status}): {}",
        .message.as_deref().unwrap_or(UNKNOWN_API_ERROR)
    )]
    Remote {
        kind: MediaKind,
        id: u64,
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to fetch {} data. Please check your connection.", .kind.noun())]
    Transport { kind: MediaKind, detail: String },
}

/// A failed fetch, reduced to what the lookup procedure cares about.
///
/// Unlike [`JikanError`] this is `Clone`, so it can ride inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<JikanError> for FetchError {
    fn from(err: JikanError) -> Self {
        match err {
            JikanError::Api { status, message } => Self::Status { status, message },
            other => Self::Transport(other.to_string()),
        }
    }
}

impl FetchError {
    pub fn into_failure(self, kind: MediaKind, id: u64) -> LookupFailure {
        match self {
            Self::Status { status, message } => LookupFailure::Remote {
                kind,
                id,
                status,
                message,
            },
            Self::Transport(detail) => LookupFailure::Transport { kind, detail },
        }
    }
}
