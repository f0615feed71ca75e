use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShelfError {
    #[error("Rating {0} is outside 0..=5")]
    InvalidRating(i64),

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Control has neither data-filter nor data-sort")]
    InvalidControl,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Failures of the asynchronous status-change request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Not signed in")]
    Unauthorized,

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Server error (status {status})")]
    Server { status: u16 },
}

impl BackendError {
    /// Short text suitable for a toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            BackendError::Network(_) | BackendError::Timeout => {
                "Could not reach the server. Please try again."
            }
            BackendError::Unauthorized => "Please sign in to update your shelf.",
            BackendError::Rejected { .. } => "The shelf update was not accepted.",
            BackendError::Server { .. } => "The server failed to update your shelf.",
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BackendError::Network(_) | BackendError::Timeout | BackendError::Server { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
