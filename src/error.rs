//! Error types for timeline fetching

use crate::api::Scope;

/// Result alias used across the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error returned when filling a timeline fails.
///
/// Update and delete events that reference a status the timeline does not
/// hold are not errors; timelines are partial views of a larger stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a usable response (network, TLS, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status (auth, rate limit, ...).
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The source cannot serve this kind of timeline.
    #[error("scope {0} is not supported by this source")]
    UnsupportedScope(Scope),

    /// A backward pagination request is already in flight.
    #[error("a lazy fetch is already in progress")]
    LazyLoadingInFlight,
}

impl Error {
    /// Whether retrying the same request later may succeed
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::LazyLoadingInFlight => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::UnsupportedScope(_) => false,
        }
    }
}
