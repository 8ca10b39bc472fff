// ── Core error types ──
//
// Errors surfaced to page controllers and the CLI. Transport details
// (reqwest errors, raw bodies) stay in vidtube-api; the `From` impl below
// folds them into the four kinds a page can react to.

use strum::{Display, EnumString};
use thiserror::Error;

/// Coarse classification used by callers to choose a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    /// No response was received.
    Transport,
    /// The backend answered with a non-success status or an unexpected body.
    Backend,
    /// Local input was rejected before any remote call.
    Validation,
    /// The operation needs a session the client does not have.
    Authorization,
    /// The owning view closed before the result arrived.
    Cancelled,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ────────────────────────────────────────────────────
    #[error("Cannot reach backend: {message}")]
    Transport { message: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("{message}")]
    Backend { status: Option<u16>, message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Batch of {total} requests failed: {source}")]
    BatchFailed {
        total: usize,
        #[source]
        source: Box<CoreError>,
    },

    // ── Authorization ────────────────────────────────────────────────
    #[error("Please log in to {action}")]
    Unauthenticated { action: String },

    #[error("Session expired: {message}")]
    SessionExpired { message: String },

    // ── Local ────────────────────────────────────────────────────────
    #[error("{message}")]
    Validation { message: String },

    #[error("View closed before the request completed")]
    Cancelled,
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn not_found(entity_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Backend { .. } | Self::NotFound { .. } => ErrorKind::Backend,
            Self::BatchFailed { source, .. } => source.kind(),
            Self::Unauthenticated { .. } | Self::SessionExpired { .. } => ErrorKind::Authorization,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns `true` when the owning view went away.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            Self::SessionExpired { .. } => Some(401),
            Self::BatchFailed { source, .. } => source.status(),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vidtube_api::Error> for CoreError {
    fn from(err: vidtube_api::Error) -> Self {
        match err {
            vidtube_api::Error::Transport(e) => {
                let message = if e.is_timeout() {
                    "request timed out".to_owned()
                } else {
                    e.to_string()
                };
                CoreError::Transport { message }
            }
            vidtube_api::Error::InvalidUrl(e) => CoreError::Transport {
                message: format!("invalid URL: {e}"),
            },
            vidtube_api::Error::Tls(msg) => CoreError::Transport {
                message: format!("TLS error: {msg}"),
            },
            vidtube_api::Error::Unauthorized { message } => CoreError::SessionExpired { message },
            vidtube_api::Error::Api { status, message } => CoreError::Backend {
                status: Some(status),
                message,
            },
            vidtube_api::Error::Deserialization { message, body: _ } => CoreError::Backend {
                status: None,
                message: format!("Unexpected response: {message}"),
            },
            vidtube_api::Error::Upload(message) => CoreError::Validation { message },
            vidtube_api::Error::Io(e) => CoreError::Validation {
                message: format!("Cannot read file: {e}"),
            },
        }
    }
}
