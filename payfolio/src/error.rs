//! Error taxonomy for the API client and session stores.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a [`SessionStore`](crate::session::SessionStore).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {} is corrupt: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
    #[error("could not find home directory")]
    NoHomeDir,
    #[error("session store lock poisoned")]
    Poisoned,
}

/// Every way an API call can fail.
///
/// The client performs no local recovery: each variant is raised to the
/// caller as-is. A [`ApiError::Request`] with status 401 is the signal that
/// the session has expired and the user must authenticate again.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not complete (DNS, refused connection, timeout).
    #[error("network error: {message}")]
    Network { message: String, timed_out: bool },

    /// The server answered with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Success status, but the body was not the JSON we expected.
    #[error("malformed response: {message}")]
    Decode { message: String },

    #[error("endpoint must be a path starting with '/': {0:?}")]
    InvalidEndpoint(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("no refresh token stored; log in again")]
    MissingRefreshToken,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status of a server-side failure.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 responses, the "session expired" signal.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Request { status: 401, .. })
    }

    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_displays_server_message_verbatim() {
        let error = ApiError::Request {
            status: 400,
            message: "Email already registered".to_string(),
        };
        assert_eq!(error.to_string(), "Email already registered");
        assert_eq!(error.status(), Some(400));
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn only_401_counts_as_unauthorized() {
        let expired = ApiError::Request {
            status: 401,
            message: "Token expired".to_string(),
        };
        let forbidden = ApiError::Request {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert!(expired.is_unauthorized());
        assert!(!forbidden.is_unauthorized());
        assert_eq!(ApiError::Cancelled.status(), None);
    }
}
