use thiserror::Error;

/// Reasons a session token is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("malformed session token")]
    Malformed,

    #[error("session signature mismatch")]
    BadSignature,

    #[error("session payload could not be decoded: {0}")]
    Decode(String),

    #[error("session is not marked valid")]
    Invalidated,

    #[error("session belongs to another user")]
    WrongUser,

    #[error("session expired")]
    Expired,

    #[error("invalid signing key: {0}")]
    Key(String),
}
