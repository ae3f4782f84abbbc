use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ChatError {
    // Connection Errors
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Connection timed out")]
    ConnectionTimedOut,
    #[error("WebSocket protocol error")]
    WsProtocolError,
    #[error("Failed to bind {addr}: {reason}")]
    BindFailed { addr: String, reason: String },

    // URL Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Disallowed URL scheme")]
    DisallowedUrlScheme,

    // Page Errors
    #[error("Chat box attribute missing: {0}")]
    MissingAttribute(&'static str),
    #[error("Chat configuration incomplete: {0} not set")]
    MissingConfig(&'static str),

    // Frame Errors
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),
    #[error("Unexpected binary frame ({0} bytes)")]
    UnexpectedBinaryFrame(usize),
}

impl ChatError {
    /// Whether the error ends the connection for good.
    ///
    /// Frame-level errors only drop the offending frame.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChatError::ConnectionClosed
                | ChatError::ConnectionFailed
                | ChatError::ConnectionTimedOut
                | ChatError::WsProtocolError
        )
    }

    pub(crate) fn bind_failed(addr: impl std::fmt::Display, err: std::io::Error) -> Self {
        ChatError::BindFailed {
            addr: addr.to_string(),
            reason: err.to_string(),
        }
    }
}
