//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO and JSON errors into context-rich `ChatError` variants.

use crate::base::chaterror::ChatError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add listener context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use roomchat::base::context::IoResultExt;
    ///
    /// let listener = TcpListener::bind(addr).await.bind_context(addr)?;
    /// // Error: "Failed to bind 127.0.0.1:8000: address in use"
    /// ```
    fn bind_context(self, addr: impl std::fmt::Display) -> Result<T, ChatError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn bind_context(self, addr: impl std::fmt::Display) -> Result<T, ChatError> {
        self.map_err(|e| ChatError::bind_failed(addr, e))
    }
}

/// Extension trait for JSON decoding of WebSocket frames.
pub trait JsonResultExt<T> {
    /// Convert a serde_json error into [`ChatError::MalformedFrame`].
    fn frame_context(self) -> Result<T, ChatError>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn frame_context(self) -> Result<T, ChatError> {
        self.map_err(|e| ChatError::MalformedFrame(e.to_string()))
    }
}
