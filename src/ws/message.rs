//! Frames carried by the room socket.

use bytes::Bytes;
use std::fmt;

/// One WebSocket frame, as seen by the chat layer.
///
/// Chat traffic is always `Text`; the other variants exist so the client
/// can tell control and unexpected frames apart from chat lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// UTF-8 payload, a JSON record for chat traffic
    Text(String),
    /// Raw bytes; never produced by the chat protocol
    Binary(Bytes),
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    /// Closing handshake, with the peer's code and reason if it sent one
    Close(Option<CloseFrame>),
}

impl Message {
    pub fn is_text(&self) -> bool {
        matches!(self, Message::Text(_))
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Message::Close(_))
    }

    /// Payload of a text frame.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

/// Code and reason of a closing handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    pub code: CloseCode,
    pub reason: String,
}

impl CloseFrame {
    pub fn new(code: CloseCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CloseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_empty() {
            write!(f, "{}", self.code.0)
        } else {
            write!(f, "{} ({})", self.code.0, self.reason)
        }
    }
}

/// Close status code (RFC 6455 section 7.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseCode(pub u16);

impl CloseCode {
    pub const NORMAL: Self = Self(1000);
    /// Sent by the client when the page unloads.
    pub const GOING_AWAY: Self = Self(1001);
    pub const ABNORMAL: Self = Self(1006);
    pub const INTERNAL_ERROR: Self = Self(1011);

    /// Whether the peer ended the conversation on purpose.
    pub fn is_clean(&self) -> bool {
        matches!(*self, Self::NORMAL | Self::GOING_AWAY)
    }
}

impl From<u16> for CloseCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.0
    }
}
