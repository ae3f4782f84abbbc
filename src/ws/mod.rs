//! WebSocket client support.
//!
//! Provides WebSocket connections using tokio-tungstenite. The chat
//! session owns exactly one [`WebSocket`] for its whole life.
//!
//! # Example
//! ```ignore
//! use roomchat::ws::{WebSocket, Message};
//!
//! let ws = WebSocket::connect("ws://localhost:8000/ws/chat/1/").await?;
//! ws.send(Message::Text(r#"{"message":"hi"}"#.into())).await?;
//! let msg = ws.recv().await?;
//! ```

mod connection;
mod message;

pub use connection::{WebSocket, WebSocketBuilder};
pub use message::{CloseCode, CloseFrame, Message};
