//! # roomchat
//!
//! A WebSocket client for room-scoped chat, with the hosting page reduced
//! to a handful of small traits.
//!
//! The client opens one socket per room on the page's own host, renders
//! every received `{"username", "message"}` frame as a plain-text line in
//! a scrollable log, and sends `{"user_id", "username", "message"}` when
//! the user commits the input field with Enter.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomchat::chat::{ChatConfig, ChatSession, PageEvent};
//! use roomchat::page::{ChatBoxDataset, KeyEvent, ScrollLog, TextInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChatConfig::builder()
//!         .page_url("http://localhost:8000/room/1/")?
//!         .chat_box(ChatBoxDataset::from_attributes([
//!             ("data-room-id", "1"),
//!             ("data-user-id", "42"),
//!             ("data-username", "alice"),
//!         ])?)
//!         .build()?;
//!
//!     let session = ChatSession::connect(&config, TextInput::new(), ScrollLog::default()).await?;
//!     let (events, rx) = tokio::sync::mpsc::channel(16);
//!     let running = tokio::spawn(session.run(rx));
//!
//!     events.send(PageEvent::Input("hello".into())).await?;
//!     events.send(PageEvent::KeyPress(KeyEvent::commit())).await?;
//!     events.send(PageEvent::Unload).await?;
//!
//!     let client = running.await?;
//!     for entry in client.log().entries() {
//!         println!("{}", entry);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type, client state, error context helpers
//! - [`page`] - Chat box dataset, page location, input field, chat log
//! - [`ws`] - WebSocket connection and message types
//! - [`chat`] - Configuration, the chat client and its event loop
//! - [`relay`] - A room relay server speaking the same wire protocol
//!
//! ## Behaviour
//!
//! - Frames that are not JSON, or lack a `username`/`message`, are dropped
//! - Received text is never interpreted as markup or terminal control
//! - A closed socket is logged and the client stays inert; there is no
//!   reconnection

pub mod base;
pub mod chat;
pub mod page;
pub mod relay;
pub mod ws;

pub use base::chaterror::ChatError;
pub use chat::{ChatClient, ChatConfig, ChatSession, PageEvent};
