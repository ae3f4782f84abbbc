//! Room chat client.
//!
//! - [`ChatConfig`]: room, user, page location and handshake options
//! - [`ChatClient`]: receive / send / key / close handlers
//! - [`ChatSession`]: the event loop that feeds the client
//!
//! # Example
//! ```rust,ignore
//! use roomchat::chat::{ChatConfig, ChatSession, PageEvent};
//! use roomchat::page::{ChatBoxDataset, KeyEvent, ScrollLog, TextInput};
//!
//! let dataset = ChatBoxDataset::from_attributes([
//!     ("data-room-id", "1"),
//!     ("data-user-id", "42"),
//!     ("data-username", "alice"),
//! ])?;
//! let config = ChatConfig::builder()
//!     .page_url("http://localhost:8000/room/1/")?
//!     .chat_box(dataset)
//!     .build()?;
//!
//! let session = ChatSession::connect(&config, TextInput::new(), ScrollLog::default()).await?;
//! let (events, rx) = tokio::sync::mpsc::channel(16);
//! let handle = tokio::spawn(session.run(rx));
//! events.send(PageEvent::Input("hello".into())).await?;
//! events.send(PageEvent::KeyPress(KeyEvent::commit())).await?;
//! ```

pub mod client;
pub mod config;
pub mod message;
pub mod session;

pub use client::ChatClient;
pub use config::{ChatConfig, ChatConfigBuilder};
pub use message::{ChatLine, ChatMessage};
pub use session::{ChatSession, PageEvent};
