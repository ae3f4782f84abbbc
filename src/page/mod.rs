//! Host page bindings.
//!
//! The page around the chat is reduced to four pieces the client talks to:
//! - [`ChatBoxDataset`](dataset::ChatBoxDataset): room and user, read once
//! - [`PageLocation`](location::PageLocation): where the socket lives
//! - [`MessageInput`](input::MessageInput) and [`KeyEvent`](input::KeyEvent)
//! - [`ChatLog`](log::ChatLog): where received lines are shown

pub mod dataset;
pub mod input;
pub mod location;
pub mod log;

pub use dataset::{ChatBoxDataset, RoomId, UserIdentity};
pub use input::{KeyEvent, MessageInput, TextInput, COMMIT_KEY};
pub use location::PageLocation;
pub use log::{ChatLog, LogEntry, ScrollLog, TerminalLog};
