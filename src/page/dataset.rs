//! Chat box dataset.
//!
//! The hosting page exposes the room and the signed-in user as data
//! attributes on the chat box element. They are read once, before the
//! client is built, and never change afterwards.

use crate::base::chaterror::ChatError;
use std::fmt;

/// Dataset key carrying the room identifier (`data-room-id`).
pub const ROOM_ID_KEY: &str = "roomId";
/// Dataset key carrying the user id (`data-user-id`).
pub const USER_ID_KEY: &str = "userId";
/// Dataset key carrying the display name (`data-username`).
pub const USERNAME_KEY: &str = "username";

/// Opaque identifier of a chat room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Create a room id. Empty ids are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, ChatError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ChatError::MissingAttribute(ROOM_ID_KEY));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed-in user, as rendered by the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    user_id: String,
    username: String,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Values read from the chat box element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBoxDataset {
    pub room: RoomId,
    pub identity: UserIdentity,
}

impl ChatBoxDataset {
    /// Read the dataset from element attributes.
    ///
    /// Accepts both attribute names (`data-room-id`) and dataset keys
    /// (`roomId`). Attributes outside the dataset are ignored.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, ChatError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut room = None;
        let mut user_id = None;
        let mut username = None;

        for (name, value) in attrs {
            let key = match name.strip_prefix("data-") {
                Some(rest) => dataset_key(rest),
                None => name.to_string(),
            };
            match key.as_str() {
                ROOM_ID_KEY => room = Some(value),
                USER_ID_KEY => user_id = Some(value),
                USERNAME_KEY => username = Some(value),
                _ => {}
            }
        }

        let room = RoomId::new(room.ok_or(ChatError::MissingAttribute(ROOM_ID_KEY))?)?;
        let user_id = user_id.ok_or(ChatError::MissingAttribute(USER_ID_KEY))?;
        let username = username.ok_or(ChatError::MissingAttribute(USERNAME_KEY))?;

        Ok(Self {
            room,
            identity: UserIdentity::new(user_id, username),
        })
    }
}

/// Convert the part of a `data-*` attribute after the prefix into its
/// dataset key: `room-id` becomes `roomId`.
fn dataset_key(attr: &str) -> String {
    let mut key = String::with_capacity(attr.len());
    let mut upper_next = false;
    for c in attr.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next && c.is_ascii_lowercase() {
            key.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            if upper_next {
                key.push('-');
                upper_next = false;
            }
            key.push(c);
        }
    }
    if upper_next {
        key.push('-');
    }
    key
}
