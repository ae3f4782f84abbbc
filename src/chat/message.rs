//! Wire records exchanged over the room socket.
//!
//! Outbound frames are [`ChatMessage`] JSON objects. Inbound frames are
//! free-form JSON; only objects carrying a truthy `username` and `message`
//! become a [`ChatLine`].

use crate::base::chaterror::ChatError;
use crate::base::context::JsonResultExt;
use crate::page::UserIdentity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Outbound chat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user_id: String,
    pub username: String,
    pub message: String,
}

impl ChatMessage {
    pub fn new(identity: &UserIdentity, message: impl Into<String>) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            username: identity.username().to_string(),
            message: message.into(),
        }
    }

    /// Serialize to a text frame payload.
    pub fn to_frame(&self) -> Result<String, ChatError> {
        serde_json::to_string(self).frame_context()
    }
}

/// A received line that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub username: String,
    pub message: String,
}

impl fmt::Display for ChatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.username, self.message)
    }
}

impl ChatLine {
    /// Parse an inbound text frame.
    ///
    /// Returns `Ok(None)` for well-formed JSON that does not carry a
    /// renderable line, and `Err` only when the payload is not JSON.
    pub fn parse(payload: &str) -> Result<Option<Self>, ChatError> {
        let value: Value = serde_json::from_str(payload).frame_context()?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let username = object.get("username").and_then(renderable)?;
        let message = object.get("message").and_then(renderable)?;
        Some(Self { username, message })
    }
}

/// Text for a truthy scalar. Falsy values (`null`, `false`, `0`, `""`)
/// and containers yield `None`.
fn renderable(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => None,
            // Integral floats below 1e21 print in full, as in a browser.
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                Some(format!("{:.0}", f))
            }
            _ => Some(n.to_string()),
        },
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_frame() {
        let identity = UserIdentity::new("42", "alice");
        let frame = ChatMessage::new(&identity, "hello").to_frame().unwrap();
        assert_eq!(
            frame,
            r#"{"user_id":"42","username":"alice","message":"hello"}"#
        );
    }

    #[test]
    fn test_outbound_escapes_json() {
        let identity = UserIdentity::new("1", "a\"b");
        let frame = ChatMessage::new(&identity, "line\nbreak").to_frame().unwrap();
        let back: ChatMessage = serde_json::from_str(&frame).unwrap();
        assert_eq!(back.username, "a\"b");
        assert_eq!(back.message, "line\nbreak");
    }

    #[test]
    fn test_parse_line() {
        let line = ChatLine::parse(r#"{"username":"bob","message":"hi","extra":1}"#)
            .unwrap()
            .unwrap();
        assert_eq!(line.to_string(), "bob: hi");
    }

    #[test]
    fn test_parse_keeps_markup_as_text() {
        let line = ChatLine::parse(r#"{"username":"eve","message":"<img src=x>"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(line.to_string(), "eve: <img src=x>");
    }

    #[test]
    fn test_falsy_fields_dropped() {
        for value in [
            json!({"message": "hi"}),
            json!({"username": "bob"}),
            json!({"username": "", "message": "hi"}),
            json!({"username": "bob", "message": ""}),
            json!({"username": null, "message": "hi"}),
            json!({"username": "bob", "message": 0}),
            json!({"username": "bob", "message": false}),
            json!({"username": ["bob"], "message": "hi"}),
        ] {
            assert_eq!(ChatLine::from_value(&value), None, "{}", value);
        }
    }

    #[test]
    fn test_truthy_scalars_rendered() {
        let line = ChatLine::from_value(&json!({"username": 7, "message": true})).unwrap();
        assert_eq!(line.to_string(), "7: true");

        let line = ChatLine::from_value(&json!({"username": "n", "message": 2.0})).unwrap();
        assert_eq!(line.message, "2");

        let line = ChatLine::from_value(&json!({"username": "n", "message": 1e16})).unwrap();
        assert_eq!(line.message, "10000000000000000");
        let line = ChatLine::from_value(&json!({"username": "n", "message": -3e20})).unwrap();
        assert_eq!(line.message, "-300000000000000000000");
        let line = ChatLine::from_value(&json!({"username": "n", "message": 1.5})).unwrap();
        assert_eq!(line.message, "1.5");
    }

    #[test]
    fn test_non_object_dropped() {
        assert_eq!(ChatLine::parse("5").unwrap(), None);
        assert_eq!(ChatLine::parse(r#""bob: hi""#).unwrap(), None);
        assert_eq!(ChatLine::parse("null").unwrap(), None);
    }

    #[test]
    fn test_invalid_json() {
        let err = ChatLine::parse("hello").unwrap_err();
        assert!(matches!(err, ChatError::MalformedFrame(_)));
    }

    #[test]
    fn test_user_key_is_not_username() {
        assert_eq!(
            ChatLine::parse(r#"{"user":"bob","message":"hi"}"#).unwrap(),
            None
        );
    }
}
