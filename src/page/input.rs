//! Message input field and key events.

/// The key that commits the typed message.
pub const COMMIT_KEY: &str = "Enter";

/// A text field the user composes messages in.
pub trait MessageInput {
    /// Current field contents.
    fn value(&self) -> String;

    /// Replace the field contents.
    fn set_value(&mut self, value: &str);
}

/// In-memory input field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl MessageInput for TextInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
    }
}

/// A key press delivered to the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    key: String,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_prevented: false,
        }
    }

    /// A press of the commit key.
    pub fn commit() -> Self {
        Self::new(COMMIT_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_commit(&self) -> bool {
        self.key == COMMIT_KEY
    }

    /// Suppress the host's default handling (newline, form submit).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let mut input = TextInput::with_value("draft");
        assert_eq!(input.value(), "draft");
        input.set_value("");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_key_event() {
        let mut key = KeyEvent::commit();
        assert!(key.is_commit());
        assert!(!key.default_prevented());
        key.prevent_default();
        assert!(key.default_prevented());

        assert!(!KeyEvent::new("a").is_commit());
        assert!(!KeyEvent::new("enter").is_commit());
    }
}
