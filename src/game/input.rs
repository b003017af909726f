//! Backend-independent key events.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Enter,
    KeypadEnter,
    Escape,
    Q,
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Decoded character, when the key produced one.
    pub character: Option<char>,
}

impl KeyEvent {
    pub fn new(key: Key, character: Option<char>) -> Self {
        Self { key, character }
    }

    pub fn char(c: char) -> Self {
        let key = if c.eq_ignore_ascii_case(&'q') { Key::Q } else { Key::Other };
        Self { key, character: Some(c) }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.key, Key::Escape | Key::Q)
    }

    pub fn is_confirm(&self) -> bool {
        matches!(self.key, Key::Enter | Key::KeypadEnter)
    }
}
