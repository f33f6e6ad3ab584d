//! Polled keyboard input
//!
//! The host feeds key transitions into a `KeyboardState`; the session polls
//! it once per frame through `InputSource`.

use std::collections::HashSet;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Map a DOM-style key code (`"Space"`, `"ArrowLeft"`, ...) to a key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => None,
        }
    }
}

/// Anything that can answer "is this key held right now"
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Held-key set updated from key events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    down: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Set a key from a raw key code; unknown codes are ignored
    pub fn set_code(&mut self, code: &str, down: bool) {
        if let Some(key) = Key::from_code(code) {
            if down {
                self.press(key);
            } else {
                self.release(key);
            }
        }
    }

    /// Forget every held key (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.down.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}
