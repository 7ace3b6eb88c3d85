//! Keyboard state
//!
//! Only the directional keys matter to the level; the platform maps whatever
//! physical keys it likes (arrows, WASD) onto them.

/// Directional keys the rabbit responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Left, Key::Right, Key::Up, Key::Down];
}

/// Per-key held state, sampled once per frame
pub trait KeyState {
    fn is_held(&self, key: Key) -> bool;
}

/// Simple set of held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; 4],
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of held keys
    pub fn from_keys(keys: &[Key]) -> Self {
        let mut held = Self::new();
        for &key in keys {
            held.press(key);
        }
        held
    }

    pub fn press(&mut self, key: Key) {
        self.held[Self::slot(key)] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[Self::slot(key)] = false;
    }

    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    fn slot(key: Key) -> usize {
        match key {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
            Key::Down => 3,
        }
    }
}

impl KeyState for HeldKeys {
    fn is_held(&self, key: Key) -> bool {
        self.held[Self::slot(key)]
    }
}
