use std::collections::HashSet;

use super::types::{DirectionalInput, InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// The runtime writes events in; the scene only reads held keys.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Key-up events are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Arrow-key steering state.
    pub fn directional(&self) -> DirectionalInput {
        DirectionalInput {
            up: self.key_down(Key::ArrowUp),
            down: self.key_down(Key::ArrowDown),
            left: self.key_down(Key::ArrowLeft),
            right: self.key_down(Key::ArrowRight),
        }
    }
}
