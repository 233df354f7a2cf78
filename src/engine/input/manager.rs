// Input manager - tracks held keys and maps them to actions

use super::action::{default_bindings, Action};
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard state for the local player
#[derive(Debug)]
pub struct InputManager {
    bindings: HashMap<KeyCode, Action>,
    /// Keys currently down
    held_keys: HashSet<KeyCode>,
    /// Actions pressed since the last `end_frame`
    just_pressed: HashSet<Action>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    pub fn with_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            held_keys: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Bind a key to an action, replacing the key's previous binding
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
        self.held_keys.remove(&key);
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.handle_key(key_code, event.state, event.repeat);
        }
    }

    /// Record a key press or release
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let Some(&action) = self.bindings.get(&key) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if !repeat {
                    self.just_pressed.insert(action);
                }
                self.held_keys.insert(key);
            }
            ElementState::Released => {
                self.held_keys.remove(&key);
            }
        }
    }

    /// Whether any key bound to `action` is down
    pub fn is_held(&self, action: Action) -> bool {
        self.held_keys
            .iter()
            .any(|key| self.bindings.get(key) == Some(&action))
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Sum of the held movement actions, each axis in -1..=1
    pub fn direction_vector(&self) -> (i32, i32) {
        let held: HashSet<Action> = self
            .held_keys
            .iter()
            .filter_map(|key| self.bindings.get(key).copied())
            .collect();

        held.into_iter()
            .map(Action::offset)
            .fold((0, 0), |(x, y), (dx, dy)| (x + dx, y + dy))
    }

    /// Clear per-frame state; call once per frame after processing events
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held_keys.clear();
        self.just_pressed.clear();
    }
}
