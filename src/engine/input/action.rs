// Actions the player can trigger and their default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Meta actions
    Pause,
    Quit,
}

impl Action {
    /// Grid offset this action contributes while held, `(0, 0)` for non-movement
    pub fn offset(self) -> (i32, i32) {
        match self {
            Action::MoveUp => (0, -1),
            Action::MoveDown => (0, 1),
            Action::MoveLeft => (-1, 0),
            Action::MoveRight => (1, 0),
            Action::Pause | Action::Quit => (0, 0),
        }
    }
}

/// Default keyboard bindings: arrows and WASD for movement
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowUp, Action::MoveUp),
        (KeyCode::ArrowDown, Action::MoveDown),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::KeyW, Action::MoveUp),
        (KeyCode::KeyS, Action::MoveDown),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::KeyP, Action::Pause),
        (KeyCode::Escape, Action::Quit),
    ]
}
