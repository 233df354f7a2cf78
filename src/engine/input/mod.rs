// Input handling
//
// - `action`: game actions and default key bindings
// - `manager`: held-key tracking and the movement vector

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
