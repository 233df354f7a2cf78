// Exploration
//
// Characters standing on a tile map, each driven by a two-state machine:
// - `wait`: standing on a tile until a direction is held
// - `move`: sliding one tile with a walk-cycle animation

pub mod character;
pub mod direction;
pub mod entity;
pub mod map;
pub mod move_state;
pub mod state_machine;
pub mod wait_state;

// Re-export commonly used types
pub use character::{Character, CharacterDef, FacingFrames};
pub use direction::Direction;
pub use entity::Entity;
pub use map::{Canvas, DrawCommand, GameMap, MapError};
pub use move_state::{MoveConfig, MoveState, COLLISION_LAYER};
pub use state_machine::{Stage, State, StateId, StateMachine, Transition};
pub use wait_state::WaitState;
