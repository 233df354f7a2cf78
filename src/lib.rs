// Tile RPG core
//
// - `core`: small math helpers
// - `engine`: timing, tweens, frame animation, input and asset loading
// - `game`: exploration on tile maps and combat actors

pub mod core;
pub mod engine;
pub mod game;
