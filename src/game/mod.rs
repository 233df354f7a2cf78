// Game modules: exploration on the tile map, combat actors

pub mod combat;
pub mod world;
