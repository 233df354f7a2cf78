// Engine modules: timing, interpolation, animation, input, assets

pub mod animation;
pub mod assets;
pub mod game_loop;
pub mod input;
pub mod tween;
