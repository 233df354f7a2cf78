// Move state: slide one tile in a direction, then go back to waiting

use glam::Vec2;

use super::character::FacingFrames;
use super::direction::Direction;
use super::state_machine::{Stage, State, Transition};
use crate::engine::animation::{Animation, DEFAULT_FRAME_DURATION};
use crate::engine::tween::Tween;

/// Layer holding blocking tiles on standard maps
pub const COLLISION_LAYER: usize = 2;

/// Tunables for tile movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveConfig {
    /// Seconds a one-tile slide takes
    pub move_duration: f32,
    /// Seconds each walk-cycle frame is shown
    pub frame_duration: f32,
    /// Map layer checked for blocking tiles
    pub collision_layer: usize,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            move_duration: 0.4,
            frame_duration: DEFAULT_FRAME_DURATION,
            collision_layer: COLLISION_LAYER,
        }
    }
}

impl MoveConfig {
    /// Set the slide duration from a speed in tiles per second
    pub fn with_tiles_per_second(mut self, tiles_per_second: f32) -> Self {
        if tiles_per_second > 0.0 {
            self.move_duration = 1.0 / tiles_per_second;
        }
        self
    }
}

/// Slides the entity from its tile to the neighbouring one.
///
/// One instance lives as long as its character and is re-armed on every
/// `enter`.
#[derive(Debug)]
pub struct MoveState {
    config: MoveConfig,
    facings: FacingFrames,
    anim: Animation,
    tween: Tween,
    /// Tile the current slide started from
    origin: Vec2,
    /// Tile offset of the current slide, zero when cancelled
    delta: Vec2,
    direction: Direction,
    steps_taken: u64,
}

impl MoveState {
    pub fn new(facings: FacingFrames, start_frame: usize, config: MoveConfig) -> Self {
        Self {
            anim: Animation::new(vec![start_frame], true, config.frame_duration),
            tween: Tween::new(0.0, 0.0, config.move_duration),
            config,
            facings,
            origin: Vec2::ZERO,
            delta: Vec2::ZERO,
            direction: Direction::Idle,
            steps_taken: 0,
        }
    }

    pub fn config(&self) -> &MoveConfig {
        &self.config
    }

    /// Direction of the last requested move
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Offset of the slide in progress
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Slides completed since creation
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn animation(&self) -> &Animation {
        &self.anim
    }
}

impl State for MoveState {
    fn enter(&mut self, stage: &mut Stage<'_>, direction: Direction) -> Option<Transition> {
        if let Some(frames) = self.facings.for_direction(direction) {
            self.anim.set_frames(frames);
        }

        // A step interrupted mid-slide restarts from the nearest tile
        let (x, y) = stage.entity.tile_coords();
        self.direction = direction;
        self.delta = direction.delta();
        self.origin = Vec2::new(x as f32, y as f32);
        self.tween = Tween::new(0.0, 1.0, self.config.move_duration);

        let (dx, dy) = direction.offset();
        let (target_x, target_y) = (x + dx, y + dy);

        if direction.is_idle()
            || stage
                .map
                .is_blocking_tile(target_x, target_y, self.config.collision_layer)
        {
            log::debug!(
                "Move {} from ({}, {}) blocked at ({}, {})",
                direction.name(),
                x,
                y,
                target_x,
                target_y
            );
            self.delta = Vec2::ZERO;
            stage.entity.set_tile(self.origin);
            stage.entity.set_frame(self.anim.frame());
            return Some(Transition::wait());
        }

        None
    }

    fn exit(&mut self, stage: &mut Stage<'_>) {
        if stage.map.render_layer == self.config.collision_layer {
            stage.entity.teleport_and_draw(stage.map);
        }
    }

    fn update(&mut self, stage: &mut Stage<'_>, dt: f32) -> Option<Transition> {
        self.anim.update(dt);
        stage.entity.set_frame(self.anim.frame());

        self.tween.update(dt);
        stage
            .entity
            .set_tile(self.origin + self.delta * self.tween.value());

        if self.tween.is_finished() {
            self.steps_taken += 1;
            return Some(Transition::wait());
        }

        None
    }

    fn render(&self, _stage: &Stage<'_>) {
        // Drawn by the entity's own draw path
    }
}
