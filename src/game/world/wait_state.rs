// Wait state: stand on a tile until a direction is held

use super::direction::Direction;
use super::state_machine::{Stage, State, StateId, Transition};

/// Seconds after arriving before the entity drops back to its standing frame
pub const FRAME_RESET_DELAY: f32 = 0.05;

#[derive(Debug, Default)]
pub struct WaitState {
    /// Time left before the standing frame is restored
    frame_reset: Option<f32>,
}

impl WaitState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for WaitState {
    fn enter(&mut self, _stage: &mut Stage<'_>, _direction: Direction) -> Option<Transition> {
        self.frame_reset = Some(FRAME_RESET_DELAY);
        None
    }

    fn exit(&mut self, _stage: &mut Stage<'_>) {}

    fn update(&mut self, stage: &mut Stage<'_>, dt: f32) -> Option<Transition> {
        if let Some(remaining) = self.frame_reset.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                stage.entity.set_frame(stage.entity.start_frame);
                self.frame_reset = None;
            }
        }

        if stage.input.is_idle() {
            None
        } else {
            Some(Transition::new(StateId::Move, stage.input))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::world::entity::Entity;
    use crate::game::world::map::GameMap;

    #[test]
    fn test_wait_restores_start_frame() {
        let mut state = WaitState::new();
        let mut map = GameMap::new(3, 3, 16.0, 16.0, 3);
        let mut entity = Entity::new(1, 1, 2);
        entity.set_frame(9);
        let mut stage = Stage {
            entity: &mut entity,
            map: &mut map,
            input: Direction::Idle,
        };

        state.enter(&mut stage, Direction::Idle);
        assert_eq!(state.update(&mut stage, 0.02), None);
        assert_eq!(stage.entity.frame(), 9);

        assert_eq!(state.update(&mut stage, 0.04), None);
        assert_eq!(stage.entity.frame(), 2);
    }

    #[test]
    fn test_held_input_requests_move() {
        let mut state = WaitState::new();
        let mut map = GameMap::new(3, 3, 16.0, 16.0, 3);
        let mut entity = Entity::new(1, 1, 0);
        let mut stage = Stage {
            entity: &mut entity,
            map: &mut map,
            input: Direction::Left,
        };

        state.enter(&mut stage, Direction::Idle);
        assert_eq!(
            state.update(&mut stage, 0.01),
            Some(Transition::new(StateId::Move, Direction::Left))
        );
    }
}
