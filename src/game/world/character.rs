// Map character: an entity driven by the exploration state machine

use super::direction::Direction;
use super::entity::Entity;
use super::map::GameMap;
use super::move_state::{MoveConfig, MoveState};
use super::state_machine::{Stage, StateId, StateMachine};
use super::wait_state::WaitState;

/// Walk-cycle frames for each facing
#[derive(Debug, Clone, PartialEq)]
pub struct FacingFrames {
    pub up: Vec<usize>,
    pub down: Vec<usize>,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

impl FacingFrames {
    /// Standard sheet layout: one row per facing in the order
    /// down, left, right, up, with `columns` frames per row
    pub fn four_row(columns: usize) -> Self {
        let row = |r: usize| (r * columns..(r + 1) * columns).collect::<Vec<_>>();
        Self {
            down: row(0),
            left: row(1),
            right: row(2),
            up: row(3),
        }
    }

    /// Frames for walking in `direction`; `Idle` has none
    pub fn for_direction(&self, direction: Direction) -> Option<&[usize]> {
        match direction {
            Direction::Up => Some(&self.up),
            Direction::Down => Some(&self.down),
            Direction::Left => Some(&self.left),
            Direction::Right => Some(&self.right),
            Direction::Idle => None,
        }
    }
}

/// Static description of a map character
#[derive(Debug, Clone)]
pub struct CharacterDef {
    pub name: String,
    pub facings: FacingFrames,
    /// Standing frame
    pub start_frame: usize,
    pub move_config: MoveConfig,
}

impl CharacterDef {
    /// A character using the standard four-row sheet
    pub fn standard(name: &str, columns: usize) -> Self {
        Self {
            name: name.to_string(),
            facings: FacingFrames::four_row(columns),
            start_frame: 0,
            move_config: MoveConfig::default(),
        }
    }
}

/// A character standing on a map
#[derive(Debug)]
pub struct Character {
    pub name: String,
    entity: Entity,
    machine: StateMachine,
}

impl Character {
    /// Place a character on tile `(x, y)`, waiting
    pub fn new(def: &CharacterDef, x: i32, y: i32, map: &mut GameMap) -> Self {
        let mut entity = Entity::new(x, y, def.start_frame);
        entity.teleport(x, y, map);

        let mut machine = StateMachine::new(
            WaitState::new(),
            MoveState::new(def.facings.clone(), def.start_frame, def.move_config),
        );
        let mut stage = Stage {
            entity: &mut entity,
            map,
            input: Direction::Idle,
        };
        machine.change(StateId::Wait, Direction::Idle, &mut stage);

        Self {
            name: def.name.clone(),
            entity,
            machine,
        }
    }

    /// Tick the character with the direction its controller is holding
    pub fn update(&mut self, map: &mut GameMap, input: Direction, dt: f32) {
        let mut stage = Stage {
            entity: &mut self.entity,
            map,
            input,
        };
        self.machine.update(&mut stage, dt);
    }

    /// Start a step right away, interrupting whatever the character was doing
    pub fn request_move(&mut self, map: &mut GameMap, direction: Direction) {
        let mut stage = Stage {
            entity: &mut self.entity,
            map,
            input: Direction::Idle,
        };
        self.machine.change(StateId::Move, direction, &mut stage);
    }

    /// Record this frame's draw calls into the map's canvas
    pub fn render(&mut self, map: &mut GameMap) {
        {
            let stage = Stage {
                entity: &mut self.entity,
                map: &mut *map,
                input: Direction::Idle,
            };
            self.machine.render(&stage);
        }
        self.entity.draw(map);
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn state(&self) -> Option<StateId> {
        self.machine.current()
    }

    pub fn is_moving(&self) -> bool {
        self.state() == Some(StateId::Move)
    }

    /// Completed one-tile steps
    pub fn steps_taken(&self) -> u64 {
        self.machine.move_state().steps_taken()
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }
}
