// Exploration state machine
//
// A character on the map is always in exactly one state. States never switch
// the machine themselves: they return a `Transition` and the machine applies
// it, calling `exit` on the outgoing state before `enter` on the incoming one.

use std::fmt;

use super::direction::Direction;
use super::entity::Entity;
use super::map::GameMap;
use super::move_state::MoveState;
use super::wait_state::WaitState;

/// Transitions a single `change` may chain before giving up
const MAX_CHAINED_TRANSITIONS: usize = 8;

/// Identifies a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    /// Standing on a tile, waiting for input
    Wait,
    /// Sliding to a neighbouring tile
    Move,
}

impl StateId {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to switch states, carrying the direction for the next `enter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: StateId,
    pub direction: Direction,
}

impl Transition {
    pub fn new(to: StateId, direction: Direction) -> Self {
        Self { to, direction }
    }

    /// Go back to waiting, facing nowhere in particular
    pub fn wait() -> Self {
        Self::new(StateId::Wait, Direction::Idle)
    }
}

/// Everything a state may touch while it runs
#[derive(Debug)]
pub struct Stage<'a> {
    pub entity: &'a mut Entity,
    pub map: &'a mut GameMap,
    /// Direction currently held by whoever controls the character
    pub input: Direction,
}

/// The four operations every exploration state provides
pub trait State: fmt::Debug {
    fn enter(&mut self, stage: &mut Stage<'_>, direction: Direction) -> Option<Transition>;
    fn exit(&mut self, stage: &mut Stage<'_>);
    fn update(&mut self, stage: &mut Stage<'_>, dt: f32) -> Option<Transition>;
    fn render(&self, _stage: &Stage<'_>) {}
}

/// Owns one instance of every state and tracks which one is active
#[derive(Debug)]
pub struct StateMachine {
    wait: WaitState,
    movement: MoveState,
    current: Option<StateId>,
    previous: Option<StateId>,
    state_time: f32,
    transition_count: u64,
}

impl StateMachine {
    /// Create a machine with no active state; call `change` to start it
    pub fn new(wait: WaitState, movement: MoveState) -> Self {
        Self {
            wait,
            movement,
            current: None,
            previous: None,
            state_time: 0.0,
            transition_count: 0,
        }
    }

    fn state_mut(&mut self, id: StateId) -> &mut dyn State {
        match id {
            StateId::Wait => &mut self.wait,
            StateId::Move => &mut self.movement,
        }
    }

    fn state(&self, id: StateId) -> &dyn State {
        match id {
            StateId::Wait => &self.wait,
            StateId::Move => &self.movement,
        }
    }

    /// Switch to `to`, applying any transition the new state requests on entry
    pub fn change(&mut self, to: StateId, direction: Direction, stage: &mut Stage<'_>) {
        let mut next = Some(Transition::new(to, direction));
        let mut hops = 0;

        while let Some(transition) = next.take() {
            if hops == MAX_CHAINED_TRANSITIONS {
                log::warn!(
                    "Dropping transition to {} after {} chained changes",
                    transition.to,
                    hops
                );
                break;
            }
            hops += 1;

            if let Some(current) = self.current {
                self.state_mut(current).exit(stage);
            }

            log::debug!(
                "State change {} -> {} ({})",
                self.current.map_or("none", StateId::name),
                transition.to,
                transition.direction.name()
            );

            self.previous = self.current;
            self.current = Some(transition.to);
            self.state_time = 0.0;
            self.transition_count += 1;

            next = self
                .state_mut(transition.to)
                .enter(stage, transition.direction);
        }
    }

    /// Tick the active state
    pub fn update(&mut self, stage: &mut Stage<'_>, dt: f32) {
        let Some(current) = self.current else {
            return;
        };

        self.state_time += dt;

        if let Some(transition) = self.state_mut(current).update(stage, dt) {
            self.change(transition.to, transition.direction, stage);
        }
    }

    pub fn render(&self, stage: &Stage<'_>) {
        if let Some(current) = self.current {
            self.state(current).render(stage);
        }
    }

    /// The active state, if the machine has been started
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    /// Seconds spent in the active state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Total number of state changes applied
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    pub fn move_state(&self) -> &MoveState {
        &self.movement
    }

    pub fn wait_state(&self) -> &WaitState {
        &self.wait
    }
}
