// Combat actors
//
// - `stats`: base stats, modifiers and their bounds
// - `dice`: dice expressions and level-up growth rolls
// - `level`: XP curve and level-up records
// - `actor`: actors, their definitions and equipment
// - `def_file`: actor definitions loaded from JSON

pub mod actor;
pub mod def_file;
pub mod dice;
pub mod level;
pub mod stats;

// Re-export commonly used types
pub use actor::{Actor, ActorDef, EquipSlot, Equipment};
pub use def_file::{load_actor_defs, parse_actor_defs, DefError};
pub use dice::{Dice, DiceError, StatGrowth};
pub use level::{LevelUp, XpCurve};
pub use stats::{BaseStats, Modifier, Stat, Stats, UnknownStat, DEFAULT_STATS};
