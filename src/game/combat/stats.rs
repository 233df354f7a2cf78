// Combat stats
//
// Each actor has base values that only change through leveling or healing and
// damage, plus named modifiers (equipment, buffs) layered on top.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::math::clamp;

/// A named combat attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    HpNow,
    HpMax,
    MpNow,
    MpMax,
    Strength,
    Speed,
    Intelligence,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Self::HpNow,
        Self::HpMax,
        Self::MpNow,
        Self::MpMax,
        Self::Strength,
        Self::Speed,
        Self::Intelligence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::HpNow => "HpNow",
            Self::HpMax => "HpMax",
            Self::MpNow => "MpNow",
            Self::MpMax => "MpMax",
            Self::Strength => "Strength",
            Self::Speed => "Speed",
            Self::Intelligence => "Intelligence",
        }
    }

    /// The maximum this stat is capped by, if any
    pub fn cap(self) -> Option<Stat> {
        match self {
            Self::HpNow => Some(Self::HpMax),
            Self::MpNow => Some(Self::MpMax),
            _ => None,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stat: {0}")]
pub struct UnknownStat(pub String);

impl FromStr for Stat {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| UnknownStat(s.to_string()))
    }
}

/// Starting values for every stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseStats {
    pub hp_now: f64,
    pub hp_max: f64,
    pub mp_now: f64,
    pub mp_max: f64,
    pub strength: f64,
    pub speed: f64,
    pub intelligence: f64,
}

/// Stats for a fresh adventurer
pub const DEFAULT_STATS: BaseStats = BaseStats {
    hp_now: 300.0,
    hp_max: 300.0,
    mp_now: 300.0,
    mp_max: 300.0,
    strength: 10.0,
    speed: 10.0,
    intelligence: 10.0,
};

impl Default for BaseStats {
    fn default() -> Self {
        DEFAULT_STATS
    }
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::HpNow => self.hp_now,
            Stat::HpMax => self.hp_max,
            Stat::MpNow => self.mp_now,
            Stat::MpMax => self.mp_max,
            Stat::Strength => self.strength,
            Stat::Speed => self.speed,
            Stat::Intelligence => self.intelligence,
        }
    }
}

/// Changes a modifier applies, per stat
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifier {
    /// Flat bonus added to the base value
    pub add: HashMap<Stat, f64>,
    /// Fractional bonus applied after `add` (0.1 = +10%)
    pub mult: HashMap<Stat, f64>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_add(mut self, stat: Stat, amount: f64) -> Self {
        self.add.insert(stat, amount);
        self
    }

    pub fn with_mult(mut self, stat: Stat, fraction: f64) -> Self {
        self.mult.insert(stat, fraction);
        self
    }
}

/// Live stats: base values plus modifiers.
///
/// Base values are never negative and current HP/MP never exceed their
/// maximums; every mutation re-applies those bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    base: HashMap<Stat, f64>,
    modifiers: BTreeMap<String, Modifier>,
}

impl Stats {
    pub fn new(base: BaseStats) -> Self {
        let mut stats = Self {
            base: Stat::ALL.into_iter().map(|s| (s, base.get(s))).collect(),
            modifiers: BTreeMap::new(),
        };
        for stat in Stat::ALL {
            stats.enforce_bounds(stat);
        }
        stats
    }

    /// Base value, ignoring modifiers
    pub fn base(&self, stat: Stat) -> f64 {
        self.base.get(&stat).copied().unwrap_or_default()
    }

    /// Effective value: `(base + adds) * (1 + mults)`, never below zero
    pub fn get(&self, stat: Stat) -> f64 {
        let (add, mult) = self
            .modifiers
            .values()
            .fold((0.0, 0.0), |(add, mult), modifier| {
                (
                    add + modifier.add.get(&stat).copied().unwrap_or_default(),
                    mult + modifier.mult.get(&stat).copied().unwrap_or_default(),
                )
            });

        ((self.base(stat) + add) * (1.0 + mult)).max(0.0)
    }

    pub fn set_base(&mut self, stat: Stat, value: f64) {
        self.base.insert(stat, value);
        self.enforce_bounds(stat);
    }

    pub fn add_base(&mut self, stat: Stat, delta: f64) {
        self.set_base(stat, self.base(stat) + delta);
    }

    /// Add several deltas at once, clamping only after all are applied.
    /// Maxima are settled before the values they cap.
    pub fn add_bases(&mut self, deltas: &BTreeMap<Stat, f64>) {
        for (&stat, delta) in deltas {
            self.base.insert(stat, self.base(stat) + delta);
        }

        let (currents, others): (Vec<Stat>, Vec<Stat>) = deltas
            .keys()
            .copied()
            .partition(|stat| stat.cap().is_some());
        for stat in others.into_iter().chain(currents) {
            self.enforce_bounds(stat);
        }
    }

    /// Attach a modifier under `id`, replacing any previous one with that id
    pub fn add_modifier(&mut self, id: &str, modifier: Modifier) {
        self.modifiers.insert(id.to_string(), modifier);
    }

    pub fn remove_modifier(&mut self, id: &str) -> Option<Modifier> {
        self.modifiers.remove(id)
    }

    fn enforce_bounds(&mut self, stat: Stat) {
        let value = self.base(stat).max(0.0);
        let value = match stat.cap() {
            Some(cap) => clamp(value, 0.0, self.base(cap).max(0.0)),
            None => value,
        };
        self.base.insert(stat, value);

        // Lowering a maximum drags its current value down with it
        let capped = Stat::ALL.into_iter().find(|s| s.cap() == Some(stat));
        if let Some(current) = capped {
            let current_value = self.base(current).min(value);
            self.base.insert(current, current_value);
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(DEFAULT_STATS)
    }
}
