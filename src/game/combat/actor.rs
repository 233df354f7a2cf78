// Combat actors
//
// Any creature or character that takes part in combat, and therefore needs
// stats, a level, equipment and so on.

use std::collections::BTreeMap;

use super::dice::StatGrowth;
use super::level::{LevelUp, XpCurve};
use super::stats::{BaseStats, Stat, Stats};
use crate::engine::assets::{AssetError, AssetLoader, Portrait};

/// Equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Access1,
    Access2,
}

/// Item ids equipped in each slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub access1: Option<String>,
    pub access2: Option<String>,
}

impl Equipment {
    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<String> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Access1 => &mut self.access1,
            EquipSlot::Access2 => &mut self.access2,
        }
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&str> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_deref(),
            EquipSlot::Armor => self.armor.as_deref(),
            EquipSlot::Access1 => self.access1.as_deref(),
            EquipSlot::Access2 => self.access2.as_deref(),
        }
    }

    /// Put `item` in `slot`, returning whatever was there
    pub fn equip(&mut self, slot: EquipSlot, item: &str) -> Option<String> {
        self.slot_mut(slot).replace(item.to_string())
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<String> {
        self.slot_mut(slot).take()
    }
}

/// Static description an actor is created from
#[derive(Debug, Clone)]
pub struct ActorDef {
    /// Must match the map character's id
    pub id: String,
    pub name: String,
    pub stats: BaseStats,
    pub growth: BTreeMap<Stat, StatGrowth>,
    /// Portrait file name under the portraits directory
    pub portrait: String,
    pub actions: Vec<String>,
    pub xp_curve: XpCurve,
}

impl ActorDef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            stats: BaseStats::default(),
            growth: BTreeMap::new(),
            portrait: format!("{}.png", id),
            actions: Vec::new(),
            xp_curve: XpCurve::default(),
        }
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_growth(mut self, stat: Stat, growth: StatGrowth) -> Self {
        self.growth.insert(stat, growth);
        self
    }

    pub fn with_portrait(mut self, portrait: &str) -> Self {
        self.portrait = portrait.to_string();
        self
    }

    pub fn with_actions(mut self, actions: &[&str]) -> Self {
        self.actions = actions.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_xp_curve(mut self, curve: XpCurve) -> Self {
        self.xp_curve = curve;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    pub growth: BTreeMap<Stat, StatGrowth>,
    pub portrait: Portrait,
    pub level: u32,
    pub xp: f64,
    pub next_level_xp: f64,
    pub actions: Vec<String>,
    pub equipment: Equipment,
    xp_curve: XpCurve,
}

impl Actor {
    /// Create a level 1 actor, loading its portrait through `assets`
    pub fn create(def: ActorDef, assets: &AssetLoader) -> Result<Self, AssetError> {
        let portrait = assets.load_portrait(&def.portrait)?;
        Ok(Self::with_portrait(def, portrait))
    }

    /// Create a level 1 actor with an already loaded (or placeholder) portrait
    pub fn with_portrait(def: ActorDef, portrait: Portrait) -> Self {
        let level = 1;
        Self {
            id: def.id,
            name: def.name,
            stats: Stats::new(def.stats),
            growth: def.growth,
            portrait,
            level,
            xp: 0.0,
            next_level_xp: def.xp_curve.next_level(level),
            actions: def.actions,
            equipment: Equipment::default(),
            xp_curve: def.xp_curve,
        }
    }

    pub fn ready_to_level_up(&self) -> bool {
        self.xp >= self.next_level_xp
    }

    /// Add experience. Losses never take XP below zero (or below an existing
    /// debt). Returns whether the actor can now level up; leveling itself is
    /// left to the caller.
    pub fn add_xp(&mut self, xp: f64) -> bool {
        self.xp = (self.xp + xp).max(self.xp.min(0.0));
        self.ready_to_level_up()
    }

    /// Roll the gains for the next level without applying them
    pub fn create_level_up(&self) -> LevelUp {
        let base_stats = self
            .growth
            .iter()
            .map(|(&stat, growth)| (stat, f64::from(growth.roll())))
            .collect();

        LevelUp {
            xp: -self.next_level_xp,
            level: 1,
            base_stats,
        }
    }

    /// Commit a level-up rolled by `create_level_up`. The XP delta is applied
    /// as is, so committing early leaves the actor in XP debt.
    pub fn apply_level(&mut self, level_up: LevelUp) {
        self.xp += level_up.xp;
        self.level = self.level.saturating_add(level_up.level);
        self.next_level_xp = self.xp_curve.next_level(self.level);
        self.stats.add_bases(&level_up.base_stats);

        log::info!(
            "{} reached level {} ({} / {} XP)",
            self.name,
            self.level,
            self.xp,
            self.next_level_xp
        );
    }

    pub fn xp_curve(&self) -> &XpCurve {
        &self.xp_curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn hero() -> Actor {
        let def = ActorDef::new("hero", "Hero")
            .with_growth(Stat::HpMax, StatGrowth::constant(50))
            .with_xp_curve(XpCurve::flat(100.0))
            .with_actions(&["attack", "item"]);
        Actor::with_portrait(def, Portrait::placeholder())
    }

    #[test]
    fn test_new_actor_is_level_one() {
        let actor = hero();
        assert_eq!(actor.level, 1);
        assert_eq!(actor.xp, 0.0);
        assert_eq!(actor.next_level_xp, 100.0);
        assert_eq!(actor.actions, vec!["attack".to_string(), "item".to_string()]);
        assert_eq!(actor.stats.get(Stat::HpMax), 300.0);
    }

    #[test]
    fn test_default_curve_threshold() {
        let actor = Actor::with_portrait(ActorDef::new("a", "A"), Portrait::placeholder());
        assert_eq!(actor.next_level_xp, 1000.0);
    }

    #[test]
    fn test_add_xp_reports_ready() {
        let mut actor = hero();
        assert!(!actor.add_xp(99.0));
        assert!(actor.add_xp(1.0));
        assert_eq!(actor.xp, 100.0);
    }

    #[test]
    fn test_add_xp_never_negative() {
        let mut actor = hero();
        actor.add_xp(10.0);
        assert!(!actor.add_xp(-50.0));
        assert_eq!(actor.xp, 0.0);
    }

    #[test]
    fn test_level_up_scenario() {
        let mut actor = hero();

        assert!(actor.add_xp(150.0));
        assert_eq!(actor.xp, 150.0);

        let level_up = actor.create_level_up();
        assert_eq!(level_up.xp, -100.0);
        assert_eq!(level_up.level, 1);
        assert_eq!(level_up.base_stats, BTreeMap::from([(Stat::HpMax, 50.0)]));

        actor.apply_level(level_up);
        assert_eq!(actor.xp, 50.0);
        assert_eq!(actor.level, 2);
        assert_eq!(actor.stats.base(Stat::HpMax), 350.0);
        // Growing the maximum doesn't heal
        assert_eq!(actor.stats.base(Stat::HpNow), 300.0);
    }

    #[test]
    fn test_level_up_grows_current_and_max_together() {
        let def = ActorDef::new("knight", "Knight")
            .with_growth(Stat::HpNow, StatGrowth::constant(50))
            .with_growth(Stat::HpMax, StatGrowth::constant(50))
            .with_xp_curve(XpCurve::flat(100.0));
        let mut actor = Actor::with_portrait(def, Portrait::placeholder());

        assert!(actor.add_xp(100.0));
        let level_up = actor.create_level_up();
        actor.apply_level(level_up);

        assert_eq!(actor.stats.base(Stat::HpNow), 350.0);
        assert_eq!(actor.stats.base(Stat::HpMax), 350.0);
    }

    #[test]
    fn test_early_level_up_spends_exact_threshold() {
        let mut actor = hero();
        assert!(!actor.add_xp(30.0));

        let threshold = actor.next_level_xp;
        let level_up = actor.create_level_up();
        actor.apply_level(level_up);

        assert_eq!(actor.xp, 30.0 - threshold);
        assert_eq!(actor.level, 2);
        assert!(!actor.ready_to_level_up());

        // Losses can't deepen the debt, later XP pays it back
        actor.add_xp(-10.0);
        assert_eq!(actor.xp, 30.0 - threshold);
        actor.add_xp(100.0);
        assert_eq!(actor.xp, 30.0);
    }

    #[test]
    fn test_successive_level_ups() {
        let def = ActorDef::new("mage", "Mage")
            .with_growth(Stat::Intelligence, StatGrowth::constant(3))
            .with_growth(Stat::MpMax, StatGrowth::constant(20));
        let mut actor = Actor::with_portrait(def, Portrait::placeholder());
        actor.add_xp(20_000.0);

        let mut levels = 0;
        while actor.ready_to_level_up() {
            let threshold = actor.next_level_xp;
            let xp_before = actor.xp;
            let level_up = actor.create_level_up();
            actor.apply_level(level_up);
            assert_eq!(actor.xp, xp_before - threshold);
            levels += 1;
        }

        assert_eq!(actor.level, 1 + levels);
        assert_eq!(
            actor.stats.base(Stat::Intelligence),
            10.0 + 3.0 * f64::from(levels)
        );
        assert_eq!(actor.stats.base(Stat::MpMax), 300.0 + 20.0 * f64::from(levels));
        assert!(actor.xp < actor.next_level_xp);
    }

    #[test]
    fn test_create_level_up_rolls_each_growth_once() {
        let calls = Arc::new(AtomicI32::new(0));
        let counter = Arc::clone(&calls);
        let def = ActorDef::new("rogue", "Rogue").with_growth(
            Stat::Speed,
            StatGrowth::from_fn("counting", move || counter.fetch_add(1, Ordering::SeqCst) + 1),
        );
        let actor = Actor::with_portrait(def, Portrait::placeholder());

        let first = actor.create_level_up();
        let second = actor.create_level_up();

        assert_eq!(first.gain(Stat::Speed), 1.0);
        assert_eq!(second.gain(Stat::Speed), 2.0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // Creating a level-up changes nothing on the actor
        assert_eq!(actor.level, 1);
        assert_eq!(actor.stats.base(Stat::Speed), 10.0);
    }

    #[test]
    fn test_create_fails_without_portrait() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetLoader::new(dir.path());
        let result = Actor::create(ActorDef::new("hero", "Hero"), &assets);
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_create_loads_portrait() {
        let dir = tempfile::tempdir().unwrap();
        let portraits = dir.path().join("portraits");
        std::fs::create_dir_all(&portraits).unwrap();
        image::RgbaImage::new(8, 8)
            .save(portraits.join("hero.png"))
            .unwrap();
        let assets = AssetLoader::new(dir.path());

        let actor = Actor::create(ActorDef::new("hero", "Hero"), &assets).unwrap();
        assert_eq!(actor.portrait.bounds(), (8, 8));
        assert!(!actor.portrait.is_placeholder());
    }

    #[test]
    fn test_equipment_slots() {
        let mut actor = hero();
        assert_eq!(actor.equipment.equip(EquipSlot::Weapon, "bronze_sword"), None);
        assert_eq!(
            actor.equipment.equip(EquipSlot::Weapon, "iron_sword"),
            Some("bronze_sword".to_string())
        );
        assert_eq!(actor.equipment.get(EquipSlot::Weapon), Some("iron_sword"));
        assert_eq!(
            actor.equipment.unequip(EquipSlot::Weapon),
            Some("iron_sword".to_string())
        );
        assert_eq!(actor.equipment.get(EquipSlot::Armor), None);
    }
}
