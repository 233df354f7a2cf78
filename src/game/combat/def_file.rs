// Actor definitions loaded from JSON
//
// ```json
// [{
//   "id": "hero",
//   "name": "Seven",
//   "stats": { "HpNow": 300, "HpMax": 300, ... },
//   "growth": { "HpMax": "4d50+100", "Strength": "fast" },
//   "portrait": "hero.png",
//   "actions": ["attack", "item"]
// }]
// ```

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::actor::ActorDef;
use super::dice::{DiceError, StatGrowth};
use super::level::XpCurve;
use super::stats::{BaseStats, Stat, UnknownStat};
use crate::engine::assets::{AssetLoader, AssetType};

#[derive(Debug, thiserror::Error)]
pub enum DefError {
    #[error("Actor {actor}: {source}")]
    UnknownStat {
        actor: String,
        #[source]
        source: UnknownStat,
    },

    #[error("Actor {actor}: bad growth for {stat}: {source}")]
    Growth {
        actor: String,
        stat: Stat,
        #[source]
        source: DiceError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct XpCurveRecord {
    base: f64,
    exponent: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActorDefRecord {
    id: String,
    name: String,
    #[serde(default)]
    stats: BaseStats,
    #[serde(default)]
    growth: BTreeMap<String, String>,
    #[serde(default)]
    portrait: Option<String>,
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    xp_curve: Option<XpCurveRecord>,
}

impl ActorDefRecord {
    fn into_def(self) -> Result<ActorDef, DefError> {
        let mut def = ActorDef::new(&self.id, &self.name).with_stats(self.stats);

        for (name, spec) in &self.growth {
            let stat = name
                .parse::<Stat>()
                .map_err(|source| DefError::UnknownStat {
                    actor: self.id.clone(),
                    source,
                })?;
            let growth = StatGrowth::parse(spec).map_err(|source| DefError::Growth {
                actor: self.id.clone(),
                stat,
                source,
            })?;
            def = def.with_growth(stat, growth);
        }

        if let Some(portrait) = &self.portrait {
            def = def.with_portrait(portrait);
        }
        if let Some(curve) = &self.xp_curve {
            def = def.with_xp_curve(XpCurve::new(curve.base, curve.exponent));
        }
        def.actions = self.actions;

        Ok(def)
    }
}

/// Parse a JSON array of actor definitions
pub fn parse_actor_defs(json: &str) -> Result<Vec<ActorDef>> {
    let records: Vec<ActorDefRecord> =
        serde_json::from_str(json).context("Invalid actor definition JSON")?;

    let defs = records
        .into_iter()
        .map(ActorDefRecord::into_def)
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed {} actor definitions", defs.len());
    Ok(defs)
}

/// Load actor definitions from a JSON file in the data directory
pub fn load_actor_defs(assets: &AssetLoader, name: &str) -> Result<Vec<ActorDef>> {
    let bytes = assets
        .load_bytes(AssetType::Data, name)
        .with_context(|| format!("Failed to read actor definitions {}", name))?;
    let json = String::from_utf8(bytes)
        .with_context(|| format!("Actor definitions {} are not UTF-8", name))?;

    parse_actor_defs(&json).with_context(|| format!("Failed to load {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTY: &str = r#"[
        {
            "id": "hero",
            "name": "Seven",
            "growth": { "HpMax": "4d50+100", "Strength": "fast", "Intelligence": "med" },
            "portrait": "seven.png",
            "actions": ["attack", "item"]
        },
        {
            "id": "mage",
            "name": "Jarvis",
            "stats": {
                "HpNow": 200, "HpMax": 200, "MpNow": 250, "MpMax": 250,
                "Strength": 8, "Speed": 10, "Intelligence": 15
            },
            "growth": { "MpMax": "2d50+100" },
            "xp_curve": { "base": 100, "exponent": 1.0 }
        }
    ]"#;

    #[test]
    fn test_parse_party() {
        let defs = parse_actor_defs(PARTY).unwrap();
        assert_eq!(defs.len(), 2);

        let hero = &defs[0];
        assert_eq!(hero.name, "Seven");
        assert_eq!(hero.portrait, "seven.png");
        assert_eq!(hero.stats, BaseStats::default());
        assert_eq!(hero.growth.len(), 3);
        assert_eq!(hero.growth[&Stat::HpMax].label(), "4d50+100");
        assert_eq!(hero.growth[&Stat::Strength].label(), "3d2");
        assert_eq!(hero.actions, vec!["attack".to_string(), "item".to_string()]);

        let mage = &defs[1];
        assert_eq!(mage.portrait, "mage.png");
        assert_eq!(mage.stats.intelligence, 15.0);
        assert_eq!(mage.xp_curve.next_level(3), 300.0);
    }

    #[test]
    fn test_unknown_stat_rejected() {
        let json = r#"[{ "id": "x", "name": "X", "growth": { "Luck": "1d6" } }]"#;
        let err = parse_actor_defs(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DefError>(),
            Some(DefError::UnknownStat { .. })
        ));
    }

    #[test]
    fn test_bad_growth_rejected() {
        let json = r#"[{ "id": "x", "name": "X", "growth": { "Speed": "lots" } }]"#;
        let err = parse_actor_defs(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DefError>(),
            Some(DefError::Growth {
                stat: Stat::Speed,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"[{ "id": "x", "name": "X", "colour": "red" }]"#;
        assert!(parse_actor_defs(json).is_err());
    }

    #[test]
    fn test_load_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data").join("party.json"), PARTY).unwrap();
        let assets = AssetLoader::new(dir.path());

        let defs = load_actor_defs(&assets, "party.json").unwrap();
        assert_eq!(defs.len(), 2);
        assert!(load_actor_defs(&assets, "missing.json").is_err());
    }
}
