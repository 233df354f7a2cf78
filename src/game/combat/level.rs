// Experience curve and level-up records

use std::collections::BTreeMap;

use super::stats::Stat;

/// XP needed to clear each level: `floor(base * level^exponent)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpCurve {
    pub base: f64,
    pub exponent: f64,
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            base: 1000.0,
            exponent: 1.5,
        }
    }
}

impl XpCurve {
    pub fn new(base: f64, exponent: f64) -> Self {
        Self { base, exponent }
    }

    /// A curve where every level costs the same `xp`
    pub fn flat(xp: f64) -> Self {
        Self::new(xp, 0.0)
    }

    /// XP threshold for leaving `level`
    pub fn next_level(&self, level: u32) -> f64 {
        (self.base * f64::from(level).powf(self.exponent)).floor()
    }
}

/// One level's worth of change, rolled but not yet applied.
///
/// Keeping the roll separate from applying it lets a caller show the gains
/// (or log them) before committing.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    /// XP change, negative: the threshold being spent
    pub xp: f64,
    /// Levels gained
    pub level: u32,
    /// Rolled increase per stat
    pub base_stats: BTreeMap<Stat, f64>,
}

impl LevelUp {
    /// Rolled increase for `stat`, zero if it didn't grow
    pub fn gain(&self, stat: Stat) -> f64 {
        self.base_stats.get(&stat).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve() {
        let curve = XpCurve::default();
        assert_eq!(curve.next_level(1), 1000.0);
        assert_eq!(curve.next_level(2), 2828.0);
        assert_eq!(curve.next_level(4), 8000.0);
    }

    #[test]
    fn test_curve_increases() {
        let curve = XpCurve::default();
        for level in 1..50 {
            assert!(curve.next_level(level + 1) > curve.next_level(level));
        }
    }

    #[test]
    fn test_flat_curve() {
        let curve = XpCurve::flat(100.0);
        assert_eq!(curve.next_level(1), 100.0);
        assert_eq!(curve.next_level(7), 100.0);
    }

    #[test]
    fn test_level_up_gain() {
        let level_up = LevelUp {
            xp: -100.0,
            level: 1,
            base_stats: BTreeMap::from([(Stat::HpMax, 50.0)]),
        };
        assert_eq!(level_up.gain(Stat::HpMax), 50.0);
        assert_eq!(level_up.gain(Stat::Speed), 0.0);
    }
}
