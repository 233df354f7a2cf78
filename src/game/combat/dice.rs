// Dice expressions and stat growth rolls
//
// Growth on level-up is rolled with tabletop dice: "4d50+100" rolls four
// fifty-sided dice and adds 100. Several terms may be listed separated by
// whitespace ("1d6 2d4+1") and their totals are summed.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;

/// Most dice a single term may roll
pub const MAX_DICE: u32 = 1_000;
/// Most sides a single die may have
pub const MAX_SIDES: u32 = 1_000_000;
/// Largest flat modifier on a single term
pub const MAX_MODIFIER: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("Empty dice expression")]
    Empty,

    #[error("Malformed dice term: {0}")]
    Malformed(String),

    #[error("Dice term {0} needs at least one die with at least one side")]
    NoDice(String),

    #[error("Dice term {0} is too large")]
    OutOfRange(String),
}

fn saturate(total: i64) -> i32 {
    total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// One `NdS+M` term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DiceTerm {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl DiceTerm {
    fn parse(term: &str) -> Result<Self, DiceError> {
        let malformed = || DiceError::Malformed(term.to_string());

        let (count, rest) = term.split_once(['d', 'D']).ok_or_else(malformed)?;
        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(at) => rest.split_at(at),
            None => (rest, ""),
        };

        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| malformed())?
        };
        let sides = sides.parse::<u32>().map_err(|_| malformed())?;
        let modifier = if modifier.is_empty() {
            0
        } else {
            let (sign, digits) = modifier.split_at(1);
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let value = digits.parse::<u32>().map_err(|_| malformed())?;
            if value > MAX_MODIFIER {
                return Err(DiceError::OutOfRange(term.to_string()));
            }
            if sign == "-" {
                -(value as i32)
            } else {
                value as i32
            }
        };

        if count == 0 || sides == 0 {
            return Err(DiceError::NoDice(term.to_string()));
        }
        if count > MAX_DICE || sides > MAX_SIDES {
            return Err(DiceError::OutOfRange(term.to_string()));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    fn roll<R: Rng>(&self, rng: &mut R) -> i64 {
        let total: i64 = (0..self.count)
            .map(|_| i64::from(rng.gen_range(1..=self.sides)))
            .sum();
        total + i64::from(self.modifier)
    }

    fn min(&self) -> i64 {
        i64::from(self.count) + i64::from(self.modifier)
    }

    fn max(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

/// A parsed dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dice {
    terms: Vec<DiceTerm>,
}

impl Dice {
    /// Roll every term and sum the results, saturating at the `i32` range
    pub fn roll<R: Rng>(&self, rng: &mut R) -> i32 {
        saturate(
            self.terms
                .iter()
                .fold(0i64, |sum, t| sum.saturating_add(t.roll(rng))),
        )
    }

    /// Lowest possible total
    pub fn min(&self) -> i32 {
        saturate(
            self.terms
                .iter()
                .fold(0i64, |sum, t| sum.saturating_add(t.min())),
        )
    }

    /// Highest possible total
    pub fn max(&self) -> i32 {
        saturate(
            self.terms
                .iter()
                .fold(0i64, |sum, t| sum.saturating_add(t.max())),
        )
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let terms = s
            .split_whitespace()
            .map(DiceTerm::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if terms.is_empty() {
            return Err(DiceError::Empty);
        }

        Ok(Self { terms })
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

/// A zero-argument roll giving one stat's increase at level-up
#[derive(Clone)]
pub struct StatGrowth {
    label: String,
    roll: Arc<dyn Fn() -> i32 + Send + Sync>,
}

impl StatGrowth {
    /// Wrap any roll function
    pub fn from_fn<F>(label: &str, roll: F) -> Self
    where
        F: Fn() -> i32 + Send + Sync + 'static,
    {
        Self {
            label: label.to_string(),
            roll: Arc::new(roll),
        }
    }

    /// Always grows by `amount`
    pub fn constant(amount: i32) -> Self {
        Self::from_fn(&amount.to_string(), move || amount)
    }

    /// Roll `dice` with the thread-local generator
    pub fn dice(dice: Dice) -> Self {
        let label = dice.to_string();
        Self::from_fn(&label, move || dice.roll(&mut rand::thread_rng()))
    }

    /// Quick growth: 3d2
    pub fn fast() -> Self {
        Self::preset("3d2")
    }

    /// Average growth: 1d3
    pub fn med() -> Self {
        Self::preset("1d3")
    }

    /// Slow growth: 1d2
    pub fn slow() -> Self {
        Self::preset("1d2")
    }

    fn preset(expr: &str) -> Self {
        match expr.parse::<Dice>() {
            Ok(dice) => Self::dice(dice),
            Err(err) => {
                log::error!("Bad growth preset {}: {}", expr, err);
                Self::constant(0)
            }
        }
    }

    /// Resolve a growth name (`fast`, `med`, `slow`) or a dice expression
    pub fn parse(spec: &str) -> Result<Self, DiceError> {
        match spec.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::fast()),
            "med" | "medium" => Ok(Self::med()),
            "slow" => Ok(Self::slow()),
            _ => Ok(Self::dice(spec.trim().parse()?)),
        }
    }

    /// Roll once
    pub fn roll(&self) -> i32 {
        (self.roll)()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for StatGrowth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StatGrowth").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_simple() {
        let dice: Dice = "4d50+100".parse().unwrap();
        assert_eq!(dice.min(), 104);
        assert_eq!(dice.max(), 300);
        assert_eq!(dice.to_string(), "4d50+100");
    }

    #[test]
    fn test_parse_multiple_terms_and_negative() {
        let dice: Dice = "1d6 2d4-1".parse().unwrap();
        assert_eq!(dice.min(), 1 + 2 - 1);
        assert_eq!(dice.max(), 6 + 8 - 1);
        assert_eq!(dice.to_string(), "1d6 2d4-1");
    }

    #[test]
    fn test_implicit_single_die() {
        let dice: Dice = "d20".parse().unwrap();
        assert_eq!(dice.min(), 1);
        assert_eq!(dice.max(), 20);
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!("".parse::<Dice>(), Err(DiceError::Empty));
        assert_eq!(
            "4x6".parse::<Dice>(),
            Err(DiceError::Malformed("4x6".to_string()))
        );
        assert_eq!(
            "2d6+".parse::<Dice>(),
            Err(DiceError::Malformed("2d6+".to_string()))
        );
        assert_eq!(
            "0d6".parse::<Dice>(),
            Err(DiceError::NoDice("0d6".to_string()))
        );
    }

    #[test]
    fn test_oversized_terms_rejected() {
        assert_eq!(
            "100000d100000".parse::<Dice>(),
            Err(DiceError::OutOfRange("100000d100000".to_string()))
        );
        assert_eq!(
            "1d2000000".parse::<Dice>(),
            Err(DiceError::OutOfRange("1d2000000".to_string()))
        );
        assert_eq!(
            "1d1+2147483647".parse::<Dice>(),
            Err(DiceError::OutOfRange("1d1+2147483647".to_string()))
        );
        assert_eq!(
            "1d6+-5".parse::<Dice>(),
            Err(DiceError::Malformed("1d6+-5".to_string()))
        );
    }

    #[test]
    fn test_largest_terms_saturate() {
        let term = format!("{}d{}+{}", MAX_DICE, MAX_SIDES, MAX_MODIFIER);
        let dice: Dice = [term.as_str(); 4].join(" ").parse().unwrap();
        assert_eq!(dice.max(), i32::MAX);
        assert_eq!(dice.min(), 4 * (1_000 + 1_000_000));

        let mut rng = StdRng::seed_from_u64(3);
        let roll = dice.roll(&mut rng);
        assert!(roll >= dice.min() && roll <= dice.max());

        let growth = StatGrowth::parse("1d1+1000000 1d1+1000000").unwrap();
        assert_eq!(growth.roll(), 2_000_002);
    }

    #[test]
    fn test_rolls_within_bounds() {
        let dice: Dice = "2d50+100".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let roll = dice.roll(&mut rng);
            assert!(roll >= dice.min() && roll <= dice.max());
        }
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let dice: Dice = "3d6".parse().unwrap();
        let a: Vec<i32> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| dice.roll(&mut rng)).collect()
        };
        let b: Vec<i32> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| dice.roll(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_growth_presets_in_range() {
        for _ in 0..100 {
            assert!((3..=6).contains(&StatGrowth::fast().roll()));
            assert!((1..=3).contains(&StatGrowth::med().roll()));
            assert!((1..=2).contains(&StatGrowth::slow().roll()));
        }
    }

    #[test]
    fn test_growth_parse() {
        assert_eq!(StatGrowth::parse("fast").unwrap().label(), "3d2");
        assert_eq!(StatGrowth::parse("Med").unwrap().label(), "1d3");
        assert_eq!(StatGrowth::parse("2d10").unwrap().label(), "2d10");
        assert!(StatGrowth::parse("lots").is_err());
    }

    #[test]
    fn test_constant_growth() {
        let growth = StatGrowth::constant(50);
        assert_eq!(growth.roll(), 50);
        assert_eq!(growth.label(), "50");
    }
}
