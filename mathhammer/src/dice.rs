use std::fmt::{self, Display, Formatter};
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CombatError, CombatResult, PolicyKind};
use crate::probability::Probability;

pub const D6_SIDES: u32 = 6;

/// The lowest face value a die must show for a roll to count, e.g. `3` for a roll of "3+".
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Threshold(NonZeroU32);

/// A required hit roll of 1 means the attack always hits and cannot be modified.
pub const AUTO_SUCCESS: Threshold = Threshold::MIN;

impl Threshold {

    pub const MIN: Threshold = Threshold(NonZeroU32::MIN);
    pub const TWO: Threshold = Threshold(NonZeroU32::new(2).unwrap());
    pub const THREE: Threshold = Threshold(NonZeroU32::new(3).unwrap());
    pub const FOUR: Threshold = Threshold(NonZeroU32::new(4).unwrap());
    pub const FIVE: Threshold = Threshold(NonZeroU32::new(5).unwrap());
    pub const SIX: Threshold = Threshold(NonZeroU32::new(6).unwrap());

    pub fn new(value: u32) -> Option<Threshold> {
        NonZeroU32::new(value).map(Threshold)
    }

    /// Interprets a configured value of 0 as "not configured".
    pub fn optional(value: u32) -> Option<Threshold> {
        Threshold::new(value)
    }

    /// Validates a configured threshold which must be present.
    pub(crate) fn required(field: &'static str, value: u32) -> CombatResult<Threshold> {
        Threshold::new(value).ok_or_else(|| {
            CombatError::invalid_profile(field, "a required roll must be at least 1")
        })
    }

    /// Applies a modifier to the required roll. Positive modifiers make the roll easier. The result
    /// is never below 1, but may exceed the number of sides of any die.
    pub fn shift(self, modifier: i32) -> Threshold {
        let shifted = (self.get() as i64 - modifier as i64).max(1);
        let shifted = u32::try_from(shifted).unwrap_or(u32::MAX);

        Threshold(NonZeroU32::MIN.saturating_add(shifted - 1))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn chance_on(self, sides: u32) -> Probability {
        Probability::from_ratio(sides.saturating_sub(self.get() - 1), sides)
    }

    pub fn chance_on_d6(self) -> Probability {
        self.chance_on(D6_SIDES)
    }
}

/// The probability of rolling `min_roll` or higher on a die with `sides` faces.
pub fn chance_at_least(sides: u32, min_roll: i64) -> CombatResult<Probability> {
    if min_roll <= 0 {
        return Err(CombatError::InvalidArgument { min_roll });
    }

    let min_roll = u32::try_from(min_roll).unwrap_or(u32::MAX);

    Ok(Threshold(NonZeroU32::MIN.saturating_add(min_roll - 1)).chance_on(sides))
}

pub fn chance_at_least_d6(min_roll: i64) -> CombatResult<Probability> {
    chance_at_least(D6_SIDES, min_roll)
}

/// Lowers the required roll by `modifier`, but never below 1. A negative modifier raises it
/// without bound.
pub fn shift_threshold(original: i64, modifier: i64) -> i64 {
    (original - modifier).max(1)
}

/// Which dice of a roll may be rolled a second time.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum RerollPolicy {
    #[default]
    None,
    Ones,
    All,
}

impl RerollPolicy {
    pub const ALL_OPTIONS: [RerollPolicy; 3] =
        [RerollPolicy::None, RerollPolicy::Ones, RerollPolicy::All];

    /// The highest face value (inclusive) that is rerolled. Rerolling failures only covers faces
    /// below both the natural and the modified threshold, so that no face counts as a success on
    /// the first roll and is rerolled as well.
    pub fn ceiling(self, natural: Threshold, modified: Threshold) -> u32 {
        match self {
            RerollPolicy::None => 0,
            RerollPolicy::Ones => 1,
            RerollPolicy::All => natural.min(modified).get() - 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RerollPolicy::None => "NONE",
            RerollPolicy::Ones => "ONES",
            RerollPolicy::All => "ALL",
        }
    }
}

/// The share of dice rolled a second time when every face up to `ceiling` is rerolled.
pub fn reroll_fraction(ceiling: u32) -> f64 {
    ceiling as f64 / D6_SIDES as f64
}

impl Display for RerollPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RerollPolicy {
    type Err = CombatError;

    fn from_str(name: &str) -> CombatResult<RerollPolicy> {
        RerollPolicy::ALL_OPTIONS
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| CombatError::UnknownPolicy {
                kind: PolicyKind::Reroll,
                value: name.to_owned(),
            })
    }
}

impl TryFrom<String> for RerollPolicy {
    type Error = CombatError;

    fn try_from(name: String) -> CombatResult<RerollPolicy> {
        name.parse()
    }
}

impl From<RerollPolicy> for String {
    fn from(policy: RerollPolicy) -> String {
        policy.name().to_owned()
    }
}
