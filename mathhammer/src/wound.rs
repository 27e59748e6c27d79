use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{reroll_fraction, RerollPolicy, Threshold};
use crate::error::{non_negative, CombatError, CombatResult, PolicyKind};
use crate::probability::Probability;
use crate::toughness::{Toughness, ToughnessMap};

/// The required wound roll for the given strength against the given toughness.
pub fn required_roll_for(strength: u32, toughness: u32) -> Threshold {
    let (strength, toughness) = (strength as u64, toughness as u64);

    if strength >= 2 * toughness {
        Threshold::TWO
    }
    else if strength > toughness {
        Threshold::THREE
    }
    else if strength == toughness {
        Threshold::FOUR
    }
    else if 2 * strength > toughness {
        Threshold::FIVE
    }
    else {
        Threshold::SIX
    }
}

/// Conditions under which a fixed roll wounds regardless of strength and toughness.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum AutoWoundPolicy {
    #[default]
    None,
    Always,
    ToughnessExceedsStrength,
}

impl AutoWoundPolicy {
    pub const ALL_OPTIONS: [AutoWoundPolicy; 3] = [
        AutoWoundPolicy::None,
        AutoWoundPolicy::Always,
        AutoWoundPolicy::ToughnessExceedsStrength,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AutoWoundPolicy::None => "NONE",
            AutoWoundPolicy::Always => "ALWAYS",
            AutoWoundPolicy::ToughnessExceedsStrength => "TOUGHNESS_EXCEEDS_STRENGTH",
        }
    }
}

impl Display for AutoWoundPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AutoWoundPolicy {
    type Err = CombatError;

    fn from_str(name: &str) -> CombatResult<AutoWoundPolicy> {
        AutoWoundPolicy::ALL_OPTIONS
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| CombatError::UnknownPolicy {
                kind: PolicyKind::AutoWound,
                value: name.to_owned(),
            })
    }
}

impl TryFrom<String> for AutoWoundPolicy {
    type Error = CombatError;

    fn try_from(name: String) -> CombatResult<AutoWoundPolicy> {
        name.parse()
    }
}

impl From<AutoWoundPolicy> for String {
    fn from(policy: AutoWoundPolicy) -> String {
        policy.name().to_owned()
    }
}

/// Bonus effects of wound rolls meeting the trigger threshold. A threshold of 0 disables the
/// trigger.
///
/// If an armor penetration shift or an alternate damage value is configured (non-zero), wounds
/// caused by triggering rolls become "special" wounds, which are saved against with the shifted
/// armor penetration and deal the alternate damage.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct WoundTrigger {
    pub threshold: u32,
    pub extra_mortal_wounds: f64,
    pub armor_penetration: i32,
    pub alternate_damage: f64,
}

/// The unvalidated inputs of the wound stage, apart from the hits, which are supplied by the hit
/// stage.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct WoundProfile {
    pub strength: u32,
    #[serde(default)]
    pub reroll: RerollPolicy,
    #[serde(default)]
    pub wound_modifier: i32,
    #[serde(default)]
    pub auto_wound: AutoWoundPolicy,

    /// The roll that wounds whenever the auto-wound policy applies. Ignored for
    /// [AutoWoundPolicy::None].
    #[serde(default)]
    pub auto_wound_on: u32,
    #[serde(default)]
    pub trigger: WoundTrigger,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AutoWound {
    Never,
    Always(Threshold),
    ToughnessExceedsStrength(Threshold),
}

/// Converts expected hits into expected wounds against every toughness of the sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WoundStage {
    hits: f64,
    strength: u32,
    reroll: RerollPolicy,
    wound_modifier: i32,
    auto_wound: AutoWound,
    trigger_threshold: Option<Threshold>,
    extra_mortal_wounds_on_trigger: f64,
    armor_penetration_on_trigger: i32,
    alternate_damage_on_trigger: f64,
}

impl WoundStage {

    pub fn new(hits: f64, profile: &WoundProfile) -> CombatResult<WoundStage> {
        if profile.strength == 0 {
            return Err(CombatError::invalid_profile("strength", "strength must be at least 1"));
        }

        let auto_wound = match profile.auto_wound {
            AutoWoundPolicy::None => AutoWound::Never,
            AutoWoundPolicy::Always =>
                AutoWound::Always(Threshold::required("auto_wound_on", profile.auto_wound_on)?),
            AutoWoundPolicy::ToughnessExceedsStrength => AutoWound::ToughnessExceedsStrength(
                Threshold::required("auto_wound_on", profile.auto_wound_on)?,
            ),
        };

        let stage = WoundStage {
            hits: non_negative("hits", hits)?,
            strength: profile.strength,
            reroll: profile.reroll,
            wound_modifier: profile.wound_modifier,
            auto_wound,
            trigger_threshold: Threshold::optional(profile.trigger.threshold),
            extra_mortal_wounds_on_trigger: non_negative(
                "trigger.extra_mortal_wounds",
                profile.trigger.extra_mortal_wounds,
            )?,
            armor_penetration_on_trigger: profile.trigger.armor_penetration,
            alternate_damage_on_trigger:
                non_negative("trigger.alternate_damage", profile.trigger.alternate_damage)?,
        };

        debug!(
            hits = stage.hits,
            strength = stage.strength,
            reroll = %stage.reroll,
            wound_modifier = stage.wound_modifier,
            auto_wound = %profile.auto_wound,
            trigger_threshold = profile.trigger.threshold,
            "built wound stage"
        );

        Ok(stage)
    }

    pub fn hits(&self) -> f64 {
        self.hits
    }

    pub fn armor_penetration_on_trigger(&self) -> i32 {
        self.armor_penetration_on_trigger
    }

    pub fn alternate_damage_on_trigger(&self) -> f64 {
        self.alternate_damage_on_trigger
    }

    fn auto_wound_roll(&self, toughness: Toughness) -> Option<Threshold> {
        match self.auto_wound {
            AutoWound::Never => None,
            AutoWound::Always(roll) => Some(roll),
            AutoWound::ToughnessExceedsStrength(roll) =>
                (toughness.as_u8() as u32 > self.strength).then_some(roll),
        }
    }

    fn natural_roll(&self, toughness: Toughness) -> Threshold {
        required_roll_for(self.strength, toughness.as_u8() as u32)
    }

    pub fn unmodified_thresholds(&self) -> ToughnessMap<Threshold> {
        ToughnessMap::from_fn(|toughness| {
            self.auto_wound_roll(toughness)
                .unwrap_or_else(|| self.natural_roll(toughness))
        })
    }

    /// Ordinary wound rolls cannot be modified below 2. Auto-wound rolls are never modified.
    pub fn modified_thresholds(&self) -> ToughnessMap<Threshold> {
        ToughnessMap::from_fn(|toughness| {
            self.auto_wound_roll(toughness).unwrap_or_else(|| {
                self.natural_roll(toughness).shift(self.wound_modifier).max(Threshold::TWO)
            })
        })
    }

    pub fn wound_chances(&self) -> ToughnessMap<Probability> {
        self.modified_thresholds().map(|threshold| threshold.chance_on_d6())
    }

    pub fn raw_wounds(&self) -> ToughnessMap<f64> {
        self.wound_chances().map(|chance| chance.expected_successes(self.hits))
    }

    pub fn reroll_ceilings(&self) -> ToughnessMap<u32> {
        self.unmodified_thresholds()
            .zip_with(&self.modified_thresholds(), |&natural, &modified| {
                self.reroll.ceiling(natural, modified)
            })
    }

    pub fn reroll_wounds(&self) -> ToughnessMap<f64> {
        self.reroll_ceilings()
            .zip_with(&self.raw_wounds(), |&ceiling, &raw| reroll_fraction(ceiling) * raw)
    }

    pub fn total_wound_rolls(&self) -> ToughnessMap<f64> {
        self.reroll_ceilings().map(|&ceiling| self.hits * (reroll_fraction(ceiling) + 1.0))
    }

    /// `None` if the trigger is disabled. The same threshold applies to every toughness.
    pub fn modified_trigger_threshold(&self) -> Option<Threshold> {
        self.trigger_threshold.map(|threshold| threshold.shift(self.wound_modifier))
    }

    pub fn total_triggers(&self) -> ToughnessMap<f64> {
        match self.modified_trigger_threshold() {
            Some(threshold) => {
                let chance = threshold.chance_on_d6();

                self.total_wound_rolls().map(|&rolls| chance.expected_successes(rolls))
            },
            None => ToughnessMap::default(),
        }
    }

    pub fn total_mortal_wounds(&self) -> ToughnessMap<f64> {
        self.total_triggers().map(|&triggers| self.extra_mortal_wounds_on_trigger * triggers)
    }

    fn has_special_wounds(&self) -> bool {
        self.armor_penetration_on_trigger != 0 || self.alternate_damage_on_trigger != 0.0
    }

    /// Successful wounds diverted into the special bucket. If triggering rolls are a subset of
    /// wounding rolls, only the triggers are special. Otherwise every successful wound is.
    pub fn total_special_wounds(&self) -> ToughnessMap<f64> {
        let trigger_threshold = match self.modified_trigger_threshold() {
            Some(threshold) if self.has_special_wounds() => threshold,
            _ => return ToughnessMap::default(),
        };

        let modified_thresholds = self.modified_thresholds();
        let triggers = self.total_triggers();
        let wounds = self.total_wounds();

        ToughnessMap::from_fn(|toughness| {
            if trigger_threshold >= modified_thresholds[toughness] {
                triggers[toughness]
            }
            else {
                wounds[toughness]
            }
        })
    }

    /// All successful wounds, ordinary and special.
    pub fn total_wounds(&self) -> ToughnessMap<f64> {
        self.raw_wounds().zip_with(&self.reroll_wounds(), |raw, reroll| raw + reroll)
    }

    pub fn total_ordinary_wounds(&self) -> ToughnessMap<f64> {
        self.total_wounds()
            .zip_with(&self.total_special_wounds(), |wounds, special| wounds - special)
    }
}
