use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dice::{reroll_fraction, RerollPolicy, Threshold, AUTO_SUCCESS};
use crate::error::{non_negative, CombatResult};

/// Bonus effects of hit rolls meeting the trigger threshold. A threshold of 0 disables the
/// trigger, and a payout of 0 leaves the corresponding effect inactive.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct HitTrigger {
    pub threshold: u32,
    pub bonus_attacks: f64,
    pub bonus_hits: f64,

    /// Mortal wounds inflicted per trigger, in place of the triggering hit.
    pub mortal_wounds_instead: f64,
}

/// The unvalidated inputs of the hit stage.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct HitProfile {
    pub attacks: f64,
    pub required_roll: u32,
    #[serde(default)]
    pub reroll: RerollPolicy,
    #[serde(default)]
    pub hit_modifier: i32,
    #[serde(default)]
    pub trigger: HitTrigger,
}

/// Converts a number of attacks into expected hits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitStage {
    attacks: f64,
    required_roll: Threshold,
    reroll: RerollPolicy,
    hit_modifier: i32,
    trigger_threshold: Option<Threshold>,
    bonus_attacks_on_trigger: f64,
    bonus_hits_on_trigger: f64,
    mortal_wounds_instead_on_trigger: f64,
}

impl HitStage {

    pub fn new(profile: &HitProfile) -> CombatResult<HitStage> {
        let stage = HitStage {
            attacks: non_negative("attacks", profile.attacks)?,
            required_roll: Threshold::required("required_roll", profile.required_roll)?,
            reroll: profile.reroll,
            hit_modifier: profile.hit_modifier,
            trigger_threshold: Threshold::optional(profile.trigger.threshold),
            bonus_attacks_on_trigger:
                non_negative("trigger.bonus_attacks", profile.trigger.bonus_attacks)?,
            bonus_hits_on_trigger: non_negative("trigger.bonus_hits", profile.trigger.bonus_hits)?,
            mortal_wounds_instead_on_trigger: non_negative(
                "trigger.mortal_wounds_instead",
                profile.trigger.mortal_wounds_instead,
            )?,
        };

        debug!(
            attacks = stage.attacks,
            required_roll = stage.required_roll.get(),
            reroll = %stage.reroll,
            hit_modifier = stage.hit_modifier,
            trigger_threshold = profile.trigger.threshold,
            "built hit stage"
        );

        Ok(stage)
    }

    pub fn attacks(&self) -> f64 {
        self.attacks
    }

    pub fn is_auto_success(&self) -> bool {
        self.required_roll == AUTO_SUCCESS
    }

    /// Auto-hitting attacks cannot be modified. Any other roll cannot be modified below 2.
    pub fn modified_required_roll(&self) -> Threshold {
        if self.is_auto_success() {
            return AUTO_SUCCESS;
        }

        self.required_roll.shift(self.hit_modifier).max(Threshold::TWO)
    }

    pub fn raw_hits(&self) -> f64 {
        self.modified_required_roll().chance_on_d6().expected_successes(self.attacks)
    }

    pub fn reroll_ceiling(&self) -> u32 {
        if self.is_auto_success() {
            return 0;
        }

        self.reroll.ceiling(self.required_roll, self.modified_required_roll())
    }

    pub fn reroll_hits(&self) -> f64 {
        reroll_fraction(self.reroll_ceiling()) * self.raw_hits()
    }

    pub fn total_attacks_with_rerolls(&self) -> f64 {
        self.attacks * (reroll_fraction(self.reroll_ceiling()) + 1.0)
    }

    /// `None` if the trigger is disabled.
    pub fn modified_trigger_threshold(&self) -> Option<Threshold> {
        self.trigger_threshold.map(|threshold| threshold.shift(self.hit_modifier))
    }

    /// The expected number of attack rolls, including rerolls, that meet the trigger threshold.
    pub fn total_triggers(&self) -> f64 {
        match self.modified_trigger_threshold() {
            Some(threshold) =>
                threshold.chance_on_d6().expected_successes(self.total_attacks_with_rerolls()),
            None => 0.0,
        }
    }

    pub fn bonus_hits(&self) -> f64 {
        self.bonus_hits_on_trigger * self.total_triggers()
    }

    /// The hits scored by the extra attacks granted on trigger. The extra attacks are resolved
    /// once with the same profile, but cannot grant further attacks or mortal wounds.
    pub fn bonus_attack_hits(&self) -> f64 {
        if self.bonus_attacks_on_trigger == 0.0 {
            return 0.0;
        }

        let follow_up = self.follow_up(self.bonus_attacks_on_trigger * self.total_triggers());

        trace!(attacks = follow_up.attacks, "resolving bonus attacks");

        follow_up.hits_before_conversion_and_bonus_attacks()
    }

    fn follow_up(&self, attacks: f64) -> HitStage {
        HitStage {
            attacks,
            bonus_attacks_on_trigger: 0.0,
            mortal_wounds_instead_on_trigger: 0.0,
            ..*self
        }
    }

    fn hits_before_conversion_and_bonus_attacks(&self) -> f64 {
        self.raw_hits() + self.reroll_hits() + self.bonus_hits()
    }

    /// The triggers whose hits are converted into mortal wounds.
    pub fn mortal_wound_trigger_count(&self) -> f64 {
        if self.mortal_wounds_instead_on_trigger == 0.0 {
            0.0
        }
        else {
            self.total_triggers()
        }
    }

    pub fn total_mortal_wounds(&self) -> f64 {
        self.mortal_wounds_instead_on_trigger * self.mortal_wound_trigger_count()
    }

    pub fn total_hits(&self) -> f64 {
        let hits = self.hits_before_conversion_and_bonus_attacks()
            + self.bonus_attack_hits()
            - self.mortal_wound_trigger_count();

        hits.max(0.0)
    }
}
