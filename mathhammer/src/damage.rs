use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::Threshold;
use crate::error::{non_negative, CombatResult};
use crate::hit::HitStage;
use crate::probability::Probability;
use crate::toughness::ToughnessMap;
use crate::wound::WoundStage;

/// The unvalidated inputs of the damage stage.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct DamageProfile {
    pub damage_per_wound: f64,
    pub defender_save: u32,

    /// Usually zero or negative, in which case it raises the save roll of the defender.
    #[serde(default)]
    pub base_armor_penetration: i32,
}

/// Combines the outputs of a hit and a wound stage into expected damage against every
/// toughness of the sweep.
#[derive(Clone, Copy, Debug)]
pub struct DamageStage<'a> {
    hit: &'a HitStage,
    wound: &'a WoundStage,
    damage_per_wound: f64,
    defender_save: Threshold,
    base_armor_penetration: i32,
}

fn failed_save_chance(save: Threshold, armor_penetration: i32) -> Probability {
    save.shift(armor_penetration).chance_on_d6().complement()
}

impl<'a> DamageStage<'a> {

    pub fn new(
        hit: &'a HitStage,
        wound: &'a WoundStage,
        profile: &DamageProfile,
    ) -> CombatResult<DamageStage<'a>> {
        let stage = DamageStage {
            hit,
            wound,
            damage_per_wound: non_negative("damage_per_wound", profile.damage_per_wound)?,
            defender_save: Threshold::required("defender_save", profile.defender_save)?,
            base_armor_penetration: profile.base_armor_penetration,
        };

        debug!(
            damage_per_wound = stage.damage_per_wound,
            defender_save = stage.defender_save.get(),
            base_armor_penetration = stage.base_armor_penetration,
            "built damage stage"
        );

        Ok(stage)
    }

    /// Mortal wounds from both stages. They are never saved.
    pub fn mortal_wounds(&self) -> ToughnessMap<f64> {
        let hit_mortal_wounds = self.hit.total_mortal_wounds();

        self.wound.total_mortal_wounds().map(|&wound_mortal_wounds| {
            wound_mortal_wounds + hit_mortal_wounds
        })
    }

    pub fn unsaved_ordinary_wounds(&self) -> ToughnessMap<f64> {
        let chance = failed_save_chance(self.defender_save, self.base_armor_penetration);

        self.wound.total_ordinary_wounds().map(|&wounds| chance.expected_successes(wounds))
    }

    /// Special wounds are saved against with the armor penetration of the wound trigger instead
    /// of the base armor penetration.
    pub fn unsaved_special_wounds(&self) -> ToughnessMap<f64> {
        let chance =
            failed_save_chance(self.defender_save, self.wound.armor_penetration_on_trigger());

        self.wound.total_special_wounds().map(|&wounds| chance.expected_successes(wounds))
    }

    /// Special wounds deal the alternate damage of the wound trigger, ordinary wounds the damage
    /// per wound.
    pub fn total_damage(&self) -> ToughnessMap<f64> {
        let alternate_damage = self.wound.alternate_damage_on_trigger();
        let mortal_wounds = self.mortal_wounds();
        let unsaved_special_wounds = self.unsaved_special_wounds();

        self.unsaved_ordinary_wounds().zip_with(&unsaved_special_wounds, |ordinary, special| {
            ordinary * self.damage_per_wound + special * alternate_damage
        })
        .zip_with(&mortal_wounds, |damage, mortal| damage + mortal)
    }
}
