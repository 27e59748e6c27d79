use kernal::prelude::*;
use mathhammer::damage::{DamageProfile, DamageStage};
use mathhammer::dice::RerollPolicy;
use mathhammer::hit::{HitProfile, HitStage, HitTrigger};
use mathhammer::toughness::{Toughness, ToughnessMap};
use mathhammer::wound::{WoundProfile, WoundStage, WoundTrigger};
use mathhammer::{AUTO_SUCCESS, TOUGHNESS_SWEEP};
use rstest::rstest;

use crate::*;

#[test]
fn exported_constants_describe_the_sweep_and_auto_success() {
    let sweep = TOUGHNESS_SWEEP.map(Toughness::as_u8);

    assert_that!(sweep).is_equal_to([3, 4, 5, 6, 7, 8]);
    assert_that!(AUTO_SUCCESS.get()).is_equal_to(1);
}

#[rstest]
#[case::no_rerolls(RerollPolicy::None, 3.0)]
#[case::reroll_ones(RerollPolicy::Ones, 3.5)]
fn hitting_on_four_plus(#[case] reroll: RerollPolicy, #[case] expected: f64) {
    let hit = HitStage::new(&hit_profile(6.0, 4, reroll)).unwrap();

    assert_that!(hit.total_hits()).is_close_to(expected, EPS);
}

#[test]
fn hit_stage_feeds_wound_chances_and_raw_wounds() {
    let hit = HitStage::new(&hit_profile(6.0, 1, RerollPolicy::None)).unwrap();
    let wound = WoundStage::new(hit.total_hits(), &WoundProfile {
        wound_modifier: -1,
        ..wound_profile(4, RerollPolicy::None)
    }).unwrap();

    let expected_chances = ToughnessMap::from([3.0, 2.0, 1.0, 1.0, 1.0, 0.0])
        .map(|&favorable| prob(favorable / 6.0));

    assert_that!(wound.wound_chances()).is_close_to(expected_chances, EPS);
    assert_that!(wound.raw_wounds()).is_close_to(sweep([3.0, 2.0, 1.0, 1.0, 1.0, 0.0]), EPS);
}

#[test]
fn full_pipeline_with_every_trigger() {
    let hit = HitStage::new(&HitProfile {
        hit_modifier: 1,
        trigger: HitTrigger {
            threshold: 6,
            bonus_attacks: 1.0,
            bonus_hits: 1.0,
            mortal_wounds_instead: 0.0,
        },
        ..hit_profile(10.0, 3, RerollPolicy::Ones)
    }).unwrap();
    let wound = WoundStage::new(hit.total_hits(), &WoundProfile {
        trigger: WoundTrigger {
            threshold: 6,
            extra_mortal_wounds: 1.0,
            armor_penetration: -3,
            alternate_damage: 2.0,
        },
        ..wound_profile(5, RerollPolicy::All)
    }).unwrap();
    let damage = DamageStage::new(&hit, &wound, &DamageProfile {
        damage_per_wound: 1.0,
        defender_save: 3,
        base_armor_penetration: -1,
    }).unwrap();

    let ordinary = wound.total_ordinary_wounds();
    let special = wound.total_special_wounds();
    let total_damage = damage.total_damage();

    for toughness in TOUGHNESS_SWEEP {
        let expected = damage.unsaved_ordinary_wounds()[toughness]
            + 2.0 * damage.unsaved_special_wounds()[toughness]
            + damage.mortal_wounds()[toughness];

        assert_that!(ordinary[toughness] + special[toughness])
            .is_close_to(wound.total_wounds()[toughness], EPS);
        assert_that!(ordinary[toughness]).is_greater_than_or_equal_to(-EPS);
        assert_that!(total_damage[toughness]).is_close_to(expected, EPS);
    }
}

#[test]
fn outputs_stay_finite_and_non_negative_across_profiles() {
    let policies = RerollPolicy::ALL_OPTIONS;

    for required_roll in 1..=7 {
        for hit_modifier in [-3, 0, 2] {
            for reroll in policies {
                let hit = HitStage::new(&HitProfile {
                    hit_modifier,
                    trigger: HitTrigger {
                        threshold: 5,
                        bonus_attacks: 2.0,
                        bonus_hits: 1.0,
                        mortal_wounds_instead: 1.0,
                    },
                    ..hit_profile(8.0, required_roll, reroll)
                }).unwrap();

                for strength in 1..=10 {
                    let wound = WoundStage::new(hit.total_hits(), &WoundProfile {
                        wound_modifier: hit_modifier,
                        trigger: WoundTrigger {
                            threshold: 5,
                            extra_mortal_wounds: 1.0,
                            armor_penetration: -1,
                            alternate_damage: 0.0,
                        },
                        ..wound_profile(strength, reroll)
                    }).unwrap();
                    let damage = DamageStage::new(&hit, &wound, &DamageProfile {
                        damage_per_wound: 2.0,
                        defender_save: 4,
                        base_armor_penetration: 0,
                    }).unwrap();

                    let total_damage = damage.total_damage();

                    assert_that!(hit.total_hits().is_finite()).is_true();
                    assert_that!(total_damage.iter().all(|damage| damage.is_finite())).is_true();
                    assert_that!(total_damage.iter().all(|&damage| damage >= -EPS)).is_true();
                }
            }
        }
    }
}
