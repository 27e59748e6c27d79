use std::fs;

use kernal::prelude::*;
use mathhammer::CombatError;
use mathhammer::scenario::ScenarioSet;

use crate::*;

const ARMORY: &str = r#"
    [[scenario]]
    name = "rifle"

    [scenario.hit]
    attacks = 6
    required_roll = 3

    [scenario.wound]
    strength = 4

    [scenario.wound.trigger]
    threshold = 6
    extra_mortal_wounds = 1

    [scenario.damage]
    damage_per_wound = 1
    defender_save = 3

    [[scenario]]
    name = "rifle with rerolls"

    [scenario.hit]
    attacks = 6
    required_roll = 3
    reroll = "ONES"

    [scenario.wound]
    strength = 4

    [scenario.damage]
    damage_per_wound = 1
    defender_save = 3

    [[scenario]]
    name = "cannon"

    [scenario.hit]
    attacks = 6
    required_roll = 7
    hit_modifier = 1

    [scenario.wound]
    strength = 4

    [scenario.damage]
    damage_per_wound = 1
    defender_save = 7
"#;

#[test]
fn evaluate_all_preserves_scenario_order() {
    let reports = ScenarioSet::from_toml_str(ARMORY).unwrap().evaluate_all().unwrap();
    let names = reports.iter().map(|report| report.name.as_str()).collect::<Vec<_>>();

    assert_that!(names)
        .contains_exactly_in_given_order(["rifle", "rifle with rerolls", "cannon"]);
    assert_that!(reports[0].total_damage)
        .is_close_to(sweep([1.55, 1.33, 1.11, 1.11, 1.11, 0.89]), EPS);
    assert_that!(reports[1].total_damage)
        .is_close_to(sweep([1.04, 0.78, 0.52, 0.52, 0.52, 0.26]), EPS);
    assert_that!(reports[2].total_damage)
        .is_close_to(sweep([0.66, 0.5, 0.33, 0.33, 0.33, 0.17]), EPS);
}

#[test]
fn evaluate_all_fails_on_invalid_scenario() {
    let armory = ARMORY.replace("defender_save = 7", "defender_save = 0");
    let result = ScenarioSet::from_toml_str(&armory).unwrap().evaluate_all();

    assert_that!(matches!(
        result,
        Err(CombatError::InvalidProfile { field: "defender_save", .. })
    )).is_true();
}

#[test]
fn unknown_auto_wound_policy_is_reported() {
    let armory = ARMORY.replace("strength = 4", "strength = 4\nauto_wound = \"SOMETIMES\"");
    let result = ScenarioSet::from_toml_str(&armory);

    match result {
        Err(CombatError::Config(message)) => {
            assert_that!(message.contains("unknown auto-wound policy: SOMETIMES")).is_true();
        },
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn load_reads_document_from_file() {
    let path = std::env::temp_dir()
        .join(format!("mathhammer-armory-{}.toml", std::process::id()));
    fs::write(&path, ARMORY).unwrap();

    let set = ScenarioSet::load(&path);
    fs::remove_file(&path).unwrap();

    assert_that!(set.unwrap().scenarios.len()).is_equal_to(3);
}

#[test]
fn load_of_missing_file_is_config_error() {
    let path = std::env::temp_dir().join("mathhammer-does-not-exist.toml");

    assert_that!(matches!(ScenarioSet::load(&path), Err(CombatError::Config(_)))).is_true();
}
