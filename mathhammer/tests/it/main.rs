use mathhammer::dice::RerollPolicy;
use mathhammer::hit::{HitProfile, HitTrigger};
use mathhammer::probability::Probability;
use mathhammer::toughness::ToughnessMap;
use mathhammer::wound::{AutoWoundPolicy, WoundProfile, WoundTrigger};

mod pipeline;
mod scenarios;

pub const EPS: f64 = 0.01;

pub fn prob(value: f64) -> Probability {
    Probability::new(value).unwrap()
}

pub fn sweep(values: [f64; 6]) -> ToughnessMap<f64> {
    ToughnessMap::from(values)
}

pub fn hit_profile(attacks: f64, required_roll: u32, reroll: RerollPolicy) -> HitProfile {
    HitProfile {
        attacks,
        required_roll,
        reroll,
        hit_modifier: 0,
        trigger: HitTrigger::default(),
    }
}

pub fn wound_profile(strength: u32, reroll: RerollPolicy) -> WoundProfile {
    WoundProfile {
        strength,
        reroll,
        wound_modifier: 0,
        auto_wound: AutoWoundPolicy::None,
        auto_wound_on: 0,
        trigger: WoundTrigger::default(),
    }
}
