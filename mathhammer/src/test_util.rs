use crate::probability::Probability;
use crate::toughness::ToughnessMap;

use kernal::abs_diff::AbsDiff;

impl AbsDiff for Probability {
    type ReturnType = f64;

    fn abs_diff(&self, other: &Probability) -> f64 {
        self.as_f64().abs_diff(&other.as_f64())
    }
}

impl AbsDiff for ToughnessMap<f64> {
    type ReturnType = f64;

    fn abs_diff(&self, other: &ToughnessMap<f64>) -> f64 {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.abs_diff(b))
            .fold(0.0, f64::max)
    }
}

impl AbsDiff for ToughnessMap<Probability> {
    type ReturnType = f64;

    fn abs_diff(&self, other: &ToughnessMap<Probability>) -> f64 {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.abs_diff(b))
            .fold(0.0, f64::max)
    }
}
