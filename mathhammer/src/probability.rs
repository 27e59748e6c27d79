#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    pub const ZERO: Probability = Probability(0.0);

    pub const fn new(prob: f64) -> Option<Probability> {
        if prob.is_nan() || prob > 1.0 || prob < 0.0 {
            return None;
        }

        Some(Probability(prob))
    }

    /// The probability of hitting one of `favorable` outcomes out of `total` equally likely ones.
    /// An empty outcome space never produces anything, so a `total` of zero yields
    /// [Probability::ZERO].
    pub fn from_ratio(favorable: u32, total: u32) -> Probability {
        if total == 0 {
            return Probability::ZERO;
        }

        Probability(favorable.min(total) as f64 / total as f64)
    }

    /// The probability of the event not happening.
    pub fn complement(self) -> Probability {
        Probability(1.0 - self.0)
    }

    /// The expected number of successes when the event is tried `trials` times. Fractional trial
    /// counts are allowed, since they are themselves expectations of an earlier stage.
    pub fn expected_successes(self, trials: f64) -> f64 {
        trials * self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}
