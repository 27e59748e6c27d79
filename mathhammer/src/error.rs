use thiserror::Error;

/// The enumerated policy families whose names can be parsed from text.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolicyKind {
    Reroll,
    AutoWound,
}

impl PolicyKind {
    fn name(self) -> &'static str {
        match self {
            PolicyKind::Reroll => "reroll policy",
            PolicyKind::AutoWound => "auto-wound policy",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CombatError {
    #[error("minimum roll must be at least 1, got {min_roll}")]
    InvalidArgument { min_roll: i64 },

    #[error("unknown {kind_name}: {value}", kind_name = .kind.name())]
    UnknownPolicy { kind: PolicyKind, value: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidProfile { field: &'static str, reason: String },

    #[error("could not read configuration: {0}")]
    Config(String),
}

impl CombatError {
    pub(crate) fn invalid_profile(field: &'static str, reason: impl Into<String>) -> CombatError {
        CombatError::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }
}

pub type CombatResult<T> = Result<T, CombatError>;

/// Checks that a count-like input is a finite, non-negative number.
pub(crate) fn non_negative(field: &'static str, value: f64) -> CombatResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    }
    else {
        Err(CombatError::invalid_profile(
            field,
            format!("expected a non-negative number, got {value}"),
        ))
    }
}
