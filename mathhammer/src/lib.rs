pub mod damage;
pub mod dice;
pub mod error;
pub mod hit;
pub mod probability;
pub mod scenario;
pub mod toughness;
pub mod wound;

#[cfg(feature = "test-util")]
pub mod test_util;

pub use dice::{AUTO_SUCCESS, RerollPolicy};
pub use error::{CombatError, CombatResult};
pub use toughness::TOUGHNESS_SWEEP;
pub use wound::AutoWoundPolicy;
