//! Mastery update rule
//!
//! A skill's mastery starts at 0.3 for a user with no record, moves up by
//! 0.1 on a correct answer and down by 0.05 on an incorrect one, and is
//! clamped to [0.0, 1.0]. Values are kept at three decimals so repeated
//! steps do not accumulate floating point drift.

/// Mastery assigned before the first attempt is applied
pub const DEFAULT_MASTERY: f64 = 0.3;
/// Step applied for a correct response
pub const CORRECT_DELTA: f64 = 0.1;
/// Step applied for an incorrect response
pub const INCORRECT_DELTA: f64 = -0.05;

const MIN_MASTERY: f64 = 0.0;
const MAX_MASTERY: f64 = 1.0;

/// Mastery value and attempt count for one (user, skill) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasteryState {
    pub mastery: f64,
    pub attempts: i64,
}

impl MasteryState {
    /// State of a pair that has never been attempted
    pub fn initial() -> Self {
        Self {
            mastery: DEFAULT_MASTERY,
            attempts: 0,
        }
    }
}

/// Apply one graded attempt to the previous state
pub fn update(previous: Option<MasteryState>, correct: bool) -> MasteryState {
    let prev = previous.unwrap_or_else(MasteryState::initial);
    let delta = if correct { CORRECT_DELTA } else { INCORRECT_DELTA };
    let mastery = round3((prev.mastery + delta).clamp(MIN_MASTERY, MAX_MASTERY));

    MasteryState {
        mastery,
        attempts: prev.attempts + 1,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
