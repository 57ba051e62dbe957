//! Report scores attached to each saved reading.
//!
//! None of these look at the computed facts: BaZi and name scores are uniform
//! draws, and the daily score is the truncated mean of its random sub-scores.

use crate::fortune::narrative::DailyScores;
use crate::fortune::random::RandomSource;

pub const BAZI_SCORE_RANGE: (u32, u32) = (65, 85);
pub const NAME_SCORE_RANGE: (u32, u32) = (60, 90);

pub fn bazi_score(rng: &dyn RandomSource) -> u32 {
    rng.between(BAZI_SCORE_RANGE.0, BAZI_SCORE_RANGE.1)
}

pub fn name_score(rng: &dyn RandomSource) -> u32 {
    rng.between(NAME_SCORE_RANGE.0, NAME_SCORE_RANGE.1)
}

/// Integer mean of the four daily sub-scores, truncated.
pub fn daily_score(scores: &DailyScores) -> u32 {
    (scores.love + scores.career + scores.wealth + scores.health) / 4
}
