//! Scoring strategies: raw attempt/correctness counts to a 0–10 score.
//!
//! Every strategy clamps to [0, 10] and rounds to exactly one decimal.
//! The constants are the ones the original games shipped with; keep them
//! as-is so newly computed scores stay comparable to stored ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Accumulated attempt/correctness data for one playthrough.
///
/// Owned and mutated by the session engine while playing; frozen once the
/// session finishes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Total answer submissions across the whole session.
    pub moves: u32,
    /// Number of rounds in the game.
    pub total_rounds: u32,
    /// Rounds resolved as correct.
    pub solved_rounds: u32,
    /// Per-round tallies, indexed by play order.
    pub rounds: Vec<RoundTally>,
    /// Per-level correct/attempt tallies (level-weighted games).
    pub levels: BTreeMap<u32, LevelTally>,
}

/// Attempts and outcome for a single round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundTally {
    pub attempts: u32,
    pub solved: bool,
    pub level: u32,
}

/// Correct/attempt counts for one difficulty level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LevelTally {
    pub correct: u32,
    pub attempts: u32,
}

impl ScoreState {
    /// Record one attempt against a round at the given level.
    pub fn record_attempt(&mut self, round_index: usize, level: u32, correct: bool) {
        self.moves += 1;
        if self.rounds.len() <= round_index {
            self.rounds.resize_with(round_index + 1, RoundTally::default);
        }
        let tally = &mut self.rounds[round_index];
        tally.attempts += 1;
        tally.level = level;
        if correct {
            tally.solved = true;
            self.solved_rounds += 1;
        }
        let level_tally = self.levels.entry(level).or_default();
        level_tally.attempts += 1;
        if correct {
            level_tally.correct += 1;
        }
    }
}

/// The formula variant used to convert a [`ScoreState`] into a 0–10 score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum ScoringStrategy {
    /// Start at 10, deduct a fixed penalty per move beyond a free threshold.
    LinearDeduction {
        #[serde(default = "default_free_moves")]
        free_moves: u32,
        #[serde(default = "default_penalty_per_move")]
        penalty_per_move: f64,
    },
    /// Average per-level accuracy weighted by level difficulty
    /// (weight = level + 0.1).
    LevelWeighted,
    /// Completion percentage minus penalties for extra attempts and
    /// unsolved rounds.
    CompletionPercentage {
        #[serde(default = "default_extra_attempt_penalty")]
        extra_attempt_penalty: f64,
        #[serde(default = "default_max_extra_penalty")]
        max_extra_penalty: f64,
        #[serde(default = "default_unsolved_penalty")]
        unsolved_penalty: f64,
    },
}

fn default_free_moves() -> u32 {
    8
}
fn default_penalty_per_move() -> f64 {
    0.1
}
fn default_extra_attempt_penalty() -> f64 {
    0.25
}
fn default_max_extra_penalty() -> f64 {
    4.0
}
fn default_unsolved_penalty() -> f64 {
    0.5
}

impl ScoringStrategy {
    /// The memory-game formula with its original constants.
    pub fn linear_deduction() -> Self {
        ScoringStrategy::LinearDeduction {
            free_moves: default_free_moves(),
            penalty_per_move: default_penalty_per_move(),
        }
    }

    /// The completion formula with its original constants (4-point cap on
    /// the extra-attempt penalty).
    pub fn completion_percentage() -> Self {
        ScoringStrategy::CompletionPercentage {
            extra_attempt_penalty: default_extra_attempt_penalty(),
            max_extra_penalty: default_max_extra_penalty(),
            unsolved_penalty: default_unsolved_penalty(),
        }
    }

    /// Compute the final score for a finished playthrough.
    pub fn compute(&self, state: &ScoreState) -> f64 {
        let raw = match *self {
            ScoringStrategy::LinearDeduction {
                free_moves,
                penalty_per_move,
            } => {
                let over = state.moves.saturating_sub(free_moves);
                10.0 - over as f64 * penalty_per_move
            }
            ScoringStrategy::LevelWeighted => {
                let mut weighted = 0.0;
                let mut weights = 0.0;
                for (&level, tally) in &state.levels {
                    if tally.attempts == 0 {
                        continue;
                    }
                    let weight = level as f64 + 0.1;
                    let accuracy = tally.correct as f64 / tally.attempts as f64;
                    weighted += weight * accuracy;
                    weights += weight;
                }
                if weights == 0.0 {
                    0.0
                } else {
                    weighted / weights * 10.0
                }
            }
            ScoringStrategy::CompletionPercentage {
                extra_attempt_penalty,
                max_extra_penalty,
                unsolved_penalty,
            } => {
                if state.total_rounds == 0 {
                    0.0
                } else {
                    let base =
                        state.solved_rounds as f64 / state.total_rounds as f64 * 10.0;
                    let extra = state.moves.saturating_sub(state.solved_rounds);
                    let extra_penalty =
                        (extra as f64 * extra_attempt_penalty).min(max_extra_penalty);
                    let unsolved =
                        state.total_rounds.saturating_sub(state.solved_rounds);
                    base - extra_penalty - unsolved as f64 * unsolved_penalty
                }
            }
        };
        round_one_decimal(raw.clamp(0.0, 10.0))
    }
}

/// Round to exactly one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
