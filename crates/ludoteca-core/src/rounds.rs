//! Rounds, answer keys, and game definitions.
//!
//! A `GameDefinition` is an ordered list of rounds plus the policies the
//! session engine applies to them. Answer matching is pure and lives here so
//! it can be tested without driving a whole session.

use serde::{Deserialize, Serialize};

use crate::model::GameKind;
use crate::scoring::ScoringStrategy;

/// One discrete unit of challenge within a mini-game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Prompt shown to the player.
    pub prompt: String,
    /// What counts as a correct answer.
    pub key: AnswerKey,
    /// Difficulty level this round belongs to (for level-weighted scoring).
    #[serde(default)]
    pub level: u32,
}

/// What a round accepts as correct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnswerKey {
    /// Any one of the accepted answers matches.
    Choice { accepted: Vec<String> },
    /// The candidate must be a full ordering of `items`. Membership must
    /// match exactly and every declared positional constraint must hold;
    /// the ordering between unconstrained items is free.
    Sequence {
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        must_first: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        must_last: Option<String>,
    },
}

/// A candidate answer submitted by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Single(String),
    Sequence(Vec<String>),
}

impl Answer {
    /// Parse a raw input line: comma-separated input becomes a sequence.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(',') {
            Answer::Sequence(raw.split(',').map(|s| s.trim().to_string()).collect())
        } else {
            Answer::Single(raw.trim().to_string())
        }
    }
}

/// Case-insensitive, whitespace-trimmed comparison used for all answers.
fn matches_text(candidate: &str, accepted: &str) -> bool {
    candidate.trim().eq_ignore_ascii_case(accepted.trim())
}

impl AnswerKey {
    /// Check a candidate against this key.
    pub fn accepts(&self, candidate: &Answer) -> bool {
        match (self, candidate) {
            (AnswerKey::Choice { accepted }, Answer::Single(text)) => {
                accepted.iter().any(|a| matches_text(text, a))
            }
            (
                AnswerKey::Sequence {
                    items,
                    must_first,
                    must_last,
                },
                Answer::Sequence(candidate),
            ) => {
                if candidate.len() != items.len() {
                    return false;
                }
                // Exact multiset membership: every required item appears
                // exactly as often as required.
                let mut remaining: Vec<&String> = items.iter().collect();
                for c in candidate {
                    match remaining.iter().position(|i| matches_text(c, i)) {
                        Some(pos) => {
                            remaining.swap_remove(pos);
                        }
                        None => return false,
                    }
                }
                if let Some(first) = must_first {
                    match candidate.first() {
                        Some(c) if matches_text(c, first) => {}
                        _ => return false,
                    }
                }
                if let Some(last) = must_last {
                    match candidate.last() {
                        Some(c) if matches_text(c, last) => {}
                        _ => return false,
                    }
                }
                true
            }
            // A single answer against a sequence key (or vice versa) never matches.
            _ => false,
        }
    }
}

/// What the engine does after a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum MissPolicy {
    /// Keep the same round; the player retries indefinitely.
    Retry,
    /// Move on to the next round after the first wrong attempt.
    Advance,
    /// Swap in a spare round after `after` wrong attempts on the current one.
    /// Falls back to advancing when the spare pool is empty.
    Swap { after: u32 },
}

impl GameKind {
    /// The miss policy the original games use for this family.
    pub fn default_miss_policy(self) -> MissPolicy {
        match self {
            GameKind::Memory => MissPolicy::Retry,
            GameKind::Words => MissPolicy::Swap { after: 2 },
            GameKind::Emotions => MissPolicy::Advance,
            GameKind::Counting => MissPolicy::Retry,
            GameKind::Routine => MissPolicy::Retry,
        }
    }

    /// The scoring strategy the original games use for this family.
    pub fn default_scoring(self) -> ScoringStrategy {
        match self {
            GameKind::Memory => ScoringStrategy::linear_deduction(),
            GameKind::Emotions => ScoringStrategy::LevelWeighted,
            _ => ScoringStrategy::completion_percentage(),
        }
    }
}

/// A complete playable game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDefinition {
    /// Unique identifier for this game.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Game family.
    pub kind: GameKind,
    /// Backend activity this game records progress against.
    pub activity_id: String,
    /// Difficulty shown to caregivers (1..=5).
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// The rounds, in play order.
    pub rounds: Vec<Round>,
    /// Replacement rounds for the swap miss policy.
    #[serde(default)]
    pub spares: Vec<Round>,
    /// Miss policy; defaults to the family policy.
    pub miss_policy: MissPolicy,
    /// Scoring strategy; defaults to the family strategy.
    pub scoring: ScoringStrategy,
}

fn default_difficulty() -> u8 {
    1
}
