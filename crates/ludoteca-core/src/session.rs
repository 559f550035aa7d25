//! The game session state machine.
//!
//! Drives a game from the first round to a terminal state:
//!
//! ```text
//! Playing -> (per-round loop) -> Finished -> Submitting -> Submitted
//!                                     ^                 \-> SubmissionFailed
//!                                     |_______________________/  (retry)
//! ```
//!
//! The score is computed exactly once on the transition to `Finished` and is
//! immutable afterward; a failed submission leaves the outcome untouched so
//! the user may retry.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{ProgressRecord, SelectedContext};
use crate::rounds::{Answer, GameDefinition, MissPolicy, Round};
use crate::scoring::ScoreState;
use crate::traits::ProgressSink;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Playing,
    Finished,
    Submitting,
    Submitted,
    SubmissionFailed,
}

/// What a single answer submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct; the session advanced to the next round.
    Solved,
    /// Wrong; the same round is presented again.
    TryAgain,
    /// Wrong too many times; a spare round replaced the current one.
    Swapped,
    /// Wrong; the miss policy moved the session past this round.
    MovedOn,
    /// The last round resolved and the session is now finished.
    Finished,
}

/// The frozen result of a finished playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub score: f64,
    pub moves: u32,
    pub elapsed_secs: u64,
    pub solved: u32,
    pub total_rounds: u32,
}

/// One playthrough of a game for one child.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    definition: GameDefinition,
    context: SelectedContext,
    current: usize,
    /// Wrong attempts on the current round instance (reset on swap/advance).
    wrong_streak: u32,
    score_state: ScoreState,
    started_at: Instant,
    phase: Phase,
    outcome: Option<SessionOutcome>,
}

impl GameSession {
    /// Start a session. Requires a selected child and a non-empty game.
    pub fn new(
        definition: GameDefinition,
        context: SelectedContext,
    ) -> Result<Self, SessionError> {
        if context.child_id.is_none() {
            return Err(SessionError::NoChildSelected);
        }
        if definition.rounds.is_empty() {
            return Err(SessionError::EmptyGame(definition.id));
        }
        let score_state = ScoreState {
            total_rounds: definition.rounds.len() as u32,
            ..ScoreState::default()
        };
        let id = Uuid::new_v4();
        tracing::info!(session = %id, game = %definition.id, "session started");
        Ok(Self {
            id,
            definition,
            context,
            current: 0,
            wrong_streak: 0,
            score_state,
            started_at: Instant::now(),
            phase: Phase::Playing,
            outcome: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn definition(&self) -> &GameDefinition {
        &self.definition
    }

    /// The round currently being played, or `None` once finished.
    pub fn current_round(&self) -> Option<&Round> {
        if self.phase == Phase::Playing {
            self.definition.rounds.get(self.current)
        } else {
            None
        }
    }

    /// Zero-based index of the current round.
    pub fn round_index(&self) -> usize {
        self.current
    }

    /// The frozen outcome, available from `Finished` onward.
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    /// Submit one answer for the current round.
    pub fn submit_answer(&mut self, candidate: &Answer) -> Result<SubmitOutcome, SessionError> {
        if self.phase != Phase::Playing {
            return Err(SessionError::Finished);
        }

        let round = &self.definition.rounds[self.current];
        let level = round.level;
        let correct = round.key.accepts(candidate);
        self.score_state.record_attempt(self.current, level, correct);

        if correct {
            tracing::debug!(session = %self.id, round = self.current, "round solved");
            self.wrong_streak = 0;
            return Ok(self.advance());
        }

        self.wrong_streak += 1;
        match self.definition.miss_policy {
            MissPolicy::Retry => Ok(SubmitOutcome::TryAgain),
            MissPolicy::Advance => Ok(self.advance_on_miss()),
            MissPolicy::Swap { after } => {
                if self.wrong_streak < after {
                    return Ok(SubmitOutcome::TryAgain);
                }
                if self.definition.spares.is_empty() {
                    // No replacement available; behave like Advance so the
                    // session always terminates.
                    return Ok(self.advance_on_miss());
                }
                let spare = self.definition.spares.remove(0);
                tracing::debug!(session = %self.id, round = self.current, "round swapped");
                self.definition.rounds[self.current] = spare;
                self.wrong_streak = 0;
                Ok(SubmitOutcome::Swapped)
            }
        }
    }

    fn advance(&mut self) -> SubmitOutcome {
        self.current += 1;
        if self.current >= self.definition.rounds.len() {
            self.finish();
            SubmitOutcome::Finished
        } else {
            SubmitOutcome::Solved
        }
    }

    fn advance_on_miss(&mut self) -> SubmitOutcome {
        self.wrong_streak = 0;
        self.current += 1;
        if self.current >= self.definition.rounds.len() {
            self.finish();
            SubmitOutcome::Finished
        } else {
            SubmitOutcome::MovedOn
        }
    }

    /// Transition to `Finished` and compute the score, exactly once.
    fn finish(&mut self) {
        debug_assert_eq!(self.phase, Phase::Playing);
        let score = self.definition.scoring.compute(&self.score_state);
        let outcome = SessionOutcome {
            score,
            moves: self.score_state.moves,
            elapsed_secs: self.started_at.elapsed().as_secs(),
            solved: self.score_state.solved_rounds,
            total_rounds: self.score_state.total_rounds,
        };
        tracing::info!(
            session = %self.id,
            score = outcome.score,
            moves = outcome.moves,
            "session finished"
        );
        self.outcome = Some(outcome);
        self.phase = Phase::Finished;
    }

    /// Build the progress record this session would submit.
    pub fn progress_record(&self, note: Option<String>) -> Result<ProgressRecord, SessionError> {
        let outcome = self.outcome.as_ref().ok_or(SessionError::NotFinished)?;
        let child_id = self
            .context
            .child_id
            .clone()
            .ok_or(SessionError::NoChildSelected)?;
        Ok(ProgressRecord {
            child_id,
            activity_id: self.definition.activity_id.clone(),
            score: outcome.score,
            moves: Some(outcome.moves),
            elapsed_secs: Some(outcome.elapsed_secs),
            note,
            completed: true,
        })
    }

    /// Send the finished session's progress to the backend.
    ///
    /// Allowed from `Finished` and `SubmissionFailed`; a failure surfaces the
    /// backend error and leaves the session retryable. Retrying re-POSTs the
    /// record — the backend may end up with duplicates.
    pub async fn submit_progress(
        &mut self,
        sink: &dyn ProgressSink,
        note: Option<String>,
    ) -> Result<(), SessionError> {
        match self.phase {
            Phase::Finished | Phase::SubmissionFailed => {}
            Phase::Playing => return Err(SessionError::NotFinished),
            Phase::Submitting => return Err(SessionError::SubmissionInFlight),
            Phase::Submitted => return Err(SessionError::AlreadySubmitted),
        }
        let record = self.progress_record(note)?;
        self.phase = Phase::Submitting;
        match sink.submit(&record).await {
            Ok(()) => {
                tracing::info!(session = %self.id, "progress submitted");
                self.phase = Phase::Submitted;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "progress submission failed");
                self.phase = Phase::SubmissionFailed;
                Err(e.into())
            }
        }
    }
}
