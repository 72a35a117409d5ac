use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::validation::validate_numeric;
use quiz_core::{AnswerMap, Catalog, Clock, Question, QuizResult, ScoringEngine, ValidationFailure};

use super::progress::QuizProgress;
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at `index`.
    Moved { index: usize },
    /// Left the last question; the attempt is finished and ready for scoring.
    Completed,
}

/// Result of an accepted numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericRecord {
    /// Input was valid and stored.
    Stored(f64),
    /// Blank input on an optional question; nothing stored.
    Blank,
    /// Index is not a numeric question, or the attempt is already completed.
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one quiz attempt.
///
/// Tracks the current question, the answers given so far and the transition
/// guard. Positions run `0..N`; leaving the last question moves the session
/// into a terminal completed state that only `reset` leaves.
///
/// Navigation that violates a guard returns a [`SessionError`] and leaves the
/// state unchanged.
pub struct QuizSession {
    catalog: Arc<Catalog>,
    clock: Clock,
    current: usize,
    answers: AnswerMap,
    transitioning: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a fresh attempt over `catalog`.
    ///
    /// `clock` stamps `started_at` and `completed_at`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, clock: Clock) -> Self {
        Self {
            catalog,
            started_at: clock.now(),
            clock,
            current: 0,
            answers: AnswerMap::new(),
            transitioning: false,
            completed_at: None,
        }
    }

    /// Begin a new attempt: back to the first question with no answers.
    ///
    /// The transition guard is left alone; it belongs to whoever is animating.
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.completed_at = None;
        self.started_at = self.clock.now();
        tracing::debug!(total = self.catalog.len(), "quiz session reset");
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.get(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index)
    }

    /// Position of the stored option for the current question, if it is a
    /// choice question that has been answered.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        let value = self.answers.get(self.current)?;
        self.current_question()?.option_position(value)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Store `value` for the choice question at `index`.
    ///
    /// Returns whether the answer was stored. Values that are not options of
    /// that question, non-choice questions, unknown indices and completed
    /// attempts are ignored.
    pub fn record_choice_answer(&mut self, index: usize, value: &str) -> bool {
        if self.is_complete() {
            return false;
        }
        let accepted = self
            .catalog
            .get(index)
            .is_some_and(|question| question.has_option(value));
        if accepted {
            self.answers.insert(index, value);
        } else {
            tracing::debug!(index, value, "ignored choice answer");
        }
        accepted
    }

    /// Validate and store a typed numeric answer for the question at `index`.
    ///
    /// Input is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] when the input breaks the question's
    /// rules; any previously stored answer is kept.
    pub fn record_numeric_answer(
        &mut self,
        index: usize,
        raw: &str,
    ) -> Result<NumericRecord, ValidationFailure> {
        if self.is_complete() {
            return Ok(NumericRecord::Ignored);
        }
        let Some(question) = self.catalog.get(index) else {
            return Ok(NumericRecord::Ignored);
        };
        let Some(rules) = question.validation() else {
            return Ok(NumericRecord::Ignored);
        };

        match validate_numeric(raw, rules) {
            Ok(Some(value)) => {
                self.answers.insert(index, raw.trim());
                Ok(NumericRecord::Stored(value))
            }
            Ok(None) => Ok(NumericRecord::Blank),
            Err(reason) => {
                tracing::debug!(index, ?reason, "rejected numeric answer");
                Err(ValidationFailure {
                    field: question.id(),
                    reason,
                })
            }
        }
    }

    //
    // ─── TRANSITION GUARD ──────────────────────────────────────────────────────
    //

    /// Mark a visual transition as running; navigation is refused until
    /// [`end_transition`](Self::end_transition).
    pub fn begin_transition(&mut self) {
        self.transitioning = true;
    }

    pub fn end_transition(&mut self) {
        self.transitioning = false;
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.check_next().is_ok()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.check_previous().is_ok()
    }

    fn check_open(&self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.transitioning {
            return Err(SessionError::Transitioning);
        }
        Ok(())
    }

    fn check_next(&self) -> Result<(), SessionError> {
        self.check_open()?;
        if !self.answers.contains(self.current) {
            return Err(SessionError::Unanswered {
                index: self.current,
            });
        }
        Ok(())
    }

    fn check_previous(&self) -> Result<(), SessionError> {
        self.check_open()?;
        if self.current == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        Ok(())
    }

    /// Move to the next question, or complete the attempt from the last one.
    ///
    /// # Errors
    ///
    /// - `Completed` if the attempt already finished
    /// - `Transitioning` while the transition guard is set
    /// - `Unanswered` if the current question has no answer
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.check_next().inspect_err(|err| {
            tracing::debug!(index = self.current, %err, "advance refused");
        })?;

        if self.current >= self.catalog.last_index() {
            let completed_at = self.clock.now();
            self.completed_at = Some(completed_at);
            tracing::info!(
                answered = self.answers.len(),
                total = self.catalog.len(),
                "quiz completed"
            );
            return Ok(Advance::Completed);
        }

        self.current += 1;
        tracing::debug!(index = self.current, "advanced");
        Ok(Advance::Moved {
            index: self.current,
        })
    }

    /// Move back one question, returning the new index.
    ///
    /// # Errors
    ///
    /// - `Completed` if the attempt already finished
    /// - `Transitioning` while the transition guard is set
    /// - `AtFirstQuestion` at index 0
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.check_previous().inspect_err(|err| {
            tracing::debug!(index = self.current, %err, "retreat refused");
        })?;
        self.current -= 1;
        tracing::debug!(index = self.current, "retreated");
        Ok(self.current)
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// `(current + 1) / N`, always in `(0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        (self.current + 1) as f64 / self.catalog.len() as f64
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.current + 1,
            total: self.catalog.len(),
            answered: self.answers.len(),
            percent: (self.progress_fraction() * 100.0).round() as u32,
            is_last: self.current == self.catalog.last_index(),
            is_complete: self.is_complete(),
        }
    }

    /// Score the finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the last question has not
    /// been left yet.
    pub fn result(&self, engine: &ScoringEngine) -> Result<QuizResult, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotCompleted);
        }
        Ok(engine.compute_result(&self.answers))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.catalog.len())
            .field("current", &self.current)
            .field("answered", &self.answers.len())
            .field("transitioning", &self.transitioning)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
