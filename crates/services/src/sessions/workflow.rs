use std::sync::Arc;

use quiz_core::{Catalog, ScoringEngine};

use super::service::{Advance, QuizSession};
use super::view::QuizReport;
use crate::Clock;
use crate::error::SessionError;

/// Where an attempt stands after a navigation step.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    /// Showing the question at `index`.
    Question { index: usize },
    /// The last question was answered and scored.
    Finished(QuizReport),
}

/// Orchestrates one attempt: session navigation plus scoring on completion.
///
/// This is the seam the presentation layer talks to. It owns the session
/// and hands out the report as soon as `next` leaves the last question.
pub struct QuizFlow {
    session: QuizSession,
    engine: ScoringEngine,
}

impl QuizFlow {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, clock: Clock) -> Self {
        Self {
            session: QuizSession::new(catalog, clock),
            engine: ScoringEngine::new(),
        }
    }

    /// Flow over the built-in catalog using the system clock.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Arc::new(Catalog::standard()), Clock::system())
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Mutable access for recording answers and driving the transition guard.
    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// Start (or restart) the attempt.
    pub fn start(&mut self) -> FlowStep {
        self.session.reset();
        tracing::info!(total = self.session.catalog().len(), "quiz started");
        FlowStep::Question { index: 0 }
    }

    /// Advance, scoring the attempt when the last question is left.
    ///
    /// # Errors
    ///
    /// Propagates the session's navigation errors.
    pub fn next(&mut self) -> Result<FlowStep, SessionError> {
        match self.session.advance()? {
            Advance::Moved { index } => Ok(FlowStep::Question { index }),
            Advance::Completed => {
                let report = QuizReport::from_session(&self.session, &self.engine)?;
                tracing::info!(
                    potential_increase = report.result.potential_increase,
                    current_size = report.result.current_size,
                    "quiz scored"
                );
                Ok(FlowStep::Finished(report))
            }
        }
    }

    /// Go back one question.
    ///
    /// # Errors
    ///
    /// Propagates the session's navigation errors.
    pub fn previous(&mut self) -> Result<FlowStep, SessionError> {
        let index = self.session.retreat()?;
        Ok(FlowStep::Question { index })
    }

    /// Report for a completed attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` before completion.
    pub fn report(&self) -> Result<QuizReport, SessionError> {
        QuizReport::from_session(&self.session, &self.engine)
    }
}
