use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::{QuizResult, ScoringEngine};

use super::service::QuizSession;
use crate::error::SessionError;

/// Final output of a completed attempt.
///
/// Presentation-agnostic: numbers and timestamps only, no formatted labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    pub result: QuizResult,
    pub answered: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizReport {
    /// Score a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` if the session has not left its
    /// last question yet.
    pub fn from_session(session: &QuizSession, engine: &ScoringEngine) -> Result<Self, SessionError> {
        let result = session.result(engine)?;
        let completed_at = session.completed_at().ok_or(SessionError::NotCompleted)?;
        Ok(Self {
            result,
            answered: session.answers().len(),
            total: session.catalog().len(),
            started_at: session.started_at(),
            completed_at,
        })
    }

    /// Pretty JSON rendering of the report.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::time::{fixed_clock, fixed_now};
    use quiz_core::Catalog;

    #[test]
    fn report_requires_completion() {
        let session = QuizSession::new(Arc::new(Catalog::standard()), fixed_clock());
        let err = QuizReport::from_session(&session, &ScoringEngine::new()).unwrap_err();
        assert_eq!(err, SessionError::NotCompleted);
    }

    #[test]
    fn report_serializes_result_and_timestamps() {
        let mut session = QuizSession::new(Arc::new(Catalog::standard()), fixed_clock());
        for index in 0..8 {
            let value = session.catalog().get(index).unwrap().options().unwrap()[0]
                .value
                .clone();
            assert!(session.record_choice_answer(index, &value));
            session.advance().unwrap();
        }
        session.record_numeric_answer(8, "13").unwrap();
        session.advance().unwrap();

        let report = QuizReport::from_session(&session, &ScoringEngine::new()).unwrap();
        assert_eq!(report.answered, 9);
        assert_eq!(report.total, 9);
        assert_eq!(report.completed_at, fixed_now());
        assert_eq!(report.result.current_size, 13.0);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["result"]["currentSize"], 13.0);
        assert_eq!(json["answered"], 9);
        assert!(json["completedAt"].is_string());
    }
}
