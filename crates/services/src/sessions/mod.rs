mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::QuizProgress;
pub use service::{Advance, NumericRecord, QuizSession};
pub use view::QuizReport;
pub use workflow::{FlowStep, QuizFlow};
