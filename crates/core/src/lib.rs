#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod scoring;
pub mod time;
pub mod validation;

pub use catalog::Catalog;
pub use model::{AnswerMap, ChoiceOption, InputNotice, NumericValidation, Question, QuestionId, QuestionKind};
pub use scoring::{QuizResult, ScoringEngine};
pub use time::Clock;
pub use validation::{ValidationFailure, ValidationReason};
