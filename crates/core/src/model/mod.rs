mod answers;
mod ids;
mod question;

pub use answers::AnswerMap;
pub use ids::QuestionId;
pub use question::{ChoiceOption, InputNotice, NumericValidation, Question, QuestionKind};
