#![forbid(unsafe_code)]

pub mod vm;

pub use vm::{InputVm, OptionRowVm, QuizIntent, QuizOutcome, QuizVm, ResultVm};
