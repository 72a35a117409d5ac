mod quiz_vm;
mod result_vm;

pub use quiz_vm::{InputVm, OptionRowVm, QuizIntent, QuizOutcome, QuizVm};
pub use result_vm::ResultVm;
