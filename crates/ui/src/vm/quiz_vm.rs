use quiz_core::{QuestionKind, ValidationFailure};
use services::{FlowStep, QuizFlow, QuizProgress, SessionError};

use crate::vm::ResultVm;

const NEXT_LABEL: &str = "Próximo";
const FINISH_LABEL: &str = "Analisar Resultados";

/// User intent coming from a key press or an input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Previous,
    Next,
    /// Pick the option at this 0-based position.
    SelectOption(usize),
    /// Typed value for a numeric question, submitted with Enter.
    Submit(String),
}

impl QuizIntent {
    /// Map a key name to an intent.
    ///
    /// Arrow keys navigate, Enter moves on and the digits `1`-`4` pick an
    /// option.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "<" => Some(Self::Previous),
            "ArrowRight" | ">" | "Enter" => Some(Self::Next),
            "1" | "2" | "3" | "4" => key
                .parse::<usize>()
                .ok()
                .map(|n| Self::SelectOption(n - 1)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    /// State changed; redraw the current question.
    Continue,
    /// Input was rejected; show `message` and stay.
    Invalid { message: String },
    /// Intent did not apply to the current question.
    Ignored,
    /// Navigation refused by a guard.
    Blocked(SessionError),
    Finished(ResultVm),
}

/// One option row of a choice question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    /// Key that selects this row (`"1"`, `"2"`, ...).
    pub key: String,
    pub label: String,
    pub selected: bool,
}

/// Input box of a numeric question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputVm {
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub notice: Option<(String, String)>,
    /// Previously stored value, for prefilling.
    pub value: Option<String>,
}

/// View model over a running quiz flow.
pub struct QuizVm {
    flow: QuizFlow,
}

impl QuizVm {
    #[must_use]
    pub fn new(flow: QuizFlow) -> Self {
        Self { flow }
    }

    pub fn start(&mut self) {
        self.flow.start();
    }

    #[must_use]
    pub fn flow(&self) -> &QuizFlow {
        &self.flow
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.flow.session().current_question().map(|q| q.prompt())
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.flow
            .session()
            .current_question()
            .is_some_and(|q| !q.is_choice())
    }

    /// Option rows for the current choice question; empty for numeric ones.
    #[must_use]
    pub fn option_rows(&self) -> Vec<OptionRowVm> {
        let session = self.flow.session();
        let selected = session.selected_option();
        session
            .current_question()
            .and_then(|q| q.options())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(pos, option)| OptionRowVm {
                key: (pos + 1).to_string(),
                label: option.label.clone(),
                selected: selected == Some(pos),
            })
            .collect()
    }

    /// Input box for the current numeric question.
    #[must_use]
    pub fn input(&self) -> Option<InputVm> {
        let session = self.flow.session();
        let question = session.current_question()?;
        match question.kind() {
            QuestionKind::Choice { .. } => None,
            QuestionKind::NumericInput {
                placeholder,
                help_text,
                notice,
                ..
            } => Some(InputVm {
                placeholder: placeholder.clone(),
                help_text: help_text.clone(),
                notice: notice.as_ref().map(|n| (n.title.clone(), n.text.clone())),
                value: session.answer(session.current_index()).map(str::to_string),
            }),
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.flow.session().progress()
    }

    /// "3 de 9".
    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.progress();
        format!("{} de {}", progress.position, progress.total)
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.progress().is_last {
            FINISH_LABEL
        } else {
            NEXT_LABEL
        }
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.flow.session().can_go_next()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.flow.session().can_go_previous()
    }

    /// Whether the "previous" control belongs on screen.
    ///
    /// Unlike `can_go_previous` this ignores the redraw guard, so it stays
    /// true while the question is being drawn.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        let session = self.flow.session();
        session.current_index() > 0 && !session.is_complete()
    }

    /// Interpret one line of terminal input for the current question.
    ///
    /// Blank lines move on; `<` and `>` navigate. On a numeric question any
    /// other text is a submitted value, otherwise it is read as a key.
    #[must_use]
    pub fn intent_for_line(&self, line: &str) -> Option<QuizIntent> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Some(QuizIntent::Next);
        }
        match QuizIntent::from_key(trimmed) {
            Some(intent @ (QuizIntent::Previous | QuizIntent::Next)) => Some(intent),
            _ if self.is_numeric() => Some(QuizIntent::Submit(trimmed.to_string())),
            other => other,
        }
    }

    /// Mark a redraw as in progress; navigation is refused until `end_redraw`.
    pub fn begin_redraw(&mut self) {
        self.flow.session_mut().begin_transition();
    }

    pub fn end_redraw(&mut self) {
        self.flow.session_mut().end_transition();
    }

    pub fn apply(&mut self, intent: QuizIntent) -> QuizOutcome {
        match intent {
            QuizIntent::Previous => match self.flow.previous() {
                Ok(_) => QuizOutcome::Continue,
                Err(err) => QuizOutcome::Blocked(err),
            },
            QuizIntent::Next => self.next(),
            QuizIntent::SelectOption(pos) => self.select(pos),
            QuizIntent::Submit(text) => self.submit(&text),
        }
    }

    fn next(&mut self) -> QuizOutcome {
        match self.flow.next() {
            Ok(FlowStep::Question { .. }) => QuizOutcome::Continue,
            Ok(FlowStep::Finished(report)) => QuizOutcome::Finished(ResultVm::from(&report)),
            Err(err) => QuizOutcome::Blocked(err),
        }
    }

    fn select(&mut self, pos: usize) -> QuizOutcome {
        let session = self.flow.session();
        let index = session.current_index();
        let Some(value) = session
            .current_question()
            .and_then(|q| q.options())
            .and_then(|options| options.get(pos))
            .map(|option| option.value.clone())
        else {
            return QuizOutcome::Ignored;
        };

        if self.flow.session_mut().record_choice_answer(index, &value) {
            QuizOutcome::Continue
        } else {
            QuizOutcome::Ignored
        }
    }

    /// Records the value and, when it was accepted, moves on like Enter does.
    fn submit(&mut self, text: &str) -> QuizOutcome {
        let index = self.flow.session().current_index();
        match self.flow.session_mut().record_numeric_answer(index, text) {
            Ok(services::NumericRecord::Stored(_)) => self.next(),
            Ok(services::NumericRecord::Blank | services::NumericRecord::Ignored) => {
                QuizOutcome::Ignored
            }
            Err(failure) => QuizOutcome::Invalid {
                message: self.failure_message(failure),
            },
        }
    }

    fn failure_message(&self, failure: ValidationFailure) -> String {
        let rules = failure
            .field
            .index()
            .and_then(|index| self.flow.session().catalog().get(index))
            .and_then(|q| q.validation().copied())
            .unwrap_or_default();
        failure.reason.message(&rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::Catalog;
    use quiz_core::time::fixed_clock;

    fn vm() -> QuizVm {
        let mut vm = QuizVm::new(QuizFlow::new(Arc::new(Catalog::standard()), fixed_clock()));
        vm.start();
        vm
    }

    fn answer_all_choices(vm: &mut QuizVm, pos: usize) {
        for _ in 0..8 {
            assert_eq!(vm.apply(QuizIntent::SelectOption(pos)), QuizOutcome::Continue);
            assert_eq!(vm.apply(QuizIntent::Next), QuizOutcome::Continue);
        }
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(QuizIntent::from_key("ArrowLeft"), Some(QuizIntent::Previous));
        assert_eq!(QuizIntent::from_key("ArrowRight"), Some(QuizIntent::Next));
        assert_eq!(QuizIntent::from_key("Enter"), Some(QuizIntent::Next));
        assert_eq!(QuizIntent::from_key("1"), Some(QuizIntent::SelectOption(0)));
        assert_eq!(QuizIntent::from_key("4"), Some(QuizIntent::SelectOption(3)));
        assert_eq!(QuizIntent::from_key("5"), None);
        assert_eq!(QuizIntent::from_key("x"), None);
    }

    #[test]
    fn lines_become_submissions_on_numeric_questions() {
        let mut vm = vm();
        assert_eq!(vm.intent_for_line("2"), Some(QuizIntent::SelectOption(1)));
        assert_eq!(vm.intent_for_line(""), Some(QuizIntent::Next));

        answer_all_choices(&mut vm, 0);
        assert!(vm.is_numeric());
        assert_eq!(vm.intent_for_line(" 2 "), Some(QuizIntent::Submit("2".to_string())));
        assert_eq!(vm.intent_for_line("<"), Some(QuizIntent::Previous));
    }

    #[test]
    fn option_rows_mark_selection() {
        let mut vm = vm();
        assert_eq!(vm.option_rows().len(), 4);
        assert!(vm.option_rows().iter().all(|row| !row.selected));

        assert_eq!(vm.apply(QuizIntent::SelectOption(2)), QuizOutcome::Continue);
        let rows = vm.option_rows();
        assert_eq!(rows[2].key, "3");
        assert_eq!(rows[2].label, "De 14 a 16 cm");
        assert!(rows[2].selected);
        assert!(vm.input().is_none());
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut vm = vm();
        assert_eq!(vm.apply(QuizIntent::SelectOption(7)), QuizOutcome::Ignored);
        assert!(!vm.can_go_next());
    }

    #[test]
    fn navigation_labels_follow_position() {
        let mut vm = vm();
        assert_eq!(vm.progress_label(), "1 de 9");
        assert_eq!(vm.next_label(), "Próximo");
        assert!(!vm.can_go_previous());
        assert!(matches!(
            vm.apply(QuizIntent::Next),
            QuizOutcome::Blocked(SessionError::Unanswered { index: 0 })
        ));

        answer_all_choices(&mut vm, 1);
        assert_eq!(vm.progress_label(), "9 de 9");
        assert_eq!(vm.next_label(), "Analisar Resultados");
        assert!(vm.can_go_previous());
    }

    #[test]
    fn numeric_input_shows_metadata_and_messages() {
        let mut vm = vm();
        answer_all_choices(&mut vm, 0);

        let input = vm.input().unwrap();
        assert_eq!(input.placeholder.as_deref(), Some("Digite o tamanho em cm"));
        assert_eq!(input.notice.as_ref().map(|n| n.0.as_str()), Some("Importante:"));
        assert_eq!(input.value, None);

        assert_eq!(
            vm.apply(QuizIntent::Submit("0".to_string())),
            QuizOutcome::Invalid {
                message: "O valor deve ser maior que 1".to_string()
            }
        );
        assert_eq!(
            vm.apply(QuizIntent::Submit("abc".to_string())),
            QuizOutcome::Invalid {
                message: "Por favor, digite um número válido".to_string()
            }
        );
    }

    #[test]
    fn submitting_last_answer_finishes_quiz() {
        let mut vm = vm();
        answer_all_choices(&mut vm, 0);

        let QuizOutcome::Finished(result) = vm.apply(QuizIntent::Submit("13".to_string())) else {
            panic!("expected finished outcome");
        };
        // 8 - 1 - 1 + 0.5 - 1 - 1 - 1 + 1 = 4.5, rounded half-up
        assert_eq!(result.increase_label, "5cm");
        assert_eq!(result.current_size_label, "13cm");
        assert_eq!(result.potential_size_label, "18cm");
        assert!(vm.flow().session().is_complete());
    }

    #[test]
    fn redraw_guard_blocks_navigation() {
        let mut vm = vm();
        vm.apply(QuizIntent::SelectOption(0));
        vm.begin_redraw();
        assert_eq!(
            vm.apply(QuizIntent::Next),
            QuizOutcome::Blocked(SessionError::Transitioning)
        );
        vm.end_redraw();
        assert_eq!(vm.apply(QuizIntent::Next), QuizOutcome::Continue);
    }

    #[test]
    fn previous_control_survives_redraw_guard() {
        let mut vm = vm();
        assert!(!vm.has_previous());
        vm.apply(QuizIntent::SelectOption(0));
        assert_eq!(vm.apply(QuizIntent::Next), QuizOutcome::Continue);

        vm.begin_redraw();
        assert!(!vm.can_go_previous());
        assert!(vm.has_previous());
        vm.end_redraw();
        assert!(vm.can_go_previous());
    }
}
