use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

//
// ─── CHOICE OPTIONS ────────────────────────────────────────────────────────────
//

/// One selectable answer of a choice question.
///
/// `value` is the stable key stored in the answer map and read by scoring;
/// `label` is display text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

//
// ─── NUMERIC RULES ─────────────────────────────────────────────────────────────
//

/// Bounds and presence rules for a free numeric entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericValidation {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
}

impl NumericValidation {
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>, required: bool) -> Self {
        Self { min, max, required }
    }

    /// Inclusive range that is also mandatory.
    #[must_use]
    pub fn required_range(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max), true)
    }
}

/// Highlighted notice shown next to a numeric input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputNotice {
    pub title: String,
    pub text: String,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Per-kind payload of a question.
///
/// Choice questions carry options and numeric questions carry validation
/// rules; the enum makes it impossible to carry both or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuestionKind {
    Choice {
        options: Vec<ChoiceOption>,
    },
    #[serde(rename_all = "camelCase")]
    NumericInput {
        validation: NumericValidation,
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        help_text: Option<String>,
        #[serde(default)]
        notice: Option<InputNotice>,
    },
}

/// Immutable question definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    #[serde(flatten)]
    kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn choice(id: QuestionId, prompt: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            kind: QuestionKind::Choice { options },
        }
    }

    #[must_use]
    pub fn numeric(id: QuestionId, prompt: impl Into<String>, validation: NumericValidation) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            kind: QuestionKind::NumericInput {
                validation,
                placeholder: None,
                help_text: None,
                notice: None,
            },
        }
    }

    /// Sets the input placeholder. No effect on choice questions.
    #[must_use]
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        if let QuestionKind::NumericInput { placeholder, .. } = &mut self.kind {
            *placeholder = Some(text.into());
        }
        self
    }

    /// Sets the help line. No effect on choice questions.
    #[must_use]
    pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
        if let QuestionKind::NumericInput { help_text, .. } = &mut self.kind {
            *help_text = Some(text.into());
        }
        self
    }

    /// Sets the highlighted notice. No effect on choice questions.
    #[must_use]
    pub fn with_notice(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        if let QuestionKind::NumericInput { notice, .. } = &mut self.kind {
            *notice = Some(InputNotice {
                title: title.into(),
                text: text.into(),
            });
        }
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::Choice { .. })
    }

    /// Options of a choice question, `None` for numeric questions.
    #[must_use]
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match &self.kind {
            QuestionKind::Choice { options } => Some(options),
            QuestionKind::NumericInput { .. } => None,
        }
    }

    /// Rules of a numeric question, `None` for choice questions.
    #[must_use]
    pub fn validation(&self) -> Option<&NumericValidation> {
        match &self.kind {
            QuestionKind::Choice { .. } => None,
            QuestionKind::NumericInput { validation, .. } => Some(validation),
        }
    }

    /// True when `value` is one of this question's option values.
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.option_position(value).is_some()
    }

    /// 0-based position of the option with the given value.
    #[must_use]
    pub fn option_position(&self, value: &str) -> Option<usize> {
        self.options()?.iter().position(|opt| opt.value == value)
    }
}
