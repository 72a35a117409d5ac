use std::collections::HashSet;

use thiserror::Error;

use crate::model::{ChoiceOption, NumericValidation, Question, QuestionId, QuestionKind};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one question")]
    Empty,

    #[error("question at index {index} has id {found}, expected {expected}")]
    IdOutOfSequence {
        index: usize,
        expected: QuestionId,
        found: QuestionId,
    },

    #[error("choice question {id} has no options")]
    NoOptions { id: QuestionId },

    #[error("choice question {id} repeats option value {value:?}")]
    DuplicateOption { id: QuestionId, value: String },

    #[error("numeric question {id} has min {min} greater than max {max}")]
    InvalidBounds { id: QuestionId, min: f64, max: f64 },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, immutable list of questions.
///
/// A catalog always holds at least one question and question ids follow the
/// 1-based catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Builds a catalog after checking its invariants.
    ///
    /// # Errors
    ///
    /// - `Empty` if no questions are given
    /// - `IdOutOfSequence` if a question id is not its index + 1
    /// - `NoOptions` / `DuplicateOption` for malformed choice questions
    /// - `InvalidBounds` for numeric rules with `min > max`
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, question) in questions.iter().enumerate() {
            let expected = QuestionId::from_index(index);
            if question.id() != expected {
                return Err(CatalogError::IdOutOfSequence {
                    index,
                    expected,
                    found: question.id(),
                });
            }
            check_question(question)?;
        }

        Ok(Self { questions })
    }

    /// The built-in nine-question catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    /// Number of questions (`N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Never true for a catalog built through `new` or `standard`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`, or `None` when `index >= len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Index of the final question.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_question(question: &Question) -> Result<(), CatalogError> {
    let id = question.id();
    match question.kind() {
        QuestionKind::Choice { options } => {
            if options.is_empty() {
                return Err(CatalogError::NoOptions { id });
            }
            let mut seen = HashSet::with_capacity(options.len());
            for option in options {
                if !seen.insert(option.value.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        id,
                        value: option.value.clone(),
                    });
                }
            }
        }
        QuestionKind::NumericInput { validation, .. } => {
            if let (Some(min), Some(max)) = (validation.min, validation.max) {
                if min > max {
                    return Err(CatalogError::InvalidBounds { id, min, max });
                }
            }
        }
    }
    Ok(())
}

//
// ─── BUILT-IN QUESTIONS ────────────────────────────────────────────────────────
//

fn options(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
    pairs
        .iter()
        .map(|(value, label)| ChoiceOption::new(*value, *label))
        .collect()
}

fn standard_questions() -> Vec<Question> {
    let choice = |id: u32, prompt: &str, pairs: &[(&str, &str)]| {
        Question::choice(QuestionId::new(id), prompt, options(pairs))
    };

    vec![
        choice(
            1,
            "Qual é o tamanho aproximado do seu cajado ereto?",
            &[
                ("menos-12", "Menos de 12 cm"),
                ("12-14", "De 12 a 14 cm"),
                ("14-16", "De 14 a 16 cm"),
                ("mais-16", "Mais de 16 cm"),
            ],
        ),
        choice(
            2,
            "Com que frequência você se masturba?",
            &[
                ("mais-uma-vez", "Mais de uma vez por dia"),
                ("todos-dias", "Todos os dias"),
                ("2-4-semana", "De 2 a 4 vezes por semana"),
                ("raramente", "Raramente"),
            ],
        ),
        choice(
            3,
            "Você costuma acordar com o cajado ereto?",
            &[
                ("quase-nunca", "Quase nunca"),
                ("raramente", "Raramente"),
                ("as-vezes", "Às vezes"),
                ("quase-sempre", "Quase sempre"),
            ],
        ),
        choice(
            4,
            "Você já tentou algum método natural para aumentar o cajado?",
            &[
                ("nunca-ouvi", "Nunca ouvi falar"),
                ("ouvi-nunca-tentei", "Já ouvi falar, mas nunca tentei"),
                ("tentei-sem-constancia", "Já tentei, mas sem constância"),
                ("sim-disciplina", "Sim, fiz com disciplina"),
            ],
        ),
        choice(
            5,
            "Como é sua dieta diária?",
            &[
                ("processada", "Apenas comida processada (refrigerantes, fast food, doces)"),
                ("50-50", "50% comida processada, 50% saudável"),
                ("bem-maioria", "Tento comer bem na maioria das refeições"),
                ("natural-equilibrada", "Dieta natural e equilibrada"),
            ],
        ),
        choice(
            6,
            "Quantas horas você dorme por noite?",
            &[
                ("menos-5", "Menos de 5 horas"),
                ("5-6", "De 5 a 6 horas"),
                ("6-7", "De 6 a 7 horas"),
                ("8-mais", "8 horas ou mais"),
            ],
        ),
        choice(
            7,
            "Você pratica atividade física?",
            &[
                ("nunca", "Nunca"),
                ("uma-semana", "Uma vez por semana ou menos"),
                ("2-3-semana", "De 2 a 3 vezes por semana"),
                ("4-mais", "4 vezes por semana ou mais"),
            ],
        ),
        choice(
            8,
            "Qual é a sua idade?",
            &[
                ("12-18", "Entre 12 e 18 anos"),
                ("19-27", "Entre 19 e 27 anos"),
                ("28-36", "Entre 28 e 36 anos"),
                ("mais-36", "Mais de 36 anos"),
            ],
        ),
        Question::numeric(
            QuestionId::new(9),
            "Qual é o tamanho atual do seu cajado em ereção?",
            NumericValidation::required_range(1.0, 50.0),
        )
        .with_placeholder("Digite o tamanho em cm")
        .with_help_text("Digite um valor entre 1 e 50 centímetros")
        .with_notice(
            "Importante:",
            "Esta informação é completamente confidencial e é utilizada apenas para criar seu protocolo personalizado.",
        ),
    ]
}
