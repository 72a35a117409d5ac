//! Validation of free numeric input against a question's rules.
//!
//! Rules are checked in a fixed order and the first failing rule wins:
//! blank-but-required, not a number, below minimum, above maximum.

use thiserror::Error;

use crate::model::{NumericValidation, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Why a numeric input was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("a value is required")]
    Required,
    #[error("input is not a number")]
    NotANumber,
    #[error("value is below the minimum")]
    BelowMinimum,
    #[error("value is above the maximum")]
    AboveMaximum,
}

impl ValidationReason {
    /// User-facing message for this reason, phrased with the question's bounds.
    #[must_use]
    pub fn message(self, rules: &NumericValidation) -> String {
        match self {
            ValidationReason::Required => "Este campo é obrigatório".to_string(),
            ValidationReason::NotANumber => "Por favor, digite um número válido".to_string(),
            ValidationReason::BelowMinimum => match rules.min {
                Some(min) => format!("O valor deve ser maior que {min}"),
                None => "O valor é muito baixo".to_string(),
            },
            ValidationReason::AboveMaximum => match rules.max {
                Some(max) => format!("O valor deve ser menor que {max}"),
                None => "O valor é muito alto".to_string(),
            },
        }
    }
}

/// A rejected numeric answer: which question, and why.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid answer for question {field}: {reason}")]
pub struct ValidationFailure {
    pub field: QuestionId,
    pub reason: ValidationReason,
}

//
// ─── PARSING ───────────────────────────────────────────────────────────────────
//

/// Parses a plain base-10 integer or decimal (`"25"`, `"-3"`, `"13.5"`, `".5"`).
///
/// Exponents, `inf`/`nan`, thousands separators and trailing garbage are
/// rejected. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let has_digits = !int_part.is_empty() || frac_part.is_some_and(|f| !f.is_empty());
    if !has_digits || !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
        return None;
    }

    trimmed.parse::<f64>().ok()
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

/// Checks `raw` against `rules`.
///
/// Returns `Ok(Some(value))` for a valid number and `Ok(None)` for blank input
/// on an optional question, which counts as "no answer".
///
/// # Errors
///
/// Returns the first failing [`ValidationReason`] in precedence order.
pub fn validate_numeric(raw: &str, rules: &NumericValidation) -> Result<Option<f64>, ValidationReason> {
    if raw.trim().is_empty() {
        return if rules.required {
            Err(ValidationReason::Required)
        } else {
            Ok(None)
        };
    }

    let value = parse_decimal(raw).ok_or(ValidationReason::NotANumber)?;

    if rules.min.is_some_and(|min| value < min) {
        return Err(ValidationReason::BelowMinimum);
    }
    if rules.max.is_some_and(|max| value > max) {
        return Err(ValidationReason::AboveMaximum);
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_rules() -> NumericValidation {
        NumericValidation::required_range(1.0, 50.0)
    }

    #[test]
    fn blank_required_is_rejected() {
        assert_eq!(validate_numeric("", &size_rules()), Err(ValidationReason::Required));
        assert_eq!(validate_numeric("   ", &size_rules()), Err(ValidationReason::Required));
    }

    #[test]
    fn blank_optional_is_no_answer() {
        let rules = NumericValidation::new(Some(1.0), None, false);
        assert_eq!(validate_numeric("", &rules), Ok(None));
    }

    #[test]
    fn precedence_follows_rule_order() {
        let rules = size_rules();
        assert_eq!(validate_numeric("abc", &rules), Err(ValidationReason::NotANumber));
        assert_eq!(validate_numeric("0", &rules), Err(ValidationReason::BelowMinimum));
        assert_eq!(validate_numeric("999", &rules), Err(ValidationReason::AboveMaximum));
        assert_eq!(validate_numeric("25", &rules), Ok(Some(25.0)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let rules = size_rules();
        assert_eq!(validate_numeric("1", &rules), Ok(Some(1.0)));
        assert_eq!(validate_numeric("50", &rules), Ok(Some(50.0)));
        assert_eq!(validate_numeric("50.01", &rules), Err(ValidationReason::AboveMaximum));
    }

    #[test]
    fn unbounded_rules_accept_any_number() {
        let rules = NumericValidation::new(None, None, true);
        assert_eq!(validate_numeric("-40", &rules), Ok(Some(-40.0)));
    }

    #[test]
    fn parse_decimal_is_strict() {
        assert_eq!(parse_decimal(" 13.5 "), Some(13.5));
        assert_eq!(parse_decimal("+7"), Some(7.0));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("12."), Some(12.0));
        for bad in ["", ".", "-", "1e3", "inf", "NaN", "12cm", "1,5", "1.2.3", "--1"] {
            assert_eq!(parse_decimal(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn messages_mention_bounds() {
        let rules = size_rules();
        assert_eq!(
            ValidationReason::BelowMinimum.message(&rules),
            "O valor deve ser maior que 1"
        );
        assert_eq!(
            ValidationReason::AboveMaximum.message(&rules),
            "O valor deve ser menor que 50"
        );
        assert_eq!(ValidationReason::Required.message(&rules), "Este campo é obrigatório");
    }

    #[test]
    fn failure_display_names_question() {
        let failure = ValidationFailure {
            field: QuestionId::new(9),
            reason: ValidationReason::NotANumber,
        };
        assert_eq!(failure.to_string(), "invalid answer for question 9: input is not a number");
    }
}
