use serde::{Deserialize, Serialize};

use crate::model::AnswerMap;

//
// ─── TABLES ────────────────────────────────────────────────────────────────────
//

/// Answer index holding the size category.
pub const SIZE_CATEGORY_INDEX: usize = 0;
/// Answer index holding the typed current size.
pub const CURRENT_SIZE_INDEX: usize = 8;

pub const DEFAULT_CURRENT_SIZE: f64 = 12.0;
pub const DEFAULT_BASE_INCREASE: f64 = 7.0;
pub const MIN_INCREASE: f64 = 3.0;
pub const MAX_INCREASE: f64 = 10.0;

pub const SUCCESS_RATE: u32 = 97;
/// Minutes per day.
pub const TIME_REQUIRED: u32 = 15;
/// Days.
pub const PROGRAM_DURATION: u32 = 30;

/// Base increase per size category.
const SIZE_BASES: &[(&str, f64)] = &[
    ("menos-12", 8.0),
    ("12-14", 7.0),
    ("14-16", 6.0),
    ("mais-16", 5.0),
];

/// Additive adjustment applied when the answer at `index` equals `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub index: usize,
    pub value: &'static str,
    pub delta: f64,
}

const fn adjust(index: usize, value: &'static str, delta: f64) -> Adjustment {
    Adjustment { index, value, delta }
}

/// Adjustments in evaluation order. Values missing from the table add nothing.
pub const ADJUSTMENTS: &[Adjustment] = &[
    // masturbation frequency
    adjust(1, "mais-uma-vez", -1.0),
    adjust(1, "raramente", 1.0),
    // morning erections
    adjust(2, "quase-nunca", -1.0),
    adjust(2, "quase-sempre", 1.0),
    // previous attempts
    adjust(3, "sim-disciplina", 1.0),
    adjust(3, "nunca-ouvi", 0.5),
    // diet
    adjust(4, "processada", -1.0),
    adjust(4, "natural-equilibrada", 1.0),
    // sleep
    adjust(5, "menos-5", -1.0),
    adjust(5, "8-mais", 1.0),
    // physical activity
    adjust(6, "nunca", -1.0),
    adjust(6, "4-mais", 1.0),
    // age
    adjust(7, "12-18", 1.0),
    adjust(7, "mais-36", -0.5),
];

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Derived outcome of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub current_size: f64,
    pub potential_increase: i32,
    pub potential_size: f64,
    pub success_rate: u32,
    pub time_required: u32,
    pub program_duration: u32,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Pure scoring over an answer map.
///
/// The engine never checks completeness: a missing size answer falls back to
/// [`DEFAULT_CURRENT_SIZE`] and missing categorical answers contribute zero.
///
/// # Examples
///
/// ```
/// # use quiz_core::{AnswerMap, ScoringEngine};
/// let answers: AnswerMap = [(0, "menos-12"), (8, "13")].into_iter().collect();
/// let result = ScoringEngine::new().compute_result(&answers);
/// assert_eq!(result.potential_increase, 8);
/// assert_eq!(result.potential_size, 21.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn compute_result(&self, answers: &AnswerMap) -> QuizResult {
        let current_size = answers
            .numeric(CURRENT_SIZE_INDEX)
            .unwrap_or(DEFAULT_CURRENT_SIZE);

        let potential_increase = Self::rounded_increase(Self::raw_increase(answers));

        QuizResult {
            current_size,
            potential_increase,
            potential_size: current_size + f64::from(potential_increase),
            success_rate: SUCCESS_RATE,
            time_required: TIME_REQUIRED,
            program_duration: PROGRAM_DURATION,
        }
    }

    /// Base plus all matching adjustments, before clamping and rounding.
    #[must_use]
    pub fn raw_increase(answers: &AnswerMap) -> f64 {
        let base = answers
            .get(SIZE_CATEGORY_INDEX)
            .and_then(|category| {
                SIZE_BASES
                    .iter()
                    .find(|(value, _)| *value == category)
                    .map(|(_, base)| *base)
            })
            .unwrap_or(DEFAULT_BASE_INCREASE);

        ADJUSTMENTS
            .iter()
            .filter(|adj| answers.get(adj.index) == Some(adj.value))
            .fold(base, |total, adj| total + adj.delta)
    }

    /// Clamps to `[MIN_INCREASE, MAX_INCREASE]` and rounds half-up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_increase(raw: f64) -> i32 {
        // Clamped values are positive, so floor(x + 0.5) is half-up.
        (raw.clamp(MIN_INCREASE, MAX_INCREASE) + 0.5).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(usize, &str)]) -> AnswerMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn all_positive_answers_clamp_to_max() {
        let map = answers(&[
            (0, "menos-12"),
            (1, "raramente"),
            (2, "quase-sempre"),
            (3, "sim-disciplina"),
            (4, "natural-equilibrada"),
            (5, "8-mais"),
            (6, "4-mais"),
            (7, "12-18"),
            (8, "13"),
        ]);
        assert_eq!(ScoringEngine::raw_increase(&map), 15.0);

        let result = ScoringEngine::new().compute_result(&map);
        assert_eq!(
            result,
            QuizResult {
                current_size: 13.0,
                potential_increase: 10,
                potential_size: 23.0,
                success_rate: 97,
                time_required: 15,
                program_duration: 30,
            }
        );
    }

    #[test]
    fn all_negative_answers_clamp_to_min_and_default_size() {
        let map = answers(&[
            (0, "mais-16"),
            (1, "mais-uma-vez"),
            (2, "quase-nunca"),
            (3, "tentei-sem-constancia"),
            (4, "processada"),
            (5, "menos-5"),
            (6, "nunca"),
            (7, "mais-36"),
        ]);
        assert_eq!(ScoringEngine::raw_increase(&map), -0.5);

        let result = ScoringEngine::new().compute_result(&map);
        assert_eq!(result.current_size, 12.0);
        assert_eq!(result.potential_increase, 3);
        assert_eq!(result.potential_size, 15.0);
    }

    #[test]
    fn empty_answers_use_defaults() {
        let result = ScoringEngine::new().compute_result(&AnswerMap::new());
        assert_eq!(result.current_size, DEFAULT_CURRENT_SIZE);
        assert_eq!(result.potential_increase, 7);
        assert_eq!(result.potential_size, 19.0);
    }

    #[test]
    fn size_category_sets_base() {
        for (category, expected) in [("menos-12", 8), ("12-14", 7), ("14-16", 6), ("mais-16", 5)] {
            let result = ScoringEngine::new().compute_result(&answers(&[(0, category)]));
            assert_eq!(result.potential_increase, expected, "{category}");
        }
        let unknown = ScoringEngine::new().compute_result(&answers(&[(0, "huge")]));
        assert_eq!(unknown.potential_increase, 7);
    }

    #[test]
    fn half_steps_round_up() {
        // 7 + 0.5 (nunca-ouvi) = 7.5 -> 8
        let result = ScoringEngine::new().compute_result(&answers(&[(3, "nunca-ouvi")]));
        assert_eq!(result.potential_increase, 8);

        // 7 - 0.5 (mais-36) = 6.5 -> 7
        let result = ScoringEngine::new().compute_result(&answers(&[(7, "mais-36")]));
        assert_eq!(result.potential_increase, 7);
    }

    #[test]
    fn values_only_count_at_their_own_index() {
        // "raramente" is an option of question 3 too, but only index 1 scores it.
        let result = ScoringEngine::new().compute_result(&answers(&[(2, "raramente")]));
        assert_eq!(result.potential_increase, 7);
    }

    #[test]
    fn non_numeric_size_falls_back_to_default() {
        let result = ScoringEngine::new().compute_result(&answers(&[(8, "abc")]));
        assert_eq!(result.current_size, 12.0);
    }

    #[test]
    fn zero_and_negative_sizes_propagate() {
        let zero = ScoringEngine::new().compute_result(&answers(&[(8, "0")]));
        assert_eq!(zero.current_size, 0.0);
        assert_eq!(zero.potential_size, 7.0);

        let negative = ScoringEngine::new().compute_result(&answers(&[(8, "-4")]));
        assert_eq!(negative.current_size, -4.0);
        assert_eq!(negative.potential_size, 3.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let map = answers(&[(0, "14-16"), (3, "nunca-ouvi"), (8, "15.5")]);
        let engine = ScoringEngine::new();
        let first = engine.compute_result(&map);
        let second = engine.compute_result(&map);
        assert_eq!(first, second);
        assert_eq!(first.potential_size.to_bits(), second.potential_size.to_bits());
        assert_eq!(first.potential_increase, 7);
        assert_eq!(first.potential_size, 22.5);
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let result = ScoringEngine::new().compute_result(&AnswerMap::new());
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["potentialIncrease"], 7);
        assert_eq!(json["successRate"], 97);
        assert_eq!(json["programDuration"], 30);
    }
}
