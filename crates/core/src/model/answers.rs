use std::collections::BTreeMap;

use crate::validation::parse_decimal;

/// Sparse map from 0-based question index to the stored answer.
///
/// Choice answers hold the option value; numeric answers hold the trimmed
/// text the user typed. Only answered indices are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: BTreeMap<usize, String>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `index`, returning the previous answer if any.
    pub fn insert(&mut self, index: usize, value: impl Into<String>) -> Option<String> {
        self.entries.insert(index, value.into())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Stored answer at `index` read as a decimal number.
    #[must_use]
    pub fn numeric(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(parse_decimal)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answers in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(|(i, v)| (*i, v.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(usize, V)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (usize, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(i, v)| (i, v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_and_reports_previous() {
        let mut answers = AnswerMap::new();
        assert_eq!(answers.insert(0, "menos-12"), None);
        assert_eq!(answers.insert(0, "12-14").as_deref(), Some("menos-12"));
        assert_eq!(answers.get(0), Some("12-14"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn numeric_reads_decimals_only() {
        let answers: AnswerMap = [(8, "13.5"), (1, "raramente")].into_iter().collect();
        assert_eq!(answers.numeric(8), Some(13.5));
        assert_eq!(answers.numeric(1), None);
        assert_eq!(answers.numeric(4), None);
    }

    #[test]
    fn iter_is_index_ordered() {
        let answers: AnswerMap = [(5, "b"), (2, "a")].into_iter().collect();
        let keys: Vec<_> = answers.iter().map(|(i, _)| i).collect();
        assert_eq!(keys, vec![2, 5]);
    }

    #[test]
    fn clear_empties_map() {
        let mut answers: AnswerMap = [(0, "x")].into_iter().collect();
        answers.clear();
        assert!(answers.is_empty());
        assert!(!answers.contains(0));
    }
}
