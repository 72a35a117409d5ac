use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based position of a question inside its catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Id for the question stored at the given 0-based catalog index.
    ///
    /// Saturates at `u32::MAX` for indices that cannot be represented.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let id = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .unwrap_or(u32::MAX);
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// 0-based catalog index, `None` for the invalid id `0`.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.0
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
