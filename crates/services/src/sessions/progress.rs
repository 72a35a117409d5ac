/// Snapshot of quiz progress for progress bars and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    /// `position / total` as a whole percentage, rounded.
    pub percent: u32,
    pub is_last: bool,
    pub is_complete: bool,
}
