/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    /// One-based number of the question on screen; zero before load.
    pub current_number: usize,
    pub percent_complete: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    pub(crate) fn new(total: usize, answered: usize, current_number: usize, is_complete: bool) -> Self {
        Self {
            total,
            answered,
            current_number,
            percent_complete: percent(current_number, total),
            is_complete,
        }
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 200 + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}
