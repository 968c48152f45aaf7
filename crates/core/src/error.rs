use thiserror::Error;

/// Validation errors for quiz domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    #[error("invalid category id: {0}")]
    InvalidCategoryId(String),

    #[error("score counts ({correct} correct + {wrong} wrong) do not match {answers} answers")]
    CountMismatch {
        correct: u32,
        wrong: u32,
        answers: usize,
    },

    #[error("too many answers for a single session: {len}")]
    TooManyAnswers { len: usize },
}
