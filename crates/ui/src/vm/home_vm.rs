use quiz_core::model::{Category, CategoryId, Difficulty, QuestionType, QuizFilters};
use services::{QuizError, QuizSetupService};

use crate::views::ViewError;

/// One entry of a `<select>`; an empty value means "any".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[must_use]
pub fn category_options(categories: &[Category]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "Any Category"))
        .chain(
            categories
                .iter()
                .map(|category| SelectOption::new(category.id.to_string(), category.name.clone())),
        )
        .collect()
}

#[must_use]
pub fn difficulty_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "Any Difficulty"))
        .chain(
            Difficulty::ALL
                .into_iter()
                .map(|difficulty| SelectOption::new(difficulty.as_str(), difficulty.label())),
        )
        .collect()
}

#[must_use]
pub fn question_type_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "Any Type"))
        .chain(
            QuestionType::ALL
                .into_iter()
                .map(|kind| SelectOption::new(kind.as_str(), kind.label())),
        )
        .collect()
}

/// Raw values of the three selects on the home form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizSelection {
    pub category: String,
    pub difficulty: String,
    pub kind: String,
}

impl QuizSelection {
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if a select holds a value it never offered.
    pub fn to_filters(&self) -> Result<QuizFilters, ViewError> {
        let mut filters = QuizFilters::any();
        if let Some(value) = non_empty(&self.category) {
            filters = filters.with_category(parse::<CategoryId>(value)?);
        }
        if let Some(value) = non_empty(&self.difficulty) {
            filters = filters.with_difficulty(parse::<Difficulty>(value)?);
        }
        if let Some(value) = non_empty(&self.kind) {
            filters = filters.with_kind(parse::<QuestionType>(value)?);
        }
        Ok(filters)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse<T: std::str::FromStr>(value: &str) -> Result<T, ViewError> {
    value.parse().map_err(|_| ViewError::Unknown)
}

/// Fetch and store a batch for `filters`.
///
/// # Errors
///
/// Returns `ViewError::SourceUnavailable` when no batch could be fetched.
/// Returns `ViewError::Unknown` for other failures.
pub async fn prepare_quiz(setup: &QuizSetupService, filters: QuizFilters) -> Result<(), ViewError> {
    match setup.prepare_quiz(&filters).await {
        Ok(_) => Ok(()),
        Err(QuizError::SourceUnavailable(_)) => Err(ViewError::SourceUnavailable),
        Err(_) => Err(ViewError::Unknown),
    }
}
