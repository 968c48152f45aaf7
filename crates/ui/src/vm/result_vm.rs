use quiz_core::model::{FinalResult, Performance};
use services::QuizResultService;

use crate::views::ViewError;
use super::html::sanitize_html;
use super::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerReviewVm {
    pub number: usize,
    pub question_html: String,
    pub chosen_html: String,
    pub correct_html: String,
    pub was_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
    pub percentage: u32,
    pub performance: Performance,
    pub completed_at: String,
    pub answers: Vec<AnswerReviewVm>,
}

impl ResultVm {
    #[must_use]
    pub fn message(&self) -> &'static str {
        performance_message(self.performance)
    }

    #[must_use]
    pub fn performance_class(&self) -> &'static str {
        match self.performance {
            Performance::Excellent => "result-score result-score--excellent",
            Performance::Good => "result-score result-score--good",
            Performance::KeepPracticing => "result-score result-score--practice",
        }
    }
}

#[must_use]
pub fn performance_message(performance: Performance) -> &'static str {
    match performance {
        Performance::Excellent => "🎉 Excellent job! You're a quiz master!",
        Performance::Good => "👍 Good effort! Keep learning!",
        Performance::KeepPracticing => "📚 Keep practicing, you'll improve!",
    }
}

#[must_use]
pub fn map_result(result: &FinalResult) -> ResultVm {
    let answers = result
        .answers()
        .iter()
        .enumerate()
        .map(|(idx, record)| AnswerReviewVm {
            number: idx + 1,
            question_html: sanitize_html(&record.question_prompt),
            chosen_html: sanitize_html(&record.chosen_answer),
            correct_html: sanitize_html(&record.correct_answer),
            was_correct: record.was_correct,
        })
        .collect();

    ResultVm {
        correct: result.correct(),
        wrong: result.wrong(),
        total: result.total(),
        percentage: result.percentage(),
        performance: result.performance(),
        completed_at: format_datetime(result.completed_at()),
        answers,
    }
}

/// # Errors
///
/// Returns `ViewError::NoData` when no quiz was completed yet.
/// Returns `ViewError::Unknown` for storage failures.
pub async fn load_latest_result(results: &QuizResultService) -> Result<ResultVm, ViewError> {
    let result = results
        .latest_result()
        .await
        .map_err(|_| ViewError::Unknown)?
        .ok_or(ViewError::NoData)?;
    Ok(map_result(&result))
}
