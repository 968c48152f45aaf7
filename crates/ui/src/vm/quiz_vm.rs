use services::{QuizError, QuizLoopService, QuizPhase, QuizSession, QuizStep, SelectOutcome};

use crate::views::ViewError;
use super::html::sanitize_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    /// Move past question `index`; sent by the feedback timer and the manual control.
    Next { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Open,
    Correct,
    Chosen,
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open => "quiz-option",
            OptionState::Correct => "quiz-option quiz-option--correct",
            OptionState::Chosen => "quiz-option quiz-option--wrong",
            OptionState::Dimmed => "quiz-option quiz-option--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub text: String,
    pub html: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub was_correct: bool,
    pub correct_answer_html: String,
}

impl FeedbackVm {
    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.was_correct {
            "Correct! 🎉"
        } else {
            "Incorrect! 😕"
        }
    }
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.session.current_index()
    }

    #[must_use]
    pub fn question_html(&self) -> Option<String> {
        self.session
            .current_question()
            .map(|presented| sanitize_html(presented.question().prompt()))
    }

    /// Category and difficulty shown above the prompt, when the source supplied them.
    #[must_use]
    pub fn metadata_label(&self) -> Option<String> {
        let question = self.session.current_question()?.question();
        let parts: Vec<String> = [
            question.category().map(sanitize_html),
            question.difficulty().map(|difficulty| difficulty.label().to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }

    #[must_use]
    pub fn options(&self) -> Vec<AnswerOptionVm> {
        let Some(presented) = self.session.current_question() else {
            return Vec::new();
        };
        let chosen = self
            .session
            .last_answer()
            .map(|record| record.chosen_answer.as_str());

        presented
            .answer_options()
            .iter()
            .map(|option| {
                let state = match chosen {
                    None => OptionState::Open,
                    Some(_) if presented.is_correct(option) => OptionState::Correct,
                    Some(chosen) if chosen == option => OptionState::Chosen,
                    Some(_) => OptionState::Dimmed,
                };
                AnswerOptionVm {
                    text: option.clone(),
                    html: sanitize_html(option),
                    state,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        self.session.last_answer().map(|record| FeedbackVm {
            was_correct: record.was_correct,
            correct_answer_html: sanitize_html(&record.correct_answer),
        })
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.current_number, progress.total)
    }

    #[must_use]
    pub fn percent_complete(&self) -> u32 {
        self.session.progress().percent_complete
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        let progress = self.session.progress();
        if progress.current_number >= progress.total {
            "Finish Quiz"
        } else {
            "Next Question →"
        }
    }

    /// Commit `chosen`; returns the index whose feedback is now showing.
    pub fn select(&mut self, quiz_loop: &QuizLoopService, chosen: &str) -> Option<usize> {
        match quiz_loop.select_answer(&mut self.session, chosen) {
            SelectOutcome::Committed(_) => self.session.current_index(),
            SelectOutcome::Ignored => None,
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the final result cannot be stored.
    pub async fn advance(
        &mut self,
        quiz_loop: &QuizLoopService,
        index: usize,
    ) -> Result<QuizStep, ViewError> {
        quiz_loop
            .advance(&mut self.session, index)
            .await
            .map_err(|_| ViewError::Unknown)
    }

    /// Retry storing the result of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NoData` if the quiz has not completed.
    /// Returns `ViewError::Unknown` if the result cannot be stored.
    pub async fn finalize(&mut self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        match quiz_loop.finalize_result(&mut self.session).await {
            Ok(_) => Ok(()),
            Err(QuizError::NoData) => Err(ViewError::NoData),
            Err(_) => Err(ViewError::Unknown),
        }
    }
}

/// # Errors
///
/// Returns `ViewError::NoData` when no question batch is pending.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let session = quiz_loop
        .start_session()
        .await
        .map_err(|_| ViewError::Unknown)?;
    if session.phase() == QuizPhase::NoData {
        return Err(ViewError::NoData);
    }
    Ok(QuizVm::new(session))
}
