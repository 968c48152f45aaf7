use chrono::{DateTime, Utc};
use std::fmt;
use quiz_core::model::{AnswerRecord, FinalResult, PresentedQuestion, Question, SessionScore};

use crate::shuffle::AnswerShuffler;
use super::progress::QuizProgress;

//
// ─── PHASES & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Where a quiz run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the pending batch to be read.
    Loading,
    /// Question `i` is shown and accepts one answer.
    Active(usize),
    /// Question `i` was answered; its feedback is shown until the quiz advances.
    Feedback(usize),
    /// Every question was answered.
    Complete,
    /// No batch was available. Terminal.
    NoData,
}

/// Outcome of selecting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection was the first for the active question and is now part of the score.
    Committed(AnswerRecord),
    /// No question was accepting an answer.
    Ignored,
}

/// Outcome of advancing past a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { index: usize },
    /// The last question resolved. Yielded once per run.
    Completed(FinalResult),
    /// The trigger was stale or duplicated.
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for a single quiz run.
///
/// Steps through the loaded questions one at a time. Each question takes exactly one
/// answer and is then advanced past exactly once, either by the feedback timer or by
/// the manual control, whichever comes first.
pub struct QuizSession {
    phase: QuizPhase,
    questions: Vec<PresentedQuestion>,
    score: SessionScore,
    final_result: Option<FinalResult>,
    result_saved: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Loading,
            questions: Vec::new(),
            score: SessionScore::new(),
            final_result: None,
            result_saved: false,
        }
    }

    /// Build a session and load `batch` in one step.
    #[must_use]
    pub fn from_batch(batch: Option<Vec<Question>>, shuffler: &dyn AnswerShuffler) -> Self {
        let mut session = Self::new();
        session.load(batch, shuffler);
        session
    }

    /// Leave `Loading` with the given batch.
    ///
    /// Answer options are ordered once here and stay fixed for the rest of the run.
    /// A missing or empty batch ends in `NoData`. Has no effect outside `Loading`.
    pub fn load(&mut self, batch: Option<Vec<Question>>, shuffler: &dyn AnswerShuffler) -> QuizPhase {
        if self.phase != QuizPhase::Loading {
            return self.phase;
        }

        let batch = batch.unwrap_or_default();
        if batch.is_empty() {
            self.phase = QuizPhase::NoData;
            return self.phase;
        }

        self.questions = batch
            .into_iter()
            .map(|question| PresentedQuestion::new(question, |options| shuffler.shuffle(options)))
            .collect();
        self.phase = QuizPhase::Active(0);
        self.phase
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[PresentedQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn score(&self) -> &SessionScore {
        &self.score
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Complete
    }

    /// Index of the question on screen, if any.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::Active(idx) | QuizPhase::Feedback(idx) => Some(idx),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&PresentedQuestion> {
        self.current_index().and_then(|idx| self.questions.get(idx))
    }

    /// The committed answer for the question whose feedback is showing.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        match self.phase {
            QuizPhase::Feedback(_) => self.score.answers().last(),
            _ => None,
        }
    }

    #[must_use]
    pub fn final_result(&self) -> Option<&FinalResult> {
        self.final_result.as_ref()
    }

    /// Returns a summary of the current quiz progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        let current_number = match self.phase {
            QuizPhase::Active(idx) | QuizPhase::Feedback(idx) => idx + 1,
            QuizPhase::Complete => total,
            QuizPhase::Loading | QuizPhase::NoData => 0,
        };
        QuizProgress::new(
            total,
            self.score.answers().len(),
            current_number,
            self.is_complete(),
        )
    }

    /// Commit `chosen` as the answer to the active question.
    ///
    /// Only the first selection per question counts; the exact text is compared
    /// against the correct answer.
    pub fn select_answer(&mut self, chosen: &str) -> SelectOutcome {
        let QuizPhase::Active(idx) = self.phase else {
            return SelectOutcome::Ignored;
        };
        let Some(presented) = self.questions.get(idx) else {
            return SelectOutcome::Ignored;
        };

        let question = presented.question();
        let record = AnswerRecord::new(question.prompt(), question.correct_answer(), chosen);
        self.score.record(record.clone());
        self.phase = QuizPhase::Feedback(idx);
        SelectOutcome::Committed(record)
    }

    /// Move past question `index` once its feedback has been shown.
    ///
    /// Advancing is keyed by index so that the timer and the manual control can
    /// both fire for the same question without skipping the next one.
    pub fn advance(&mut self, index: usize, completed_at: DateTime<Utc>) -> AdvanceOutcome {
        if self.phase != QuizPhase::Feedback(index) {
            return AdvanceOutcome::Ignored;
        }

        let next = index + 1;
        if next < self.questions.len() {
            self.phase = QuizPhase::Active(next);
            return AdvanceOutcome::Next { index: next };
        }

        let result = FinalResult::new(self.score.clone(), completed_at);
        self.final_result = Some(result.clone());
        self.phase = QuizPhase::Complete;
        AdvanceOutcome::Completed(result)
    }

    pub(crate) fn result_saved(&self) -> bool {
        self.result_saved
    }

    pub(crate) fn mark_result_saved(&mut self) {
        self.result_saved = true;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("correct", &self.score.correct())
            .field("wrong", &self.score.wrong())
            .field("result_saved", &self.result_saved)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
