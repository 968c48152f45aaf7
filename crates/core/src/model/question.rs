use serde::{Deserialize, Serialize};

use super::{Difficulty, QuestionType};

/// A trivia question as delivered by the question source.
///
/// Text fields may contain HTML entities or markup and are kept verbatim.
/// Field names follow the source's JSON so a fetched batch can be stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    prompt: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<QuestionType>,
}

impl Question {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
            category: None,
            difficulty: None,
            kind: None,
        }
    }

    /// Attach the source metadata shown next to the prompt.
    #[must_use]
    pub fn with_metadata(
        mut self,
        category: Option<String>,
        difficulty: Option<Difficulty>,
        kind: Option<QuestionType>,
    ) -> Self {
        self.category = category;
        self.difficulty = difficulty;
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn kind(&self) -> Option<QuestionType> {
        self.kind
    }

    /// Every answer the user can pick: the incorrect answers followed by the correct one.
    #[must_use]
    pub fn answer_pool(&self) -> Vec<String> {
        let mut pool = Vec::with_capacity(self.incorrect_answers.len() + 1);
        pool.extend(self.incorrect_answers.iter().cloned());
        pool.push(self.correct_answer.clone());
        pool
    }
}

/// A question with its answer options in the order they are shown.
///
/// The order is decided once, when the question is presented, and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    question: Question,
    answer_options: Vec<String>,
}

impl PresentedQuestion {
    /// Present a question, letting `permute` reorder the answer pool in place.
    ///
    /// Reordering in place keeps every option exactly as often as the source provided it.
    #[must_use]
    pub fn new(question: Question, permute: impl FnOnce(&mut [String])) -> Self {
        let mut answer_options = question.answer_pool();
        permute(&mut answer_options);
        Self {
            question,
            answer_options,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn answer_options(&self) -> &[String] {
        &self.answer_options
    }

    /// Exact text comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.question.correct_answer
    }
}
