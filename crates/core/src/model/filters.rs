use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CategoryId;
use crate::error::ModelError;

/// Number of questions fetched for one quiz run.
pub const BATCH_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ModelError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Answer format of a question: four-way multiple choice or true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Multiple,
    Boolean,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::Multiple, QuestionType::Boolean];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Multiple => "Multiple Choice",
            QuestionType::Boolean => "True / False",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiple" => Ok(QuestionType::Multiple),
            "boolean" => Ok(QuestionType::Boolean),
            _ => Err(ModelError::UnknownQuestionType(s.to_string())),
        }
    }
}

/// Optional constraints for a question batch. Absent fields impose no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizFilters {
    pub category: Option<CategoryId>,
    pub difficulty: Option<Difficulty>,
    pub kind: Option<QuestionType>,
}

impl QuizFilters {
    /// No filters: a random quiz across all categories, difficulties and types.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: QuestionType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        self.category.is_none() && self.difficulty.is_none() && self.kind.is_none()
    }

    /// Query parameters for a batch request, starting with the fixed `amount`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("amount", BATCH_SIZE.to_string())];
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", difficulty.as_str().to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.as_str().to_string()));
        }
        pairs
    }
}
