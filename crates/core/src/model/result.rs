use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerRecord, SessionScore};
use crate::error::ModelError;

/// Percentage at or above which a result counts as excellent.
pub const EXCELLENT_THRESHOLD: u32 = 80;
/// Percentage at or above which a result counts as good.
pub const GOOD_THRESHOLD: u32 = 60;

/// Coarse rating of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Excellent,
    Good,
    KeepPracticing,
}

impl Performance {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            Performance::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            Performance::Good
        } else {
            Performance::KeepPracticing
        }
    }
}

/// Score of a completed session, frozen when the last question resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FinalResultRecord", into = "FinalResultRecord")]
pub struct FinalResult {
    score: SessionScore,
    completed_at: DateTime<Utc>,
}

impl FinalResult {
    #[must_use]
    pub fn new(score: SessionScore, completed_at: DateTime<Utc>) -> Self {
        Self {
            score,
            completed_at,
        }
    }

    #[must_use]
    pub fn score(&self) -> &SessionScore {
        &self.score
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.score.correct()
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.score.wrong()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.score.total()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        self.score.answers()
    }

    /// Share of correct answers, rounded half up to a whole percent. Zero for an empty score.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let total = u64::from(self.total());
        if total == 0 {
            return 0;
        }
        let correct = u64::from(self.correct());
        let rounded = (correct * 200 + total) / (2 * total);
        u32::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinalResultRecord {
    correct: u32,
    wrong: u32,
    answers: Vec<AnswerRecord>,
    completed_at: DateTime<Utc>,
}

impl From<FinalResult> for FinalResultRecord {
    fn from(value: FinalResult) -> Self {
        let FinalResult {
            score,
            completed_at,
        } = value;
        Self {
            correct: score.correct(),
            wrong: score.wrong(),
            answers: score.answers().to_vec(),
            completed_at,
        }
    }
}

impl TryFrom<FinalResultRecord> for FinalResult {
    type Error = ModelError;

    fn try_from(value: FinalResultRecord) -> Result<Self, Self::Error> {
        let score = SessionScore::from_persisted(value.correct, value.wrong, value.answers)?;
        Ok(Self::new(score, value.completed_at))
    }
}
