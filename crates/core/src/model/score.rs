use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The committed answer for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    #[serde(rename = "question")]
    pub question_prompt: String,
    pub correct_answer: String,
    pub chosen_answer: String,
    #[serde(rename = "isCorrect")]
    pub was_correct: bool,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(
        question_prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        chosen_answer: impl Into<String>,
    ) -> Self {
        let correct_answer = correct_answer.into();
        let chosen_answer = chosen_answer.into();
        let was_correct = chosen_answer == correct_answer;
        Self {
            question_prompt: question_prompt.into(),
            correct_answer,
            chosen_answer,
            was_correct,
        }
    }
}

/// Running score of a quiz session.
///
/// Append-only: each resolved question adds one record and bumps exactly one counter,
/// so `correct + wrong == answers.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedScore")]
pub struct SessionScore {
    correct: u32,
    wrong: u32,
    answers: Vec<AnswerRecord>,
}

impl SessionScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a score from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::CountMismatch` if the counters disagree with the records.
    pub fn from_persisted(
        correct: u32,
        wrong: u32,
        answers: Vec<AnswerRecord>,
    ) -> Result<Self, ModelError> {
        let (actual_correct, actual_wrong) = count(&answers)?;
        if actual_correct != correct || actual_wrong != wrong {
            return Err(ModelError::CountMismatch {
                correct,
                wrong,
                answers: answers.len(),
            });
        }
        Ok(Self {
            correct,
            wrong,
            answers,
        })
    }

    /// Append a committed answer and bump the matching counter.
    pub fn record(&mut self, record: AnswerRecord) {
        if record.was_correct {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.wrong = self.wrong.saturating_add(1);
        }
        self.answers.push(record);
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.wrong)
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

fn count(answers: &[AnswerRecord]) -> Result<(u32, u32), ModelError> {
    let correct = answers.iter().filter(|answer| answer.was_correct).count();
    let wrong = answers.len() - correct;
    let to_u32 =
        |value: usize| u32::try_from(value).map_err(|_| ModelError::TooManyAnswers { len: answers.len() });
    Ok((to_u32(correct)?, to_u32(wrong)?))
}

#[derive(Deserialize)]
struct PersistedScore {
    correct: u32,
    wrong: u32,
    answers: Vec<AnswerRecord>,
}

impl TryFrom<PersistedScore> for SessionScore {
    type Error = ModelError;

    fn try_from(value: PersistedScore) -> Result<Self, Self::Error> {
        Self::from_persisted(value.correct, value.wrong, value.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_counts_in_step_with_answers() {
        let mut score = SessionScore::new();
        let records = [
            AnswerRecord::new("Q1", "A", "A"),
            AnswerRecord::new("Q2", "A", "B"),
            AnswerRecord::new("Q3", "True", "True"),
        ];

        for (idx, record) in records.into_iter().enumerate() {
            score.record(record);
            let resolved = u32::try_from(idx + 1).unwrap();
            assert_eq!(score.correct() + score.wrong(), resolved);
            assert_eq!(score.answers().len(), (score.correct() + score.wrong()) as usize);
        }

        assert_eq!(score.correct(), 2);
        assert_eq!(score.wrong(), 1);
        assert_eq!(score.total(), 3);
    }

    #[test]
    fn answer_record_uses_exact_equality() {
        assert!(AnswerRecord::new("Q", "Paris", "Paris").was_correct);
        assert!(!AnswerRecord::new("Q", "Paris", "PARIS").was_correct);
    }

    #[test]
    fn serializes_with_review_field_names() {
        let mut score = SessionScore::new();
        score.record(AnswerRecord::new("Q", "A", "A"));
        let json = serde_json::to_value(&score).unwrap();

        assert_eq!(json["correct"], 1);
        assert_eq!(json["wrong"], 0);
        assert_eq!(json["answers"][0]["question"], "Q");
        assert_eq!(json["answers"][0]["correctAnswer"], "A");
        assert_eq!(json["answers"][0]["chosenAnswer"], "A");
        assert_eq!(json["answers"][0]["isCorrect"], true);

        let back: SessionScore = serde_json::from_value(json).unwrap();
        assert_eq!(back, score);
    }

    #[test]
    fn rejects_counts_that_disagree_with_answers() {
        let answers = vec![AnswerRecord::new("Q", "A", "B")];
        let err = SessionScore::from_persisted(1, 0, answers).unwrap_err();
        assert_eq!(
            err,
            ModelError::CountMismatch {
                correct: 1,
                wrong: 0,
                answers: 1
            }
        );

        let json = r#"{"correct": 2, "wrong": 0, "answers": []}"#;
        assert!(serde_json::from_str::<SessionScore>(json).is_err());
    }
}
