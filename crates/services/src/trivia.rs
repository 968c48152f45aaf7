use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{BATCH_SIZE, Category, Question, QuizFilters};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;

/// Public Open Trivia DB endpoint.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct TriviaConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TriviaConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Environment variable overriding the API base URL.
    pub const BASE_URL_VAR: &'static str = "QUIZ_API_BASE_URL";

    /// Reads `QUIZ_API_BASE_URL` through `lookup`, falling back to the public endpoint.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup(Self::BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn categories_url(&self) -> String {
        format!("{}/api_category.php", self.base_url.trim_end_matches('/'))
    }

    #[must_use]
    pub fn questions_url(&self) -> String {
        format!("{}/api.php", self.base_url.trim_end_matches('/'))
    }
}

/// Read-only source of trivia categories and question batches.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// List the selectable categories in source order.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on network, status or decoding failure.
    async fn list_categories(&self) -> Result<Vec<Category>, SourceError>;

    /// Fetch exactly `BATCH_SIZE` questions matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on network, status or decoding failure, when the
    /// source rejects the query, or when the batch has the wrong size.
    async fn fetch_question_batch(&self, filters: &QuizFilters)
    -> Result<Vec<Question>, SourceError>;
}

/// HTTP client for the Open Trivia DB API.
#[derive(Clone)]
pub struct TriviaClient {
    client: Client,
    config: TriviaConfig,
}

impl TriviaClient {
    #[must_use]
    pub fn new(config: TriviaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_text(
        &self,
        url: String,
        query: &[(&'static str, String)],
    ) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.config.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl QuestionSource for TriviaClient {
    async fn list_categories(&self) -> Result<Vec<Category>, SourceError> {
        let body = self.get_text(self.config.categories_url(), &[]).await?;
        let categories = decode_categories(&body)?;
        tracing::debug!(count = categories.len(), "fetched trivia categories");
        Ok(categories)
    }

    async fn fetch_question_batch(
        &self,
        filters: &QuizFilters,
    ) -> Result<Vec<Question>, SourceError> {
        let query = filters.query_pairs();
        let body = self.get_text(self.config.questions_url(), &query).await?;
        let batch = decode_batch(&body)?;
        tracing::debug!(?filters, count = batch.len(), "fetched question batch");
        Ok(batch)
    }
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    trivia_categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct QuestionResponse {
    #[serde(default)]
    response_code: u8,
    #[serde(default)]
    results: Vec<Question>,
}

/// Decode a category list body.
///
/// # Errors
///
/// Returns `SourceError::Decode` if the body is not a category list.
pub fn decode_categories(body: &str) -> Result<Vec<Category>, SourceError> {
    let response: CategoryResponse = serde_json::from_str(body)?;
    Ok(response.trivia_categories)
}

/// Decode a question batch body, enforcing the response code and batch size.
///
/// # Errors
///
/// Returns `SourceError::Decode` for malformed bodies, `SourceError::ResponseCode`
/// when the source rejected the query, and `SourceError::BatchSize` when the
/// batch does not hold exactly `BATCH_SIZE` questions.
pub fn decode_batch(body: &str) -> Result<Vec<Question>, SourceError> {
    let response: QuestionResponse = serde_json::from_str(body)?;
    if response.response_code != 0 {
        return Err(SourceError::ResponseCode {
            code: response.response_code,
            reason: response_code_reason(response.response_code),
        });
    }
    if response.results.len() != BATCH_SIZE {
        return Err(SourceError::BatchSize {
            expected: BATCH_SIZE,
            got: response.results.len(),
        });
    }
    Ok(response.results)
}

fn response_code_reason(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for this selection",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited",
        _ => "unknown response code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CategoryId, Difficulty, QuestionType};

    fn question_json(idx: usize) -> String {
        format!(
            r#"{{"type":"multiple","difficulty":"medium","category":"General Knowledge",
                "question":"Question {idx}?","correct_answer":"Right {idx}",
                "incorrect_answers":["Wrong A","Wrong B","Wrong C"]}}"#
        )
    }

    fn batch_json(code: u8, count: usize) -> String {
        let results: Vec<String> = (0..count).map(question_json).collect();
        format!(
            r#"{{"response_code":{code},"results":[{}]}}"#,
            results.join(",")
        )
    }

    #[test]
    fn decodes_category_list_in_source_order() {
        let body = r#"{"trivia_categories":[
            {"id":9,"name":"General Knowledge"},
            {"id":10,"name":"Entertainment: Books"}
        ]}"#;
        let categories = decode_categories(body).unwrap();

        assert_eq!(
            categories,
            vec![
                Category::new(CategoryId::new(9), "General Knowledge"),
                Category::new(CategoryId::new(10), "Entertainment: Books"),
            ]
        );
    }

    #[test]
    fn malformed_category_body_is_a_decode_error() {
        let err = decode_categories("<html>busy</html>").unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn full_batch_decodes_ten_questions() {
        let batch = decode_batch(&batch_json(0, BATCH_SIZE)).unwrap();

        assert_eq!(batch.len(), 10);
        assert_eq!(batch[0].prompt(), "Question 0?");
        assert_eq!(batch[0].correct_answer(), "Right 0");
        assert_eq!(batch[0].difficulty(), Some(Difficulty::Medium));
        assert_eq!(batch[0].kind(), Some(QuestionType::Multiple));
    }

    #[test]
    fn rejected_query_surfaces_response_code() {
        let err = decode_batch(&batch_json(1, 0)).unwrap_err();
        assert!(matches!(err, SourceError::ResponseCode { code: 1, .. }));
        assert!(err.to_string().contains("not enough questions"));
    }

    #[test]
    fn short_batch_is_rejected() {
        let err = decode_batch(&batch_json(0, 4)).unwrap_err();
        assert!(matches!(
            err,
            SourceError::BatchSize {
                expected: 10,
                got: 4
            }
        ));
    }

    #[test]
    fn urls_tolerate_trailing_slash() {
        let config = TriviaConfig::new("http://localhost:8080/");
        assert_eq!(config.categories_url(), "http://localhost:8080/api_category.php");
        assert_eq!(config.questions_url(), "http://localhost:8080/api.php");
        assert_eq!(TriviaConfig::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_ignores_blank_values() {
        let config = TriviaConfig::from_lookup(|key| {
            (key == "QUIZ_API_BASE_URL").then(|| "http://127.0.0.1:9000".to_string())
        });
        assert_eq!(config.base_url, "http://127.0.0.1:9000");

        let blank = TriviaConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(blank.base_url, DEFAULT_BASE_URL);
        assert_eq!(TriviaConfig::from_lookup(|_| None).base_url, DEFAULT_BASE_URL);
    }
}
