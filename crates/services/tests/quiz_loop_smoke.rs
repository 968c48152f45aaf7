use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{BATCH_SIZE, Category, CategoryId, QuestionType, Question, QuizFilters};
use quiz_core::time::fixed_now;
use services::{AppServices, Clock, QuestionSource, QuizPhase, QuizStep, SeededShuffler, SourceError};
use storage::repository::Storage;

struct FixtureSource;

#[async_trait]
impl QuestionSource for FixtureSource {
    async fn list_categories(&self) -> Result<Vec<Category>, SourceError> {
        Ok(vec![Category::new(CategoryId::new(18), "Science: Computers")])
    }

    async fn fetch_question_batch(
        &self,
        _filters: &QuizFilters,
    ) -> Result<Vec<Question>, SourceError> {
        Ok((0..BATCH_SIZE)
            .map(|idx| {
                Question::new(format!("Statement {idx} is true."), "True", vec!["False".into()])
                    .with_metadata(None, None, Some(QuestionType::Boolean))
            })
            .collect())
    }
}

#[tokio::test]
async fn quiz_loop_persists_final_result() {
    let storage = Storage::in_memory();
    let services = AppServices::from_parts(
        Clock::fixed(fixed_now()),
        &storage,
        Arc::new(FixtureSource),
        Arc::new(SeededShuffler::new(1)),
    );

    let categories = services.quiz_setup().load_categories().await;
    assert_eq!(categories[0].name, "Science: Computers");

    let filters = QuizFilters::any().with_kind(QuestionType::Boolean);
    services.quiz_setup().prepare_quiz(&filters).await.unwrap();

    let loop_svc = services.quiz_loop();
    let mut session = loop_svc.start_session().await.unwrap();
    assert_eq!(session.phase(), QuizPhase::Active(0));

    let mut finished = false;
    while let Some(idx) = session.current_index() {
        let chosen = if idx % 2 == 0 { "True" } else { "False" };
        loop_svc.select_answer(&mut session, chosen);
        let step = loop_svc.advance(&mut session, idx).await.unwrap();
        finished = step == QuizStep::Finished;
    }
    assert!(finished);

    let result = services
        .quiz_results()
        .latest_result()
        .await
        .unwrap()
        .expect("result persisted");
    assert_eq!(result.answers().len(), BATCH_SIZE);
    assert_eq!(result.correct(), 5);
    assert_eq!(result.wrong(), 5);
    assert_eq!(result.percentage(), 50);
}
