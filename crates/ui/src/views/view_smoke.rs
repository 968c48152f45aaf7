use quiz_core::model::{AnswerRecord, Difficulty, FinalResult, Question, QuestionType, SessionScore};
use quiz_core::time::{FEEDBACK_DELAY, fixed_now};
use std::sync::atomic::Ordering;

use crate::vm::QuizIntent;
use super::test_harness::{ViewKind, setup_view_harness};

fn fixture_batch() -> Vec<Question> {
    vec![
        Question::new("Is &quot;Rust&quot; a language?", "True", vec!["False".into()])
            .with_metadata(
                Some("Science: Computers".into()),
                Some(Difficulty::Easy),
                Some(QuestionType::Boolean),
            ),
        Question::new("2 + 2 = ?", "4", vec!["3".into(), "5".into(), "22".into()])
            .with_metadata(None, Some(Difficulty::Medium), Some(QuestionType::Multiple)),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_lists_categories_and_actions() {
    let mut harness = setup_view_harness(ViewKind::Home, fixture_batch());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Quiz Challenge"), "missing title in {html}");
    assert!(html.contains("Any Category"), "missing default option in {html}");
    assert!(html.contains("General Knowledge"), "missing category in {html}");
    assert!(html.contains("Start Quiz"), "missing start in {html}");
    assert!(html.contains("Random Quiz"), "missing random in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_runs_one_fetch_for_clicks_in_the_same_frame() {
    let mut harness = setup_view_harness(ViewKind::Home, fixture_batch());

    harness.rebuild();
    harness.drive_async().await;
    harness.double_start().await;

    assert_eq!(harness.fetches.load(Ordering::SeqCst), 1);
    let pending = harness
        .storage
        .session_store()
        .take_pending_batch()
        .await
        .expect("read batch");
    assert_eq!(pending, Some(fixture_batch()));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_without_batch_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz, fixture_batch());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("No Quiz Found"), "missing empty state in {html}");
    assert!(html.contains("Start New Quiz"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_walks_through_feedback_and_completion() {
    let mut harness = setup_view_harness(ViewKind::Quiz, fixture_batch());
    harness
        .services
        .quiz_setup()
        .prepare_random_quiz()
        .await
        .expect("prepare quiz");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("50% Complete"), "missing percent in {html}");
    assert!(html.contains("Science: Computers"), "missing metadata in {html}");

    harness.dispatch(QuizIntent::Select("False".into())).await;
    let html = harness.render();
    assert!(html.contains("Incorrect! 😕"), "missing feedback in {html}");
    assert!(html.contains("The correct answer is: "), "missing answer in {html}");
    assert!(html.contains("Next Question →"), "missing next in {html}");

    // A second pick for the same question is ignored.
    harness.dispatch(QuizIntent::Select("True".into())).await;
    assert!(harness.render().contains("Incorrect! 😕"));

    harness.dispatch(QuizIntent::Next { index: 0 }).await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing second question in {html}");
    assert!(html.contains("100% Complete"), "missing percent in {html}");

    harness.dispatch(QuizIntent::Select("4".into())).await;
    let html = harness.render();
    assert!(html.contains("Correct! 🎉"), "missing feedback in {html}");
    assert!(html.contains("Finish Quiz"), "missing finish in {html}");

    harness.dispatch(QuizIntent::Next { index: 1 }).await;
    // A stale advance for the finished question changes nothing.
    harness.dispatch(QuizIntent::Next { index: 1 }).await;

    let result = harness
        .services
        .quiz_results()
        .latest_result()
        .await
        .expect("load result")
        .expect("result stored");
    assert_eq!(result.correct(), 1);
    assert_eq!(result.wrong(), 1);
    assert_eq!(result.percentage(), 50);
    assert_eq!(result.completed_at(), fixed_now());
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_without_data_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Result, Vec::new());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("No Results Found"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_renders_score_and_review() {
    let mut harness = setup_view_harness(ViewKind::Result, Vec::new());
    let mut score = SessionScore::new();
    for chosen in ["yes", "yes", "yes", "yes", "no"] {
        score.record(AnswerRecord::new("Is it &amp; true?", "yes", chosen));
    }
    harness
        .storage
        .session_store()
        .put_final_result(&FinalResult::new(score, fixed_now()))
        .await
        .expect("store result");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("80%"), "missing percentage in {html}");
    assert!(html.contains("Quiz Completed!"), "missing heading in {html}");
    assert!(html.contains("Excellent job!"), "missing message in {html}");
    assert!(html.contains("Review Answers"), "missing review in {html}");
    assert!(html.contains("Completed 2023-11-14 22:13 UTC"), "missing time in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_view_advances_after_feedback_delay() {
    let mut harness = setup_view_harness(ViewKind::Quiz, fixture_batch());
    harness
        .services
        .quiz_setup()
        .prepare_random_quiz()
        .await
        .expect("prepare quiz");

    harness.rebuild();
    harness.drive_async().await;
    harness.dispatch(QuizIntent::Select("True".into())).await;
    let html = harness.render();
    assert!(html.contains("Correct! 🎉"), "missing feedback in {html}");
    assert!(html.contains("Question 1 of 2"), "advanced early in {html}");

    tokio::time::advance(FEEDBACK_DELAY).await;
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "no auto advance in {html}");
    assert!(!html.contains("Correct! 🎉"), "stale feedback in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn leaving_the_quiz_during_feedback_cancels_the_advance() {
    let single: Vec<Question> = fixture_batch().into_iter().take(1).collect();
    let mut harness = setup_view_harness(ViewKind::Quiz, single);
    harness
        .services
        .quiz_setup()
        .prepare_random_quiz()
        .await
        .expect("prepare quiz");

    harness.rebuild();
    harness.drive_async().await;
    harness.dispatch(QuizIntent::Select("True".into())).await;
    assert!(harness.render().contains("Finish Quiz"));

    harness.navigate_away().await;
    let html = harness.render();
    assert!(html.contains("Elsewhere"), "still on quiz in {html}");

    tokio::time::advance(FEEDBACK_DELAY * 2).await;
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let result = harness
        .services
        .quiz_results()
        .latest_result()
        .await
        .expect("load result");
    assert_eq!(result, None);
}
