use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AnswerReviewVm, load_latest_result};

#[component]
pub fn ResultView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_results = ctx.quiz_results();

    let resource = use_resource(move || {
        let quiz_results = quiz_results.clone();
        async move { load_latest_result(&quiz_results).await }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page result-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading results..." }
                },
                ViewState::Error(ViewError::NoData) => rsx! {
                    div { class: "card empty-state",
                        h2 { "No Results Found" }
                        p { "It looks like you haven't completed a quiz yet. Start a new quiz to see your results here!" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Home {});
                            },
                            "Start Quiz"
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card empty-state",
                        p { class: "error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(result) => rsx! {
                    div { class: "card result-card",
                        header { class: "result-header",
                            div { class: "{result.performance_class()}", "{result.percentage}%" }
                            h1 { "Quiz Completed!" }
                            p { "Here's how you performed" }
                            p { class: "result-message", "{result.message()}" }
                        }
                        div { class: "result-stats",
                            div { class: "result-stat result-stat--correct",
                                h3 { "Correct" }
                                p { "{result.correct}" }
                            }
                            div { class: "result-stat result-stat--wrong",
                                h3 { "Wrong" }
                                p { "{result.wrong}" }
                            }
                            div { class: "result-stat",
                                h3 { "Total" }
                                p { "{result.total}" }
                            }
                        }
                        p { class: "muted", "Completed {result.completed_at}" }
                        section { class: "result-review",
                            h2 { "Review Answers" }
                            for row in result.answers.iter().cloned() {
                                ReviewRow { row }
                            }
                        }
                        div { class: "result-actions",
                            button {
                                class: "btn btn-primary",
                                id: "result-retry",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Quiz {});
                                },
                                "Try Again"
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Home {});
                                },
                                "Home"
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ReviewRow(row: AnswerReviewVm) -> Element {
    let class = if row.was_correct {
        "review-row review-row--correct"
    } else {
        "review-row review-row--wrong"
    };
    rsx! {
        div { class: "{class}",
            p { class: "review-row__question",
                span { class: "review-row__number", "{row.number}. " }
                span { dangerous_inner_html: "{row.question_html}" }
            }
            p { class: "review-row__answer",
                "Your answer: "
                span { dangerous_inner_html: "{row.chosen_html}" }
            }
            if !row.was_correct {
                p { class: "review-row__answer",
                    "Correct answer: "
                    span { dangerous_inner_html: "{row.correct_html}" }
                }
            }
        }
    }
}
