use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::Task;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::time::FEEDBACK_DELAY;
use services::QuizStep;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AnswerOptionVm, FeedbackVm, QuizIntent, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq)]
struct QuizScreen {
    index: usize,
    progress_label: String,
    percent_complete: u32,
    metadata_label: Option<String>,
    question_html: String,
    options: Vec<AnswerOptionVm>,
    feedback: Option<FeedbackVm>,
    next_label: &'static str,
}

impl QuizScreen {
    fn from_vm(vm: &QuizVm) -> Option<Self> {
        Some(Self {
            index: vm.current_index()?,
            progress_label: vm.progress_label(),
            percent_complete: vm.percent_complete(),
            metadata_label: vm.metadata_label(),
            question_html: vm.question_html()?,
            options: vm.options(),
            feedback: vm.feedback(),
            next_label: vm.next_label(),
        })
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);
    let feedback_timer = use_hook(|| Rc::new(Cell::new(None::<Task>)));

    let resource = {
        let quiz_loop = quiz_loop.clone();
        use_resource(move || {
            let quiz_loop = quiz_loop.clone();
            let mut error = error;
            let mut vm = vm;
            async move {
                let started = start_quiz(&quiz_loop).await?;
                vm.set(Some(started));
                error.set(None);
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(resource);

    {
        let feedback_timer = Rc::clone(&feedback_timer);
        use_drop(move || {
            if let Some(task) = feedback_timer.take() {
                task.cancel();
            }
        });
    }

    let advance = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |index: usize| {
            let quiz_loop = quiz_loop.clone();
            let mut error = error;
            let mut vm = vm;
            spawn(async move {
                // Another advance for this question is in flight.
                let Some(mut vm_value) = vm.write().take() else {
                    return;
                };

                let result = vm_value.advance(&quiz_loop, index).await;

                vm.set(Some(vm_value));

                match result {
                    Ok(QuizStep::Finished) => {
                        error.set(None);
                        let _ = navigator.push(Route::Results {});
                    }
                    Ok(QuizStep::Continue { .. } | QuizStep::Ignored) => {}
                    Err(err) => {
                        tracing::warn!(?err, index, "quiz advance failed");
                        error.set(Some(err));
                    }
                }
            });
        })
    };

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        let feedback_timer = Rc::clone(&feedback_timer);
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            match intent {
                QuizIntent::Select(chosen) => {
                    let committed = vm
                        .write()
                        .as_mut()
                        .and_then(|vm| vm.select(&quiz_loop, &chosen));
                    if let Some(index) = committed {
                        let task = spawn(async move {
                            tokio::time::sleep(FEEDBACK_DELAY).await;
                            advance.call(index);
                        });
                        if let Some(previous) = feedback_timer.replace(Some(task)) {
                            previous.cancel();
                        }
                    }
                }
                QuizIntent::Next { index } => {
                    if let Some(task) = feedback_timer.take() {
                        task.cancel();
                    }
                    advance.call(index);
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let retry_save = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let quiz_loop = quiz_loop.clone();
            let mut error = error;
            let mut vm = vm;
            spawn(async move {
                let Some(mut vm_value) = vm.write().take() else {
                    return;
                };
                let result = vm_value.finalize(&quiz_loop).await;
                vm.set(Some(vm_value));
                match result {
                    Ok(()) => {
                        error.set(None);
                        let _ = navigator.push(Route::Results {});
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    let screen = vm.read().as_ref().and_then(QuizScreen::from_vm);

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading your quiz..." }
                },
                ViewState::Error(ViewError::NoData) => rsx! {
                    div { class: "card empty-state",
                        h2 { "No Quiz Found" }
                        p { "We couldn't find any quiz data. Please start a new quiz." }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Home {});
                            },
                            "Start New Quiz"
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
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        div { class: "quiz-error",
                            p { class: "error", "{err.message()}" }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| retry_save.call(()),
                                "Retry"
                            }
                        }
                    }
                    if let Some(screen) = screen {
                        QuizCard { screen, on_intent: dispatch_intent }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizCard(screen: QuizScreen, on_intent: EventHandler<QuizIntent>) -> Element {
    let QuizScreen {
        index,
        progress_label,
        percent_complete,
        metadata_label,
        question_html,
        options,
        feedback,
        next_label,
    } = screen;
    let answered = feedback.is_some();

    rsx! {
        div { class: "card quiz-card",
            div { class: "quiz-progress",
                div { class: "quiz-progress__labels",
                    span { "{progress_label}" }
                    span { "{percent_complete}% Complete" }
                }
                div { class: "quiz-progress__bar",
                    div {
                        class: "quiz-progress__fill",
                        style: "width: {percent_complete}%",
                    }
                }
            }
            if let Some(metadata) = metadata_label {
                p { class: "quiz-meta", dangerous_inner_html: "{metadata}" }
            }
            h2 { class: "quiz-question", dangerous_inner_html: "{question_html}" }
            div { class: "quiz-options",
                for option in options {
                    AnswerButton { option, disabled: answered, on_intent }
                }
            }
            if let Some(feedback) = feedback {
                FeedbackPanel {
                    feedback,
                    next_label,
                    on_next: move |()| on_intent.call(QuizIntent::Next { index }),
                }
            }
        }
    }
}

#[component]
fn AnswerButton(
    option: AnswerOptionVm,
    disabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let text = option.text.clone();
    rsx! {
        button {
            class: "{option.state.class()}",
            r#type: "button",
            disabled,
            onclick: move |_| on_intent.call(QuizIntent::Select(text.clone())),
            dangerous_inner_html: "{option.html}",
        }
    }
}

#[component]
fn FeedbackPanel(feedback: FeedbackVm, next_label: &'static str, on_next: EventHandler<()>) -> Element {
    let class = if feedback.was_correct {
        "quiz-feedback quiz-feedback--correct"
    } else {
        "quiz-feedback quiz-feedback--wrong"
    };
    rsx! {
        div { class: "{class}",
            p { class: "quiz-feedback__title", "{feedback.title()}" }
            if !feedback.was_correct {
                p { class: "quiz-feedback__answer",
                    "The correct answer is: "
                    span { dangerous_inner_html: "{feedback.correct_answer_html}" }
                }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-next",
                r#type: "button",
                onclick: move |_| on_next.call(()),
                "{next_label}"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
