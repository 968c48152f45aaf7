use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::QuizFilters;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    QuizSelection, SelectOption, category_options, difficulty_options, prepare_quiz,
    question_type_options,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StartMode {
    Selected,
    Random,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_setup = ctx.quiz_setup();

    let selection = use_signal(QuizSelection::default);
    let busy = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);

    let categories = {
        let quiz_setup = quiz_setup.clone();
        use_resource(move || {
            let quiz_setup = quiz_setup.clone();
            async move {
                let categories = quiz_setup.load_categories().await;
                Ok::<_, ViewError>(category_options(&categories))
            }
        })
    };
    let state = view_state_from_resource(categories);

    let start = use_callback(move |mode: StartMode| {
        let mut busy = busy;
        let mut error = error;
        if busy() {
            return;
        }
        let filters = match mode {
            StartMode::Random => Ok(QuizFilters::any()),
            StartMode::Selected => selection.read().to_filters(),
        };
        let quiz_setup = quiz_setup.clone();
        // Set before spawning so a second click in the same frame sees it.
        busy.set(true);
        spawn(async move {
            let prepared = match filters {
                Ok(filters) => prepare_quiz(&quiz_setup, filters).await,
                Err(err) => Err(err),
            };
            busy.set(false);
            match prepared {
                Ok(()) => {
                    error.set(None);
                    let _ = navigator.push(Route::Quiz {});
                }
                Err(err) => {
                    tracing::warn!(?err, ?mode, "quiz preparation failed");
                    error.set(Some(err));
                }
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<HomeTestHandles>() {
                handles.register(start);
            }
        }
    }

    let is_busy = busy();

    rsx! {
        div { class: "page home-page",
            div { class: "card",
                header { class: "card__header",
                    h1 { "Quiz Challenge" }
                    p { "Test your knowledge with our trivia quiz" }
                }
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "muted", "Loading categories..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error", "{err.message()}" }
                    },
                    ViewState::Ready(options) => rsx! {
                        div { class: "home-form",
                            FilterSelect {
                                label: "Category",
                                options,
                                value: selection.read().category.clone(),
                                disabled: is_busy,
                                on_change: move |value: String| {
                                    let mut selection = selection;
                                    selection.write().category = value;
                                },
                            }
                            FilterSelect {
                                label: "Difficulty",
                                options: difficulty_options(),
                                value: selection.read().difficulty.clone(),
                                disabled: is_busy,
                                on_change: move |value: String| {
                                    let mut selection = selection;
                                    selection.write().difficulty = value;
                                },
                            }
                            FilterSelect {
                                label: "Question Type",
                                options: question_type_options(),
                                value: selection.read().kind.clone(),
                                disabled: is_busy,
                                on_change: move |value: String| {
                                    let mut selection = selection;
                                    selection.write().kind = value;
                                },
                            }
                            if let Some(err) = *error.read() {
                                p { class: "error", "{err.message()}" }
                            }
                            div { class: "home-actions",
                                button {
                                    class: "btn btn-primary",
                                    id: "home-start",
                                    r#type: "button",
                                    disabled: is_busy,
                                    onclick: move |_| start.call(StartMode::Selected),
                                    if is_busy { "Loading..." } else { "Start Quiz" }
                                }
                                button {
                                    class: "btn btn-secondary",
                                    id: "home-random",
                                    r#type: "button",
                                    disabled: is_busy,
                                    onclick: move |_| start.call(StartMode::Random),
                                    "Random Quiz"
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn FilterSelect(
    label: &'static str,
    options: Vec<SelectOption>,
    value: String,
    disabled: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field__label", "{label}" }
            select {
                class: "field__input",
                value: "{value}",
                disabled,
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
                for item in options {
                    option { value: "{item.value}", "{item.label}" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct HomeTestHandles {
    start: Rc<RefCell<Option<Callback<StartMode>>>>,
}

#[cfg(test)]
impl HomeTestHandles {
    pub(crate) fn register(&self, start: Callback<StartMode>) {
        *self.start.borrow_mut() = Some(start);
    }

    pub(crate) fn start(&self) -> Callback<StartMode> {
        (*self.start.borrow()).expect("home start registered")
    }
}
