use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, Router, use_navigator};
use quiz_core::model::{Category, CategoryId, Question, QuizFilters};
use quiz_core::time::fixed_now;
use services::{
    AppServices, Clock, KeepOrder, QuestionSource, QuizLoopService, QuizResultService,
    QuizSetupService, SourceError,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use super::home::{HomeTestHandles, StartMode};
use super::quiz::QuizTestHandles;
use super::{HomeView, QuizView, ResultView};

/// Question source serving a fixed batch and counting batch fetches.
pub struct FixtureSource {
    pub batch: Vec<Question>,
    pub fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl QuestionSource for FixtureSource {
    async fn list_categories(&self) -> Result<Vec<Category>, SourceError> {
        Ok(vec![
            Category::new(CategoryId::new(9), "General Knowledge"),
            Category::new(CategoryId::new(18), "Science: Computers"),
        ])
    }

    async fn fetch_question_batch(
        &self,
        _filters: &QuizFilters,
    ) -> Result<Vec<Question>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.batch.clone())
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn quiz_setup(&self) -> Arc<QuizSetupService> {
        self.services.quiz_setup()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn quiz_results(&self) -> Arc<QuizResultService> {
        self.services.quiz_results()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Result,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
    home_handles: HomeTestHandles,
    navigator: NavigatorSlot,
}

/// Navigation away from the app views, registered by the harness layout.
#[derive(Clone, Default)]
struct NavigatorSlot(Rc<RefCell<Option<Callback<()>>>>);

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz_handles.clone());
    use_context_provider(|| props.home_handles.clone());
    use_context_provider(|| props.navigator.clone());
    rsx! { Router::<TestRoute> {} }
}

// Mirrors the app's paths so views can navigate between each other.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[layout(HarnessLayout)]
        #[route("/")]
        Root {},
        #[route("/quiz")]
        QuizPage {},
        #[route("/result")]
        ResultPage {},
        #[route("/away")]
        Away {},
}

#[component]
fn HarnessLayout() -> Element {
    let navigator = use_navigator();
    let leave = use_callback(move |()| {
        let _ = navigator.push(TestRoute::Away {});
    });
    let slot = use_context::<NavigatorSlot>();
    *slot.0.borrow_mut() = Some(leave);
    rsx! { Outlet::<TestRoute> {} }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Result => rsx! { ResultView {} },
    }
}

#[component]
fn QuizPage() -> Element {
    rsx! { QuizView {} }
}

#[component]
fn ResultPage() -> Element {
    rsx! { ResultView {} }
}

#[component]
fn Away() -> Element {
    rsx! { p { "Elsewhere" } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub storage: Storage,
    pub fetches: Arc<AtomicUsize>,
    quiz_handles: QuizTestHandles,
    home_handles: HomeTestHandles,
    navigator: NavigatorSlot,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Send an intent to the quiz view and let the resulting tasks settle.
    pub async fn dispatch(&mut self, intent: crate::vm::QuizIntent) {
        let dispatch = self.quiz_handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
        self.drive_async().await;
        self.drive_async().await;
    }

    /// Trigger both home start actions within one frame.
    pub async fn double_start(&mut self) {
        let start = self.home_handles.start();
        self.dom.in_runtime(|| {
            start.call(StartMode::Selected);
            start.call(StartMode::Random);
        });
        drive_dom(&mut self.dom);
        self.drive_async().await;
        self.drive_async().await;
    }

    /// Leave the current view for a route that renders none of the app views.
    pub async fn navigate_away(&mut self) {
        let leave = (*self.navigator.0.borrow()).expect("navigator captured");
        self.dom.in_runtime(|| leave.call(()));
        drive_dom(&mut self.dom);
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, batch: Vec<Question>) -> ViewHarness {
    let storage = Storage::in_memory();
    let fetches = Arc::new(AtomicUsize::new(0));
    let services = AppServices::from_parts(
        Clock::fixed(fixed_now()),
        &storage,
        Arc::new(FixtureSource {
            batch,
            fetches: Arc::clone(&fetches),
        }),
        Arc::new(KeepOrder),
    );
    let quiz_handles = QuizTestHandles::default();
    let home_handles = HomeTestHandles::default();
    let navigator = NavigatorSlot::default();
    let app = Arc::new(TestApp {
        services: services.clone(),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
            home_handles: home_handles.clone(),
            navigator: navigator.clone(),
        },
    );

    ViewHarness {
        dom,
        services,
        storage,
        fetches,
        quiz_handles,
        home_handles,
        navigator,
    }
}
