use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, QuizView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/result", ResultView)] Results {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Navbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    rsx! {
        nav { class: "navbar",
            Link { class: "navbar__brand", to: Route::Home {}, "🎯 QuizMaster" }
            ul { class: "navbar__links",
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Quiz {}, "Quiz" } }
                li { Link { to: Route::Results {}, "Result" } }
            }
        }
    }
}
