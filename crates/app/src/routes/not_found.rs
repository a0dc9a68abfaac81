use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "status-page",
            h1 { class: "status-code", "404" }
            p { "Nothing lives at /{path}." }
            Link { class: "navbar-cta", to: Route::Home {}, "Return Home" }
        }
    }
}
