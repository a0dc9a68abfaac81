use dioxus::prelude::*;

/// Flex row holding a search input and its filters.
#[component]
pub fn SearchBar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar", role: "search", {children} }
    }
}
