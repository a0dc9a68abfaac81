use dioxus::prelude::*;

/// Placeholder for a list with nothing in it. Children go under the
/// message, usually a call-to-action link.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default)] message: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div { class: "empty-state",
            p { class: "empty-state-title", "{title}" }
            if let Some(message) = message {
                p { class: "empty-state-message", "{message}" }
            }
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_is_optional() {
        let html = dioxus_ssr::render_element(rsx! {
            EmptyState { title: "No bookmarks yet" }
        });
        assert_eq!(
            html,
            "<div class=\"empty-state\"><p class=\"empty-state-title\">No bookmarks yet</p></div>"
        );
    }

    #[test]
    fn message_renders_under_title() {
        let html = dioxus_ssr::render_element(rsx! {
            EmptyState {
                title: "No posts",
                message: "Share your interview experience".to_string(),
            }
        });
        assert!(html.contains("<p class=\"empty-state-message\">Share your interview experience</p>"));
    }
}
