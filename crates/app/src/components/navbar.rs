use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBell, LdBriefcase};
use dioxus_free_icons::Icon;
use shared_types::{unread_badge_label, Role};
use shared_ui::components::{
    DropdownMenu, DropdownMenuContent, DropdownMenuItem, DropdownMenuLabel, DropdownMenuSeparator,
    DropdownMenuTrigger,
};

use crate::routes::{dashboard_route, Route};
use crate::session::use_session;

/// Bumped by pages that change read state so the bell refetches at once
/// instead of waiting for the next poll.
#[derive(Clone, Copy)]
pub struct UnreadRefresh(pub Signal<u64>);

impl UnreadRefresh {
    pub fn bump(mut self) {
        self.0 += 1;
    }
}

/// Links shown in the navbar for each role.
pub fn role_links(role: Role) -> Vec<(&'static str, Route)> {
    match role {
        Role::Student => vec![
            ("Dashboard", Route::StudentDashboard {}),
            ("Internships", Route::InternshipList {}),
            ("Applications", Route::MyApplications {}),
            ("Bookmarks", Route::Bookmarks {}),
        ],
        Role::Alumni => vec![
            ("Dashboard", Route::AlumniDashboard {}),
            ("My Posts", Route::MyPosts {}),
            ("New Post", Route::NewPost {}),
        ],
        Role::Admin => vec![
            ("Dashboard", Route::AdminDashboard {}),
            ("Internships", Route::ManageInternships {}),
            ("Applications", Route::ReviewApplications {}),
            ("Posts", Route::ReviewPosts {}),
            ("Feedback", Route::FeedbackList {}),
        ],
    }
}

#[component]
pub fn AppNavbar() -> Element {
    let session = use_session();
    let profile = session.profile();
    let brand_target = dashboard_route(profile.as_ref().map(|p| p.role));

    rsx! {
        header { class: "navbar",
            Link { class: "navbar-brand", to: brand_target,
                Icon { icon: LdBriefcase, width: 22, height: 22 }
                span { "Campus Catalyst" }
            }

            if let Some(profile) = profile {
                nav { class: "navbar-links",
                    for (label, target) in role_links(profile.role) {
                        Link { class: "navbar-link", active_class: "active", to: target, "{label}" }
                    }
                }
                div { class: "navbar-spacer" }
                NotificationBell {}
                AccountMenu {
                    full_name: profile.full_name.clone(),
                    email: profile.email.clone(),
                    role: profile.role,
                }
            } else {
                div { class: "navbar-spacer" }
                if !session.is_loading() && session.session().is_none() {
                    div { class: "navbar-auth",
                        Link { class: "navbar-cta ghost", to: Route::Login {}, "Sign in" }
                        Link { class: "navbar-cta", to: Route::Signup {}, "Sign up" }
                    }
                }
            }
        }
    }
}

/// Bell with the unread count, polled on the configured interval.
#[component]
fn NotificationBell() -> Element {
    let session = use_session();
    let refresh = use_context::<UnreadRefresh>();
    let mut tick = use_signal(|| 0u64);
    let poll_ms = session.config().notification_poll_ms();

    use_coroutine(move |_: UnboundedReceiver<()>| async move {
        // Polling only makes sense on the hydrated client.
        #[cfg(feature = "server")]
        return;

        #[cfg(not(feature = "server"))]
        loop {
            crate::timer::sleep_ms(poll_ms).await;
            tick += 1;
        }
    });

    let unread = use_resource(move || {
        let _ = tick();
        let _ = (refresh.0)();
        let user = session.session().map(|s| s.user_id);
        async move {
            if user.is_none() {
                return 0;
            }
            match server::api::unread_notification_count().await {
                Ok(count) => count.unread,
                Err(e) => {
                    tracing::debug!(error = %e, "unread count unavailable");
                    session.expire_if_unauthorized(&e.to_string());
                    0
                }
            }
        }
    });

    let count = unread.read().unwrap_or(0);
    let badge = unread_badge_label(count);

    rsx! {
        Link {
            class: "navbar-bell",
            to: Route::Notifications {},
            Icon { icon: LdBell, width: 20, height: 20 }
            span { class: "sr-only", "Notifications" }
            if let Some(label) = badge {
                span { class: "navbar-bell-badge", "{label}" }
            }
        }
    }
}

#[component]
fn AccountMenu(full_name: String, email: String, role: Role) -> Element {
    let session = use_session();
    let initials: String = full_name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    let role_label = role.label();

    rsx! {
        DropdownMenu {
            DropdownMenuTrigger {
                span { class: "navbar-avatar", "{initials}" }
            }
            DropdownMenuContent {
                DropdownMenuLabel {
                    span { class: "menu-name", "{full_name}" }
                    span { class: "menu-email", "{email}" }
                    span { class: "menu-role", "{role_label}" }
                }
                DropdownMenuSeparator {}
                DropdownMenuItem::<String> {
                    value: "profile".to_string(),
                    index: 0usize,
                    on_select: move |_: String| {
                        navigator().push(Route::ProfileSettings {});
                    },
                    "Profile"
                }
                DropdownMenuItem::<String> {
                    value: "feedback".to_string(),
                    index: 1usize,
                    on_select: move |_: String| {
                        navigator().push(Route::GiveFeedback {});
                    },
                    "Send feedback"
                }
                DropdownMenuSeparator {}
                DropdownMenuItem::<String> {
                    value: "sign-out".to_string(),
                    index: 2usize,
                    on_select: move |_: String| {
                        spawn(async move {
                            session.sign_out().await;
                            navigator().push(Route::Home {});
                        });
                    },
                    "Sign out"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_role_starts_with_its_dashboard() {
        for role in shared_types::ALL_ROLES {
            let links = role_links(*role);
            assert_eq!(links[0].1.to_string(), role.dashboard_path());
        }
    }

    #[test]
    fn admin_links_stay_under_admin() {
        assert!(role_links(Role::Admin)
            .iter()
            .all(|(_, route)| route.to_string().starts_with("/admin/")));
    }
}
