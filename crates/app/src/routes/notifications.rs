use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{mark_all_read_locally, mark_read_locally, Notification};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, EmptyState, PageActions,
    PageHeader, PageTitle, Skeleton,
};
use shared_ui::{use_toast, ToastOptions};

use crate::components::navbar::UnreadRefresh;
use crate::format_helpers::{format_relative, format_snake_case_title};
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn Notifications() -> Element {
    let session = use_session();
    let toast = use_toast();
    let refresh = use_context::<UnreadRefresh>();
    let mut items = use_signal(Vec::<Notification>::new);

    let loaded = use_resource(move || async move {
        match server::api::notifications().await {
            Ok(list) => {
                items.set(list);
                Ok(())
            }
            Err(e) => Err(session.report_error(&e)),
        }
    });

    let open = move |notification: Notification| {
        spawn(async move {
            if !notification.is_read {
                if let Err(e) = server::api::mark_notification_read(notification.id).await {
                    toast.error(session.report_error(&e), ToastOptions::new());
                    return;
                }
                mark_read_locally(&mut items.write(), notification.id);
                refresh.bump();
            }
            let target = notification
                .link
                .as_deref()
                .and_then(|link| link.parse::<Route>().ok());
            if let Some(route) = target {
                navigator().push(route);
            }
        });
    };

    let mark_all = move |_| {
        spawn(async move {
            match server::api::mark_all_notifications_read().await {
                Ok(_) => {
                    mark_all_read_locally(&mut items.write());
                    refresh.bump();
                }
                Err(e) => {
                    toast.error(session.report_error(&e), ToastOptions::new());
                }
            }
        });
    };

    let unread = items.read().iter().filter(|n| !n.is_read).count();
    let now = Utc::now();

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "Notifications" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: unread == 0,
                        onclick: mark_all,
                        "Mark all as read"
                    }
                }
            }

            match &*loaded.read() {
                None => rsx! {
                    Skeleton { style: "height: 4rem" }
                    Skeleton { style: "height: 4rem" }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(())) if items.read().is_empty() => rsx! {
                    EmptyState {
                        title: "You're all caught up",
                        message: "New internships, status changes and approvals will show up here.".to_string(),
                    }
                },
                Some(Ok(())) => rsx! {
                    ul { class: "notification-list",
                        for notification in items.read().iter().cloned() {
                            NotificationRow {
                                key: "{notification.id}",
                                notification: notification.clone(),
                                age: format_relative(notification.created_at, now),
                                on_open: open,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn NotificationRow(
    notification: Notification,
    age: String,
    on_open: EventHandler<Notification>,
) -> Element {
    let kind = format_snake_case_title(notification.kind.as_str());
    let row = notification.clone();

    rsx! {
        li {
            class: if notification.is_read { "notification read" } else { "notification unread" },
            onclick: move |_| on_open.call(row.clone()),
            Card {
                CardContent {
                    div { class: "notification-head",
                        span { class: "notification-title", "{notification.title}" }
                        Badge { variant: BadgeVariant::Outline, "{kind}" }
                    }
                    p { class: "notification-message", "{notification.message}" }
                    span { class: "notification-age", "{age}" }
                }
            }
        }
    }
}
