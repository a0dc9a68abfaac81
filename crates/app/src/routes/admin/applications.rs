use dioxus::prelude::*;
use shared_types::{
    ApplicationStatus, ApplicationSummary, UpdateApplicationStatusRequest,
    ALL_APPLICATION_STATUSES,
};
use shared_ui::components::{
    Badge, EmptyState, FormSelect, PageHeader, PageSubtitle, PageTitle, Skeleton,
};
use shared_ui::{use_toast, ToastOptions};
use uuid::Uuid;

use crate::components::status::application_badge;
use crate::format_helpers::format_date;
use crate::session::use_session;

/// Filter value for the status dropdown; empty means every status.
fn parse_filter(value: &str) -> Option<ApplicationStatus> {
    ApplicationStatus::parse(value).ok()
}

#[component]
pub fn ReviewApplications() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut filter = use_signal(String::new);
    let mut items = use_signal(Vec::<ApplicationSummary>::new);

    let loaded = use_resource(move || {
        let status = parse_filter(&filter());
        async move {
            match server::api::all_applications(status).await {
                Ok(list) => {
                    items.set(list);
                    Ok(())
                }
                Err(e) => Err(session.report_error(&e)),
            }
        }
    });

    let change_status = move |(id, status): (Uuid, ApplicationStatus)| {
        spawn(async move {
            let body = UpdateApplicationStatusRequest { status };
            match server::api::update_application_status(id, body).await {
                Ok(updated) => {
                    let keep = parse_filter(&filter()).map_or(true, |f| f == updated.status);
                    let mut list = items.write();
                    if keep {
                        if let Some(row) = list.iter_mut().find(|a| a.id == id) {
                            row.status = updated.status;
                        }
                    } else {
                        list.retain(|a| a.id != id);
                    }
                    toast.success(
                        format!("Marked as {}", updated.status.label()),
                        ToastOptions::new(),
                    );
                }
                Err(e) => {
                    toast.error(session.report_error(&e), ToastOptions::new());
                }
            }
        });
    };

    let total = items.read().len();

    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "Applications" }
                    PageSubtitle { "{total} shown" }
                }
                FormSelect {
                    label: "Status",
                    value: filter(),
                    onchange: move |e: FormEvent| filter.set(e.value()),
                    option { value: "", "All statuses" }
                    for status in ALL_APPLICATION_STATUSES.iter() {
                        option { value: status.as_str(), {status.label()} }
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
                    EmptyState { title: "No applications match this filter" }
                },
                Some(Ok(())) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Student" }
                                th { "Internship" }
                                th { "Applied" }
                                th { "Resume" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for application in items.read().iter().cloned() {
                                ApplicationRow {
                                    key: "{application.id}",
                                    application,
                                    on_change: change_status,
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ApplicationRow(
    application: ApplicationSummary,
    on_change: EventHandler<(Uuid, ApplicationStatus)>,
) -> Element {
    let id = application.id;
    let applied = format_date(application.applied_at);
    let label = application.status.label();

    rsx! {
        tr {
            td {
                div { "{application.student_name}" }
                div { class: "muted", "{application.student_email}" }
            }
            td { "{application.internship_title} · {application.company}" }
            td { "{applied}" }
            td {
                if let Some(url) = application.resume_url.clone() {
                    a { href: "{url}", target: "_blank", rel: "noopener", "Open" }
                } else {
                    span { class: "muted", "None" }
                }
            }
            td {
                div { class: "status-cell",
                    Badge { variant: application_badge(application.status), "{label}" }
                    FormSelect {
                        value: application.status.as_str().to_string(),
                        onchange: move |e: FormEvent| {
                            if let Ok(status) = ApplicationStatus::parse(&e.value()) {
                                on_change.call((id, status));
                            }
                        },
                        for status in ALL_APPLICATION_STATUSES.iter() {
                            option { value: status.as_str(), {status.label()} }
                        }
                    }
                }
            }
        }
    }
}
