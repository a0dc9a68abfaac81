use dioxus::prelude::*;
use shared_types::AppConfig;

mod components;
mod format_helpers;
mod guard;
mod routes;
mod session;
mod timer;

use routes::Route;
use session::use_session_provider;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        let config = server::config::load_config();
        if config.features.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let pool = server::db::create_pool()?;
        server::db::run_migrations(&pool).await?;

        let state = server::db::AppState { pool: pool.clone() };

        let mut router = dioxus::server::router(App).merge(server::openapi::api_router(pool));

        if config.features.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        // Default 1 MB; override with MAX_UPLOAD_BYTES.
        let max_body: usize = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024 * 1024);

        let router = router
            .layer(axum::extract::DefaultBodyLimit::max(max_body))
            .layer(axum::middleware::from_fn_with_state(
                state,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));

        tracing::info!("campus catalyst server ready");
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Defaults when the config call fails, so the app still starts.
    let config_resource =
        use_server_future(move || async move { server::api::get_app_config().await })?;

    let config = config_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(AppConfig::default()))
        .unwrap_or_default();

    use_context_provider(|| config.features.clone());
    use_session_provider(config.session);

    rsx! {
        document::Title { "Campus Catalyst" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
