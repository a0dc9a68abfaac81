use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Shared state for axum handlers. `FromRef` lets handlers and extractors
/// pull `State<Pool<Postgres>>` straight out of it.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}

static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Build a lazily connected pool from `DATABASE_URL`.
///
/// No connection is opened until the first query, so the pool is not tied
/// to whichever tokio runtime happened to create it.
pub fn create_pool() -> Result<Pool<Postgres>, AppError> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::internal("DATABASE_URL must be set"))?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
        .map_err(|e| AppError::database(format!("Invalid database configuration: {e}")))
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Migration failed: {e}")))
}

/// Process-wide pool for server functions. Migrations run once, on first use.
///
/// REST handlers take `State<Pool<Postgres>>` from [`AppState`] instead.
pub async fn get_db() -> Result<&'static Pool<Postgres>, AppError> {
    let pool = match POOL.get() {
        Some(pool) => pool,
        None => {
            let created = create_pool()?;
            POOL.get_or_init(|| created)
        }
    };
    if !MIGRATED.swap(true, Ordering::SeqCst) {
        if let Err(e) = run_migrations(pool).await {
            // let the next caller try again
            MIGRATED.store(false, Ordering::SeqCst);
            return Err(e);
        }
    }
    Ok(pool)
}
