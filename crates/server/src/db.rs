use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Transaction};

use crate::error_convert::SqlxErrorExt;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}

/// Create the connection pool. Uses `connect_lazy` so no connections open
/// until the first query, which keeps pool creation independent of any
/// particular tokio runtime.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(database_url)
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Open a request-scoped transaction. Dropping it without [`commit`]
/// rolls back every write made through it.
pub async fn begin(pool: &Pool<Postgres>) -> Result<Transaction<'static, Postgres>, AppError> {
    pool.begin().await.map_err(SqlxErrorExt::into_app_error)
}

pub async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), AppError> {
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)
}
