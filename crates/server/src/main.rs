use std::error::Error;

use axum::extract::DefaultBodyLimit;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use lcms_server::{auth, config, db, health, openapi, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    telemetry::init_subscriber();

    let settings = config::ServerConfig::from_env()?;
    config::load_feature_flags();
    let flags = config::feature_flags();

    if flags.telemetry {
        match telemetry::init_telemetry() {
            Ok(true) => tracing::info!("OTLP telemetry enabled"),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "failed to initialise telemetry"),
        }
    }
    health::record_start_time();

    let pool = db::create_pool(&settings.database_url, settings.max_connections)?;
    db::run_migrations(&pool).await?;
    tracing::info!("database migrations applied");

    let state = db::AppState { pool: pool.clone() };

    let mut router = openapi::api_router(pool);
    if flags.telemetry {
        router = router.layer(telemetry::OtelTraceLayer);
    }

    let router = router
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router).await?;
    Ok(())
}
