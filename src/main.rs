use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use yieldbook::cache::cache_invalidation_middleware;
use yieldbook::config::Config;
use yieldbook::db::{create_pool, run_migrations};
use yieldbook::handlers;
use yieldbook::state::AppState;
use yieldbook::VERSION;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yieldbook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(version = VERSION, "Starting Yieldbook on {}", config.address());

    let db = create_pool(&config.database_path).expect("Failed to create database pool");

    {
        let conn = db.get().expect("Failed to get database connection");
        let applied =
            run_migrations(&conn, &config.migrations_path).expect("Failed to run migrations");
        tracing::info!(applied, "Database ready");
    }

    let address = config.address();
    let state = AppState::new(db, config);

    let app = Router::new()
        .merge(handlers::routes())
        .fallback(handlers::fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cache_invalidation_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", address);

    axum::serve(listener, app).await.expect("Server error");
}
