use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use task_tracker_api::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up PORT, DATABASE_PATH, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let pool = match database::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("unable to open database {}: {}", config.database.path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database::init_schema(&pool).await {
        tracing::error!("unable to initialize schema: {}", e);
        std::process::exit(1);
    }

    tracing::info!("database ready at {}", config.database.path);

    let port = config.server.port;
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
