use habitquest::{
    api, AppState, GamificationService, InMemoryUserDataRepository, ServerConfig,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habitquest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting habitquest engine server");

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    let repository = match &config.seed_file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .expect("Failed to read seed file");
            let repository =
                InMemoryUserDataRepository::from_json(&raw).expect("Failed to parse seed file");
            info!(
                path = %path.display(),
                users = repository.user_count().await,
                "Loaded user snapshots"
            );
            repository
        }
        None => InMemoryUserDataRepository::new(),
    };

    if let Some(today) = config.pinned_today {
        info!(%today, "Using pinned date");
    }

    let service = GamificationService::builder(Arc::new(repository))
        .with_clock(config.clock())
        .build();

    let app = api::router(AppState::new(Arc::new(service)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();
    info!(bind_addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await.unwrap();
}
