use std::sync::Arc;

use member_search_api::api::{self, AppState};
use member_search_api::config::Config;
use member_search_api::infrastructure::database;
use member_search_api::infrastructure::repositories::PostgresMemberRepository;
use member_search_api::infrastructure::seed::seed_sample_data;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // Connect to database
    let pool = database::connect(&config)
        .await
        .expect("Failed to connect to database");

    if config.run_migrations {
        database::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
    }

    let repository = Arc::new(PostgresMemberRepository::new(pool));

    if config.seed_sample_data {
        seed_sample_data(repository.as_ref())
            .await
            .expect("Failed to load sample data");
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(AppState::new(repository))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
