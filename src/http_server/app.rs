use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
#[cfg(not(debug_assertions))]
use axum::http::{Method, header};
use tower::ServiceBuilder;
#[cfg(not(debug_assertions))]
use tower_http::cors::AllowMethods;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::http_server::{
    http_routes::{auth, playlists},
    state::AppState,
};

async fn root() -> &'static str {
    "playlist-porter is running. Configure static_dir to serve the web UI."
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(app_state: Arc<AppState>) -> Router {
    #[cfg(debug_assertions)]
    let cors_layer = CorsLayer::permissive();

    // The UI is served from this origin in release builds
    #[cfg(not(debug_assertions))]
    let cors_layer = CorsLayer::new()
        .allow_methods(AllowMethods::list([Method::GET, Method::POST]))
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/create-playlist", post(playlists::create_playlist))
        .route("/add-to-playlist", post(playlists::add_to_playlist))
        .route("/convert", post(playlists::convert))
        .route("/playlists", get(playlists::list_playlists))
        .route("/playlists/{id}/items", get(playlists::list_playlist_items));

    let app = Router::new()
        .nest("/api", api)
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/health", get(health));

    let app = match &app_state.static_dir {
        Some(static_dir) => app.fallback_service(ServeDir::new(static_dir)),
        None => app.route("/", get(root)),
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
            .layer(cors_layer),
    )
    .with_state(app_state)
}

pub async fn start(port: u16, app_state: AppState) -> color_eyre::Result<()> {
    let app = router(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", port))?;
    tracing::info!("Listening on http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down HTTP server");
}
