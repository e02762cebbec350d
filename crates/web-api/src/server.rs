use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use edge_feed_data::FeedService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    service: Arc<FeedService>,
}

impl ApiServer {
    #[must_use]
    pub const fn new(service: Arc<FeedService>) -> Self {
        Self { service }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/news", get(handlers::get_news))
            .route("/api/calendar", get(handlers::get_calendar))
            .route("/api/score", post(handlers::post_score))
            .route("/api/classify", post(handlers::post_classify))
            .route("/health", get(handlers::health))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
