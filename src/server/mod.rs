pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    error::panic_message,
    llm::{GeminiClient, Generator},
};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
};
use std::{any::Any, net::SocketAddr, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};
use types::ErrorResponse;

pub use handlers::AppState;

/// Builds the router serving the agent endpoint at `endpoint`.
pub fn router(state: AppState, endpoint: &str) -> Router {
    with_layers(Router::new().route(endpoint, any(handlers::agent))).with_state(state)
}

fn with_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    error!("Request handling panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}

pub async fn run(config: Config) -> Result<()> {
    let client = GeminiClient::new(config.gemini.clone());
    let generator = Generator::new(Arc::new(client), config.gemini.model.clone());

    info!(
        "Using Gemini model {} at {}",
        generator.default_model(),
        config.gemini.base_url
    );

    let app_state = AppState {
        generator: Arc::new(generator),
    };

    let app = router(app_state, &config.server.endpoint);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}{}", addr, config.server.endpoint);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
