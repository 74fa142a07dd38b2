use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::config::Config;
use crate::render::Renderer;
use crate::upstream::Upstream;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn Upstream>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(config: Config, upstream: Arc<dyn Upstream>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
            renderer,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let netshort_routes = Router::new()
        .route("/", get(crate::netshort::home))
        .route("/search", get(crate::netshort::search))
        .route("/play/:id", get(crate::netshort::play));

    let dramabox_routes = Router::new()
        .route("/dramabox", get(crate::dramabox::catalog))
        .route("/dramabox/search", get(crate::dramabox::search))
        .route("/dramabox/play/:id", get(crate::dramabox::play));

    Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(netshort_routes)
        .merge(dramabox_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::render_pages,
        ))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nAllow: /\n"
}

async fn fallback_handler() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
