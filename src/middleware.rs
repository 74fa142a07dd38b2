use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use crate::page::{Nav, View};
use crate::server::AppState;

const RENDER_FAILED_MESSAGE: &str = "Gagal menampilkan halaman.";

/// Template a response was rendered from, for the request log.
#[derive(Debug, Clone, Copy)]
pub struct RenderedTemplate(pub &'static str);

pub async fn log_request(req: Request, next: Next) -> Response {
    if req.uri().path() == "/robots.txt" {
        return next.run(req).await;
    }
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let template = response
        .extensions()
        .get::<RenderedTemplate>()
        .map_or("-", |t| t.0);
    let redirect = response
        .headers()
        .get(axum::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    info!(
        method = %method,
        url = %uri,
        status = status,
        template = template,
        redirect = redirect,
        "page request"
    );

    response
}

/// Renders the `View` a handler left in the response extensions, keeping
/// the handler's status code. Success and error pages both pass through
/// here, so no handler talks to the renderer itself.
pub async fn render_pages(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let Some(view) = response.extensions_mut().remove::<View>() else {
        return response;
    };
    let status = response.status();

    match state.renderer.render(view.template, &view.context) {
        Ok(html) => rendered(status, view.template, html),
        Err(e) => {
            error!(template = view.template, "render failed: {}", e);
            render_fallback(&state, &view)
        }
    }
}

fn rendered(status: StatusCode, template: &'static str, html: String) -> Response {
    let mut response = (status, Html(html)).into_response();
    response.extensions_mut().insert(RenderedTemplate(template));
    response
}

fn render_fallback(state: &AppState, failed: &View) -> Response {
    let nav = match failed.context.get("activeNav").and_then(|v| v.as_str()) {
        Some("dramabox") => Nav::Dramabox,
        _ => Nav::Netshort,
    };
    let view = View::error(nav, RENDER_FAILED_MESSAGE);

    if failed.template != view.template {
        if let Ok(html) = state.renderer.render(view.template, &view.context) {
            return rendered(StatusCode::INTERNAL_SERVER_ERROR, view.template, html);
        }
    }
    (StatusCode::INTERNAL_SERVER_ERROR, RENDER_FAILED_MESSAGE).into_response()
}
