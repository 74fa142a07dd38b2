use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::upstream::UpstreamError;

pub const ERROR_TEMPLATE: &str = "error";
pub const ERROR_TITLE: &str = "Error | Dracin";

/// Which top navigation entry is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nav {
    Netshort,
    Dramabox,
}

/// A template name plus the data it is rendered with. Handlers attach this
/// to their response; `middleware::render_pages` turns it into HTML.
#[derive(Debug, Clone)]
pub struct View {
    pub template: &'static str,
    pub context: Value,
}

impl View {
    pub fn error(nav: Nav, message: &str) -> Self {
        Self {
            template: ERROR_TEMPLATE,
            context: serde_json::json!({
                "title": ERROR_TITLE,
                "activeNav": nav,
                "message": message,
            }),
        }
    }
}

/// A successfully assembled page.
#[derive(Debug, Clone)]
pub struct Page(View);

impl Page {
    pub fn new<T: Serialize>(template: &'static str, context: &T) -> Result<Self, HandlerError> {
        let context = serde_json::to_value(context).map_err(HandlerError::Context)?;
        Ok(Page(View { template, context }))
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let mut response = StatusCode::OK.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("upstream response is missing `{0}`")]
    MissingField(&'static str),
    #[error("failed to build page data: {0}")]
    Context(serde_json::Error),
}

impl HandlerError {
    /// Upstream path behind the failure, when an upstream call caused it.
    pub fn upstream_path(&self) -> Option<&str> {
        match self {
            HandlerError::Upstream(e) => Some(e.path()),
            _ => None,
        }
    }
}

/// How a route reports failure: its name for the log, its nav section and
/// the message shown to the visitor.
#[derive(Debug, Clone, Copy)]
pub struct Failure {
    pub route: &'static str,
    pub nav: Nav,
    pub message: &'static str,
}

#[derive(Debug, thiserror::Error)]
#[error("{}: {}", .failure.route, .source)]
pub struct PageError {
    pub failure: Failure,
    #[source]
    pub source: HandlerError,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(
            route = self.failure.route,
            upstream = self.source.upstream_path().unwrap_or("-"),
            "{}",
            self.source
        );
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(View::error(self.failure.nav, self.failure.message));
        response
    }
}

/// Attaches a route's failure descriptor to a handler result.
pub trait OnFailure<T> {
    fn on_failure(self, failure: Failure) -> Result<T, PageError>;
}

impl<T> OnFailure<T> for Result<T, HandlerError> {
    fn on_failure(self, failure: Failure) -> Result<T, PageError> {
        self.map_err(|source| PageError { failure, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILURE: Failure = Failure {
        route: "dramabox catalog",
        nav: Nav::Dramabox,
        message: "Gagal mengambil data DramaBox.",
    };

    #[test]
    fn test_upstream_path() {
        let err = HandlerError::from(UpstreamError::Status {
            service: "dramabox",
            path: "dubindo?classify=terbaru".to_string(),
            status: 502,
        });
        assert_eq!(err.upstream_path(), Some("dubindo?classify=terbaru"));
        assert_eq!(HandlerError::MissingField("shortPlayEpisodeInfos").upstream_path(), None);
    }

    #[test]
    fn test_page_error_response() {
        let result: Result<(), HandlerError> = Err(HandlerError::MissingField("data"));
        let err = result.on_failure(FAILURE).unwrap_err();
        assert_eq!(err.to_string(), "dramabox catalog: upstream response is missing `data`");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let view = response.extensions().get::<View>().unwrap();
        assert_eq!(view.template, ERROR_TEMPLATE);
        assert_eq!(view.context["activeNav"], "dramabox");
        assert_eq!(view.context["message"], "Gagal mengambil data DramaBox.");
    }
}
