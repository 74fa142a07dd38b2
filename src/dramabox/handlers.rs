use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use super::shape::{self, CatalogLists};
use crate::page::{Failure, HandlerError, Nav, OnFailure, Page, PageError};
use crate::server::AppState;
use crate::upstream::Service;
use crate::util::QueryParams;

const CATALOG_FAILURE: Failure = Failure {
    route: "dramabox catalog",
    nav: Nav::Dramabox,
    message: "Gagal mengambil data DramaBox.",
};

const SEARCH_FAILURE: Failure = Failure {
    route: "dramabox search",
    nav: Nav::Dramabox,
    message: "Pencarian DramaBox gagal.",
};

const PLAY_FAILURE: Failure = Failure {
    route: "dramabox play",
    nav: Nav::Dramabox,
    message: "Gagal memuat link streaming DramaBox.",
};

pub async fn catalog(State(state): State<AppState>) -> Result<Page, PageError> {
    catalog_page(&state).await.on_failure(CATALOG_FAILURE)
}

// All six lists load together; one failed list fails the page.
async fn catalog_page(state: &AppState) -> Result<Page, HandlerError> {
    let upstream = &state.upstream;
    let (latest, trending, vip, popular, dub_popular, dub_newest) = tokio::try_join!(
        upstream.get_json(Service::Dramabox, "latest", &[]),
        upstream.get_json(Service::Dramabox, "trending", &[]),
        upstream.get_json(Service::Dramabox, "vip", &[]),
        upstream.get_json(Service::Dramabox, "populersearch", &[]),
        upstream.get_json(Service::Dramabox, "dubindo", &[("classify", "terpopuler")]),
        upstream.get_json(Service::Dramabox, "dubindo", &[("classify", "terbaru")]),
    )?;

    let lists = CatalogLists {
        latest,
        trending,
        vip,
        popular,
        dub_popular,
        dub_newest,
    };
    Page::new("dramabox", &shape::catalog(lists))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, PageError> {
    let Some(query) = params.non_empty("query") else {
        return Ok(Redirect::to("/dramabox").into_response());
    };
    search_page(&state, query)
        .await
        .on_failure(SEARCH_FAILURE)
        .map(IntoResponse::into_response)
}

async fn search_page(state: &AppState, query: &str) -> Result<Page, HandlerError> {
    let body = state
        .upstream
        .get_json(Service::Dramabox, "search", &[("query", query)])
        .await?;

    Page::new("search-db", &shape::search(query, body))
}

pub async fn play(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<Page, PageError> {
    play_page(&state, &book_id, params.episode())
        .await
        .on_failure(PLAY_FAILURE)
}

async fn play_page(state: &AppState, book_id: &str, episode: i64) -> Result<Page, HandlerError> {
    let upstream = &state.upstream;
    let query = [("bookId", book_id)];
    let (episodes, detail) = tokio::try_join!(
        upstream.get_json(Service::Dramabox, "allepisode", &query),
        upstream.get_json(Service::Dramabox, "detail", &query),
    )?;

    Page::new("play-db", &shape::play(book_id, episodes, detail, episode)?)
}
