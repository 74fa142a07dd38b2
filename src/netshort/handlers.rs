use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use super::shape;
use crate::page::{Failure, HandlerError, Nav, OnFailure, Page, PageError};
use crate::server::AppState;
use crate::upstream::Service;
use crate::util::QueryParams;

const HOME_FAILURE: Failure = Failure {
    route: "netshort home",
    nav: Nav::Netshort,
    message: "Gagal mengambil data drama Netshort.",
};

const SEARCH_FAILURE: Failure = Failure {
    route: "netshort search",
    nav: Nav::Netshort,
    message: "Pencarian Netshort gagal.",
};

const PLAY_FAILURE: Failure = Failure {
    route: "netshort play",
    nav: Nav::Netshort,
    message: "Gagal memuat episode drama.",
};

pub async fn home(State(state): State<AppState>) -> Result<Page, PageError> {
    home_page(&state).await.on_failure(HOME_FAILURE)
}

async fn home_page(state: &AppState) -> Result<Page, HandlerError> {
    let upstream = &state.upstream;
    let (theaters, for_you) = tokio::try_join!(
        upstream.get_json(Service::Netshort, "theaters", &[]),
        upstream.get_json(Service::Netshort, "foryou", &[]),
    )?;

    Page::new("index", &shape::home(theaters, for_you))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, PageError> {
    let Some(query) = params.non_empty("query") else {
        return Ok(Redirect::to("/").into_response());
    };
    search_page(&state, query)
        .await
        .on_failure(SEARCH_FAILURE)
        .map(IntoResponse::into_response)
}

async fn search_page(state: &AppState, query: &str) -> Result<Page, HandlerError> {
    let body = state
        .upstream
        .get_json(Service::Netshort, "search", &[("query", query)])
        .await?;

    Page::new("search", &shape::search(query, body))
}

pub async fn play(
    State(state): State<AppState>,
    Path(short_play_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<Page, PageError> {
    play_page(&state, &short_play_id, params.episode())
        .await
        .on_failure(PLAY_FAILURE)
}

async fn play_page(state: &AppState, short_play_id: &str, episode_no: i64) -> Result<Page, HandlerError> {
    let drama = state
        .upstream
        .get_json(Service::Netshort, "allepisode", &[("shortPlayId", short_play_id)])
        .await?;

    Page::new("play", &shape::play(drama, episode_no)?)
}
