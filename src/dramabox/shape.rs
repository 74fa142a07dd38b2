use serde::Serialize;
use serde_json::Value;

use crate::page::{HandlerError, Nav};
use crate::playback::{cdn_video_url, find_episode};
use crate::util::{int_field, list_or_empty, record_or_empty, str_field, take_field};

pub const CATALOG_TITLE: &str = "DramaBox - Koleksi Drama Pendek Terbaik | Dracin";

/// Raw bodies of the six catalog lists, in request order.
#[derive(Debug, Default)]
pub struct CatalogLists {
    pub latest: Value,
    pub trending: Value,
    pub vip: Value,
    pub popular: Value,
    pub dub_popular: Value,
    pub dub_newest: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub title: String,
    pub active_nav: Nav,
    pub db_latest: Value,
    pub db_trending: Value,
    pub db_vip: Value,
    pub db_popular: Value,
    pub db_dub_pop: Value,
    pub db_dub_new: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub title: String,
    pub active_nav: Nav,
    pub query: String,
    pub results: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayView {
    pub title: String,
    pub active_nav: Nav,
    pub book_id: String,
    pub current_episode: i64,
    pub video_url: String,
    pub drama: Value,
    pub episodes: Value,
    #[serde(rename = "dramaJSON")]
    pub drama_json: String,
    #[serde(rename = "episodesJSON")]
    pub episodes_json: String,
}

pub fn catalog(lists: CatalogLists) -> CatalogView {
    let mut vip = lists.vip;
    CatalogView {
        title: CATALOG_TITLE.to_string(),
        active_nav: Nav::Dramabox,
        db_latest: list_or_empty(Some(lists.latest)),
        db_trending: list_or_empty(Some(lists.trending)),
        db_vip: list_or_empty(take_field(&mut vip, "columnVoList")),
        db_popular: list_or_empty(Some(lists.popular)),
        db_dub_pop: list_or_empty(Some(lists.dub_popular)),
        db_dub_new: list_or_empty(Some(lists.dub_newest)),
    }
}

pub fn search(query: &str, body: Value) -> SearchView {
    SearchView {
        title: format!("Pencarian DramaBox: {} | Dracin", query),
        active_nav: Nav::Dramabox,
        query: query.to_string(),
        results: list_or_empty(Some(body)),
    }
}

/// The book record sits at `data.book` in the detail response.
pub fn book_info(mut detail: Value) -> Value {
    let book = take_field(&mut detail, "data")
        .as_mut()
        .and_then(|data| take_field(data, "book"));
    record_or_empty(book)
}

/// `episode` is the 1-based number from the query string; upstream
/// chapters are indexed from 0.
pub fn play(book_id: &str, episodes: Value, detail: Value, episode: i64) -> Result<PlayView, HandlerError> {
    let episodes = list_or_empty(Some(episodes));
    let drama = book_info(detail);
    let chapter_index = episode.saturating_sub(1);

    let list = episodes.as_array().map(|v| v.as_slice()).unwrap_or(&[]);
    let (current_episode, video_url) = match find_episode(list, "chapterIndex", chapter_index) {
        Some(sel) => {
            let number = if sel.matched {
                episode
            } else {
                int_field(sel.item, "chapterIndex").map_or(1, |i| i.saturating_add(1))
            };
            (number, cdn_video_url(sel.item).unwrap_or_default())
        }
        None => (episode, String::new()),
    };

    let name = str_field(&drama, "bookName").unwrap_or("DramaBox");
    let title = format!("{} - Ep {} | Dracin", name, current_episode);
    let drama_json = serde_json::to_string(&drama).map_err(HandlerError::Context)?;
    let episodes_json = serde_json::to_string(&episodes).map_err(HandlerError::Context)?;

    Ok(PlayView {
        title,
        active_nav: Nav::Dramabox,
        book_id: book_id.to_string(),
        current_episode,
        video_url,
        drama,
        episodes,
        drama_json,
        episodes_json,
    })
}
