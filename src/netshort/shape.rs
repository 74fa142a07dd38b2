use serde::Serialize;
use serde_json::Value;

use crate::page::{HandlerError, Nav};
use crate::playback::{cdn_video_url, find_episode};
use crate::util::{annotate_heat, int_field, list_or_empty, str_field, take_field};

pub const HOME_TITLE: &str = "Dracin - Nonton Drama China Pendek Premium";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub title: String,
    pub active_nav: Nav,
    pub theaters: Value,
    pub for_you: Value,
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
    pub drama: Value,
    #[serde(rename = "dramaJSON")]
    pub drama_json: String,
    pub current_episode: Value,
    pub episode_number: i64,
    pub video_url: String,
}

pub fn home(mut theaters: Value, mut for_you: Value) -> HomeView {
    annotate_heat(&mut theaters);
    annotate_heat(&mut for_you);
    HomeView {
        title: HOME_TITLE.to_string(),
        active_nav: Nav::Netshort,
        theaters: list_or_empty(Some(theaters)),
        for_you: list_or_empty(Some(for_you)),
    }
}

pub fn search(query: &str, mut body: Value) -> SearchView {
    let mut results = list_or_empty(take_field(&mut body, "searchCodeSearchResult"));
    annotate_heat(&mut results);
    SearchView {
        title: format!("Pencarian Netshort: {} | Dracin", query),
        active_nav: Nav::Netshort,
        query: query.to_string(),
        results,
    }
}

/// Resolves the requested episode of a show. The episode list is required;
/// a show without one cannot be played.
pub fn play(drama: Value, episode_no: i64) -> Result<PlayView, HandlerError> {
    let episodes = drama
        .get("shortPlayEpisodeInfos")
        .and_then(Value::as_array)
        .ok_or(HandlerError::MissingField("shortPlayEpisodeInfos"))?;

    let (current_episode, episode_number) = match find_episode(episodes, "episodeNo", episode_no) {
        Some(sel) if sel.matched => (sel.item.clone(), episode_no),
        Some(sel) => (sel.item.clone(), int_field(sel.item, "episodeNo").unwrap_or(1)),
        None => (Value::Null, episode_no),
    };

    let video_url = cdn_video_url(&current_episode)
        .or_else(|| str_field(&current_episode, "playVoucher").map(str::to_string))
        .unwrap_or_default();

    let name = str_field(&drama, "shortPlayName").unwrap_or("Netshort");
    let drama_json = serde_json::to_string(&drama).map_err(HandlerError::Context)?;

    Ok(PlayView {
        title: format!("{} - Ep {} | Dracin", name, episode_number),
        active_nav: Nav::Netshort,
        drama_json,
        current_episode,
        episode_number,
        video_url,
        drama,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn show(count: i64) -> Value {
        let episodes: Vec<Value> = (1..=count)
            .map(|n| json!({ "episodeNo": n, "playVoucher": format!("https://cdn/ep{}.m3u8", n) }))
            .collect();
        json!({ "shortPlayId": "123", "shortPlayName": "Cinta Terlarang", "shortPlayEpisodeInfos": episodes })
    }

    #[test]
    fn test_play_exact_episode() {
        let view = play(show(5), 2).unwrap();
        assert_eq!(view.episode_number, 2);
        assert_eq!(view.current_episode["episodeNo"], 2);
        assert_eq!(view.video_url, "https://cdn/ep2.m3u8");
        assert_eq!(view.title, "Cinta Terlarang - Ep 2 | Dracin");
    }

    #[test]
    fn test_play_falls_back_to_first() {
        let view = play(show(3), 42).unwrap();
        assert_eq!(view.episode_number, 1);
        assert_eq!(view.current_episode["episodeNo"], 1);
    }

    #[test]
    fn test_play_without_episodes() {
        let err = play(json!({ "shortPlayName": "X" }), 1).unwrap_err();
        assert!(matches!(err, HandlerError::MissingField("shortPlayEpisodeInfos")));

        let view = play(json!({ "shortPlayEpisodeInfos": [] }), 3).unwrap();
        assert!(view.current_episode.is_null());
        assert_eq!(view.video_url, "");
        assert_eq!(view.title, "Netshort - Ep 3 | Dracin");
    }

    #[test]
    fn test_search_defaults() {
        let view = search("cinta", json!({}));
        assert_eq!(view.results, json!([]));
        assert_eq!(view.title, "Pencarian Netshort: cinta | Dracin");

        let view = search("cinta", json!({ "searchCodeSearchResult": [ { "heatScore": 1500 } ] }));
        assert_eq!(view.results[0]["heatScoreLabel"], "1.5K");
    }

    #[test]
    fn test_home_defaults() {
        let view = home(Value::Null, json!([ { "heatScore": 2300000 } ]));
        assert_eq!(view.theaters, json!([]));
        assert_eq!(view.for_you[0]["heatScoreLabel"], "2.3M");
    }
}
