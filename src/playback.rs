//! Episode lookup and video source selection shared by both play pages.

use serde_json::Value;

use crate::util::{as_slice, flag_field, int_field, select_by_preference, select_or_first, str_field, Selection};

pub const PREFERRED_QUALITY: i64 = 720;

/// Finds the episode whose `key` field equals `number`, falling back to the
/// first episode. The upstream list is not assumed to be sorted.
pub fn find_episode<'a>(episodes: &'a [Value], key: &str, number: i64) -> Option<Selection<'a, Value>> {
    select_or_first(episodes, |ep| int_field(ep, key) == Some(number))
}

/// Picks the CDN flagged as default, else the first one.
pub fn pick_cdn(cdns: &[Value]) -> Option<&Value> {
    select_or_first(cdns, |cdn| flag_field(cdn, "isDefault")).map(|s| s.item)
}

/// Picks a path variant: the flagged default, else 720p, else the first.
pub fn pick_video_path(paths: &[Value]) -> Option<&Value> {
    let is_default = |p: &Value| flag_field(p, "isDefault");
    let is_preferred_quality = |p: &Value| int_field(p, "quality") == Some(PREFERRED_QUALITY);
    let preferences: [&dyn Fn(&Value) -> bool; 2] = [&is_default, &is_preferred_quality];
    select_by_preference(paths, &preferences).map(|s| s.item)
}

/// Video URL of an episode through its CDN list, if it has one.
pub fn cdn_video_url(episode: &Value) -> Option<String> {
    let cdn = pick_cdn(as_slice(episode.get("cdnList")?))?;
    let path = pick_video_path(cdn.get("videoPathList").map(as_slice).unwrap_or(&[]))?;
    Some(str_field(path, "videoPath").unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_episode() {
        let episodes = vec![
            json!({ "episodeNo": 3 }),
            json!({ "episodeNo": 1 }),
            json!({ "episodeNo": 2 }),
        ];
        let sel = find_episode(&episodes, "episodeNo", 2).unwrap();
        assert!(sel.matched);
        assert_eq!(sel.item["episodeNo"], 2);

        let sel = find_episode(&episodes, "episodeNo", 9).unwrap();
        assert!(!sel.matched);
        assert_eq!(sel.item["episodeNo"], 3);

        assert!(find_episode(&[], "episodeNo", 1).is_none());
    }

    #[test]
    fn test_pick_video_path_default_wins() {
        let paths = vec![
            json!({ "quality": 720, "isDefault": 0, "videoPath": "a" }),
            json!({ "quality": 540, "isDefault": 0, "videoPath": "b" }),
            json!({ "quality": 1080, "isDefault": 1, "videoPath": "c" }),
        ];
        assert_eq!(pick_video_path(&paths).unwrap()["videoPath"], "c");
    }

    #[test]
    fn test_pick_video_path_quality_then_first() {
        let paths = vec![
            json!({ "quality": 540, "isDefault": 0, "videoPath": "a" }),
            json!({ "quality": 720, "isDefault": 0, "videoPath": "b" }),
        ];
        assert_eq!(pick_video_path(&paths).unwrap()["videoPath"], "b");

        let paths = vec![
            json!({ "quality": 540, "videoPath": "a" }),
            json!({ "quality": 1080, "videoPath": "b" }),
        ];
        assert_eq!(pick_video_path(&paths).unwrap()["videoPath"], "a");
        assert!(pick_video_path(&[]).is_none());
    }

    #[test]
    fn test_cdn_video_url() {
        let episode = json!({
            "chapterIndex": 0,
            "cdnList": [
                { "isDefault": 0, "videoPathList": [ { "quality": 720, "videoPath": "http://x/720" } ] },
                { "isDefault": 1, "videoPathList": [
                    { "quality": 540, "isDefault": 0, "videoPath": "http://y/540" },
                    { "quality": 720, "isDefault": 0, "videoPath": "http://y/720" }
                ] }
            ]
        });
        assert_eq!(cdn_video_url(&episode).as_deref(), Some("http://y/720"));

        assert_eq!(cdn_video_url(&json!({ "cdnList": [] })), None);
        assert_eq!(cdn_video_url(&json!({})), None);
        assert_eq!(cdn_video_url(&json!({ "cdnList": [ { "isDefault": 1 } ] })), None);
    }
}
