use serde::Serialize;
use serde_json::Value;

pub const FEATURED_VIDEO_COUNT: usize = 3;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseVideo {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl ExerciseVideo {
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("{WATCH_URL}{}", self.video_id)
    }
}

#[must_use]
pub fn video_search_query(exercise_name: &str) -> String {
    format!("{} exercise", exercise_name.trim())
}

/// Extract up to `limit` videos from a video search response.
///
/// Results are read from `contents` (or a bare array) as `{ "video": { "videoId", "title",
/// "channelName", "thumbnails": [{ "url" }] } }`. Entries that are not videos (channels,
/// playlists) carry no `videoId` and are skipped.
#[must_use]
pub fn normalize_videos(response: &Value, limit: usize) -> Vec<ExerciseVideo> {
    let Some(contents) = response
        .get("contents")
        .and_then(Value::as_array)
        .or_else(|| response.as_array())
    else {
        return vec![];
    };

    contents
        .iter()
        .filter_map(|item| {
            let video = item.get("video")?;
            let video_id = text(video, "videoId").filter(|id| !id.is_empty())?;
            Some(ExerciseVideo {
                video_id,
                title: text(video, "title").unwrap_or_default(),
                channel_name: text(video, "channelName").unwrap_or_default(),
                thumbnail_url: video
                    .get("thumbnails")
                    .and_then(Value::as_array)
                    .and_then(|thumbnails| thumbnails.first())
                    .and_then(|thumbnail| text(thumbnail, "url")),
            })
        })
        .take(limit)
        .collect()
}

fn text(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}
