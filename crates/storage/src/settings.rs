use log::LevelFilter;
use repdex_domain::{DEFAULT_PAGE_SIZE, ExerciseFilter, ExerciseQuery};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: u32,
    pub video_api: Option<VideoApi>,
    pub log_level: LevelFilter,
}

impl Settings {
    /// Backend query for one page of the exercises matching `filter`.
    #[must_use]
    pub fn exercise_query(&self, filter: &ExerciseFilter, page: u32) -> ExerciseQuery {
        filter.query(page).with_page_size(self.page_size)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            video_api: None,
            log_level: LevelFilter::Debug,
        }
    }
}

/// Video search service, queried with `X-RapidAPI-Key` and `X-RapidAPI-Host` headers.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoApi {
    pub url: String,
    pub key: String,
    pub host: String,
}
