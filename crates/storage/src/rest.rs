//! REST
//!
//! Access to the exercise backend and the video search service. Exercise responses are passed on
//! as JSON values; normalizing them is left to the domain service. Workout requests carry the
//! user's bearer token.

use gloo_net::http::{Request, Response};
use log::warn;
use repdex_domain as domain;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Settings;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone, Copy, Default)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    pub settings: Settings,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            sender: GlooNetSendRequest,
            settings,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<S: SendRequest> REST<S> {
    fn url(&self, path: &str) -> String {
        join(&self.settings.api_base_url, path)
    }

    async fn fetch(&self, request: Result<Request, gloo_net::Error>) -> Result<Value, FetchError> {
        let request = request.map_err(FetchError::Request)?;
        let url = request.url();

        match self.sender.send_request(request).await {
            Ok(response) => {
                if response.ok() {
                    response
                        .json::<Value>()
                        .await
                        .map_err(FetchError::Deserialization)
                } else {
                    let status = format!("{} {}", response.status(), response.status_text());
                    warn!("request to {url} failed: {status}");
                    Err(FetchError::Status {
                        status,
                        body: response.json::<Value>().await.unwrap_or_default(),
                    })
                }
            }
            Err(err) => {
                warn!("request to {url} failed: {err}");
                Err(FetchError::NoConnection)
            }
        }
    }

    async fn fetch_as<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<T, FetchError> {
        serde_json::from_value(self.fetch(request).await?).map_err(FetchError::Body)
    }
}

#[derive(Debug)]
enum FetchError {
    Request(gloo_net::Error),
    NoConnection,
    Status { status: String, body: Value },
    Deserialization(gloo_net::Error),
    Body(serde_json::Error),
}

impl FetchError {
    fn into_other(self) -> Box<dyn std::error::Error> {
        match self {
            FetchError::Request(err) | FetchError::Deserialization(err) => Box::new(err),
            FetchError::Body(err) => Box::new(err),
            FetchError::Status { status, .. } => status.into(),
            FetchError::NoConnection => "no connection".into(),
        }
    }
}

impl From<FetchError> for domain::ReadError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => domain::StorageError::NoConnection.into(),
            err => domain::ReadError::Other(err.into_other()),
        }
    }
}

impl From<FetchError> for domain::CreateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => domain::StorageError::NoConnection.into(),
            FetchError::Status { status, body } => match rejection(&body) {
                Some((message, empty_fields)) => domain::CreateError::Rejected {
                    message,
                    empty_fields,
                },
                None => domain::CreateError::from(status),
            },
            err => domain::CreateError::Other(err.into_other()),
        }
    }
}

impl From<FetchError> for domain::DeleteError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => domain::StorageError::NoConnection.into(),
            err => domain::DeleteError::Other(err.into_other()),
        }
    }
}

/// Error message and missing form fields of a rejected request (`{ "error", "emptyFields" }`).
fn rejection(body: &Value) -> Option<(String, Vec<String>)> {
    let message = body.get("error")?.as_str()?.to_string();
    let empty_fields = body
        .get("emptyFields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some((message, empty_fields))
}

impl<S: SendRequest> domain::ExerciseRepository for REST<S> {
    async fn read_exercises(
        &self,
        query: &domain::ExerciseQuery,
    ) -> Result<Value, domain::ReadError> {
        Ok(self
            .fetch(Request::get(&self.url(&query.path_and_query())).build())
            .await?)
    }

    async fn read_exercise(&self, id: &domain::ExerciseID) -> Result<Value, domain::ReadError> {
        Ok(self
            .fetch(Request::get(&self.url(&domain::exercise_path(id))).build())
            .await?)
    }

    async fn read_body_parts(&self) -> Result<Value, domain::ReadError> {
        Ok(self
            .fetch(Request::get(&self.url(domain::BODY_PARTS_PATH)).build())
            .await?)
    }

    async fn read_targets(&self) -> Result<Value, domain::ReadError> {
        Ok(self
            .fetch(Request::get(&self.url(domain::TARGETS_PATH)).build())
            .await?)
    }

    async fn read_equipment(&self) -> Result<Value, domain::ReadError> {
        Ok(self
            .fetch(Request::get(&self.url(domain::EQUIPMENT_PATH)).build())
            .await?)
    }
}

impl<S: SendRequest> domain::VideoRepository for REST<S> {
    async fn search_videos(&self, query: &str) -> Result<Value, domain::ReadError> {
        let Some(video_api) = &self.settings.video_api else {
            return Err(domain::StorageError::NotConfigured("video search").into());
        };
        Ok(self
            .fetch(
                Request::get(&join(&video_api.url, "search"))
                    .query([("query", query)])
                    .header("X-RapidAPI-Key", &video_api.key)
                    .header("X-RapidAPI-Host", &video_api.host)
                    .build(),
            )
            .await?)
    }
}

impl<S: SendRequest> domain::WorkoutRepository for REST<S> {
    async fn read_workouts(
        &self,
        token: &domain::BearerToken,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .fetch_as(
                Request::get(&self.url(domain::WORKOUTS_PATH))
                    .header("Authorization", &token.authorization())
                    .build(),
            )
            .await?)
    }

    async fn create_workout(
        &self,
        token: &domain::BearerToken,
        workout: domain::NewWorkout,
    ) -> Result<domain::Workout, domain::CreateError> {
        Ok(self
            .fetch_as(
                Request::post(&self.url(domain::WORKOUTS_PATH))
                    .header("Authorization", &token.authorization())
                    .json(&workout),
            )
            .await?)
    }

    async fn delete_workout(
        &self,
        token: &domain::BearerToken,
        id: &domain::WorkoutID,
    ) -> Result<domain::Workout, domain::DeleteError> {
        Ok(self
            .fetch_as(
                Request::delete(&self.url(&domain::workout_path(id)))
                    .header("Authorization", &token.authorization())
                    .build(),
            )
            .await?)
    }
}

impl<S: SendRequest> domain::PlannerRepository for REST<S> {
    async fn create_workout_plan(
        &self,
        token: &domain::BearerToken,
        request: &domain::PlanRequest,
    ) -> Result<Value, domain::CreateError> {
        Ok(self
            .fetch(
                Request::post(&self.url(domain::WORKOUT_PLAN_PATH))
                    .header("Authorization", &token.authorization())
                    .json(request),
            )
            .await?)
    }
}

/// Join a base URL and a relative path with exactly one slash. An empty base keeps the path
/// relative to the page origin.
fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{base}/{path}")
    }
}
