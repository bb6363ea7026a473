use log::{debug, error};
use serde_json::Value;

use crate::{
    BearerToken, CreateError, DeleteError, Exercise, ExerciseID, ExercisePage, ExerciseQuery,
    ExerciseVideo, FEATURED_VIDEO_COUNT, NewWorkout, PlanRequest, QueryScope, ReadError,
    SimilarExercises, Workout, WorkoutID, WorkoutPlan, body_part_list, listing::records,
    normalize, normalize_videos, video_search_query,
};

/// Raw access to the exercise backend. Responses are returned as received.
#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self, query: &ExerciseQuery) -> Result<Value, ReadError>;
    async fn read_exercise(&self, id: &ExerciseID) -> Result<Value, ReadError>;
    async fn read_body_parts(&self) -> Result<Value, ReadError>;
    async fn read_targets(&self) -> Result<Value, ReadError>;
    async fn read_equipment(&self) -> Result<Value, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait VideoRepository {
    async fn search_videos(&self, query: &str) -> Result<Value, ReadError>;
}

/// Workouts of the user identified by the token.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, token: &BearerToken) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        token: &BearerToken,
        workout: NewWorkout,
    ) -> Result<Workout, CreateError>;
    async fn delete_workout(
        &self,
        token: &BearerToken,
        id: &WorkoutID,
    ) -> Result<Workout, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait PlannerRepository {
    async fn create_workout_plan(
        &self,
        token: &BearerToken,
        request: &PlanRequest,
    ) -> Result<Value, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self, query: &ExerciseQuery) -> Result<ExercisePage, ReadError>;
    async fn get_exercise(&self, id: &ExerciseID) -> Result<Exercise, ReadError>;
    async fn get_similar_exercises(
        &self,
        exercise: &Exercise,
    ) -> Result<SimilarExercises, ReadError>;
    async fn get_body_parts(&self) -> Result<Vec<String>, ReadError>;
    async fn get_targets(&self) -> Result<Vec<String>, ReadError>;
    async fn get_equipment(&self) -> Result<Vec<String>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait VideoService {
    async fn get_exercise_videos(
        &self,
        exercise: &Exercise,
    ) -> Result<Vec<ExerciseVideo>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, token: &BearerToken) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        token: &BearerToken,
        workout: NewWorkout,
    ) -> Result<Workout, CreateError>;
    async fn delete_workout(
        &self,
        token: &BearerToken,
        id: &WorkoutID,
    ) -> Result<Workout, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait PlannerService {
    async fn generate_workout_plan(
        &self,
        token: &BearerToken,
        text: &str,
    ) -> Result<WorkoutPlan, CreateError>;
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self, query: &ExerciseQuery) -> Result<ExercisePage, ReadError> {
        let response = log_on_error!(
            self.repository.read_exercises(query),
            ReadError,
            "get",
            "exercises"
        )?;
        Ok(ExercisePage::from_response(
            &response,
            query.page,
            query.page_size,
        ))
    }

    async fn get_exercise(&self, id: &ExerciseID) -> Result<Exercise, ReadError> {
        let response = log_on_error!(
            self.repository.read_exercise(id),
            ReadError,
            "get",
            "exercise"
        )?;
        let record = ["data", "exercise"]
            .iter()
            .find_map(|key| response.get(key).filter(|value| value.is_object()))
            .unwrap_or(&response);
        Ok(normalize(record))
    }

    async fn get_similar_exercises(
        &self,
        exercise: &Exercise,
    ) -> Result<SimilarExercises, ReadError> {
        let target_query = ExerciseQuery::new(QueryScope::Target(exercise.target.clone()));
        let equipment_query = ExerciseQuery::new(QueryScope::Equipment(exercise.equipment.clone()));
        let target = log_on_error!(
            self.repository.read_exercises(&target_query),
            ReadError,
            "get",
            "target muscle exercises"
        )?;
        let equipment = log_on_error!(
            self.repository.read_exercises(&equipment_query),
            ReadError,
            "get",
            "equipment exercises"
        )?;
        Ok(SimilarExercises::new(
            exercise,
            ExercisePage::from_response(&target, target_query.page, target_query.page_size)
                .exercises,
            ExercisePage::from_response(
                &equipment,
                equipment_query.page,
                equipment_query.page_size,
            )
            .exercises,
        ))
    }

    async fn get_body_parts(&self) -> Result<Vec<String>, ReadError> {
        let response = log_on_error!(
            self.repository.read_body_parts(),
            ReadError,
            "get",
            "body parts"
        )?;
        Ok(body_part_list(names(&response, "bodyParts")))
    }

    async fn get_targets(&self) -> Result<Vec<String>, ReadError> {
        let response = log_on_error!(
            self.repository.read_targets(),
            ReadError,
            "get",
            "targets"
        )?;
        Ok(names(&response, "targets"))
    }

    async fn get_equipment(&self) -> Result<Vec<String>, ReadError> {
        let response = log_on_error!(
            self.repository.read_equipment(),
            ReadError,
            "get",
            "equipment"
        )?;
        Ok(names(&response, "equipment"))
    }
}

impl<R: VideoRepository> VideoService for Service<R> {
    async fn get_exercise_videos(
        &self,
        exercise: &Exercise,
    ) -> Result<Vec<ExerciseVideo>, ReadError> {
        let response = log_on_error!(
            self.repository
                .search_videos(&video_search_query(&exercise.name)),
            ReadError,
            "get",
            "exercise videos"
        )?;
        Ok(normalize_videos(&response, FEATURED_VIDEO_COUNT))
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, token: &BearerToken) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(token),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout(
        &self,
        token: &BearerToken,
        workout: NewWorkout,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(token, workout),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn delete_workout(
        &self,
        token: &BearerToken,
        id: &WorkoutID,
    ) -> Result<Workout, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(token, id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: PlannerRepository> PlannerService for Service<R> {
    async fn generate_workout_plan(
        &self,
        token: &BearerToken,
        text: &str,
    ) -> Result<WorkoutPlan, CreateError> {
        let request = PlanRequest {
            text: text.trim().to_string(),
        };
        let response = log_on_error!(
            self.repository.create_workout_plan(token, &request),
            CreateError,
            "generate",
            "workout plan"
        )?;
        WorkoutPlan::from_response(&response).ok_or_else(|| {
            error!("failed to generate workout plan: no plan in response");
            CreateError::from("no plan in response".to_string())
        })
    }
}

/// Names from a bare array or from an envelope field (`key` or `data`). Lookup lists may contain
/// plain strings or objects with a `name`.
fn names(response: &Value, key: &str) -> Vec<String> {
    response
        .as_array()
        .or_else(|| response.get(key).and_then(Value::as_array))
        .or_else(|| records(response))
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().or_else(|| value.get("name")?.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
