use chrono::{DateTime, TimeDelta, Utc};
use derive_more::{AsRef, Deref, Display, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WORKOUTS_PATH: &str = "api/workouts";
pub const WORKOUT_PLAN_PATH: &str = "api/planner/workout-plan";

#[must_use]
pub fn workout_path(id: &WorkoutID) -> String {
    format!("{WORKOUTS_PATH}/{}", urlencoding::encode(id))
}

/// Token of a logged in user, sent as `Authorization: Bearer <token>`.
#[derive(Deref, Display, From, Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(
    AsRef,
    Deref,
    Display,
    From,
    Serialize,
    Deserialize,
    Debug,
    Default,
    Clone,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[serde(transparent)]
pub struct WorkoutID(String);

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A logged set: `reps` repetitions with `load` kilograms.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: WorkoutID,
    pub title: String,
    pub load: f64,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Load times repetitions in kilograms.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.load * f64::from(self.reps)
    }
}

/// Request body for logging a workout.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub title: String,
    pub load: f64,
    pub reps: u32,
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_volume: f64,
    pub average_load: f64,
    pub this_week_workouts: usize,
}

impl WorkoutStats {
    /// Summary of `workouts` as of `now`. The total volume is rounded to whole kilograms, the
    /// average load to one decimal.
    #[must_use]
    pub fn new(workouts: &[Workout], now: DateTime<Utc>) -> Self {
        if workouts.is_empty() {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let count = workouts.len() as f64;
        let one_week_ago = now - TimeDelta::days(7);

        Self {
            total_workouts: workouts.len(),
            total_volume: workouts.iter().map(Workout::volume).sum::<f64>().round(),
            average_load: (workouts.iter().map(|w| w.load).sum::<f64>() / count * 10.).round()
                / 10.,
            this_week_workouts: workouts
                .iter()
                .filter(|w| w.created_at.is_some_and(|t| t > one_week_ago))
                .count(),
        }
    }
}

/// Free text describing the user, goals and preferences for the plan generator.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    pub text: String,
}

impl WorkoutPlan {
    /// The generated plan is returned as `text` or, by older backends, as `workoutPlan`.
    #[must_use]
    pub fn from_response(response: &Value) -> Option<Self> {
        ["text", "workoutPlan"]
            .iter()
            .find_map(|key| response.get(key).and_then(Value::as_str))
            .filter(|text| !text.trim().is_empty())
            .map(|text| Self {
                text: text.to_string(),
            })
    }
}
