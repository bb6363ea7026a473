use derive_more::{AsRef, Deref, Display, From};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN: &str = "unknown";
pub const BODY_WEIGHT: &str = "body weight";
pub const PLACEHOLDER_GIF_URL: &str =
    "https://via.placeholder.com/320x224/f0f0f0/666666?text=Exercise+Image";

/// Exercise in the canonical shape used by all consumers.
///
/// Upstream records differ between API versions (`exerciseId` vs. `id`, scalar `bodyPart` vs.
/// list `bodyParts`, ...). Deserializing an `Exercise` from any of these shapes goes through
/// [`normalize`], so the result always carries every display field.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub body_part: String,
    pub target: String,
    pub equipment: String,
    pub secondary_muscles: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_parts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_muscles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipments: Option<Vec<String>>,
}

impl Exercise {
    #[must_use]
    pub fn gif_url_or_placeholder(&self) -> &str {
        self.gif_url.as_deref().unwrap_or(PLACEHOLDER_GIF_URL)
    }

    /// All body parts, falling back to the primary one.
    #[must_use]
    pub fn all_body_parts(&self) -> Vec<&str> {
        match &self.body_parts {
            Some(body_parts) if !body_parts.is_empty() => {
                body_parts.iter().map(String::as_str).collect()
            }
            _ => vec![self.body_part.as_str()],
        }
    }
}

impl<'de> Deserialize<'de> for Exercise {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|record| normalize(&record))
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
pub struct ExerciseID(String);

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Map an upstream exercise record of any known shape to the canonical form.
///
/// Singular fields prefer the scalar (`bodyPart`) over the first element of the list
/// (`bodyParts[0]`) and fall back to `"unknown"`, except `equipment`, which falls back to
/// `"body weight"`. List fields are kept as they were received and never synthesized, so
/// normalizing a normalized record yields the same record.
#[must_use]
pub fn normalize(record: &Value) -> Exercise {
    let body_parts = list(record, "bodyParts");
    let target_muscles = list(record, "targetMuscles");
    let equipments = list(record, "equipments");

    Exercise {
        id: identifier(record, "id")
            .or_else(|| identifier(record, "exerciseId"))
            .unwrap_or_default()
            .into(),
        name: text(record, "name").unwrap_or_default(),
        body_part: primary(record, "bodyPart", body_parts.as_deref())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        target: primary(record, "target", target_muscles.as_deref())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        equipment: primary(record, "equipment", equipments.as_deref())
            .unwrap_or_else(|| BODY_WEIGHT.to_string()),
        secondary_muscles: list(record, "secondaryMuscles").unwrap_or_default(),
        instructions: list(record, "instructions").unwrap_or_default(),
        gif_url: text(record, "gifUrl"),
        body_parts,
        target_muscles,
        equipments,
    }
}

/// Normalize every record of an array. Anything but an array yields no exercises.
#[must_use]
pub fn normalize_all(records: &Value) -> Vec<Exercise> {
    records
        .as_array()
        .map(|records| records.iter().map(normalize).collect())
        .unwrap_or_default()
}

fn text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        _ => None,
    }
}

fn identifier(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn list(record: &Value, key: &str) -> Option<Vec<String>> {
    match record.get(key)? {
        Value::Array(values) => Some(
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(value) if !value.is_empty() => Some(vec![value.clone()]),
        _ => None,
    }
}

fn primary(record: &Value, key: &str, plural: Option<&[String]>) -> Option<String> {
    text(record, key).or_else(|| {
        plural
            .and_then(<[String]>::first)
            .filter(|value| !value.is_empty())
            .cloned()
    })
}
