use std::fmt::{self, Display};

use serde::Serialize;

use crate::{Exercise, ExerciseQuery, QueryScope};

pub const ALL_BODY_PARTS: &str = "all";
pub const SEARCH_RESULTS: &str = "search-results";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum BodyPartSelection {
    #[default]
    All,
    SearchResults,
    Named(String),
}

impl From<&str> for BodyPartSelection {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | ALL_BODY_PARTS => BodyPartSelection::All,
            SEARCH_RESULTS => BodyPartSelection::SearchResults,
            name => BodyPartSelection::Named(name.to_string()),
        }
    }
}

impl Display for BodyPartSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyPartSelection::All => write!(f, "{ALL_BODY_PARTS}"),
            BodyPartSelection::SearchResults => write!(f, "{SEARCH_RESULTS}"),
            BodyPartSelection::Named(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub search: String,
    pub body_part: BodyPartSelection,
}

impl ExerciseFilter {
    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || [
                &exercise.name,
                &exercise.target,
                &exercise.equipment,
                &exercise.body_part,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&search));

        let matches_body_part = match &self.body_part {
            BodyPartSelection::All | BodyPartSelection::SearchResults => true,
            BodyPartSelection::Named(name) => {
                let name = name.trim();
                exercise.body_part.eq_ignore_ascii_case(name)
                    || exercise
                        .body_parts
                        .iter()
                        .flatten()
                        .any(|body_part| body_part.eq_ignore_ascii_case(name))
            }
        };

        matches_search && matches_body_part
    }

    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises.filter(|e| self.matches(e)).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && matches!(
                self.body_part,
                BodyPartSelection::All | BodyPartSelection::SearchResults
            )
    }

    /// Backend query that yields the exercises matching this filter.
    #[must_use]
    pub fn query(&self, page: u32) -> ExerciseQuery {
        let query = match &self.body_part {
            BodyPartSelection::Named(name) => {
                ExerciseQuery::new(QueryScope::BodyPart(name.clone())).with_page(page)
            }
            BodyPartSelection::All | BodyPartSelection::SearchResults => ExerciseQuery::all(page),
        };
        query.with_search(&self.search)
    }
}

/// Body part choices for the selection bar, starting with "all".
#[must_use]
pub fn body_part_list(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut list = vec![ALL_BODY_PARTS.to_string()];
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !list.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            list.push(name.to_string());
        }
    }
    list
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarExercises {
    pub target: Vec<Exercise>,
    pub equipment: Vec<Exercise>,
}

impl SimilarExercises {
    /// Keep the candidates that share the target muscle (resp. the equipment) of `exercise`,
    /// excluding `exercise` itself.
    #[must_use]
    pub fn new(
        exercise: &Exercise,
        target_candidates: Vec<Exercise>,
        equipment_candidates: Vec<Exercise>,
    ) -> Self {
        Self {
            target: target_candidates
                .into_iter()
                .filter(|e| {
                    !is_same(e, exercise) && e.target.eq_ignore_ascii_case(&exercise.target)
                })
                .collect(),
            equipment: equipment_candidates
                .into_iter()
                .filter(|e| {
                    !is_same(e, exercise) && e.equipment.eq_ignore_ascii_case(&exercise.equipment)
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn from_exercises(exercise: &Exercise, exercises: &[Exercise]) -> Self {
        Self::new(exercise, exercises.to_vec(), exercises.to_vec())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_empty() && self.equipment.is_empty()
    }
}

/// Records without an id are only the same exercise if they are equal.
fn is_same(a: &Exercise, b: &Exercise) -> bool {
    if a.id.is_empty() || b.id.is_empty() {
        a == b
    } else {
        a.id == b.id
    }
}
