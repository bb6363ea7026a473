use serde::Serialize;
use serde_json::Value;

use crate::{DEFAULT_PAGE_SIZE, Exercise, PageMetadata, Pagination, normalize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExercisePage {
    pub exercises: Vec<Exercise>,
    pub pagination: Pagination,
}

impl ExercisePage {
    #[must_use]
    pub fn empty(page_size: u32) -> Self {
        Self {
            exercises: vec![],
            pagination: Pagination::empty(page_size),
        }
    }

    /// Build a page from an upstream list response.
    ///
    /// Envelopes (`{ "exercises": [...], "pagination": {...} }`) are trusted to contain exactly the
    /// requested page. A bare array is taken as the complete result set and paginated locally.
    #[must_use]
    pub fn from_response(response: &Value, page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);

        if let Value::Array(records) = response {
            let pagination = Pagination::from_len(records.len(), page_size, page);
            let range = pagination.to_offset_limit().range(records.len());
            return Self {
                exercises: records[range].iter().map(normalize).collect(),
                pagination,
            };
        }

        let exercises = records(response)
            .map(|records| records.iter().map(normalize).collect::<Vec<_>>())
            .unwrap_or_default();
        let metadata = PageMetadata::from_response(response);
        let page_size = metadata.page_size.unwrap_or(page_size);
        let pagination = match (metadata.total_items, metadata.total_pages) {
            (Some(total_items), _) => Pagination::from_totals(total_items, page_size, page),
            (None, Some(total_pages)) => Pagination::from_page_count(
                total_pages,
                u64::try_from(exercises.len()).unwrap_or(u64::MAX),
                page_size,
                page,
            ),
            (None, None) => Pagination::from_len(exercises.len(), page_size, page),
        };

        Self {
            exercises,
            pagination,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Default for ExercisePage {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// Records of an envelope response, if any.
pub(crate) fn records(response: &Value) -> Option<&Vec<Value>> {
    ["exercises", "data"]
        .iter()
        .find_map(|key| response.get(key).and_then(Value::as_array))
}
