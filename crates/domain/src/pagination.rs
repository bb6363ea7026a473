use std::ops::Range;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PaginationError;

pub const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetLimit {
    pub offset: u64,
    pub limit: u32,
}

impl OffsetLimit {
    /// Strict counterpart of [`to_offset_limit`] for callers that must reject invalid input.
    pub fn new(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page < 1 || page_size < 1 {
            return Err(PaginationError::InvalidArgument { page, page_size });
        }
        Ok(to_offset_limit(page, page_size))
    }

    /// Index range of this page within a local list of `len` items.
    #[must_use]
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let end = start
            .saturating_add(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .min(len);
        start..end
    }
}

/// Zero page numbers and page sizes are treated as 1.
#[must_use]
pub fn to_offset_limit(page: u32, page_size: u32) -> OffsetLimit {
    let page = page.max(1);
    let page_size = page_size.max(1);
    OffsetLimit {
        offset: u64::from(page - 1) * u64::from(page_size),
        limit: page_size,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    #[must_use]
    pub fn from_totals(total_items: u64, page_size: u32, current_page: u32) -> Self {
        let page_size = page_size.max(1);
        let total_pages =
            u32::try_from(total_items.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);
        Self::from_page_count(total_pages, total_items, page_size, current_page)
    }

    #[must_use]
    pub fn from_len(len: usize, page_size: u32, current_page: u32) -> Self {
        Self::from_totals(
            u64::try_from(len).unwrap_or(u64::MAX),
            page_size,
            current_page,
        )
    }

    /// Descriptor for an upstream that reports its page count but not its item count.
    #[must_use]
    pub fn from_page_count(
        total_pages: u32,
        total_items: u64,
        page_size: u32,
        current_page: u32,
    ) -> Self {
        let total_pages = total_pages.max(1);
        let current_page = current_page.clamp(1, total_pages);
        Self {
            current_page,
            total_pages,
            total_items,
            page_size: page_size.max(1),
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    #[must_use]
    pub fn empty(page_size: u32) -> Self {
        Self::from_totals(0, page_size, 1)
    }

    #[must_use]
    pub fn to_offset_limit(&self) -> OffsetLimit {
        to_offset_limit(self.current_page, self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// Page counts reported alongside an upstream exercise list.
///
/// The current API sends a `pagination` object (`totalPages`, `totalExercises`,
/// `exercisesPerPage`), the v1 API a `metadata` object (`totalPages`, `totalExercises`). Counts
/// given as numeric strings are accepted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageMetadata {
    pub total_items: Option<u64>,
    pub total_pages: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageMetadata {
    #[must_use]
    pub fn from_response(response: &Value) -> Self {
        let metadata = ["pagination", "metadata"]
            .iter()
            .filter_map(|key| response.get(key).filter(|value| value.is_object()))
            .map(Self::from_object)
            .fold(Self::default(), Self::or);

        Self {
            total_items: metadata
                .total_items
                .or_else(|| count(response, "total"))
                .or_else(|| count(response, "totalItems")),
            ..metadata
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_items.is_none() && self.total_pages.is_none() && self.page_size.is_none()
    }

    fn from_object(object: &Value) -> Self {
        Self {
            total_items: count(object, "totalExercises")
                .or_else(|| count(object, "totalItems"))
                .or_else(|| count(object, "total")),
            total_pages: count(object, "totalPages").and_then(|n| u32::try_from(n).ok()),
            page_size: count(object, "exercisesPerPage")
                .or_else(|| count(object, "limit"))
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0),
        }
    }

    fn or(self, other: Self) -> Self {
        Self {
            total_items: self.total_items.or(other.total_items),
            total_pages: self.total_pages.or(other.total_pages),
            page_size: self.page_size.or(other.page_size),
        }
    }
}

fn count(object: &Value, key: &str) -> Option<u64> {
    match object.get(key)? {
        Value::Number(value) => value.as_u64(),
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(1, 12, OffsetLimit { offset: 0, limit: 12 })]
    #[case(3, 12, OffsetLimit { offset: 24, limit: 12 })]
    #[case(2, 1, OffsetLimit { offset: 1, limit: 1 })]
    #[case(0, 12, OffsetLimit { offset: 0, limit: 12 })]
    #[case(2, 0, OffsetLimit { offset: 1, limit: 1 })]
    #[case(u32::MAX, u32::MAX, OffsetLimit { offset: u64::from(u32::MAX - 1) * u64::from(u32::MAX), limit: u32::MAX })]
    fn test_to_offset_limit(
        #[case] page: u32,
        #[case] page_size: u32,
        #[case] expected: OffsetLimit,
    ) {
        assert_eq!(to_offset_limit(page, page_size), expected);
    }

    #[rstest]
    #[case(1, 12, Ok(OffsetLimit { offset: 0, limit: 12 }))]
    #[case(0, 12, Err(PaginationError::InvalidArgument { page: 0, page_size: 12 }))]
    #[case(1, 0, Err(PaginationError::InvalidArgument { page: 1, page_size: 0 }))]
    fn test_offset_limit_new(
        #[case] page: u32,
        #[case] page_size: u32,
        #[case] expected: Result<OffsetLimit, PaginationError>,
    ) {
        assert_eq!(OffsetLimit::new(page, page_size), expected);
    }

    #[rstest]
    #[case(OffsetLimit { offset: 0, limit: 12 }, 25, 0..12)]
    #[case(OffsetLimit { offset: 24, limit: 12 }, 25, 24..25)]
    #[case(OffsetLimit { offset: 36, limit: 12 }, 25, 25..25)]
    #[case(OffsetLimit { offset: 0, limit: 12 }, 0, 0..0)]
    fn test_offset_limit_range(
        #[case] offset_limit: OffsetLimit,
        #[case] len: usize,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(offset_limit.range(len), expected);
    }

    #[test]
    fn test_from_totals_first_page() {
        assert_eq!(
            Pagination::from_totals(25, 12, 1),
            Pagination {
                current_page: 1,
                total_pages: 3,
                total_items: 25,
                page_size: 12,
                has_next_page: true,
                has_prev_page: false,
            }
        );
    }

    #[test]
    fn test_from_totals_clamps_current_page() {
        assert_eq!(
            Pagination::from_totals(25, 12, 5),
            Pagination {
                current_page: 3,
                total_pages: 3,
                total_items: 25,
                page_size: 12,
                has_next_page: false,
                has_prev_page: true,
            }
        );
    }

    #[test]
    fn test_from_totals_no_items() {
        assert_eq!(
            Pagination::from_totals(0, 12, 1),
            Pagination {
                current_page: 1,
                total_pages: 1,
                total_items: 0,
                page_size: 12,
                has_next_page: false,
                has_prev_page: false,
            }
        );
    }

    #[rstest]
    #[case(0, 12, 1)]
    #[case(1, 12, 1)]
    #[case(12, 12, 1)]
    #[case(13, 12, 2)]
    #[case(24, 12, 2)]
    #[case(1324, 12, 111)]
    #[case(5, 1, 5)]
    #[case(5, 0, 5)]
    fn test_from_totals_total_pages(
        #[case] total_items: u64,
        #[case] page_size: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(
            Pagination::from_totals(total_items, page_size, 1).total_pages,
            expected
        );
    }

    #[rstest]
    #[case(0, 1, false, false)]
    #[case(1, 1, true, false)]
    #[case(2, 2, true, true)]
    #[case(3, 3, false, true)]
    fn test_from_totals_navigation(
        #[case] requested_page: u32,
        #[case] current_page: u32,
        #[case] has_next_page: bool,
        #[case] has_prev_page: bool,
    ) {
        let pagination = Pagination::from_totals(30, 10, requested_page);
        assert_eq!(pagination.current_page, current_page);
        assert_eq!(pagination.has_next_page, has_next_page);
        assert_eq!(pagination.has_prev_page, has_prev_page);
    }

    #[test]
    fn test_from_len() {
        assert_eq!(
            Pagination::from_len(7, 5, 2),
            Pagination::from_totals(7, 5, 2)
        );
    }

    #[test]
    fn test_from_page_count() {
        assert_eq!(
            Pagination::from_page_count(4, 12, 12, 9),
            Pagination {
                current_page: 4,
                total_pages: 4,
                total_items: 12,
                page_size: 12,
                has_next_page: false,
                has_prev_page: true,
            }
        );
        assert_eq!(Pagination::from_page_count(0, 0, 12, 1).total_pages, 1);
    }

    #[test]
    fn test_pagination_to_offset_limit() {
        assert_eq!(
            Pagination::from_totals(25, 12, 5).to_offset_limit(),
            OffsetLimit {
                offset: 24,
                limit: 12
            }
        );
    }

    #[test]
    fn test_pagination_default() {
        assert_eq!(Pagination::default(), Pagination::from_totals(0, 12, 1));
    }

    #[test]
    fn test_pagination_serialize() {
        assert_eq!(
            serde_json::to_value(Pagination::from_totals(25, 12, 1)).unwrap(),
            json!({
                "currentPage": 1,
                "totalPages": 3,
                "totalItems": 25,
                "pageSize": 12,
                "hasNextPage": true,
                "hasPrevPage": false
            })
        );
    }

    #[rstest]
    #[case(
        json!({ "pagination": { "totalPages": 3, "totalExercises": 25, "exercisesPerPage": 12 } }),
        PageMetadata { total_items: Some(25), total_pages: Some(3), page_size: Some(12) }
    )]
    #[case(
        json!({ "metadata": { "totalPages": "111", "totalExercises": "1324", "currentPage": 1 } }),
        PageMetadata { total_items: Some(1324), total_pages: Some(111), page_size: None }
    )]
    #[case(
        json!({ "pagination": { "totalPages": 2 }, "metadata": { "totalExercises": 20 } }),
        PageMetadata { total_items: Some(20), total_pages: Some(2), page_size: None }
    )]
    #[case(
        json!({ "exercises": [], "total": 40 }),
        PageMetadata { total_items: Some(40), total_pages: None, page_size: None }
    )]
    #[case(
        json!({ "pagination": { "totalExercises": -1, "totalPages": "many", "limit": 0 } }),
        PageMetadata::default()
    )]
    #[case(json!({ "pagination": [1, 2] }), PageMetadata::default())]
    #[case(json!([]), PageMetadata::default())]
    fn test_page_metadata_from_response(#[case] response: Value, #[case] expected: PageMetadata) {
        assert_eq!(PageMetadata::from_response(&response), expected);
    }

    #[test]
    fn test_page_metadata_is_empty() {
        assert!(PageMetadata::default().is_empty());
        assert!(
            !PageMetadata {
                total_pages: Some(1),
                ..PageMetadata::default()
            }
            .is_empty()
        );
    }
}
