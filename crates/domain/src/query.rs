use urlencoding::encode;

use crate::{DEFAULT_PAGE_SIZE, ExerciseID, OffsetLimit, to_offset_limit};

pub const EXERCISES_PATH: &str = "api/exercises";
pub const BODY_PARTS_PATH: &str = "api/exercises/bodyParts";
pub const TARGETS_PATH: &str = "api/exercises/targets";
pub const EQUIPMENT_PATH: &str = "api/exercises/equipment";

#[must_use]
pub fn exercise_path(id: &ExerciseID) -> String {
    format!("{EXERCISES_PATH}/{}", encode(id))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum QueryScope {
    #[default]
    All,
    BodyPart(String),
    Target(String),
    Equipment(String),
}

impl QueryScope {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            QueryScope::All => EXERCISES_PATH.to_string(),
            QueryScope::BodyPart(body_part) => {
                format!("{EXERCISES_PATH}/bodyPart/{}", encode(body_part))
            }
            QueryScope::Target(target) => format!("{EXERCISES_PATH}/target/{}", encode(target)),
            QueryScope::Equipment(equipment) => {
                format!("{EXERCISES_PATH}/equipment/{}", encode(equipment))
            }
        }
    }
}

#[derive(strum::Display, strum::AsRefStr, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    BodyPart,
    Target,
    Equipment,
}

#[derive(strum::Display, strum::AsRefStr, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub by: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub const BY_NAME: Sort = Sort {
        by: SortField::Name,
        order: SortOrder::Asc,
    };
}

/// A request for one page of exercises from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseQuery {
    pub scope: QueryScope,
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<Sort>,
    pub search: Option<String>,
}

impl ExerciseQuery {
    #[must_use]
    pub fn new(scope: QueryScope) -> Self {
        Self {
            scope,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search: None,
        }
    }

    /// All exercises sorted by name.
    #[must_use]
    pub fn all(page: u32) -> Self {
        Self::new(QueryScope::All)
            .with_page(page)
            .with_sort(Sort::BY_NAME)
    }

    #[must_use]
    pub fn search(term: &str, page: u32) -> Self {
        Self::new(QueryScope::All)
            .with_page(page)
            .with_search(term)
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Search terms are sent trimmed and in lowercase. Blank terms remove the search.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim().to_lowercase();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    #[must_use]
    pub fn offset_limit(&self) -> OffsetLimit {
        to_offset_limit(self.page, self.page_size)
    }

    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let OffsetLimit { offset, limit } = self.offset_limit();
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(sort) = self.sort {
            params.push(("sortBy", sort.by.to_string()));
            params.push(("sortOrder", sort.order.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }

    #[must_use]
    pub fn path_and_query(&self) -> String {
        let query = self
            .params()
            .iter()
            .map(|(key, value)| format!("{key}={}", encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.scope.path())
    }
}

impl Default for ExerciseQuery {
    fn default() -> Self {
        Self::new(QueryScope::All)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(QueryScope::All, "api/exercises")]
    #[case(QueryScope::BodyPart("upper legs".to_string()), "api/exercises/bodyPart/upper%20legs")]
    #[case(QueryScope::Target("abs".to_string()), "api/exercises/target/abs")]
    #[case(QueryScope::Equipment("ez barbell".to_string()), "api/exercises/equipment/ez%20barbell")]
    #[case(QueryScope::BodyPart("a/b".to_string()), "api/exercises/bodyPart/a%2Fb")]
    fn test_query_scope_path(#[case] scope: QueryScope, #[case] expected: &str) {
        assert_eq!(scope.path(), expected);
    }

    #[test]
    fn test_exercise_path() {
        assert_eq!(exercise_path(&"0001".into()), "api/exercises/0001");
    }

    #[rstest]
    #[case(SortField::Name, "name")]
    #[case(SortField::BodyPart, "bodyPart")]
    #[case(SortField::Target, "target")]
    #[case(SortField::Equipment, "equipment")]
    fn test_sort_field_display(#[case] field: SortField, #[case] expected: &str) {
        assert_eq!(field.to_string(), expected);
        assert_eq!(field.as_ref(), expected);
    }

    #[test]
    fn test_sort_order_display() {
        assert_eq!(SortOrder::Asc.to_string(), "asc");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn test_params_all() {
        assert_eq!(
            ExerciseQuery::all(3).params(),
            vec![
                ("offset", "24".to_string()),
                ("limit", "12".to_string()),
                ("sortBy", "name".to_string()),
                ("sortOrder", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_params_search() {
        assert_eq!(
            ExerciseQuery::search(" Bench Press ", 1).params(),
            vec![
                ("offset", "0".to_string()),
                ("limit", "12".to_string()),
                ("search", "bench press".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_search_empty() {
        assert_eq!(
            ExerciseQuery::default().with_search("  ").search,
            None
        );
    }

    #[test]
    fn test_with_search_normalizes_term() {
        let query = ExerciseQuery::all(1).with_search(" Curl ");
        assert_eq!(query.search, Some("curl".to_string()));
        assert_eq!(
            query.path_and_query(),
            "api/exercises?offset=0&limit=12&sortBy=name&sortOrder=asc&search=curl"
        );
    }

    #[test]
    fn test_with_page_clamps() {
        let query = ExerciseQuery::default().with_page(0).with_page_size(0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);
    }

    #[rstest]
    #[case(ExerciseQuery::all(1), "api/exercises?offset=0&limit=12&sortBy=name&sortOrder=asc")]
    #[case(
        ExerciseQuery::new(QueryScope::BodyPart("upper arms".to_string())).with_page(2),
        "api/exercises/bodyPart/upper%20arms?offset=12&limit=12"
    )]
    #[case(
        ExerciseQuery::search("pull up & row", 1).with_page_size(5),
        "api/exercises?offset=0&limit=5&search=pull%20up%20%26%20row"
    )]
    #[case(
        ExerciseQuery::new(QueryScope::Target("lats".to_string()))
            .with_sort(Sort { by: SortField::Target, order: SortOrder::Desc }),
        "api/exercises/target/lats?offset=0&limit=12&sortBy=target&sortOrder=desc"
    )]
    fn test_path_and_query(#[case] query: ExerciseQuery, #[case] expected: &str) {
        assert_eq!(query.path_and_query(), expected);
    }
}
