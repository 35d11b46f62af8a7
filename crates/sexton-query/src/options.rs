//! Query options: what to search, how to sort, which page to show.
//!
//! [`QueryOptions`] is plain configuration. Build it fluently in code, or
//! deserialize it from the JSON/YAML a table component keeps as its state:
//!
//! ```json
//! {
//!   "searchText": "sunday",
//!   "searchFields": ["title", "location"],
//!   "sortField": "startsAt",
//!   "sortDirection": "desc",
//!   "page": 2,
//!   "pageSize": 25
//! }
//! ```
//!
//! Missing keys take their defaults. An unrecognized `sortDirection` falls
//! back to ascending.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::ordering::{Dir, OrderBy};
use crate::paginate::{PageResult, DEFAULT_PAGE_SIZE};
use crate::pipeline;
use crate::value::Value;

/// Options controlling one run of the filter → sort → paginate pipeline.
///
/// # Example
///
/// ```
/// use sexton_query::{Dir, QueryOptions};
///
/// let options = QueryOptions::new()
///     .search("choir")
///     .search_fields(["title", "location"])
///     .order_desc("startsAt")
///     .page(2)
///     .page_size(25)
///     .build();
///
/// assert!(options.filters());
/// assert_eq!(options.sort_direction, Dir::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    /// Free-text query; blank disables filtering.
    pub search_text: String,
    /// Fields checked against `search_text`; empty disables filtering.
    pub search_fields: Vec<String>,
    /// Field to sort by; `None` keeps the filtered order.
    pub sort_field: Option<String>,
    /// Sort direction, ascending by default.
    #[serde(with = "lenient_dir")]
    pub sort_direction: Dir,
    /// Requested page, 1-indexed. Out-of-range values are clamped.
    pub page: i64,
    /// Items per page; must be positive.
    pub page_size: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            search_text: String::new(),
            search_fields: Vec::new(),
            sort_field: None,
            sort_direction: Dir::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryOptions {
    /// Creates options with every default: no search, no sort, first page of ten.
    pub fn new() -> Self {
        QueryOptions::default()
    }

    /// Parses options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the free-text search query.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Adds one field to search.
    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        self.search_fields.push(field.into());
        self
    }

    /// Replaces the searched fields.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sorts by `field` in direction `dir`.
    pub fn order_by(mut self, field: impl Into<String>, dir: Dir) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = dir;
        self
    }

    /// Sorts ascending by `field`.
    pub fn order_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by `field`.
    pub fn order_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Requests a page (1-indexed).
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of items per page.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Finalizes the options (for API symmetry; returns self).
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns `true` if these options filter: search text is not blank and
    /// at least one field is searched.
    pub fn filters(&self) -> bool {
        !self.search_text.trim().is_empty() && !self.search_fields.is_empty()
    }

    /// The ordering to apply, if any. An empty field name means no sort.
    pub fn ordering(&self) -> Option<OrderBy> {
        self.sort_field
            .as_deref()
            .filter(|field| !field.is_empty())
            .map(|field| OrderBy::new(field, self.sort_direction))
    }

    /// Returns `true` if these options sort.
    pub fn sorts(&self) -> bool {
        self.ordering().is_some()
    }

    /// Rejects configurations that indicate a caller bug.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(QueryError::InvalidPageSize {
                page_size: self.page_size,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs the pipeline over `items` with these options.
    ///
    /// See [`process`](crate::process).
    pub fn process<'a, T, F>(&self, items: &'a [T], accessor: F) -> Result<PageResult<&'a T>>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        pipeline::process(items, self, accessor)
    }
}

mod lenient_dir {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::ordering::Dir;

    pub fn serialize<S: Serializer>(dir: &Dir, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(dir.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Dir, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Dir::Asc, Dir::parse_lenient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = QueryOptions::new();
        assert_eq!(options.search_text, "");
        assert!(options.search_fields.is_empty());
        assert_eq!(options.sort_field, None);
        assert_eq!(options.sort_direction, Dir::Asc);
        assert_eq!(options.page, 1);
        assert_eq!(options.page_size, 10);
        assert!(!options.filters());
        assert!(!options.sorts());
    }

    #[test]
    fn builder_sets_fields() {
        let options = QueryOptions::new()
            .search("youth")
            .search_field("title")
            .search_field("location")
            .order_asc("startsAt")
            .page(3)
            .page_size(5)
            .build();

        assert_eq!(options.search_fields, vec!["title", "location"]);
        assert_eq!(options.ordering(), Some(OrderBy::asc("startsAt")));
        assert_eq!(options.page, 3);
        assert_eq!(options.page_size, 5);
    }

    #[test]
    fn blank_search_or_no_fields_does_not_filter() {
        assert!(!QueryOptions::new().search("   ").search_field("title").filters());
        assert!(!QueryOptions::new().search("youth").filters());
        assert!(QueryOptions::new().search("youth").search_field("title").filters());
    }

    #[test]
    fn empty_sort_field_does_not_sort() {
        let options = QueryOptions::new().order_desc("");
        assert!(!options.sorts());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        assert!(QueryOptions::new().validate().is_ok());
        assert!(matches!(
            QueryOptions::new().page_size(0).validate(),
            Err(QueryError::InvalidPageSize { page_size: 0 })
        ));
    }

    #[test]
    fn json_uses_camel_case_and_defaults() {
        let options = QueryOptions::from_json_str(
            r#"{"searchText": "sunday", "searchFields": ["title"], "sortDirection": "desc"}"#,
        )
        .unwrap();

        assert_eq!(options.search_text, "sunday");
        assert_eq!(options.search_fields, vec!["title"]);
        assert_eq!(options.sort_direction, Dir::Desc);
        assert_eq!(options.page, 1);
        assert_eq!(options.page_size, 10);
    }

    #[test]
    fn json_unknown_direction_falls_back_to_asc() {
        let options = QueryOptions::from_json_str(r#"{"sortDirection": "upwards"}"#).unwrap();
        assert_eq!(options.sort_direction, Dir::Asc);

        let options = QueryOptions::from_json_str(r#"{"sortDirection": null}"#).unwrap();
        assert_eq!(options.sort_direction, Dir::Asc);
    }

    #[test]
    fn json_negative_page_size_is_invalid_options() {
        let err = QueryOptions::from_json_str(r#"{"pageSize": -1}"#).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOptions(_)));
    }

    #[test]
    fn yaml_options() {
        let options = QueryOptions::from_yaml_str(
            "searchText: choir\nsearchFields: [title]\nsortField: startsAt\npage: -2\npageSize: 25\n",
        )
        .unwrap();

        assert_eq!(options.sort_field.as_deref(), Some("startsAt"));
        assert_eq!(options.page, -2);
        assert_eq!(options.page_size, 25);
    }

    #[test]
    fn serializes_round_trip_shape() {
        let options = QueryOptions::new().order_desc("title");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["sortDirection"], "desc");
        assert_eq!(json["sortField"], "title");
        assert_eq!(json["pageSize"], 10);
    }
}
