//! Sexton Query - filter, sort and paginate in-memory collections.
//!
//! This is the data pipeline behind every table and list view in Sexton:
//! the events calendar list, service orders, member directories. It takes a
//! collection that is already in memory and a [`QueryOptions`] value, and
//! returns one page of results plus the metadata pagination controls need.
//!
//! - **Filter**: case-insensitive substring search across chosen fields
//! - **Sort**: stable, type-aware ordering by one field
//! - **Paginate**: 1-indexed pages with out-of-range requests clamped
//! - **Process**: the three stages composed in that fixed order
//!
//! Items are read through an accessor, `Fn(&T, &str) -> Value`, so the
//! pipeline works on any shape: plain structs, `#[derive(Queryable)]` types
//! from `sexton-macros`, or `serde_json::Value` documents.
//!
//! # Quick Start
//!
//! ```rust
//! use sexton_query::{process, Number, QueryOptions, Value};
//!
//! struct Event {
//!     title: String,
//!     attendees: Option<u32>,
//! }
//!
//! fn accessor<'a>(event: &'a Event, field: &str) -> Value<'a> {
//!     match field {
//!         "title" => Value::String(&event.title),
//!         "attendees" => event.attendees.map(Number::from).into(),
//!         _ => Value::None,
//!     }
//! }
//!
//! let events = vec![
//!     Event { title: "Sunday Service".into(), attendees: Some(120) },
//!     Event { title: "Sunday School".into(), attendees: None },
//!     Event { title: "Youth Group".into(), attendees: Some(18) },
//! ];
//!
//! let options = QueryOptions::new()
//!     .search("sunday")
//!     .search_field("title")
//!     .order_desc("attendees")
//!     .page_size(10)
//!     .build();
//!
//! let page = process(&events, &options, accessor).unwrap();
//! assert_eq!(page.items.len(), 2);
//! assert_eq!(page.items[0].title, "Sunday Service");
//! assert_eq!(page.pagination.total_items, 2);
//! assert!(!page.pagination.has_next_page);
//! ```
//!
//! # Ordering Rules
//!
//! | Type | Order |
//! |------|-------|
//! | String | Case- and accent-insensitive first, then accents, then lowercase first |
//! | Number | Numeric across integer and float representations |
//! | Timestamp | By instant |
//! | Bool | `false` before `true` |
//! | None | Before everything (first ascending, last descending) |
//!
//! Mixed types order as `None < Bool < Number < Timestamp < String`.
//!
//! # Errors
//!
//! A zero page size is a caller bug and fails with
//! [`QueryError::InvalidPageSize`]. Missing fields are never errors. A panic
//! inside a stage is caught by [`process`], logged through `tracing`, and
//! turned into an empty [`PageResult::fallback`] page.

mod error;
mod filter;
mod options;
mod ordering;
mod paginate;
mod pipeline;
pub mod record;
mod sort;
mod traits;
mod value;

// Re-export public API
pub use error::{QueryError, Result};
pub use filter::{filter, SearchTerm};
pub use options::QueryOptions;
pub use ordering::{collate, compare_values, Dir, OrderBy};
pub use paginate::{paginate, PageResult, Pagination, DEFAULT_PAGE_SIZE};
pub use pipeline::{process, try_process};
pub use record::json_accessor;
pub use sort::{sort, sort_refs};
pub use traits::{QueryTimestamp, Queryable};
pub use value::{Number, Timestamp, Value};
