//! Proc macros for Sexton.
//!
//! # Derive Macros
//!
//! - [`Queryable`] - Expose struct fields to the `sexton-query` pipeline

mod query;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Queryable` trait for structs shown in tables and lists.
///
/// Implements `sexton_query::Queryable`, so the type can be searched,
/// sorted and paginated by field name.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text field (`String`, `&str`, or anything that derefs to `str`) |
/// | `Number` | Numeric field (any primitive integer or float) |
/// | `Timestamp` | Date-typed field - requires a `QueryTimestamp` impl |
/// | `Bool` | Boolean field |
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Use a custom name for queries |
/// | `ty = "..."` | Spell the kind as a string (`ty = "bool"`) |
///
/// Fields without a `#[query(...)]` attribute are not queryable.
/// `Option<_>` fields report `None` as a missing value, which never matches
/// a search and sorts first ascending.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Event::TITLE`, `Event::STARTS_AT`)
/// 2. Implementation of `Queryable::field_value()`
///
/// # Example
///
/// ```ignore
/// use chrono::{DateTime, Utc};
/// use sexton_macros::Queryable;
/// use sexton_query::{QueryOptions, Queryable};
///
/// #[derive(Queryable)]
/// struct Event {
///     #[query(String)]
///     title: String,
///
///     #[query(Timestamp, rename = "startsAt")]
///     starts_at: DateTime<Utc>,
///
///     #[query(Number)]
///     attendees: Option<u32>,
///
///     #[query(skip)]
///     internal_id: u64,
/// }
///
/// let options = QueryOptions::new()
///     .search("choir")
///     .search_field(Event::TITLE)
///     .order_desc(Event::STARTS_AT);
///
/// let page = Event::query(&events, &options)?;
/// ```
#[proc_macro_derive(Queryable, attributes(query))]
pub fn queryable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query::queryable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
