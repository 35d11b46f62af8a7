//! The filter → sort → paginate pipeline.
//!
//! The stage order is fixed. Filtering comes first so pagination counts the
//! matching items rather than the whole collection; sorting comes before
//! pagination so page boundaries fall on the final order.
//!
//! [`process`] is the recovery boundary. Configuration mistakes (a zero page
//! size) are returned as errors. A failure inside a stage, such as an
//! accessor that panics on an unexpected item, is logged and replaced by
//! [`PageResult::fallback`], which a table renders as "no results".
//! [`try_process`] runs the same stages but reports such failures as
//! [`QueryError::Unexpected`] instead.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{QueryError, Result};
use crate::filter::filter;
use crate::options::QueryOptions;
use crate::paginate::{paginate_owned, PageResult};
use crate::sort::sort_refs;
use crate::value::Value;

/// Filters, sorts and paginates `items` according to `options`.
///
/// # Errors
///
/// Returns [`QueryError::InvalidPageSize`] when `options.page_size` is zero.
/// Never returns [`QueryError::Unexpected`]: such failures yield an empty
/// fallback page instead.
///
/// # Example
///
/// ```
/// use sexton_query::{process, QueryOptions, Value};
///
/// fn accessor<'a>(title: &'a String, _field: &str) -> Value<'a> {
///     Value::String(title)
/// }
///
/// let titles: Vec<String> = ["Youth Group", "Sunday Service", "Sunday School"]
///     .into_iter()
///     .map(String::from)
///     .collect();
///
/// let options = QueryOptions::new()
///     .search("sunday")
///     .search_field("title")
///     .order_asc("title")
///     .page_size(1)
///     .build();
///
/// let page = process(&titles, &options, accessor).unwrap();
/// assert_eq!(page.items, vec![&titles[2]]);
/// assert_eq!(page.pagination.total_items, 2);
/// assert!(page.pagination.has_next_page);
/// ```
pub fn process<'a, T, F>(
    items: &'a [T],
    options: &QueryOptions,
    accessor: F,
) -> Result<PageResult<&'a T>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    match try_process(items, options, accessor) {
        Err(QueryError::Unexpected(reason)) => {
            tracing::error!(
                %reason,
                total = items.len(),
                page = options.page,
                page_size = options.page_size,
                "query failed, returning empty page"
            );
            Ok(PageResult::fallback(options.page_size))
        }
        other => other,
    }
}

/// Like [`process`], but reports stage failures as [`QueryError::Unexpected`].
pub fn try_process<'a, T, F>(
    items: &'a [T],
    options: &QueryOptions,
    accessor: F,
) -> Result<PageResult<&'a T>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    options.validate()?;

    panic::catch_unwind(AssertUnwindSafe(|| run_stages(items, options, &accessor)))
        .unwrap_or_else(|payload| Err(QueryError::Unexpected(panic_message(payload.as_ref()))))
}

fn run_stages<'a, T, F>(
    items: &'a [T],
    options: &QueryOptions,
    accessor: &F,
) -> Result<PageResult<&'a T>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut selected = filter(
        items,
        &options.search_text,
        &options.search_fields,
        accessor,
    );
    tracing::debug!(
        total = items.len(),
        matched = selected.len(),
        search = %options.search_text,
        "filter stage"
    );

    if let Some(order) = options.ordering() {
        sort_refs(&mut selected, &order.field, order.dir, accessor);
        tracing::debug!(field = %order.field, dir = %order.dir, "sort stage");
    }

    let page = paginate_owned(selected, options.page, options.page_size)?;
    tracing::debug!(
        requested = options.page,
        current = page.pagination.current_page,
        total_pages = page.pagination.total_pages,
        "paginate stage"
    );
    Ok(page)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "stage panicked".to_string()
    }
}
