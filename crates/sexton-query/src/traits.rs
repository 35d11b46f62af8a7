//! Traits for queryable items and derive macro support.
//!
//! [`Queryable`] is implemented by `#[derive(Queryable)]` from `sexton-macros`,
//! by hand, or by the built-in JSON document support in [`record`](crate::record).

use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::Result;
use crate::options::QueryOptions;
use crate::paginate::PageResult;
use crate::pipeline;
use crate::value::{Timestamp, Value};

/// Trait for items that expose their fields to the pipeline by name.
///
/// # Derive Usage
///
/// ```ignore
/// use sexton_macros::Queryable;
/// use sexton_query::{Queryable, QueryOptions};
///
/// #[derive(Queryable)]
/// struct Event {
///     #[query(String)]
///     title: String,
///     #[query(Number)]
///     attendees: Option<u32>,
///     #[query(Bool)]
///     published: bool,
/// }
///
/// let options = QueryOptions::new().search("choir").search_field(Event::TITLE);
/// let page = Event::query(&events, &options)?;
/// ```
///
/// # Manual Implementation
///
/// ```
/// use sexton_query::{Queryable, Value, Number};
///
/// struct Event {
///     title: String,
///     attendees: u32,
/// }
///
/// impl Queryable for Event {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::String(&self.title),
///             "attendees" => Value::Number(Number::from(self.attendees)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Queryable {
    /// Returns the value of `field`, or [`Value::None`] if the field doesn't
    /// exist, is null, or is not queryable.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Accessor function suitable for [`filter`](crate::filter),
    /// [`sort`](crate::sort) and [`process`](crate::process).
    ///
    /// ```ignore
    /// let found = filter(&events, "choir", &["title"], Event::accessor);
    /// ```
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }

    /// Runs the full pipeline over `items` using this type's accessor.
    fn query<'a>(items: &'a [Self], options: &QueryOptions) -> Result<PageResult<&'a Self>>
    where
        Self: Sized,
    {
        pipeline::process(items, options, Self::accessor)
    }
}

/// Conversion of date-typed fields into a [`Timestamp`].
///
/// Used by `#[derive(Queryable)]` for fields marked `#[query(Timestamp)]`.
/// Integers are read as milliseconds since the Unix epoch.
///
/// # Example
///
/// ```
/// use sexton_query::{QueryTimestamp, Timestamp};
///
/// struct ServiceDate(i64);
///
/// impl QueryTimestamp for ServiceDate {
///     fn query_timestamp(&self) -> Timestamp {
///         Timestamp::from_secs(self.0)
///     }
/// }
/// ```
pub trait QueryTimestamp {
    /// Converts this value to a [`Timestamp`] for comparison.
    fn query_timestamp(&self) -> Timestamp;
}

impl QueryTimestamp for Timestamp {
    fn query_timestamp(&self) -> Timestamp {
        *self
    }
}

impl QueryTimestamp for i64 {
    fn query_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl QueryTimestamp for u64 {
    fn query_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl<Tz: TimeZone> QueryTimestamp for DateTime<Tz> {
    fn query_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.timestamp_millis())
    }
}

/// Naive datetimes are read as UTC.
impl QueryTimestamp for NaiveDateTime {
    fn query_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.and_utc().timestamp_millis())
    }
}

impl QueryTimestamp for SystemTime {
    fn query_timestamp(&self) -> Timestamp {
        DateTime::<Utc>::from(*self).query_timestamp()
    }
}
