//! Dynamic JSON documents as queryable items.
//!
//! Collections fetched from a REST backend usually arrive as
//! `serde_json::Value`s. Fields are looked up by key; a key that is absent
//! and contains dots is resolved as a nested path, so `"eventType.name"`
//! reaches into `{"eventType": {"name": "Worship"}}`.
//!
//! | JSON | [`Value`] |
//! |------|-----------|
//! | string | `String` (never parsed as a date) |
//! | number | `Number` |
//! | boolean | `Bool` |
//! | `{"$date": ...}` | `Timestamp` |
//! | array | `List` of its elements (searchable, orders like `None`) |
//! | null, other object, missing key | `None` |
//!
//! The `$date` wrapper is the extended-JSON shape document databases emit
//! for date-typed fields. Its payload may be an RFC 3339 string, epoch
//! milliseconds, or `{"$numberLong": "<millis>"}`.

use chrono::DateTime;
use serde_json::{Map, Value as Json};

use crate::traits::Queryable;
use crate::value::{Number, Timestamp, Value};

/// Accessor for JSON documents, usable wherever an accessor is expected.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sexton_query::{filter, json_accessor};
///
/// let events = vec![
///     json!({"title": "Sunday Service", "eventType": {"name": "Worship"}}),
///     json!({"title": "Youth Group", "eventType": {"name": "Fellowship"}}),
/// ];
/// let found = filter(&events, "worship", &["eventType.name"], json_accessor);
/// assert_eq!(found, vec![&events[0]]);
/// ```
pub fn json_accessor<'a>(doc: &'a Json, field: &str) -> Value<'a> {
    doc.as_object()
        .and_then(|object| lookup(object, field))
        .map_or(Value::None, json_value)
}

impl Queryable for Json {
    fn field_value(&self, field: &str) -> Value<'_> {
        json_accessor(self, field)
    }
}

impl Queryable for Map<String, Json> {
    fn field_value(&self, field: &str) -> Value<'_> {
        lookup(self, field).map_or(Value::None, json_value)
    }
}

fn lookup<'a>(object: &'a Map<String, Json>, field: &str) -> Option<&'a Json> {
    if let Some(value) = object.get(field) {
        return Some(value);
    }
    let (head, rest) = field.split_once('.')?;
    lookup(object.get(head)?.as_object()?, rest)
}

fn json_value(json: &Json) -> Value<'_> {
    match json {
        Json::String(s) => Value::String(s),
        Json::Number(n) => json_number(n).map_or(Value::None, Value::Number),
        Json::Bool(b) => Value::Bool(*b),
        Json::Object(map) => extended_date(map).map_or(Value::None, Value::Timestamp),
        Json::Array(items) => Value::List(items.iter().map(json_value).collect()),
        Json::Null => Value::None,
    }
}

fn json_number(n: &serde_json::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Some(Number::U64(u))
    } else {
        n.as_f64().map(Number::F64)
    }
}

fn extended_date(map: &Map<String, Json>) -> Option<Timestamp> {
    if map.len() != 1 {
        return None;
    }
    match map.get("$date")? {
        Json::String(s) => DateTime::parse_from_rfc3339(s).ok().map(Timestamp::from),
        Json::Number(n) => n.as_i64().map(Timestamp::from_millis),
        Json::Object(inner) => inner
            .get("$numberLong")?
            .as_str()?
            .parse()
            .ok()
            .map(Timestamp::from_millis),
        _ => None,
    }
}
