//! Free-text search across a set of fields.
//!
//! An item matches when any of the searched fields, stringified and
//! lowercased, contains the trimmed, lowercased search text. Blank search
//! text disables filtering entirely; it never means "match nothing".

use crate::value::Value;

/// A normalized search needle.
///
/// # Example
///
/// ```
/// use sexton_query::{SearchTerm, Value};
///
/// let term = SearchTerm::parse("  Sunday ").unwrap();
/// assert_eq!(term.as_str(), "sunday");
/// assert!(term.matches_value(&Value::String("Sunday Service")));
/// assert!(SearchTerm::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Normalizes `text`, returning `None` when it is empty or whitespace.
    pub fn parse(text: &str) -> Option<SearchTerm> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(SearchTerm {
            needle: trimmed.to_lowercase(),
        })
    }

    /// The normalized needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Tests a single field value. `Value::None` never matches.
    pub fn matches_value(&self, value: &Value<'_>) -> bool {
        value
            .search_text()
            .is_some_and(|text| text.to_lowercase().contains(&self.needle))
    }

    /// Tests whether any of `fields` on `item` matches.
    pub fn matches<T, F, S>(&self, item: &T, fields: &[S], accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
        S: AsRef<str>,
    {
        fields
            .iter()
            .any(|field| self.matches_value(&accessor(item, field.as_ref())))
    }
}

/// Selects the items where any of `fields` contains `search_text`,
/// case-insensitively.
///
/// Returns every item, in order, when `search_text` is blank or `fields` is
/// empty. Otherwise the result is the matching subsequence, original order
/// preserved. Fields the accessor reports as [`Value::None`] never match.
///
/// # Example
///
/// ```
/// use sexton_query::{filter, Value};
///
/// let titles = vec!["Sunday Service".to_string(), "Youth Group".to_string()];
/// let found = filter(&titles, "sunday", &["title"], |t: &String, _| Value::String(t));
/// assert_eq!(found, vec![&titles[0]]);
/// ```
pub fn filter<'a, T, F, S>(items: &'a [T], search_text: &str, fields: &[S], accessor: F) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    S: AsRef<str>,
{
    let term = match SearchTerm::parse(search_text) {
        Some(term) if !fields.is_empty() => term,
        _ => return items.iter().collect(),
    };

    items
        .iter()
        .filter(|item| term.matches(*item, fields, &accessor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[derive(Debug, PartialEq)]
    struct Event {
        title: String,
        location: Option<String>,
        attendees: i64,
        starts_at: Timestamp,
    }

    fn accessor<'a>(event: &'a Event, field: &str) -> Value<'a> {
        match field {
            "title" => Value::String(&event.title),
            "location" => event.location.as_deref().into(),
            "attendees" => Value::Number(Number::I64(event.attendees)),
            "startsAt" => Value::Timestamp(event.starts_at),
            _ => Value::None,
        }
    }

    fn events() -> Vec<Event> {
        vec![
            Event {
                title: "Sunday Service".to_string(),
                location: Some("Main Sanctuary".to_string()),
                attendees: 120,
                starts_at: Timestamp::from_secs(0),
            },
            Event {
                title: "Youth Group".to_string(),
                location: None,
                attendees: 18,
                starts_at: Timestamp::from_secs(86_400),
            },
            Event {
                title: "Choir Practice".to_string(),
                location: Some("Sunday School Room".to_string()),
                attendees: 12,
                starts_at: Timestamp::from_secs(172_800),
            },
        ]
    }

    #[test]
    fn blank_search_returns_everything() {
        let items = events();
        assert_eq!(filter(&items, "", &["title"], accessor).len(), 3);
        assert_eq!(filter(&items, "   \t", &["title"], accessor).len(), 3);
    }

    #[test]
    fn no_fields_returns_everything() {
        let items = events();
        let fields: [&str; 0] = [];
        assert_eq!(filter(&items, "youth", &fields, accessor).len(), 3);
    }

    #[test]
    fn case_insensitive_substring() {
        let items = events();
        let found = filter(&items, "  YOUTH ", &["title"], accessor);
        assert_eq!(found, vec![&items[1]]);
    }

    #[test]
    fn any_field_may_match_and_order_is_kept() {
        let items = events();
        let found = filter(&items, "sunday", &["title", "location"], accessor);
        assert_eq!(found, vec![&items[0], &items[2]]);
    }

    #[test]
    fn numbers_and_dates_are_stringified() {
        let items = events();
        assert_eq!(filter(&items, "12", &["attendees"], accessor).len(), 2);
        assert_eq!(
            filter(&items, "1970-01-02", &["startsAt"], accessor),
            vec![&items[1]]
        );
    }

    #[test]
    fn missing_and_null_fields_never_match() {
        let items = events();
        assert!(filter(&items, "none", &["location", "nope"], accessor).is_empty());
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let items = events();
        assert!(filter(&items, "xyz-no-match", &["title"], accessor).is_empty());
    }
}
