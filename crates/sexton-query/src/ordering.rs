//! Sort direction and type-aware value comparison.
//!
//! [`compare_values`] is a total order over every [`Value`], so sorting never
//! panics on heterogeneous or missing fields.

use std::cmp::Ordering;
use std::str::FromStr;

use deunicode::deunicode;

use crate::error::QueryError;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }

    /// Parses a direction keyword, falling back to `Asc` for anything unknown.
    ///
    /// Table headers hand over whatever the UI state holds, so an unexpected
    /// keyword degrades to the default order instead of failing the request.
    pub fn parse_lenient(s: &str) -> Dir {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(direction = s, "unknown sort direction, using asc");
            Dir::Asc
        })
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// Compares two field values in ascending order.
///
/// - `None` is the smallest value: first under `Asc`, last under `Desc`.
///   Lists have no natural order and rank with `None`.
/// - Strings collate like a human-facing list (see [`collate`]).
/// - Numbers use [`Number::total_cmp`](crate::Number::total_cmp).
/// - Timestamps compare by instant, booleans as `false < true`.
/// - Values of different types order by type:
///   `None < Bool < Number < Timestamp < String`.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => collate(a, b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::None | Value::List(_) => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Timestamp(_) => 3,
        Value::String(_) => 4,
    }
}

/// Locale-style string ordering.
///
/// Compares the transliterated, lowercased text first so that `"apple"`,
/// `"Banana"` and `"Église"` land where a reader expects them. Ties are
/// broken by accents (`"e"` before `"é"`), then by case with lowercase
/// first (`"a"` before `"A"`).
pub fn collate(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let primary = deunicode(a).to_lowercase().cmp(&deunicode(b).to_lowercase());
    if primary != Ordering::Equal {
        return primary;
    }
    let secondary = a.to_lowercase().cmp(&b.to_lowercase());
    if secondary != Ordering::Equal {
        return secondary;
    }
    // Only case differs here; uppercase code points are lower, so flip.
    b.cmp(a)
}

/// A field to sort by together with its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this ordering.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.dir.apply(compare_values(a, b))
    }

    /// Compares two items by reading this ordering's field through `accessor`.
    pub fn compare_items<T, F>(&self, a: &T, b: &T, accessor: &F) -> Ordering
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.compare(&accessor(a, &self.field), &accessor(b, &self.field))
    }
}
