//! Stable single-field sorting.

use crate::ordering::{Dir, OrderBy};
use crate::value::Value;

/// Returns references to `items` ordered by `field` in direction `dir`.
///
/// The input slice is left untouched. The sort is stable: items whose
/// field values compare equal keep their input order. Missing or null
/// fields sort first ascending and last descending. See
/// [`compare_values`](crate::compare_values) for how types compare.
///
/// # Example
///
/// ```
/// use sexton_query::{sort, Dir, Number, Value};
///
/// let ages = vec![Some(30), Some(25), None];
/// let sorted = sort(&ages, "age", Dir::Asc, |a: &Option<i64>, _| {
///     a.map_or(Value::None, |n| Value::Number(Number::I64(n)))
/// });
/// assert_eq!(sorted, vec![&None, &Some(25), &Some(30)]);
/// ```
pub fn sort<'a, T, F>(items: &'a [T], field: &str, dir: Dir, accessor: F) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut refs: Vec<&'a T> = items.iter().collect();
    sort_refs(&mut refs, field, dir, &accessor);
    refs
}

/// Sorts a vector of references in place, stably.
///
/// This is what [`process`](crate::process) uses on the already-filtered
/// references, so the caller's collection is never reordered.
pub fn sort_refs<T, F>(refs: &mut [&T], field: &str, dir: Dir, accessor: &F)
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let order = OrderBy::new(field, dir);
    refs.sort_by(|a, b| order.compare_items(*a, *b, accessor));
}
