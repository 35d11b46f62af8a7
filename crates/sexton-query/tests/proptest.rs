//! Property-based tests for the pipeline using proptest.

use proptest::prelude::*;
use sexton_query::{filter, paginate, process, sort, Dir, Number, QueryOptions, Value};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TestItem {
    value: i64,
    name: String,
    score: Option<i64>,
}

fn item_accessor<'a>(item: &'a TestItem, field: &str) -> Value<'a> {
    match field {
        "value" => Value::Number(Number::I64(item.value)),
        "name" => Value::String(&item.name),
        "score" => item.score.map(Number::I64).into(),
        _ => Value::None,
    }
}

fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (
        -50i64..50,
        "[a-zA-Z ]{0,10}",
        prop::option::of(0i64..5),
    )
        .prop_map(|(value, name, score)| TestItem { value, name, score })
}

fn items_strategy() -> impl Strategy<Value = Vec<TestItem>> {
    prop::collection::vec(test_item_strategy(), 0..60)
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![Just(Dir::Asc), Just(Dir::Desc)]
}

fn position(items: &[TestItem], item: &TestItem) -> usize {
    items
        .iter()
        .position(|x| std::ptr::eq(x, item))
        .expect("result must reference an input item")
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A page never holds more than page_size items.
    #[test]
    fn page_never_exceeds_page_size(
        items in items_strategy(),
        search in "[a-z]{0,2}",
        page in -5i64..20,
        page_size in 1usize..15,
    ) {
        let options = QueryOptions::new()
            .search(search)
            .search_field("name")
            .order_asc("value")
            .page(page)
            .page_size(page_size);

        let result = process(&items, &options, item_accessor).unwrap();
        prop_assert!(result.items.len() <= page_size);
    }

    /// With no search and no sort, page 1 is the first N items in input order.
    #[test]
    fn identity_pipeline_returns_prefix(
        items in items_strategy(),
        page_size in 1usize..30,
    ) {
        let options = QueryOptions::new().page_size(page_size);
        let result = process(&items, &options, item_accessor).unwrap();

        let expected: Vec<&TestItem> = items.iter().take(page_size).collect();
        prop_assert_eq!(result.items, expected);
    }

    /// Filtering is a stable subsequence of the input.
    #[test]
    fn filter_is_ordered_subsequence(
        items in items_strategy(),
        search in "[a-z]{1,2}",
    ) {
        let found = filter(&items, &search, &["name"], item_accessor);
        prop_assert!(found.len() <= items.len());

        let positions: Vec<usize> = found.iter().map(|x| position(&items, x)).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        for item in found {
            prop_assert!(item.name.to_lowercase().contains(&search));
        }
    }

    /// Filtering twice with the same query changes nothing.
    #[test]
    fn filter_is_idempotent(
        items in items_strategy(),
        search in "[a-zA-Z]{0,2}",
    ) {
        let once: Vec<TestItem> = filter(&items, &search, &["name"], item_accessor)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter(&once, &search, &["name"], item_accessor);

        prop_assert_eq!(twice.len(), once.len());
        for (a, b) in twice.iter().zip(once.iter()) {
            prop_assert_eq!(*a, b);
        }
    }

    /// Items with equal sort keys keep their input order.
    #[test]
    fn sort_is_stable(
        items in items_strategy(),
        dir in dir_strategy(),
    ) {
        let sorted = sort(&items, "score", dir, item_accessor);
        prop_assert_eq!(sorted.len(), items.len());

        for pair in sorted.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            if prev.score == curr.score {
                prop_assert!(
                    position(&items, prev) < position(&items, curr),
                    "stable sort violated: equal items reordered"
                );
            }
        }
    }

    /// Nulls sort first ascending and last descending.
    #[test]
    fn nulls_at_the_ascending_front(items in items_strategy()) {
        let asc = sort(&items, "score", Dir::Asc, item_accessor);
        let first_some = asc.iter().position(|x| x.score.is_some()).unwrap_or(asc.len());
        prop_assert!(asc[first_some..].iter().all(|x| x.score.is_some()));

        let desc = sort(&items, "score", Dir::Desc, item_accessor);
        let first_none = desc.iter().position(|x| x.score.is_none()).unwrap_or(desc.len());
        prop_assert!(desc[first_none..].iter().all(|x| x.score.is_none()));
    }

    /// For distinct keys, ascending is descending reversed.
    #[test]
    fn asc_is_reverse_of_desc_for_distinct_keys(
        values in prop::collection::hash_set(any::<i64>(), 0..40),
    ) {
        let items: Vec<TestItem> = values
            .into_iter()
            .map(|value| TestItem { value, name: String::new(), score: None })
            .collect();

        let asc = sort(&items, "value", Dir::Asc, item_accessor);
        let mut desc = sort(&items, "value", Dir::Desc, item_accessor);
        desc.reverse();

        prop_assert_eq!(asc, desc);
    }

    /// Concatenating every page reproduces the filtered, sorted sequence.
    #[test]
    fn pages_cover_sequence_exactly(
        items in items_strategy(),
        search in "[a-z]{0,1}",
        page_size in 1usize..12,
    ) {
        let base = QueryOptions::new()
            .search(search.clone())
            .search_field("name")
            .order_desc("value")
            .page_size(page_size);

        let mut expected = filter(&items, &search, &["name"], item_accessor);
        expected.sort_by(|a, b| b.value.cmp(&a.value));

        let total_pages = process(&items, &base, item_accessor)
            .unwrap()
            .pagination
            .total_pages;

        let mut collected = Vec::new();
        for page in 1..=total_pages {
            let options = base.clone().page(page as i64);
            collected.extend(process(&items, &options, item_accessor).unwrap().items);
        }

        prop_assert_eq!(collected, expected);
    }

    /// The reported page is always within [1, max(total_pages, 1)].
    #[test]
    fn current_page_is_clamped(
        len in 0usize..100,
        page in any::<i64>(),
        page_size in 1usize..20,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let result = paginate(&items, page, page_size).unwrap();
        let p = result.pagination;

        prop_assert_eq!(p.total_pages, len.div_ceil(page_size));
        prop_assert!(p.current_page >= 1);
        prop_assert!(p.current_page <= p.total_pages.max(1));
        prop_assert_eq!(p.has_next_page, p.current_page < p.total_pages);
        prop_assert_eq!(p.has_prev_page, p.current_page > 1);
    }
}

// ============================================================================
// Additional edge case tests
// ============================================================================

#[test]
fn empty_collection_through_pipeline() {
    let items: Vec<TestItem> = vec![];
    let options = QueryOptions::new()
        .search("a")
        .search_field("name")
        .order_asc("value")
        .page(3);

    let result = process(&items, &options, item_accessor).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.pagination.total_items, 0);
    assert_eq!(result.pagination.total_pages, 0);
    assert_eq!(result.pagination.current_page, 1);
}

#[test]
fn pagination_of_twenty_five_by_ten() {
    let items: Vec<i64> = (1..=25).collect();
    let last = paginate(&items, 3, 10).unwrap();

    assert_eq!(last.items, vec![&21, &22, &23, &24, &25]);
    assert!(!last.pagination.has_next_page);
    assert!(last.pagination.has_prev_page);
}
