//! Stable row sorting.

use std::cmp::Ordering;

use super::{SortOrder, Sorting};
use crate::api::{CellValue, Item};

/// Compare two optional cell values for `order`.
///
/// Missing and null values go last in both directions.
fn compare(a: Option<&CellValue>, b: Option<&CellValue>, order: SortOrder) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.total_cmp(b),
            SortOrder::Desc => b.total_cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Return the items ordered by `sorting.column`.
///
/// The sort is stable: items with equal keys keep their input order.
pub fn sort<'a, I>(items: I, sorting: &Sorting) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut sorted: Vec<&'a Item> = items.into_iter().collect();
    sorted.sort_by(|a, b| {
        compare(
            a.get(&sorting.column),
            b.get(&sorting.column),
            sorting.order,
        )
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, title: &str, extra: Vec<(&str, CellValue)>) -> Item {
        Item::new(
            id,
            title,
            extra.into_iter().map(|(k, v)| (k.to_string(), v)),
        )
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_default_id_order_then_title_toggle() {
        let items = vec![item(1, "b", vec![]), item(2, "a", vec![])];

        assert_eq!(ids(&sort(&items, &Sorting::asc("id"))), vec![1, 2]);
        assert_eq!(ids(&sort(&items, &Sorting::asc("title"))), vec![2, 1]);
        assert_eq!(ids(&sort(&items, &Sorting::desc("title"))), vec![1, 2]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let items = vec![
            item(1, "x", vec![("size", CellValue::Integer(10))]),
            item(2, "y", vec![("size", CellValue::Float(9.5))]),
            item(3, "z", vec![("size", CellValue::Integer(100))]),
        ];
        assert_eq!(ids(&sort(&items, &Sorting::asc("size"))), vec![2, 1, 3]);
    }

    #[test]
    fn test_strings_compare_by_code_point() {
        let items = vec![item(1, "b", vec![]), item(2, "B", vec![]), item(3, "a", vec![])];
        // 'B' (0x42) < 'a' (0x61) < 'b' (0x62)
        assert_eq!(ids(&sort(&items, &Sorting::asc("title"))), vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_and_null_sort_last_in_both_directions() {
        let items = vec![
            item(1, "a", vec![]),
            item(2, "b", vec![("rank", CellValue::Integer(2))]),
            item(3, "c", vec![("rank", CellValue::Null)]),
            item(4, "d", vec![("rank", CellValue::Integer(1))]),
        ];
        assert_eq!(ids(&sort(&items, &Sorting::asc("rank"))), vec![4, 2, 1, 3]);
        assert_eq!(ids(&sort(&items, &Sorting::desc("rank"))), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_stable_on_ties() {
        let items = vec![
            item(1, "x", vec![("group", CellValue::Text("b".into()))]),
            item(2, "y", vec![("group", CellValue::Text("a".into()))]),
            item(3, "z", vec![("group", CellValue::Text("b".into()))]),
            item(4, "w", vec![("group", CellValue::Text("a".into()))]),
        ];
        assert_eq!(ids(&sort(&items, &Sorting::asc("group"))), vec![2, 4, 1, 3]);
        assert_eq!(ids(&sort(&items, &Sorting::desc("group"))), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_desc_reverses_asc_without_ties() {
        let items = vec![item(3, "c", vec![]), item(1, "a", vec![]), item(2, "b", vec![])];
        let mut asc = ids(&sort(&items, &Sorting::asc("title")));
        let desc = ids(&sort(&items, &Sorting::desc("title")));
        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_permutation_and_idempotent() {
        let items = vec![
            item(5, "e", vec![("n", CellValue::Integer(3))]),
            item(1, "a", vec![]),
            item(4, "d", vec![("n", CellValue::Integer(3))]),
            item(2, "b", vec![("n", CellValue::Bool(true))]),
        ];
        let sorting = Sorting::desc("n");
        let once = sort(&items, &sorting);
        let twice = sort(once.iter().copied(), &sorting);
        assert_eq!(ids(&once), ids(&twice));

        let mut sorted_ids = ids(&once);
        sorted_ids.sort();
        assert_eq!(sorted_ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_large_integers_and_floats_sort_consistently() {
        let items = vec![
            item(1, "a", vec![("n", CellValue::Integer(9_007_199_254_740_993))]),
            item(2, "b", vec![("n", CellValue::Float(9_007_199_254_740_992.0))]),
            item(3, "c", vec![("n", CellValue::Integer(9_007_199_254_740_992))]),
        ];
        let sorting = Sorting::asc("n");
        let once = sort(&items, &sorting);
        assert_eq!(ids(&once), vec![2, 3, 1]);
        assert_eq!(ids(&sort(once.iter().copied(), &sorting)), vec![2, 3, 1]);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let items = vec![item(2, "b", vec![]), item(1, "a", vec![])];
        let _ = sort(&items, &Sorting::asc("id"));
        assert_eq!(items[0].id(), 2);
        assert_eq!(items[1].id(), 1);
    }
}
