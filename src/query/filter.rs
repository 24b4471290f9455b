//! Free-text row search.

use crate::api::Item;

/// Check whether any visible field of `item` contains `query_lower`.
///
/// `query_lower` must already be lowercased.
pub fn matches(item: &Item, query_lower: &str) -> bool {
    item.fields()
        .any(|(_, value)| value.to_string().to_lowercase().contains(query_lower))
}

/// Keep the items with a visible field containing `query`, case-insensitively.
///
/// An empty query keeps every item. Input order is preserved.
pub fn filter<'a, I>(items: I, query: &str) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    if query.is_empty() {
        return items.into_iter().collect();
    }

    let query_lower = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches(item, &query_lower))
        .collect()
}
