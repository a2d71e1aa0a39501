//! List pane filtering.

use crate::entity::Entity;

/// Rows of `records` whose filterable fields contain `query`, ignoring case.
///
/// An empty query returns every row. Result order is store order.
pub fn filter_records<E: Entity>(records: &[E], query: &str) -> Vec<E> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}
