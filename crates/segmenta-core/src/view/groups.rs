// ── Group statistics ──

use indexmap::{IndexMap, IndexSet};

use crate::model::Router;

/// Label for routers with no group.
pub const EMPTY_GROUP: &str = "—";

/// Router count per group, in first-seen order. Unassigned routers are
/// counted under [`EMPTY_GROUP`].
pub fn group_counts<'a>(routers: impl IntoIterator<Item = &'a Router>) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for router in routers {
        let key = router.group().unwrap_or(EMPTY_GROUP);
        *counts.entry(key.to_owned()).or_insert(0) += 1;
    }
    counts
}

/// Distinct non-empty group names, in first-seen order.
pub fn distinct_groups<'a>(routers: impl IntoIterator<Item = &'a Router>) -> IndexSet<String> {
    routers
        .into_iter()
        .filter_map(Router::group)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn routers() -> Vec<Router> {
        serde_json::from_value(json!([
            { "id": 1, "group_name": "B" },
            { "id": 2, "group_name": "" },
            { "id": 3, "group_name": "A" },
            { "id": 4 },
            { "id": 5, "group_name": "B" }
        ]))
        .unwrap()
    }

    #[test]
    fn counts_in_first_seen_order() {
        let counts = group_counts(&routers());
        let pairs: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, [("B", 2), (EMPTY_GROUP, 2), ("A", 1)]);
    }

    #[test]
    fn distinct_skips_unassigned() {
        let groups = distinct_groups(&routers());
        assert_eq!(groups.into_iter().collect::<Vec<_>>(), ["B", "A"]);
    }
}
