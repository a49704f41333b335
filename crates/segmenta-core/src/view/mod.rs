// ── Derived views ──
//
// Read-only projections of a store snapshot: filter, then sort, then
// paginate. Nothing here mutates the cache.

mod campaign;
mod filter;
mod groups;
mod paginate;
mod router;
mod segment;
mod sort;

pub use campaign::{CampaignField, CampaignSortKey, CampaignStatus, campaign_view};
pub use filter::{SearchScope, Searchable, filter};
pub use groups::{EMPTY_GROUP, distinct_groups, group_counts};
pub use paginate::{Page, Paginator, ROUTER_PAGE_SIZE, page_count, paginate};
pub use router::RouterField;
pub use segment::{CampaignNames, SegmentField, SegmentSortKey};
pub use sort::{SortDir, SortState, SortValue, Sortable, collation_key, sort_items};

/// Query, scope, sort and page for one list surface.
///
/// Changing the query, the scope or the sort sends the page back to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F, K> {
    query: String,
    scope: SearchScope<F>,
    sort: Option<SortState<K>>,
    pager: Paginator,
}

impl<F: Copy + PartialEq, K: Copy + PartialEq> ViewState<F, K> {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            scope: SearchScope::All,
            sort: None,
            pager: Paginator::new(page_size),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, key: K, dir: SortDir) -> Self {
        self.sort = Some(SortState::new(key, dir));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pager.reset();
    }

    pub fn scope(&self) -> SearchScope<F> {
        self.scope
    }

    pub fn set_scope(&mut self, scope: SearchScope<F>) {
        self.scope = scope;
        self.pager.reset();
    }

    pub fn sort(&self) -> Option<SortState<K>> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortState<K>>) {
        self.sort = sort;
        self.pager.reset();
    }

    /// Header-click semantics: same key toggles, new key starts ascending.
    pub fn select_sort(&mut self, key: K) {
        match &mut self.sort {
            Some(state) => state.select(key),
            None => self.sort = Some(SortState::new(key, SortDir::Asc)),
        }
        self.pager.reset();
    }

    pub fn pager(&self) -> &Paginator {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Paginator {
        &mut self.pager
    }

    /// Filter and sort, without paginating.
    pub fn derive<'a, T, I, C>(&self, items: I, ctx: &C) -> Vec<&'a T>
    where
        T: Searchable<Field = F, Context = C> + Sortable<Key = K, Context = C> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut rows = filter(items, &self.query, self.scope, ctx);
        if let Some(sort) = self.sort {
            sort_items(&mut rows, sort, ctx);
        }
        rows
    }

    /// Filter, sort and paginate. The page number is clamped in place.
    pub fn apply<'a, T, I, C>(&mut self, items: I, ctx: &C) -> Page<&'a T>
    where
        T: Searchable<Field = F, Context = C> + Sortable<Key = K, Context = C> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let rows = self.derive(items, ctx);
        self.pager.apply(rows)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Router;
    use serde_json::json;

    fn routers(n: i64) -> Vec<Router> {
        (1..=n)
            .map(|i| serde_json::from_value(json!({ "id": i, "mac": format!("m{i}") })).unwrap())
            .collect()
    }

    #[test]
    fn query_change_resets_page() {
        let list = routers(25);
        let mut view: ViewState<RouterField, RouterField> = ViewState::new(ROUTER_PAGE_SIZE);
        view.pager_mut().go_to(3);
        assert_eq!(view.apply(&list, &()).number, 3);

        view.set_query("m");
        assert_eq!(view.pager().page(), 1);
    }

    #[test]
    fn sort_change_resets_page() {
        let list = routers(25);
        let mut view: ViewState<RouterField, RouterField> = ViewState::new(ROUTER_PAGE_SIZE);
        view.pager_mut().go_to(2);
        view.select_sort(RouterField::Id);
        assert_eq!(view.pager().page(), 1);
        assert_eq!(view.sort(), Some(SortState::new(RouterField::Id, SortDir::Asc)));

        view.select_sort(RouterField::Id);
        let page = view.apply(&list, &());
        assert_eq!(page.items[0].id.to_string(), "25");
    }

    #[test]
    fn narrowing_query_clamps_page() {
        let list = routers(25);
        let mut view: ViewState<RouterField, RouterField> = ViewState::new(ROUTER_PAGE_SIZE);
        view.pager_mut().go_to(3);
        view.set_scope(SearchScope::Field(RouterField::Mac));
        view.pager_mut().go_to(3);
        // "m2" matches m2 and m20..m25: seven rows, one page.
        view.query = "m2".into();
        let page = view.apply(&list, &());
        assert_eq!(page.total, 7);
        assert_eq!(page.number, 1);
        assert_eq!(view.pager().page(), 1);
    }
}
