// ── Free-text filtering ──
//
// Case-insensitive substring match over one selected field or over an
// entity's fixed "all fields" list. Absent fields match as "".

/// An entity that exposes named text fields to the search box.
pub trait Searchable {
    type Field: Copy + PartialEq + 'static;
    /// Extra data needed to render some fields (e.g. a name lookup).
    type Context;

    /// Fields covered by [`SearchScope::All`].
    const ALL_FIELDS: &'static [Self::Field];

    /// Text of `field`, numbers stringified. `None` when absent.
    fn field_text(&self, field: Self::Field, ctx: &Self::Context) -> Option<String>;
}

/// Which field(s) a query is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope<F> {
    #[default]
    All,
    Field(F),
}

impl<F: Copy + PartialEq> SearchScope<F> {
    pub fn matches<T>(&self, item: &T, needle: &str, ctx: &T::Context) -> bool
    where
        T: Searchable<Field = F>,
    {
        let hit = |field: F| {
            item.field_text(field, ctx)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        };
        match self {
            Self::All => T::ALL_FIELDS.iter().any(|&f| hit(f)),
            Self::Field(f) => hit(*f),
        }
    }
}

/// Keep the items matching `query` in `scope`, preserving order.
///
/// A blank query passes everything through.
pub fn filter<'a, T, I>(items: I, query: &str, scope: SearchScope<T::Field>, ctx: &T::Context) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|item| scope.matches(*item, &needle, ctx))
        .collect()
}

/// Render an optional number the way the search box sees it.
pub(crate) fn number_text(n: Option<f64>) -> Option<String> {
    n.map(|v| v.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Router;
    use crate::view::RouterField;
    use serde_json::json;

    fn routers() -> Vec<Router> {
        serde_json::from_value(json!([
            { "id": 1, "serial": "XQ-1", "mac": "AA:BB:CC", "municipio": "Guadalajara", "latitud": 20.5 },
            { "id": 2, "serial": "ZZ-9", "mac": "11:22:33", "municipio": "Zapopan", "group_name": "A" },
            { "id": 12, "mac": "aa:00:11", "estacion": null }
        ]))
        .unwrap()
    }

    fn ids(items: &[&Router]) -> Vec<String> {
        items.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn blank_query_passes_through() {
        let list = routers();
        let out = filter(&list, "   ", SearchScope::All, &());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn all_scope_is_case_insensitive() {
        let list = routers();
        let out = filter(&list, "aa:", SearchScope::All, &());
        assert_eq!(ids(&out), ["1", "12"]);
    }

    #[test]
    fn all_scope_stringifies_numbers() {
        let list = routers();
        assert_eq!(ids(&filter(&list, "20.5", SearchScope::All, &())), ["1"]);
        assert_eq!(ids(&filter(&list, "1", SearchScope::Field(RouterField::Id), &())), ["1", "12"]);
    }

    #[test]
    fn all_scope_skips_serial() {
        let list = routers();
        assert!(filter(&list, "xq", SearchScope::All, &()).is_empty());
        assert_eq!(ids(&filter(&list, "xq", SearchScope::Field(RouterField::Serial), &())), ["1"]);
    }

    #[test]
    fn field_scope_only_checks_that_field() {
        let list = routers();
        let out = filter(&list, "zap", SearchScope::Field(RouterField::Mac), &());
        assert!(out.is_empty());
        let out = filter(&list, "zap", SearchScope::Field(RouterField::Municipio), &());
        assert_eq!(ids(&out), ["2"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let list = routers();
        let once = filter(&list, "a", SearchScope::All, &());
        let twice = filter(once.iter().copied(), "a", SearchScope::All, &());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn all_fields_list_is_static_and_excludes_serial() {
        let fields: &'static [RouterField] = <Router as Searchable>::ALL_FIELDS;
        assert!(fields.contains(&RouterField::Mac));
        assert!(!fields.contains(&RouterField::Serial));
    }
}
