// ── Ordering ──
//
// One active key plus a direction. Text compares through a Spanish-style
// collation key (case and accent insensitive, `ñ` after `n`). Numbers and
// timestamps compare numerically; a missing value sorts last in both
// directions.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Asc => ord,
            Self::Desc => ord.reverse(),
        }
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub dir: SortDir,
}

impl<K: Copy + PartialEq> SortState<K> {
    pub fn new(key: K, dir: SortDir) -> Self {
        Self { key, dir }
    }

    /// Same key toggles the direction; a new key starts ascending.
    pub fn select(&mut self, key: K) {
        if self.key == key {
            self.dir = self.dir.toggled();
        } else {
            self.key = key;
            self.dir = SortDir::Asc;
        }
    }
}

/// A comparable projection of one entity field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Collation key, see [`collation_key`].
    Text(String),
    /// `None` for missing or non-finite values.
    Number(Option<f64>),
}

impl SortValue {
    pub fn text(s: Option<&str>) -> Self {
        Self::Text(collation_key(s.unwrap_or_default()))
    }

    pub fn number(n: Option<f64>) -> Self {
        Self::Number(n.filter(|v| v.is_finite()))
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn timestamp(t: Option<&DateTime<Utc>>) -> Self {
        Self::Number(t.map(|t| t.timestamp_millis() as f64))
    }

    fn compare(&self, other: &Self, dir: SortDir) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => dir.apply(a.cmp(b)),
            (Self::Number(Some(a)), Self::Number(Some(b))) => dir.apply(a.total_cmp(b)),
            (Self::Number(None), Self::Number(Some(_))) => Ordering::Greater,
            (Self::Number(Some(_)), Self::Number(None)) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

/// An entity with sortable keys.
pub trait Sortable {
    type Key: Copy + PartialEq;
    type Context;

    /// Values compared in order for `key`; later values break ties.
    fn sort_values(&self, key: Self::Key, ctx: &Self::Context) -> Vec<SortValue>;
}

/// Stable sort of `items` by `state`.
pub fn sort_items<T: Sortable>(items: &mut Vec<&T>, state: SortState<T::Key>, ctx: &T::Context) {
    let mut keyed: Vec<(Vec<SortValue>, &T)> = items
        .drain(..)
        .map(|item| (item.sort_values(state.key, ctx), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.compare(y, state.dir))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    items.extend(keyed.into_iter().map(|(_, item)| item));
}

/// Case- and accent-folded key. `ñ` stays distinct and sorts after every
/// other `n` sequence.
pub fn collation_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => out.push('a'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'í' | 'ì' | 'î' | 'ï' => out.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => out.push('u'),
            'ç' => out.push('c'),
            'ñ' => {
                out.push('n');
                out.push(char::MAX);
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_toggles_then_resets() {
        let mut state = SortState::new("name", SortDir::Asc);
        state.select("name");
        assert_eq!(state.dir, SortDir::Desc);
        state.select("created_at");
        assert_eq!(state, SortState::new("created_at", SortDir::Asc));
    }

    #[test]
    fn collation_ignores_case_and_accents() {
        assert_eq!(collation_key("Álvaro"), collation_key("alvaro"));
        assert_eq!(collation_key("MÉRIDA"), "merida");
    }

    #[test]
    fn enye_sorts_between_n_and_o() {
        assert!(collation_key("nz") < collation_key("ña"));
        assert!(collation_key("ña") < collation_key("oa"));
        assert_ne!(collation_key("ñ"), collation_key("n"));
    }

    #[test]
    fn missing_numbers_last_in_both_directions() {
        let some = SortValue::number(Some(1.0));
        let none = SortValue::number(None);
        assert_eq!(none.compare(&some, SortDir::Asc), Ordering::Greater);
        assert_eq!(none.compare(&some, SortDir::Desc), Ordering::Greater);
        assert_eq!(SortValue::number(Some(f64::NAN)), none);
    }

    #[test]
    fn dir_parses_case_insensitively() {
        assert_eq!("DESC".parse::<SortDir>().ok(), Some(SortDir::Desc));
        assert_eq!(SortDir::Asc.to_string(), "asc");
    }
}
