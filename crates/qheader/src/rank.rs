//! Ordering of parsed items by weight and specificity.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::Item;

/// The value that stands for "anything else" in a header family.
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Hash)]
pub enum Wildcard {
    /// `*/*`, used by `Accept`.
    #[default]
    AnyMime,
    /// `*`, used by `Accept-Language`, `Accept-Charset` and `Accept-Encoding`.
    Any,
    /// No family wildcard, written as an empty token.
    None,
}

impl Wildcard {
    /// Look up the wildcard for `token`, one of `*/*`, `*` or the empty string.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "*/*" => Some(Self::AnyMime),
            "*" => Some(Self::Any),
            "" => Some(Self::None),
            _ => None,
        }
    }

    /// The token as it appears in a header.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnyMime => "*/*",
            Self::Any => "*",
            Self::None => "",
        }
    }
}

impl Display for Wildcard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Specificity {
    Exact,
    Partial,
    Any,
}

#[derive(Clone, Copy, Debug)]
struct RankKey {
    failed: bool,
    q: f32,
    specificity: Specificity,
    // Index of the first item with the same value and weight.
    group: usize,
    params: usize,
}

impl RankKey {
    fn new(item: &Item, index: usize, wildcard: Wildcard) -> Self {
        let specificity = if item.is_any(wildcard) {
            Specificity::Any
        } else if item.has_wildcard() {
            Specificity::Partial
        } else {
            Specificity::Exact
        };
        Self {
            failed: item.error.is_some(),
            // `-0` and `0` are the same weight.
            q: item.q + 0.0,
            specificity,
            group: index,
            params: item.params.len(),
        }
    }

    fn same_weight(&self, other: &Self) -> bool {
        self.failed == other.failed && self.q.total_cmp(&other.q).is_eq()
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.failed, other.failed) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        other
            .q
            .total_cmp(&self.q)
            .then(self.specificity.cmp(&other.specificity))
            .then(self.group.cmp(&other.group))
            .then(other.params.cmp(&self.params))
    }
}
impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for RankKey {}

/// Sort `items` so the most preferred alternative comes first.
///
/// The sort is stable. Keys, most significant first:
///
/// 1. items with an [`error`](Item::error) go after all others;
/// 2. higher `q` first;
/// 3. among items with the same value, more parameters first;
/// 4. the family `wildcard` goes after everything else;
/// 5. `type/*` goes after exact values.
///
/// Items that share a value and a weight are kept together at the position of
/// the first one. Zero-weight and failed items are ranked too, nothing is
/// removed.
pub fn sort_items(items: &mut [Item], wildcard: Wildcard) {
    if items.len() < 2 {
        return;
    }
    let mut order = items
        .iter()
        .enumerate()
        .map(|(index, item)| (RankKey::new(item, index, wildcard), index))
        .collect::<Vec<_>>();

    // Runs of equal value and weight share the index of their first item.
    order.sort_unstable_by(|(a, i), (b, j)| {
        a.failed
            .cmp(&b.failed)
            .then(a.q.total_cmp(&b.q))
            .then_with(|| items[*i].value.cmp(&items[*j].value))
            .then(i.cmp(j))
    });
    let mut start = 0;
    for index in 1..=order.len() {
        let run_ends = index == order.len() || {
            let (first, at) = (&order[start], &order[index]);
            !first.0.same_weight(&at.0) || items[first.1].value != items[at.1].value
        };
        if run_ends {
            let group = order[start].1;
            for (key, _) in &mut order[start..index] {
                key.group = group;
            }
            start = index;
        }
    }

    // The input index as last key keeps equal items in input order.
    order.sort_unstable_by(|(a, i), (b, j)| a.cmp(b).then(i.cmp(j)));

    // Apply the permutation in place: slot `i` takes the item at `order[i].1`.
    for index in 0..order.len() {
        let mut slot = index;
        loop {
            let source = order[slot].1;
            order[slot].1 = slot;
            if source == index {
                break;
            }
            items.swap(slot, source);
            slot = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemError;

    fn items(list: &[(&str, f32)]) -> Vec<Item> {
        list.iter().map(|(value, q)| Item::new(*value, *q)).collect()
    }

    fn values(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.value.as_str()).collect()
    }

    #[test]
    fn test_wildcard_token() {
        assert_eq!(Wildcard::from_token("*/*"), Some(Wildcard::AnyMime));
        assert_eq!(Wildcard::from_token("*"), Some(Wildcard::Any));
        assert_eq!(Wildcard::from_token(""), Some(Wildcard::None));
        assert_eq!(Wildcard::from_token("**"), None);
        assert_eq!(Wildcard::Any.to_string(), "*");
    }

    #[test]
    fn test_sort_wildcards() {
        let mut list = items(&[("*/*", 0.7), ("a/*", 0.7)]);
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(values(&list), ["a/*", "*/*"]);

        let mut list = items(&[("*/*", 0.7), ("a/*", 0.7), ("b/*", 0.7)]);
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(values(&list), ["a/*", "b/*", "*/*"]);

        let mut list = items(&[("*/*", 0.7), ("a/*", 0.7), ("c/c", 0.7), ("b/*", 0.7)]);
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(values(&list), ["c/c", "a/*", "b/*", "*/*"]);
    }

    #[test]
    fn test_sort_stable() {
        let mut list = items(&[
            ("d/d", 0.7),
            ("a/*", 0.7),
            ("*/*", 0.7),
            ("b/*", 0.7),
            ("c/c", 0.7),
        ]);
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(values(&list), ["d/d", "c/c", "a/*", "b/*", "*/*"]);
    }

    #[test]
    fn test_sort_weight_first() {
        let mut list = items(&[
            ("d/d", 0.7),
            ("a/*", 0.8),
            ("*/*", 0.7),
            ("b/*", 0.7),
            ("c/c", 0.7),
        ]);
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(values(&list), ["a/*", "d/d", "c/c", "b/*", "*/*"]);

        let mut list = items(&[("*/*", 1.0), ("text/html", 0.2), ("text/*", 0.5)]);
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(values(&list), ["*/*", "text/*", "text/html"]);
    }

    #[test]
    fn test_sort_languages() {
        let mut list = items(&[
            ("zh-cn", 0.7),
            ("zh-tw", 0.8),
            ("*", 0.7),
            ("en", 0.7),
            ("en-us", 0.7),
        ]);
        sort_items(&mut list, Wildcard::Any);
        assert_eq!(values(&list), ["zh-tw", "zh-cn", "en", "en-us", "*"]);
    }

    #[test]
    fn test_sort_errors_last() {
        let mut list = items(&[
            ("zh-cn", 0.7),
            ("zh-tw", 0.8),
            ("*", 0.7),
            ("en", 0.7),
            ("en-us", 0.0),
        ]);
        list[0].error = Some(ItemError::MissingValue);
        list[3].error = Some(ItemError::OutOfRange {
            value: "2".to_owned(),
        });
        sort_items(&mut list, Wildcard::Any);
        assert_eq!(values(&list), ["zh-tw", "*", "en-us", "zh-cn", "en"]);
    }

    #[test]
    fn test_sort_errors_ignore_weight() {
        let mut list = items(&[("b", 1.0), ("a", 0.1), ("c", 0.5)]);
        list[0].error = Some(ItemError::MissingValue);
        list[2].error = Some(ItemError::MissingValue);
        list[2].q = 1.0;
        sort_items(&mut list, Wildcard::Any);
        assert_eq!(values(&list), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_params() {
        let mut list = items(&[("zh-cn", 0.7), ("zh-cn", 0.7)]);
        list[0].raw = "1".to_owned();
        list[1].raw = "2".to_owned();
        list[1].params.insert("level", "1");
        sort_items(&mut list, Wildcard::Any);
        assert_eq!(list[0].raw, "2");
        assert_eq!(list[1].raw, "1");
    }

    #[test]
    fn test_sort_same_value_grouped() {
        let mut list = vec![
            Item::parse("text/html"),
            Item::parse("text/xml"),
            Item::parse("text/html;level=1"),
        ];
        sort_items(&mut list, Wildcard::AnyMime);
        let raws = list.iter().map(|item| item.raw.as_str()).collect::<Vec<_>>();
        assert_eq!(raws, ["text/html;level=1", "text/html", "text/xml"]);
    }

    #[test]
    fn test_sort_group_needs_same_weight() {
        let mut list = vec![
            Item::parse("text/html;q=0.5"),
            Item::parse("text/xml"),
            Item::parse("text/html;level=1"),
        ];
        sort_items(&mut list, Wildcard::AnyMime);
        let raws = list.iter().map(|item| item.raw.as_str()).collect::<Vec<_>>();
        assert_eq!(raws, ["text/xml", "text/html;level=1", "text/html;q=0.5"]);
    }

    #[test]
    fn test_sort_negative_zero() {
        let mut list = vec![Item::parse("gzip;q=-0"), Item::parse("*;q=0")];
        sort_items(&mut list, Wildcard::Any);
        assert_eq!(values(&list), ["gzip", "*"]);

        let mut list = items(&[("a/a", 0.0), ("a/a", -0.0)]);
        list[1].params.insert("level", "1");
        sort_items(&mut list, Wildcard::AnyMime);
        let counts = list.iter().map(|item| item.params.len()).collect::<Vec<_>>();
        assert_eq!(counts, [1, 0]);
    }

    #[test]
    fn test_sort_many_duplicates() {
        let mut list = (0..200)
            .map(|n| Item::new(if n % 2 == 0 { "a/a" } else { "b/b" }, 0.5))
            .collect::<Vec<_>>();
        list.push(Item::new("*/*", 0.5));
        list[199].params.insert("level", "1");
        list[199].raw = "b/b;level=1".to_owned();
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(list[0].value, "a/a");
        assert!(list[..100].iter().all(|item| item.value == "a/a"));
        assert_eq!(list[100].raw, "b/b;level=1");
        assert!(list[101..200].iter().all(|item| item.value == "b/b"));
        assert_eq!(list[200].value, "*/*");
    }

    #[test]
    fn test_sort_without_wildcard() {
        let mut list = items(&[("*", 0.5), ("*/*", 0.5), ("a/*", 0.5), ("a/a", 0.5)]);
        sort_items(&mut list, Wildcard::None);
        assert_eq!(values(&list), ["*", "a/a", "*/*", "a/*"]);
    }

    #[test]
    fn test_sort_idempotent() {
        let mut list = items(&[
            ("a/*", 0.3),
            ("*/*", 0.3),
            ("x/y", 0.9),
            ("a/b", 0.3),
            ("a/b", 0.3),
        ]);
        list[4].params.insert("level", "2");
        sort_items(&mut list, Wildcard::AnyMime);
        let once = list.clone();
        sort_items(&mut list, Wildcard::AnyMime);
        assert_eq!(list, once);
    }
}
