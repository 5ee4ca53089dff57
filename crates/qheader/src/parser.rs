//! Splitting and ranking of a whole header value.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::{Item, ItemError, ItemPool, Params, Wildcard, sort_items};

/// A parsed and ranked quality-factor header.
///
/// Items are ordered from most to least preferred, see [`sort_items`].
/// The best-match accessors ([`best`](Self::best), [`value`](Self::value),
/// [`q`](Self::q), [`params`](Self::params)) return `None` when the header is
/// empty or when even its first item failed to parse or was refused with `q=0`.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct QHeader {
    items: Vec<Item>,
}

impl QHeader {
    /// All items, best first.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume the header and return its items, best first.
    #[inline]
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the header has no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items, best first.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Items without error and with `q > 0`, best first.
    pub fn acceptable(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|item| item.is_acceptable())
    }

    /// The most preferred item, if it is acceptable.
    #[inline]
    #[must_use]
    pub fn best(&self) -> Option<&Item> {
        self.items.first().filter(|item| item.is_acceptable())
    }

    /// Value of the most preferred item.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.best().map(|item| item.value.as_str())
    }

    /// Weight of the most preferred item.
    #[inline]
    #[must_use]
    pub fn q(&self) -> Option<f32> {
        self.best().map(|item| item.q)
    }

    /// Parameters of the most preferred item.
    #[inline]
    #[must_use]
    pub fn params(&self) -> Option<&Params> {
        self.best().map(|item| &item.params)
    }
}

impl Display for QHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl IntoIterator for QHeader {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a QHeader {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Configurable header parser.
///
/// # Example
///
/// ```
/// use qheader::{Parser, Wildcard};
///
/// let parser = Parser::new(Wildcard::Any).skip_rejected(true);
/// let encodings = parser.parse("gzip;q=0.8, br, identity;q=0");
/// assert_eq!(encodings.value(), Some("br"));
/// assert_eq!(encodings.len(), 2);
/// ```
#[derive(Clone, Default, Debug)]
#[non_exhaustive]
pub struct Parser {
    /// The family wildcard used for ranking.
    pub wildcard: Wildcard,
    /// Drop items with `q=0` instead of ranking them last.
    pub skip_rejected: bool,
    /// Pool the items are taken from.
    pub pool: Option<Arc<ItemPool>>,
}

impl Parser {
    /// Create a new `Parser` ranking with `wildcard`.
    ///
    /// Items with `q=0` are kept by default, so an explicit refusal such as
    /// `identity;q=0` is still visible to the caller.
    #[inline]
    #[must_use]
    pub fn new(wildcard: Wildcard) -> Self {
        Self {
            wildcard,
            skip_rejected: false,
            pool: None,
        }
    }

    /// Sets `Parser` with skip_rejected.
    #[inline]
    #[must_use]
    pub fn skip_rejected(mut self, skip_rejected: bool) -> Self {
        self.skip_rejected = skip_rejected;
        self
    }

    /// Take items from `pool` instead of allocating them.
    ///
    /// Items are given back only by [`QHeader::recycle`] or [`ItemPool::release`].
    #[inline]
    #[must_use]
    pub fn pool(mut self, pool: Arc<ItemPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Parse and rank one header value.
    #[must_use]
    pub fn parse(&self, header: &str) -> QHeader {
        self.parse_all([header])
    }

    /// Parse several values of the same header field and rank them as one list.
    #[must_use]
    pub fn parse_all<'a>(&self, headers: impl IntoIterator<Item = &'a str>) -> QHeader {
        let mut items = Vec::new();
        for header in headers {
            items.reserve(header.matches(',').count() + 1);
            for segment in header.split(',') {
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }
                if let Some(item) = self.parse_segment(segment) {
                    items.push(item);
                }
            }
        }
        sort_items(&mut items, self.wildcard);
        tracing::trace!(count = items.len(), wildcard = %self.wildcard, "quality header ranked");
        QHeader { items }
    }

    fn parse_segment(&self, segment: &str) -> Option<Item> {
        let mut item = self
            .pool
            .as_ref()
            .map_or_else(Item::default, |pool| pool.acquire());
        item.parse_into(segment);

        let dropped = if item.error == Some(ItemError::MissingValue) {
            tracing::debug!(segment, "segment without value dropped");
            true
        } else if self.skip_rejected && item.error.is_none() && item.q == 0.0 {
            tracing::debug!(segment, "rejected segment dropped");
            true
        } else {
            false
        };
        if !dropped {
            return Some(item);
        }
        if let Some(pool) = &self.pool {
            pool.release(item);
        }
        None
    }
}
