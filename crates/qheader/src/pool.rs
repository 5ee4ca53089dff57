//! Reuse of [`Item`] allocations across parses.

use parking_lot::Mutex;

use crate::{Item, QHeader};

/// Default number of items an [`ItemPool`] keeps.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// A thread safe free list of [`Item`]s.
///
/// Items only come back through an explicit [`release`](Self::release),
/// [`release_all`](Self::release_all) or [`QHeader::recycle`] call, after the
/// caller is done reading them. Forgetting to release only costs an
/// allocation on a later parse.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use qheader::{ItemPool, Parser, Wildcard};
///
/// let pool = Arc::new(ItemPool::new());
/// let parser = Parser::new(Wildcard::AnyMime).pool(pool.clone());
///
/// let accept = parser.parse("text/html,*/*;q=0.1");
/// assert_eq!(accept.value(), Some("text/html"));
/// accept.recycle(&pool);
/// assert_eq!(pool.len(), 2);
/// ```
#[derive(Debug)]
pub struct ItemPool {
    items: Mutex<Vec<Item>>,
    capacity: usize,
}

impl Default for ItemPool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }
}

impl ItemPool {
    /// Create a new `ItemPool` keeping at most [`DEFAULT_POOL_CAPACITY`] items.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a new `ItemPool` keeping at most `capacity` released items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Maximum number of idle items kept.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of idle items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Returns `true` if no idle items are available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Take an item from the pool, or allocate a new one.
    ///
    /// The returned item is in its default state.
    #[must_use]
    pub fn acquire(&self) -> Item {
        let item = self.items.lock().pop();
        if let Some(item) = item {
            tracing::trace!("item pool hit");
            item
        } else {
            tracing::trace!("item pool miss");
            Item::default()
        }
    }

    /// Give `item` back to the pool.
    ///
    /// The item is reset here, so the next [`acquire`](Self::acquire) hands
    /// out a clean one. It is dropped if the pool is full.
    pub fn release(&self, mut item: Item) {
        item.reset();
        let mut items = self.items.lock();
        if items.len() < self.capacity {
            items.push(item);
        }
    }

    /// Give every item of `items` back to the pool.
    pub fn release_all(&self, items: impl IntoIterator<Item = Item>) {
        let mut idle = self.items.lock();
        let room = self.capacity.saturating_sub(idle.len());
        idle.extend(items.into_iter().take(room).map(|mut item| {
            item.reset();
            item
        }));
    }
}

impl QHeader {
    /// Give all items of this header back to `pool`.
    ///
    /// Call this only after every field of the items has been read.
    pub fn recycle(self, pool: &ItemPool) {
        pool.release_all(self);
    }
}
