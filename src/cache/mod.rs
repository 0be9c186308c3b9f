//! Link cache: a TTL-bounded, single-flight cache of `page -> outgoing links`.
//!
//! The cache is the component that lets many concurrent searches (and many
//! concurrent expansion steps within one search) share fetched pages without
//! issuing redundant HTTP requests for the same article at the same time.
//! [`InMemoryLinkCache`] is a [`DashMap`]-backed TTL cache in the style of a
//! generic in-process cache, extended with a pending-slot registry so that
//! the *first* caller for a cold key performs the fetch and every other
//! concurrent caller for that same key waits on it rather than re-fetching.

mod store;

pub use store::{LinkStore, SqliteLinkStore};

use crate::page::PageId;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// A page's extracted outgoing links, as stored in the cache.
pub type LinkList = Vec<PageId>;

/// Abstraction over the link cache so the fetcher and search engine don't
/// need to know whether entries live purely in memory or are also backed by
/// an out-of-process store.
#[async_trait]
pub trait LinkCache: Send + Sync {
    /// Returns the cached links for `key`, if present and not expired.
    async fn get(&self, key: &PageId) -> Option<LinkList>;

    /// Caches `links` for `key` for `ttl`, and releases any callers waiting
    /// on a concurrent fetch of the same key.
    async fn put(&self, key: PageId, links: LinkList, ttl: Duration);

    /// Releases any callers waiting on a concurrent fetch of `key` without
    /// caching anything, used when a fetch fails. Failed fetches are never
    /// cached, so the next lookup retries (failure isolation).
    async fn fail(&self, key: &PageId);

    /// Registers this caller as the one responsible for fetching `key`, if
    /// nobody else already is. Returns `true` if the caller must now perform
    /// the fetch and call [`LinkCache::put`] or [`LinkCache::fail`]; returns
    /// `false` if another caller is already fetching it and this caller
    /// should await [`LinkCache::wait_for`] instead.
    async fn claim(&self, key: &PageId) -> bool;

    /// Waits until `key` is no longer pending (either cached or failed),
    /// then returns the cached value if one was produced.
    async fn wait_for(&self, key: &PageId) -> Option<LinkList>;
}

enum Slot {
    Ready { links: LinkList, expires_at: Instant },
    Pending(Arc<Notify>),
}

/// An in-memory, single-flight, TTL-bounded link cache, optionally backed by
/// a [`LinkStore`] for out-of-process sharing.
pub struct InMemoryLinkCache {
    slots: DashMap<PageId, Slot>,
    store: Option<Arc<dyn LinkStore>>,
}

impl InMemoryLinkCache {
    pub fn new() -> Self {
        InMemoryLinkCache {
            slots: DashMap::new(),
            store: None,
        }
    }

    pub fn with_store(store: Arc<dyn LinkStore>) -> Self {
        InMemoryLinkCache {
            slots: DashMap::new(),
            store: Some(store),
        }
    }

    /// Current number of resident entries (ready and pending), for tests and
    /// diagnostics.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for InMemoryLinkCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for InMemoryLinkCache {
    async fn get(&self, key: &PageId) -> Option<LinkList> {
        let mut expired = false;
        if let Some(entry) = self.slots.get(key) {
            match &*entry {
                Slot::Ready { links, expires_at } if Instant::now() < *expires_at => {
                    return Some(links.clone());
                }
                Slot::Ready { .. } => expired = true,
                Slot::Pending(_) => return None,
            }
        }
        if expired {
            self.slots.remove_if(key, |_, slot| {
                matches!(slot, Slot::Ready { expires_at, .. } if Instant::now() >= *expires_at)
            });
        }

        if let Some(store) = &self.store {
            if let Ok(Some(links)) = store.get(key).await {
                return Some(links);
            }
        }
        None
    }

    async fn put(&self, key: PageId, links: LinkList, ttl: Duration) {
        if let Some(store) = &self.store {
            let _ = store.put(&key, &links).await;
        }
        let notify = match self.slots.get(&key) {
            Some(entry) => match &*entry {
                Slot::Pending(notify) => Some(notify.clone()),
                Slot::Ready { .. } => None,
            },
            None => None,
        };

        self.slots.insert(
            key,
            Slot::Ready {
                links,
                expires_at: Instant::now() + ttl,
            },
        );

        if let Some(notify) = notify {
            notify.notify_waiters();
        }
    }

    async fn fail(&self, key: &PageId) {
        if let Some((_, Slot::Pending(notify))) = self.slots.remove(key) {
            notify.notify_waiters();
        }
    }

    async fn claim(&self, key: &PageId) -> bool {
        use dashmap::mapref::entry::Entry;
        match self.slots.entry(key.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::Pending(Arc::new(Notify::new())));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    async fn wait_for(&self, key: &PageId) -> Option<LinkList> {
        let notify = match self.slots.get(key) {
            Some(entry) => match &*entry {
                Slot::Pending(notify) => Some(notify.clone()),
                Slot::Ready { links, expires_at } => {
                    return if Instant::now() < *expires_at {
                        Some(links.clone())
                    } else {
                        None
                    };
                }
            },
            None => None,
        };

        if let Some(notify) = notify {
            notify.notified().await;
        }
        self.get(key).await
    }
}
