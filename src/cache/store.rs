//! Optional out-of-process backing store for the link cache.
//!
//! A [`LinkStore`] lets the in-memory cache survive process restarts and be
//! shared between engine instances. [`SqliteLinkStore`] is the one concrete
//! implementation, deliberately scoped to a single table — this is a cache,
//! not a crawl-graph database, so it carries none of the run/page/frontier
//! bookkeeping that a full crawl-persistence schema would need.

use crate::cache::LinkList;
use crate::page::PageId;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::Mutex;

/// Backing store for cached link lists, keyed by canonical page URL.
#[async_trait]
pub trait LinkStore: Send + Sync {
    async fn get(&self, key: &PageId) -> rusqlite::Result<Option<LinkList>>;
    async fn put(&self, key: &PageId, links: &LinkList) -> rusqlite::Result<()>;
}

/// A SQLite-backed [`LinkStore`].
///
/// `rusqlite::Connection` isn't `Sync`, so access is serialized behind a
/// `Mutex`; this store is meant for the occasional read-through/write-through
/// of a process-local cache, not as a high-throughput shared database.
pub struct SqliteLinkStore {
    conn: Mutex<Connection>,
}

impl SqliteLinkStore {
    pub fn open(path: &std::path::Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS link_cache (
                url TEXT PRIMARY KEY,
                links_json TEXT NOT NULL
            )",
            [],
        )?;
        Ok(SqliteLinkStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS link_cache (
                url TEXT PRIMARY KEY,
                links_json TEXT NOT NULL
            )",
            [],
        )?;
        Ok(SqliteLinkStore {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl LinkStore for SqliteLinkStore {
    async fn get(&self, key: &PageId) -> rusqlite::Result<Option<LinkList>> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let mut stmt = conn.prepare("SELECT links_json FROM link_cache WHERE url = ?1")?;
        let mut rows = stmt.query(rusqlite::params![key.as_str()])?;
        if let Some(row) = rows.next()? {
            let json: String = row.get(0)?;
            let urls: Vec<String> = serde_json::from_str(&json).unwrap_or_default();
            let links = urls
                .into_iter()
                .filter_map(|u| PageId::parse(&u).ok())
                .collect();
            Ok(Some(links))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, key: &PageId, links: &LinkList) -> rusqlite::Result<()> {
        let urls: Vec<&str> = links.iter().map(|p| p.as_str()).collect();
        let json = serde_json::to_string(&urls).unwrap_or_else(|_| "[]".to_string());
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        conn.execute(
            "INSERT INTO link_cache (url, links_json) VALUES (?1, ?2)
             ON CONFLICT(url) DO UPDATE SET links_json = excluded.links_json",
            rusqlite::params![key.as_str(), json],
        )?;
        Ok(())
    }
}
