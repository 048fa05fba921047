//! SQLite store and session handles
//!
//! A `Store` is the connection factory: opened once, it initializes the
//! schema and hands out `Session`s, each owning its own connection. The
//! store keeps one anchor connection for its whole lifetime so that a
//! shared-cache in-memory database outlives individual sessions.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, Transaction};

use super::schema;
use crate::config::UnitConfig;
use crate::fixture::{self, LoadOutcome};
use crate::query::MovieQueries;
use crate::Result;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the database lives
#[derive(Debug, Clone)]
enum Target {
    File(PathBuf),
    /// Shared-cache in-memory database, addressed by URI
    Memory(String),
}

impl Target {
    fn connect(&self) -> Result<Connection> {
        let conn = match self {
            Target::File(path) => Connection::open(path)?,
            Target::Memory(uri) => Connection::open_with_flags(
                uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?,
        };
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::File(path) => write!(f, "{}", path.display()),
            Target::Memory(uri) => write!(f, "{}", uri),
        }
    }
}

/// Connection factory for the film database
pub struct Store {
    target: Target,
    anchor: Connection,
}

impl Store {
    /// Open a database file (creates it and its parent directory if needed)
    pub fn open(path: &Path) -> Result<Self> {
        ensure_db_dir(path)?;
        Self::open_target(Target::File(path.to_path_buf()))
    }

    /// Open a fresh in-memory database private to this store
    pub fn open_in_memory() -> Result<Self> {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        let uri = format!(
            "file:movie_db_{}_{}?mode=memory&cache=shared",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        );
        Self::open_target(Target::Memory(uri))
    }

    /// Open the store described by a configuration unit
    pub fn open_unit(unit: &UnitConfig) -> Result<Self> {
        match unit.database_path() {
            Some(path) => Self::open(&path),
            None => Self::open_in_memory(),
        }
    }

    fn open_target(target: Target) -> Result<Self> {
        let anchor = target.connect()?;
        let store = Self { target, anchor };
        store.initialize_schema()?;
        tracing::info!("Opened store at {}", store.target);
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.anchor.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Open a new session with its own connection
    pub fn open_session(&self) -> Result<Session> {
        let conn = self.target.connect()?;
        tracing::trace!("Opened session on {}", self.target);
        Ok(Session { conn })
    }

    /// Load the fixture script at `path` unless the store already holds actors
    pub fn ensure_fixture(&self, path: &Path) -> Result<LoadOutcome> {
        let mut session = self.open_session()?;
        let outcome = fixture::load_fixture(&mut session, path)?;
        session.close()?;
        Ok(outcome)
    }

    /// Close the anchor connection. In-memory data is gone once every
    /// session is closed too.
    pub fn close(self) -> Result<()> {
        let location = self.target.to_string();
        self.anchor.close().map_err(|(_, e)| e)?;
        tracing::info!("Closed store at {}", location);
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("target", &self.target).finish()
    }
}

/// A unit of work against the store. Released on drop or via `close`.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Read queries bound to this session
    pub fn queries(&self) -> MovieQueries<'_> {
        MovieQueries::new(self)
    }

    /// Underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction; rolled back unless committed
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Whether any actor row exists
    pub fn has_actors(&self) -> Result<bool> {
        let exists: bool = self
            .conn
            .query_row("SELECT EXISTS(SELECT 1 FROM actor)", [], |row| row.get(0))?;
        Ok(exists)
    }

    /// Row counts of every table
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            actors: self.count("SELECT COUNT(*) FROM actor")?,
            directors: self.count("SELECT COUNT(*) FROM director")?,
            films: self.count("SELECT COUNT(*) FROM film")?,
            roles: self.count("SELECT COUNT(*) FROM role")?,
            film_directors: self.count("SELECT COUNT(*) FROM film_director")?,
        })
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Close the session's connection
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub actors: usize,
    pub directors: usize,
    pub films: usize,
    pub roles: usize,
    pub film_directors: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Actors: {}", self.actors)?;
        writeln!(f, "  Directors: {}", self.directors)?;
        writeln!(f, "  Films: {}", self.films)?;
        writeln!(f, "  Roles: {}", self.roles)?;
        writeln!(f, "  Film directors: {}", self.film_directors)
    }
}

fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = Store::open_in_memory().unwrap();
        let session = store.open_session().unwrap();

        assert!(!session.has_actors().unwrap());
        assert_eq!(session.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_sessions_share_in_memory_data() {
        let store = Store::open_in_memory().unwrap();

        let writer = store.open_session().unwrap();
        writer
            .connection()
            .execute("INSERT INTO actor (id, identity) VALUES (1, 'Brad Pitt')", [])
            .unwrap();
        writer.close().unwrap();

        let reader = store.open_session().unwrap();
        assert!(reader.has_actors().unwrap());
        assert_eq!(reader.stats().unwrap().actors, 1);
    }

    #[test]
    fn test_in_memory_stores_are_isolated() {
        let a = Store::open_in_memory().unwrap();
        let b = Store::open_in_memory().unwrap();

        a.open_session()
            .unwrap()
            .connection()
            .execute("INSERT INTO director (id, identity) VALUES (1, 'Ridley Scott')", [])
            .unwrap();

        assert_eq!(b.open_session().unwrap().stats().unwrap().directors, 0);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("movie_db.sqlite");

        let store = Store::open(&path).unwrap();
        store
            .open_session()
            .unwrap()
            .connection()
            .execute("INSERT INTO actor (id, identity) VALUES (1, 'Brad Pitt')", [])
            .unwrap();
        store.close().unwrap();

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.open_session().unwrap().stats().unwrap().actors, 1);
    }

    #[test]
    fn test_role_requires_existing_actor_and_film() {
        let store = Store::open_in_memory().unwrap();
        let session = store.open_session().unwrap();

        let result = session.connection().execute(
            "INSERT INTO role (id, name, actor_id, film_id) VALUES (1, 'Nobody', 42, 42)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_uncommitted_transaction_rolls_back() {
        let store = Store::open_in_memory().unwrap();
        let mut session = store.open_session().unwrap();

        {
            let tx = session.transaction().unwrap();
            tx.execute("INSERT INTO actor (id, identity) VALUES (1, 'Brad Pitt')", [])
                .unwrap();
        }

        assert!(!session.has_actors().unwrap());
    }
}
