//! Shared test harness: fixture setup, per-test sessions, logging
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

use movie_db::{Session, Store};
use tempfile::TempDir;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const SAMPLE_FIXTURE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/resources/sample.sql");

/// Install a test-writer subscriber once per test binary. `RUST_LOG` overrides the level.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer())
            .with(filter)
            .try_init();
    });
}

/// A file-backed store in a temporary directory
pub struct TestDb {
    pub store: Store,
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn empty() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("movie_db.sqlite");
        let store = Store::open(&path).expect("open store");
        Self { store, path, _dir: dir }
    }

    /// Store with the sample fixture loaded
    pub fn sample() -> Self {
        let db = Self::empty();
        db.store
            .ensure_fixture(Path::new(SAMPLE_FIXTURE))
            .expect("load sample fixture");
        db
    }
}

/// Replace whatever database sits at `path` with a fresh load of `fixture`
pub fn rebuild_store(path: &Path, fixture: &Path) -> Store {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::info!("Removed stale database {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => panic!("remove {}: {e}", path.display()),
    }
    let store = Store::open(path).expect("open store");
    store.ensure_fixture(fixture).expect("load fixture");
    store
}

/// Open a session, run `f`, close the session. On panic the session is
/// released while unwinding.
pub fn with_session<T>(store: &Store, f: impl FnOnce(&Session) -> T) -> T {
    let session = store.open_session().expect("open session");
    let out = f(&session);
    session.close().expect("close session");
    out
}

pub fn identities<'a>(items: impl IntoIterator<Item = &'a movie_db::Actor>) -> Vec<&'a str> {
    items.into_iter().map(|a| a.identity.as_str()).collect()
}

pub fn director_identities<'a>(
    items: impl IntoIterator<Item = &'a movie_db::Director>,
) -> Vec<&'a str> {
    items.into_iter().map(|d| d.identity.as_str()).collect()
}

pub fn assert_unique(identities: &[&str]) {
    let mut sorted = identities.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), identities.len(), "duplicate identity in {identities:?}");
}
