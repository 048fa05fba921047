mod common;

use std::path::Path;

use common::{rebuild_store, with_session, TestDb, SAMPLE_FIXTURE};
use movie_db::config::{load_config, UnitConfig};
use movie_db::{Error, LoadOutcome, Store};

#[test]
fn test_first_load_runs_every_statement() {
    let db = TestDb::empty();
    let outcome = db.store.ensure_fixture(Path::new(SAMPLE_FIXTURE)).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { statements: 84, rows: 84 });
}

#[test]
fn test_second_load_does_not_duplicate_rows() {
    let db = TestDb::sample();
    let before = with_session(&db.store, |s| s.stats().unwrap());

    let outcome = db.store.ensure_fixture(Path::new(SAMPLE_FIXTURE)).unwrap();
    assert_eq!(outcome, LoadOutcome::AlreadyPopulated);

    let after = with_session(&db.store, |s| s.stats().unwrap());
    assert_eq!(before, after);
}

#[test]
fn test_reopened_store_keeps_fixture() {
    let db = TestDb::sample();
    let before = with_session(&db.store, |s| s.stats().unwrap());

    let reopened = Store::open(&db.path).unwrap();
    assert!(!reopened.ensure_fixture(Path::new(SAMPLE_FIXTURE)).unwrap().is_loaded());
    assert_eq!(with_session(&reopened, |s| s.stats().unwrap()), before);
    reopened.close().unwrap();
}

#[test]
fn test_unparsable_fixture_leaves_store_empty() {
    let db = TestDb::empty();
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.sql");
    std::fs::write(
        &broken,
        "INSERT INTO actor (id, identity) VALUES (1, 'Brad Pitt');
         INSERT INTO actor (id, identity) VALUES (2, 'Matt Damon);",
    )
    .unwrap();

    let err = db.store.ensure_fixture(&broken).unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err}");
    assert_eq!(with_session(&db.store, |s| s.stats().unwrap().actors), 0);
}

#[test]
fn test_rebuild_discards_database_from_other_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie_db.sqlite");
    let other = dir.path().join("other.sql");
    std::fs::write(&other, "INSERT INTO actor (id, identity) VALUES (1, 'Stale Person');").unwrap();

    let stale = Store::open(&path).unwrap();
    stale.ensure_fixture(&other).unwrap();
    stale.close().unwrap();

    let store = rebuild_store(&path, Path::new(SAMPLE_FIXTURE));
    with_session(&store, |s| {
        assert_eq!(s.stats().unwrap().actors, 16);
        assert!(s.queries().actors_by_identity("Stale Person").unwrap().is_empty());
    });
    store.close().unwrap();
}

#[test]
fn test_missing_fixture_is_fatal() {
    let db = TestDb::empty();
    let err = db.store.ensure_fixture(Path::new("no/such/data.sql")).unwrap_err();
    assert!(matches!(err, Error::FixtureRead { .. }), "{err}");
}

#[test]
fn test_in_memory_unit() {
    common::init_tracing();
    let store = Store::open_unit(&UnitConfig::in_memory()).unwrap();
    store.ensure_fixture(Path::new(SAMPLE_FIXTURE)).unwrap();

    let actors = with_session(&store, |s| s.queries().actors_by_role("Harley Quinn").unwrap());
    assert_eq!(actors.len(), 1);
    store.close().unwrap();
}

#[test]
fn test_configured_unit_end_to_end() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("resources")).unwrap();
    std::fs::copy(SAMPLE_FIXTURE, dir.path().join("resources/data.sql")).unwrap();
    let config_path = dir.path().join("movie_db.toml");
    std::fs::write(
        &config_path,
        r#"
        [units.movie_db]
        database = "db/movie_db.sqlite"
        fixture = "resources/data.sql"
        "#,
    )
    .unwrap();

    let config = load_config(Some(&config_path)).unwrap();
    let unit = config.unit("movie_db").unwrap();
    let store = Store::open_unit(unit).unwrap();
    let fixture = unit.fixture.as_deref().unwrap();

    assert!(store.ensure_fixture(fixture).unwrap().is_loaded());
    assert!(!store.ensure_fixture(fixture).unwrap().is_loaded());
    assert!(dir.path().join("db/movie_db.sqlite").exists());

    let directors = with_session(&store, |s| s.queries().directors_for_actor("Brad Pitt").unwrap());
    assert_eq!(directors.len(), 4);
    store.close().unwrap();
}
