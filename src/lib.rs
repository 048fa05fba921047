//! # movie-db - typed queries over a film database
//!
//! movie-db provides:
//! - Plain record types for actors, directors, films and roles
//! - SQLite-backed storage with a store/session split
//! - An idempotent fixture loader for `;`-delimited SQL scripts
//! - A fixed set of parametrized read queries across the schema
//! - An identity index mapping names to record ids

pub mod config;
pub mod fixture;
pub mod index;
pub mod model;
pub mod query;
pub mod storage;

use std::path::PathBuf;

// Re-exports for convenient access
pub use config::{MovieDbConfig, UnitConfig};
pub use fixture::LoadOutcome;
pub use index::IdentityIndex;
pub use model::{Actor, ActorId, Director, DirectorId, Film, FilmId, Role, RoleId};
pub use query::MovieQueries;
pub use storage::{Session, Store, StoreStats};

/// Result type alias for movie-db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for movie-db operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read fixture {}: {source}", .path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Fixture statement #{index} failed: {source}")]
    FixtureStatement {
        index: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Unknown configuration unit: {0}")]
    UnknownUnit(String),
}
