//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - actor(id, identity, birthdate)
//! - director(id, identity)
//! - film(id, title, year, country)
//! - role(id, name, actor_id, film_id)
//! - film_director(film_id, director_id)

pub mod schema;
pub mod store;

pub use store::{Session, Store, StoreStats};
