//! Record types for the film database
//!
//! Four record kinds, linked by explicit ids rather than object references:
//! - `Actor`: a person, keyed by identity (full name)
//! - `Director`: a person directing films, keyed by identity
//! - `Film`: title, release year and production country
//! - `Role`: a character linking one actor to one film
//!
//! Directors and films are linked many-to-many through the `film_director`
//! table, which has no record type of its own.

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map($name)
            }
        }
    };
}

record_id!(
    /// Primary key of an `actor` row
    ActorId
);
record_id!(
    /// Primary key of a `director` row
    DirectorId
);
record_id!(
    /// Primary key of a `film` row
    FilmId
);
record_id!(
    /// Primary key of a `role` row
    RoleId
);

/// An actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Full display name, the lookup key used by every query
    pub identity: String,
    /// Unknown for some people in the dataset
    pub birthdate: Option<NaiveDate>,
}

/// A film director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub identity: String,
}

/// A film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    /// Release year
    pub year: i32,
    /// Production country
    pub country: String,
}

/// A character played by one actor in one film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Character name
    pub name: String,
    pub actor_id: ActorId,
    pub film_id: FilmId,
}

impl Actor {
    /// Year component of the birthdate, if known
    pub fn birth_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.birthdate.map(|d| d.year())
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.birthdate {
            Some(date) => write!(f, "{} ({})", self.identity, date),
            None => write!(f, "{}", self.identity),
        }
    }
}

impl std::fmt::Display for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identity)
    }
}

impl std::fmt::Display for Film {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.year, self.country)
    }
}
