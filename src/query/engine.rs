//! Query engine implementation
//!
//! Provides the read operations over a session:
//! - Actor listing and lookup by identity, birth year or role
//! - Distinct actors reached through films (year, country, director)
//! - Distinct directors reached through an actor's films
//! - Relation lookups replacing object back-references

use rusqlite::types::{ToSql, ToSqlOutput, Value};
use rusqlite::{named_params, Row};

use super::sql;
use crate::model::{Actor, ActorId, Director, DirectorId, Film, FilmId, Role};
use crate::storage::Session;
use crate::Result;

type NamedParams<'p> = &'p [(&'p str, &'p dyn ToSql)];

/// Read-only queries bound to a session
pub struct MovieQueries<'a> {
    session: &'a Session,
}

impl<'a> MovieQueries<'a> {
    /// Create a new query handle
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// All actors in ascending identity order
    pub fn actors_sorted_by_identity(&self) -> Result<Vec<Actor>> {
        self.fetch("actors_sorted_by_identity", sql::ACTORS_SORTED_BY_IDENTITY, &[], row_to_actor)
    }

    /// Actors whose identity equals `identity`
    pub fn actors_by_identity(&self, identity: &str) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_identity",
            sql::ACTORS_BY_IDENTITY,
            named_params! { ":identity": identity },
            row_to_actor,
        )
    }

    /// Actors born in `year`. Actors with no known birthdate never match.
    pub fn actors_by_birth_year(&self, year: i32) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_birth_year",
            sql::ACTORS_BY_BIRTH_YEAR,
            named_params! { ":year": year },
            row_to_actor,
        )
    }

    /// Actors who played a character named `role`, once per matching role
    pub fn actors_by_role(&self, role: &str) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_role",
            sql::ACTORS_BY_ROLE,
            named_params! { ":role": role },
            row_to_actor,
        )
    }

    /// Distinct actors appearing in a film released in `year`
    pub fn actors_by_film_year(&self, year: i32) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_film_year",
            sql::ACTORS_BY_FILM_YEAR,
            named_params! { ":year": year },
            row_to_actor,
        )
    }

    /// Distinct actors appearing in a film produced in `country`
    pub fn actors_by_country(&self, country: &str) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_country",
            sql::ACTORS_BY_COUNTRY,
            named_params! { ":country": country },
            row_to_actor,
        )
    }

    /// Distinct actors appearing in a film produced in `country` and released in `year`
    pub fn actors_by_country_and_year(&self, country: &str, year: i32) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_country_and_year",
            sql::ACTORS_BY_COUNTRY_AND_YEAR,
            named_params! { ":country": country, ":year": year },
            row_to_actor,
        )
    }

    /// Distinct actors appearing in a film by `director` released between
    /// `start` and `end`, both inclusive. Empty when `start > end`.
    pub fn actors_by_director_between(
        &self,
        director: &str,
        start: i32,
        end: i32,
    ) -> Result<Vec<Actor>> {
        self.fetch(
            "actors_by_director_between",
            sql::ACTORS_BY_DIRECTOR_BETWEEN,
            named_params! { ":director": director, ":start": start, ":end": end },
            row_to_actor,
        )
    }

    /// Distinct directors of the films `actor` played in
    pub fn directors_for_actor(&self, actor: &str) -> Result<Vec<Director>> {
        self.fetch(
            "directors_for_actor",
            sql::DIRECTORS_FOR_ACTOR,
            named_params! { ":actor": actor },
            row_to_director,
        )
    }

    /// Get a film by id
    pub fn film(&self, id: FilmId) -> Result<Option<Film>> {
        let mut films =
            self.fetch("film", sql::FILM_BY_ID, named_params! { ":id": id }, row_to_film)?;
        Ok(films.pop())
    }

    /// Roles played by an actor, oldest film first
    pub fn roles_of_actor(&self, actor_id: ActorId) -> Result<Vec<Role>> {
        self.fetch(
            "roles_of_actor",
            sql::ROLES_OF_ACTOR,
            named_params! { ":actor_id": actor_id },
            row_to_role,
        )
    }

    /// Directors of a film
    pub fn directors_of_film(&self, film_id: FilmId) -> Result<Vec<Director>> {
        self.fetch(
            "directors_of_film",
            sql::DIRECTORS_OF_FILM,
            named_params! { ":film_id": film_id },
            row_to_director,
        )
    }

    /// Films by a director, oldest first
    pub fn films_of_director(&self, director_id: DirectorId) -> Result<Vec<Film>> {
        self.fetch(
            "films_of_director",
            sql::FILMS_OF_DIRECTOR,
            named_params! { ":director_id": director_id },
            row_to_film,
        )
    }

    fn fetch<T>(
        &self,
        name: &str,
        sql: &str,
        params: NamedParams<'_>,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = self.session.connection().prepare_cached(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<rusqlite::Result<Vec<T>>>()?;

        tracing::debug!(
            "{} ({}) returned {} rows",
            name,
            describe_params(params),
            rows.len()
        );
        Ok(rows)
    }
}

/// Render bound parameters as `:name=value` pairs for log output
fn describe_params(params: NamedParams<'_>) -> String {
    params
        .iter()
        .map(|(name, value)| {
            let value = match value.to_sql() {
                Ok(ToSqlOutput::Borrowed(v)) => describe_value(&Value::from(v)),
                Ok(ToSqlOutput::Owned(v)) => describe_value(&v),
                _ => "?".to_string(),
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => format!("{:?}", s),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

fn row_to_actor(row: &Row<'_>) -> rusqlite::Result<Actor> {
    Ok(Actor {
        id: row.get(0)?,
        identity: row.get(1)?,
        birthdate: row.get(2)?,
    })
}

fn row_to_director(row: &Row<'_>) -> rusqlite::Result<Director> {
    Ok(Director {
        id: row.get(0)?,
        identity: row.get(1)?,
    })
}

fn row_to_film(row: &Row<'_>) -> rusqlite::Result<Film> {
    Ok(Film {
        id: row.get(0)?,
        title: row.get(1)?,
        year: row.get(2)?,
        country: row.get(3)?,
    })
}

fn row_to_role(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get(0)?,
        name: row.get(1)?,
        actor_id: row.get(2)?,
        film_id: row.get(3)?,
    })
}
