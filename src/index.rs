//! Identity index
//!
//! Maps identity strings to record ids so callers can go from a name to the
//! relation lookups in `MovieQueries` without re-querying by name.

use std::collections::HashMap;
use std::hash::Hash;

use rusqlite::types::FromSql;

use crate::model::{ActorId, DirectorId};
use crate::query::sql;
use crate::storage::Session;
use crate::Result;

/// Identity -> id maps for actors and directors
#[derive(Debug, Default)]
pub struct IdentityIndex {
    actors: HashMap<String, ActorId>,
    directors: HashMap<String, DirectorId>,
    ambiguous_actors: Vec<String>,
    ambiguous_directors: Vec<String>,
}

impl IdentityIndex {
    /// Read every actor and director identity from the session
    pub fn build(session: &Session) -> Result<Self> {
        let (actors, ambiguous_actors) =
            load_identities::<ActorId>(session, sql::ACTOR_IDENTITIES)?;
        let (directors, ambiguous_directors) =
            load_identities::<DirectorId>(session, sql::DIRECTOR_IDENTITIES)?;

        for identity in &ambiguous_actors {
            tracing::warn!("Actor identity {:?} is not unique, using lowest id", identity);
        }
        for identity in &ambiguous_directors {
            tracing::warn!("Director identity {:?} is not unique, using lowest id", identity);
        }
        tracing::debug!(
            "Indexed {} actors and {} directors",
            actors.len(),
            directors.len()
        );

        Ok(Self {
            actors,
            directors,
            ambiguous_actors,
            ambiguous_directors,
        })
    }

    pub fn actor(&self, identity: &str) -> Option<ActorId> {
        self.actors.get(identity).copied()
    }

    pub fn director(&self, identity: &str) -> Option<DirectorId> {
        self.directors.get(identity).copied()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn director_count(&self) -> usize {
        self.directors.len()
    }

    /// Actor identities shared by more than one row
    pub fn ambiguous_actors(&self) -> &[String] {
        &self.ambiguous_actors
    }

    /// Director identities shared by more than one row
    pub fn ambiguous_directors(&self) -> &[String] {
        &self.ambiguous_directors
    }
}

fn load_identities<Id>(session: &Session, sql: &str) -> Result<(HashMap<String, Id>, Vec<String>)>
where
    Id: FromSql + Copy + Eq + Hash,
{
    let mut stmt = session.connection().prepare(sql)?;
    let mut rows = stmt.query([])?;

    let mut ids = HashMap::new();
    let mut ambiguous = Vec::new();
    while let Some(row) = rows.next()? {
        let id: Id = row.get(0)?;
        let identity: String = row.get(1)?;
        if ids.contains_key(&identity) {
            if !ambiguous.contains(&identity) {
                ambiguous.push(identity);
            }
        } else {
            ids.insert(identity, id);
        }
    }
    Ok((ids, ambiguous))
}
