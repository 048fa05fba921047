//! Database schema definitions

/// SQL to create the actor table
pub const CREATE_ACTOR_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS actor (
    id INTEGER PRIMARY KEY,
    identity TEXT NOT NULL,
    birthdate TEXT CHECK (birthdate IS date(birthdate))
)
"#;

/// SQL to create the director table
pub const CREATE_DIRECTOR_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS director (
    id INTEGER PRIMARY KEY,
    identity TEXT NOT NULL
)
"#;

/// SQL to create the film table
pub const CREATE_FILM_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS film (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    country TEXT NOT NULL
)
"#;

/// SQL to create the role table
/// Join entity between actor and film, carrying the character name
pub const CREATE_ROLE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS role (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    actor_id INTEGER NOT NULL REFERENCES actor(id),
    film_id INTEGER NOT NULL REFERENCES film(id)
)
"#;

/// SQL to create the film_director link table
pub const CREATE_FILM_DIRECTOR_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS film_director (
    film_id INTEGER NOT NULL REFERENCES film(id),
    director_id INTEGER NOT NULL REFERENCES director(id),
    PRIMARY KEY (film_id, director_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_actor_identity ON actor(identity)",
    "CREATE INDEX IF NOT EXISTS idx_director_identity ON director(identity)",
    "CREATE INDEX IF NOT EXISTS idx_film_year ON film(year)",
    "CREATE INDEX IF NOT EXISTS idx_film_country ON film(country)",
    "CREATE INDEX IF NOT EXISTS idx_role_name ON role(name)",
    "CREATE INDEX IF NOT EXISTS idx_role_actor ON role(actor_id)",
    "CREATE INDEX IF NOT EXISTS idx_role_film ON role(film_id)",
    "CREATE INDEX IF NOT EXISTS idx_film_director_director ON film_director(director_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_ACTOR_TABLE,
        CREATE_DIRECTOR_TABLE,
        CREATE_FILM_TABLE,
        CREATE_ROLE_TABLE,
        CREATE_FILM_DIRECTOR_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
