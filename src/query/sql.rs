//! Parametrized SQL for the query layer
//!
//! Every statement binds named parameters; none interpolate values.

/// All actors, ascending by identity
pub const ACTORS_SORTED_BY_IDENTITY: &str =
    "SELECT a.id, a.identity, a.birthdate FROM actor a ORDER BY a.identity";

/// `:identity`
pub const ACTORS_BY_IDENTITY: &str =
    "SELECT a.id, a.identity, a.birthdate FROM actor a WHERE a.identity = :identity";

/// `:year`
pub const ACTORS_BY_BIRTH_YEAR: &str = r#"
SELECT a.id, a.identity, a.birthdate
FROM actor a
WHERE CAST(strftime('%Y', a.birthdate) AS INTEGER) = :year
"#;

/// `:role`; one row per matching role
pub const ACTORS_BY_ROLE: &str = r#"
SELECT a.id, a.identity, a.birthdate
FROM actor a
JOIN role r ON r.actor_id = a.id
WHERE r.name = :role
"#;

/// `:year`
pub const ACTORS_BY_FILM_YEAR: &str = r#"
SELECT DISTINCT a.id, a.identity, a.birthdate
FROM actor a
JOIN role r ON r.actor_id = a.id
JOIN film f ON f.id = r.film_id
WHERE f.year = :year
ORDER BY a.identity
"#;

/// `:country`
pub const ACTORS_BY_COUNTRY: &str = r#"
SELECT DISTINCT a.id, a.identity, a.birthdate
FROM actor a
JOIN role r ON r.actor_id = a.id
JOIN film f ON f.id = r.film_id
WHERE f.country = :country
ORDER BY a.identity
"#;

/// `:country`, `:year`
pub const ACTORS_BY_COUNTRY_AND_YEAR: &str = r#"
SELECT DISTINCT a.id, a.identity, a.birthdate
FROM actor a
JOIN role r ON r.actor_id = a.id
JOIN film f ON f.id = r.film_id
WHERE f.country = :country AND f.year = :year
ORDER BY a.identity
"#;

/// `:director`, `:start`, `:end` (inclusive)
pub const ACTORS_BY_DIRECTOR_BETWEEN: &str = r#"
SELECT DISTINCT a.id, a.identity, a.birthdate
FROM actor a
JOIN role r ON r.actor_id = a.id
JOIN film f ON f.id = r.film_id
JOIN film_director fd ON fd.film_id = f.id
JOIN director d ON d.id = fd.director_id
WHERE d.identity = :director AND f.year BETWEEN :start AND :end
ORDER BY a.identity
"#;

/// `:actor`
pub const DIRECTORS_FOR_ACTOR: &str = r#"
SELECT DISTINCT d.id, d.identity
FROM director d
JOIN film_director fd ON fd.director_id = d.id
JOIN film f ON f.id = fd.film_id
JOIN role r ON r.film_id = f.id
JOIN actor a ON a.id = r.actor_id
WHERE a.identity = :actor
ORDER BY d.identity
"#;

/// `:id`
pub const FILM_BY_ID: &str = "SELECT f.id, f.title, f.year, f.country FROM film f WHERE f.id = :id";

/// `:actor_id`
pub const ROLES_OF_ACTOR: &str = r#"
SELECT r.id, r.name, r.actor_id, r.film_id
FROM role r
JOIN film f ON f.id = r.film_id
WHERE r.actor_id = :actor_id
ORDER BY f.year, r.id
"#;

/// `:film_id`
pub const DIRECTORS_OF_FILM: &str = r#"
SELECT d.id, d.identity
FROM director d
JOIN film_director fd ON fd.director_id = d.id
WHERE fd.film_id = :film_id
ORDER BY d.identity
"#;

/// `:director_id`
pub const FILMS_OF_DIRECTOR: &str = r#"
SELECT f.id, f.title, f.year, f.country
FROM film f
JOIN film_director fd ON fd.film_id = f.id
WHERE fd.director_id = :director_id
ORDER BY f.year, f.title
"#;

/// Every actor identity with its id, lowest id first
pub const ACTOR_IDENTITIES: &str = "SELECT id, identity FROM actor ORDER BY id";

/// Every director identity with its id, lowest id first
pub const DIRECTOR_IDENTITIES: &str = "SELECT id, identity FROM director ORDER BY id";

