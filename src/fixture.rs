//! Fixture loading
//!
//! A fixture is a SQL script of `;`-separated statements, usually INSERTs
//! against the schema in `storage::schema`. Loading is idempotent: when the
//! store already holds actors the script is not even read. Otherwise every
//! statement runs in order inside one transaction, so a failing statement
//! leaves the store empty.

use std::path::Path;

use crate::storage::Session;
use crate::{Error, Result};

/// What a fixture load did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Script executed and committed
    Loaded { statements: usize, rows: usize },
    /// Actors were already present; nothing was executed
    AlreadyPopulated,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Load the fixture script at `path` unless the store is already populated
pub fn load_fixture(session: &mut Session, path: &Path) -> Result<LoadOutcome> {
    if session.has_actors()? {
        tracing::info!("Store already populated, skipping fixture {}", path.display());
        return Ok(LoadOutcome::AlreadyPopulated);
    }

    let script = std::fs::read_to_string(path).map_err(|source| Error::FixtureRead {
        path: path.to_path_buf(),
        source,
    })?;
    run_script(session, &script, &path.display().to_string())
}

/// Same as [`load_fixture`] for a script already in memory
pub fn load_fixture_str(session: &mut Session, script: &str) -> Result<LoadOutcome> {
    if session.has_actors()? {
        tracing::info!("Store already populated, skipping inline fixture");
        return Ok(LoadOutcome::AlreadyPopulated);
    }
    run_script(session, script, "<inline>")
}

fn run_script(session: &mut Session, script: &str, source: &str) -> Result<LoadOutcome> {
    let statements = split_statements(script)?;
    tracing::debug!("Executing {} statements from {}", statements.len(), source);

    let tx = session.transaction()?;
    let mut rows = 0;
    for (i, stmt) in statements.iter().enumerate() {
        rows += tx.execute(stmt, []).map_err(|source| Error::FixtureStatement {
            index: i + 1,
            source,
        })?;
    }
    tx.commit()?;

    tracing::info!(
        "Loaded fixture {}: {} statements, {} rows",
        source,
        statements.len(),
        rows
    );
    Ok(LoadOutcome::Loaded {
        statements: statements.len(),
        rows,
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexer {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment,
}

/// Split a script into statements on `;`.
///
/// Semicolons inside string literals, quoted identifiers and comments do not
/// split. Empty and comment-only statements are dropped. An unterminated
/// literal or block comment is a parse error.
pub fn split_statements(script: &str) -> Result<Vec<&str>> {
    let mut statements = Vec::new();
    let mut state = Lexer::Code;
    let mut start = 0;
    let mut has_code = false;
    let mut line = 1;
    let mut opened_at = 0;

    let mut chars = script.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            Lexer::Code => match c {
                ';' => {
                    if has_code {
                        statements.push(script[start..i].trim());
                    }
                    start = i + 1;
                    has_code = false;
                }
                '\'' => {
                    state = Lexer::SingleQuoted;
                    opened_at = line;
                    has_code = true;
                }
                '"' => {
                    state = Lexer::DoubleQuoted;
                    opened_at = line;
                    has_code = true;
                }
                '-' if matches!(chars.peek(), Some((_, '-'))) => {
                    chars.next();
                    state = Lexer::LineComment;
                }
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    chars.next();
                    state = Lexer::BlockComment;
                    opened_at = line;
                }
                c if !c.is_whitespace() => has_code = true,
                _ => {}
            },
            // A doubled quote closes and immediately reopens, which is
            // exactly the escape rule.
            Lexer::SingleQuoted if c == '\'' => state = Lexer::Code,
            Lexer::DoubleQuoted if c == '"' => state = Lexer::Code,
            Lexer::LineComment if c == '\n' => state = Lexer::Code,
            Lexer::BlockComment if c == '*' && matches!(chars.peek(), Some((_, '/'))) => {
                chars.next();
                state = Lexer::Code;
            }
            _ => {}
        }
    }

    match state {
        Lexer::SingleQuoted => {
            return Err(Error::Parse(format!(
                "unterminated string literal starting on line {}",
                opened_at
            )));
        }
        Lexer::DoubleQuoted => {
            return Err(Error::Parse(format!(
                "unterminated quoted identifier starting on line {}",
                opened_at
            )));
        }
        Lexer::BlockComment => {
            return Err(Error::Parse(format!(
                "unterminated block comment starting on line {}",
                opened_at
            )));
        }
        Lexer::Code | Lexer::LineComment => {}
    }

    if has_code {
        statements.push(script[start..].trim());
    }
    Ok(statements)
}
