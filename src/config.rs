//! Named configuration units
//!
//! A configuration file holds one table per unit:
//!
//! ```toml
//! [units.movie_db]
//! database = "target/movie_db.sqlite"
//! fixture = "tests/resources/data.sql"
//! ```
//!
//! `database = ":memory:"` selects a private in-memory store. Relative paths
//! resolve against the directory of the configuration file.

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MovieDbConfig {
    #[serde(default)]
    pub units: BTreeMap<String, UnitConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UnitConfig {
    pub database: String,
    pub fixture: Option<PathBuf>,
}

impl MovieDbConfig {
    /// Look up a unit by name
    pub fn unit(&self, name: &str) -> Result<&UnitConfig> {
        self.units
            .get(name)
            .ok_or_else(|| Error::UnknownUnit(name.to_string()))
    }

    /// Make relative database and fixture paths relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for unit in self.units.values_mut() {
            unit.resolve_paths(base);
        }
    }
}

impl UnitConfig {
    pub fn in_memory() -> Self {
        Self {
            database: IN_MEMORY.to_string(),
            fixture: None,
        }
    }

    /// Database file, or `None` for an in-memory store
    pub fn database_path(&self) -> Option<PathBuf> {
        if self.database == IN_MEMORY {
            None
        } else {
            Some(PathBuf::from(&self.database))
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = self.database_path() {
            if path.is_relative() {
                self.database = base.join(path).to_string_lossy().into_owned();
            }
        }
        if let Some(fixture) = &self.fixture {
            if fixture.is_relative() {
                self.fixture = Some(base.join(fixture));
            }
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("movie_db.toml")
}

/// Read a configuration file, resolving relative paths against its directory
pub fn load_config(path: Option<&Path>) -> anyhow::Result<MovieDbConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config = parse_config(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;

    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<MovieDbConfig> {
    Ok(toml::from_str(contents)?)
}
