//! Query Layer - parametrized reads over the film schema

pub mod engine;
pub mod sql;

pub use engine::MovieQueries;
