//! In-memory oracles for unit tests.
pub mod fixtures;
