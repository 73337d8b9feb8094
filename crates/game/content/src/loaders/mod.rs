//! Content loaders for reading game data from files.
//!
//! Every loader has a `load(path)` entry point for data directories and a
//! `parse(text)` entry point used for the embedded tables and in tests.

pub mod config;
pub mod factory;
pub mod item;
pub mod map;
pub mod npc;
pub mod roster;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use map::MapLoader;
pub use npc::NpcLoader;
pub use roster::RosterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
