//! Static game content and its loaders.
//!
//! This crate houses the read-only reference tables a session consults:
//! - Enemy roster and player character (RON)
//! - Equipment and key items (RON)
//! - NPC placements and dialogue (RON)
//! - Zone grids with gate and seal rules (RON)
//! - Session tuning (TOML)
//!
//! Content is consumed by runtime oracles and never appears in session state.
//! The shipped tables are embedded so a binary runs without a data directory;
//! see [`ContentFactory::builtin`].

pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tables::{Content, ItemCatalog, Roster, ZoneAtlas, ZoneGrid};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemLoader, LoadResult, MapLoader, NpcLoader, RosterLoader,
};
