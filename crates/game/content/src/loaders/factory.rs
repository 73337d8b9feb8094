//! Content factory for building tables from data files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use game_core::{GameConfig, KeyItemId, NpcTemplate};

use crate::loaders::{
    ConfigLoader, ItemLoader, LoadResult, MapLoader, NpcLoader, RosterLoader,
};
use crate::tables::{Content, ItemCatalog, Roster, ZoneAtlas};

const BUILTIN_CONFIG: &str = include_str!("../../data/config.toml");
const BUILTIN_ROSTER: &str = include_str!("../../data/roster.ron");
const BUILTIN_ITEMS: &str = include_str!("../../data/items.ron");
const BUILTIN_NPCS: &str = include_str!("../../data/npcs.ron");
const BUILTIN_ZONES: &str = include_str!("../../data/zones.ron");

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── roster.ron
/// ├── items.ron
/// ├── npcs.ron
/// └── zones.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Parses the tables compiled into the crate.
    pub fn builtin() -> LoadResult<Content> {
        let content = Content {
            config: ConfigLoader::parse(BUILTIN_CONFIG)?,
            roster: RosterLoader::parse(BUILTIN_ROSTER)?,
            items: ItemLoader::parse(BUILTIN_ITEMS)?,
            npcs: NpcLoader::parse(BUILTIN_NPCS)?,
            zones: MapLoader::parse(BUILTIN_ZONES)?,
        };
        validate(&content)?;
        Ok(content)
    }

    /// Load session tuning from `config.toml`. A missing file means defaults.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the player character and enemy roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load equipment and key items from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load NPC placements from `npcs.ron`.
    pub fn load_npcs(&self) -> LoadResult<Vec<NpcTemplate>> {
        NpcLoader::load(&self.data_dir.join("npcs.ron"))
    }

    /// Load zone grids and passage rules from `zones.ron`.
    pub fn load_zones(&self) -> LoadResult<ZoneAtlas> {
        MapLoader::load(&self.data_dir.join("zones.ron"))
    }

    /// Load every table and check the references between them.
    pub fn load_all(&self) -> LoadResult<Content> {
        let content = Content {
            config: self.load_config()?,
            roster: self.load_roster()?,
            items: self.load_items()?,
            npcs: self.load_npcs()?,
            zones: self.load_zones()?,
        };
        validate(&content)?;
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Cross-table checks: key item references resolve, placements are in bounds.
fn validate(content: &Content) -> LoadResult<()> {
    let key_items: HashSet<&KeyItemId> = content.items.key_items.iter().map(|k| &k.id).collect();
    let known = |id: &KeyItemId, owner: &str| -> LoadResult<()> {
        if key_items.contains(id) {
            Ok(())
        } else {
            anyhow::bail!("{} refers to unknown key item '{}'", owner, id)
        }
    };

    for gate in &content.zones.gates {
        if let Some(key) = &gate.required_key {
            known(key, &format!("Gate into '{}'", gate.destination))?;
        }
    }
    for seal in &content.zones.seals {
        known(&seal.required_key, &format!("Seal at {}", seal.position))?;
    }
    for npc in &content.npcs {
        if let Some(key) = &npc.grants {
            known(key, &format!("NPC '{}'", npc.id))?;
        }
        let inside = content
            .zones
            .grid(npc.zone)
            .is_some_and(|grid| grid.dimensions().contains(npc.position));
        if !inside {
            anyhow::bail!("NPC '{}' stands outside '{}'", npc.id, npc.zone);
        }
    }

    let spawn = content.config.spawn;
    let spawn_tile = content
        .zones
        .grid(game_core::ZoneId::Field)
        .and_then(|grid| grid.tile(spawn));
    if !spawn_tile.is_some_and(|tile| tile.is_passable()) {
        anyhow::bail!("Spawn {} is not a walkable field tile", spawn);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Position, TileKind, ZoneId};
    use strum::IntoEnumIterator;

    fn shipped() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn builtin_matches_data_directory() {
        let builtin = ContentFactory::builtin().expect("builtin content");
        let loaded = shipped().load_all().expect("data dir content");
        assert_eq!(builtin, loaded);
    }

    #[test]
    fn shipped_roster_and_items() {
        let content = ContentFactory::builtin().expect("builtin content");

        let ids: Vec<_> = content.roster.enemies.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["kai", "shiro", "noct"]);
        assert_eq!(content.roster.player.id, "leo");
        assert_eq!(content.roster.player.base_hp, 100);
        assert_eq!(content.items.items.len(), 5);
        assert_eq!(content.items.key_items.len(), 3);
        assert_eq!(content.config, GameConfig::default());
    }

    #[test]
    fn shipped_zones_are_full_size_with_exits() {
        let content = ContentFactory::builtin().expect("builtin content");

        for zone in ZoneId::iter() {
            let grid = content.zones.grid(zone).expect("every zone has a grid");
            assert_eq!(grid.dimensions().width, 36, "{zone}");
            assert_eq!(grid.dimensions().height, 24, "{zone}");
            if zone.is_overworld() {
                continue;
            }
            assert_eq!(grid.find(TileKind::Exit).count(), 1, "{zone}");
            let field = content.zones.grid(ZoneId::Field).expect("field");
            assert_eq!(field.find(TileKind::Gate(zone)).count(), 1, "{zone}");
        }
    }

    #[test]
    fn shipped_gates_climb_the_story() {
        let content = ContentFactory::builtin().expect("builtin content");
        let stages: Vec<_> = [ZoneId::Town, ZoneId::Forest, ZoneId::Harbor, ZoneId::Ruins]
            .into_iter()
            .map(|zone| content.zones.gate(zone).expect("gate").story_stage)
            .collect();
        assert_eq!(stages, [1, 2, 3, 4]);
        assert!(content.zones.gate(ZoneId::Town).expect("town").required_key.is_none());
    }

    #[test]
    fn every_key_item_has_a_giver() {
        let content = ContentFactory::builtin().expect("builtin content");
        for key in &content.items.key_items {
            assert!(
                content.npcs.iter().any(|npc| npc.grants.as_ref() == Some(&key.id)),
                "{} is never granted",
                key.id
            );
        }
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let factory = ContentFactory::new("/nonexistent/trinity-data");
        assert_eq!(factory.load_config().expect("defaults"), GameConfig::default());
        assert!(factory.load_roster().is_err());
    }

    #[test]
    fn spawn_must_be_walkable() {
        let mut content = ContentFactory::builtin().expect("builtin content");
        content.config.spawn = Position::new(0, 0);
        let error = validate(&content).unwrap_err();
        assert!(error.to_string().contains("Spawn"));
    }
}
