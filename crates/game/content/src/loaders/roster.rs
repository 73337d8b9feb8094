//! Enemy roster and player character loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{CharacterTemplate, EnemyTemplate};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::tables::Roster;

/// Roster structure for RON files.
#[derive(Debug, Deserialize)]
struct RosterRon {
    player: CharacterTemplate,
    enemies: Vec<EnemyTemplate>,
}

/// Loader for the roster from RON files.
///
/// Enemy order is significant: it defines the encounter indices.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let data: RosterRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if data.enemies.is_empty() {
            anyhow::bail!("Roster must list at least one enemy");
        }
        let mut seen = HashSet::new();
        for enemy in &data.enemies {
            if !seen.insert(enemy.id.as_str()) {
                anyhow::bail!("Duplicate enemy id '{}'", enemy.id);
            }
            if enemy.base_hp == 0 {
                anyhow::bail!("Enemy '{}' has zero base HP", enemy.id);
            }
        }
        if data.player.base_hp == 0 {
            anyhow::bail!("Player character '{}' has zero base HP", data.player.id);
        }

        Ok(Roster {
            player: data.player,
            enemies: data.enemies,
        })
    }
}
