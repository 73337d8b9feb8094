//! NPC placement loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::NpcTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for NPC placements from RON files.
///
/// RON format: `Vec<NpcTemplate>`.
pub struct NpcLoader;

impl NpcLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<NpcTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<NpcTemplate>> {
        let npcs: Vec<NpcTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse NPC RON: {}", e))?;

        let mut ids = HashSet::new();
        let mut spots = HashSet::new();
        for npc in &npcs {
            if !ids.insert(npc.id.as_str()) {
                anyhow::bail!("Duplicate NPC id '{}'", npc.id);
            }
            if !spots.insert((npc.zone, npc.position)) {
                anyhow::bail!(
                    "NPC '{}' shares {} in {} with another NPC",
                    npc.id,
                    npc.position,
                    npc.zone
                );
            }
            if npc.lines.is_empty() {
                anyhow::bail!("NPC '{}' has no dialogue lines", npc.id);
            }
            if npc.grants.is_some() && npc.flag.is_none() {
                anyhow::bail!("NPC '{}' grants an item but sets no flag", npc.id);
            }
        }

        Ok(npcs)
    }
}
