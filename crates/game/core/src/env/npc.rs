use crate::state::{KeyItemId, NpcId, Position, ZoneId};

/// NPC placements. An NPC occupies its tile and blocks movement onto it.
pub trait NpcOracle: Send + Sync {
    fn npc_at(&self, zone: ZoneId, position: Position) -> Option<&NpcTemplate>;

    fn npcs(&self) -> &[NpcTemplate];
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcTemplate {
    pub id: NpcId,
    pub name: String,
    pub zone: ZoneId,
    pub position: Position,
    /// Spoken in order, one per bump, wrapping around.
    pub lines: Vec<String>,
    /// Key item handed over on the first conversation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub grants: Option<KeyItemId>,
    /// Event flag recording that the grant happened.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flag: Option<String>,
}

impl NpcTemplate {
    /// Line for the `count`-th conversation (zero-based).
    pub fn line(&self, count: usize) -> Option<&str> {
        if self.lines.is_empty() {
            return None;
        }
        self.lines.get(count % self.lines.len()).map(String::as_str)
    }
}
