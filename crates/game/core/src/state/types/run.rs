use std::collections::{BTreeMap, BTreeSet};

use super::combat::BURST_MAX;
use super::common::{EnemyId, KeyItemId, NpcId, Position};

/// Story flags with write-once semantics: once set, a flag stays set.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventFlags(BTreeMap<String, bool>);

impl EventFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a flag. Returns `true` if it was not already set.
    pub fn set(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.is_set(&name) {
            return false;
        }
        self.0.insert(name, true);
        true
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Run-level progress that survives individual encounters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    /// Enemies already defeated; excluded from random encounters.
    pub defeated: BTreeSet<EnemyId>,
    pub key_items: BTreeSet<KeyItemId>,
    pub flags: EventFlags,
    /// Monotonically non-decreasing story progress.
    pub story_stage: u32,
    pub quest: String,
    pub encounters_enabled: bool,
    /// Field coordinate restored when leaving a sub-zone.
    pub field_return: Position,
    /// Number of times each NPC has been spoken to.
    pub dialogue: BTreeMap<NpcId, usize>,
    /// Gauge banked on the field by shrines. The next encounter absorbs it.
    pub field_burst: u32,
}

impl RunState {
    pub fn new(field_return: Position, quest: impl Into<String>) -> Self {
        Self {
            defeated: BTreeSet::new(),
            key_items: BTreeSet::new(),
            flags: EventFlags::new(),
            story_stage: 0,
            quest: quest.into(),
            encounters_enabled: true,
            field_return,
            dialogue: BTreeMap::new(),
            field_burst: 0,
        }
    }

    pub fn has_key_item(&self, id: &KeyItemId) -> bool {
        self.key_items.contains(id)
    }

    /// Adds to the banked gauge, clamped to [`BURST_MAX`].
    pub fn bank_burst(&mut self, amount: u32) {
        self.field_burst = self.field_burst.saturating_add(amount).min(BURST_MAX);
    }

    /// Empties the banked gauge, returning what it held.
    pub fn take_field_burst(&mut self) -> u32 {
        std::mem::take(&mut self.field_burst)
    }

    /// Raises the story stage. Lower or equal stages are ignored.
    pub fn advance_story(&mut self, stage: u32, quest: &str) -> bool {
        if stage <= self.story_stage {
            return false;
        }
        self.story_stage = stage;
        self.quest = quest.to_owned();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_write_once() {
        let mut flags = EventFlags::new();
        assert!(flags.set("gotForestSigil"));
        assert!(!flags.set("gotForestSigil"));
        assert!(flags.is_set("gotForestSigil"));
        assert!(!flags.is_set("gotHarborPass"));
    }

    #[test]
    fn story_never_regresses() {
        let mut run = RunState::new(Position::ORIGIN, "start");
        assert!(run.advance_story(2, "forest"));
        assert!(!run.advance_story(1, "town"));
        assert_eq!(run.story_stage, 2);
        assert_eq!(run.quest, "forest");
    }

    #[test]
    fn banked_gauge_caps_and_empties() {
        let mut run = RunState::new(Position::ORIGIN, "start");
        run.bank_burst(70);
        run.bank_burst(70);
        assert_eq!(run.field_burst, BURST_MAX);
        assert_eq!(run.take_field_burst(), BURST_MAX);
        assert_eq!(run.field_burst, 0);
    }
}
