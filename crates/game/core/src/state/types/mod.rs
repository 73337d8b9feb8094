pub mod combat;
pub mod common;
pub mod moves;
pub mod player;
pub mod run;

pub use combat::{BURST_MAX, CombatPhase, CombatState, Mode, Verdict};
pub use common::{Difficulty, EnemyId, ItemId, KeyItemId, NpcId, Position, ZoneId};
pub use moves::{MoveType, Outcome, PartialTriple, StatTriple};
pub use player::{EquipSlots, PlayerState};
pub use run::{EventFlags, RunState};
