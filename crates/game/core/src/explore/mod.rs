//! Exploration engine.
//!
//! Validates single-step moves, dispatches tile effects and decides whether a
//! step starts combat. [`propose_move`] trusts the caller's passability and
//! tile lookup; [`step`] performs the lookups itself, including NPC bumps.
pub mod encounter;
pub mod equip;
mod tiles;

pub use encounter::{available_enemies, encounters_possible, roll_encounter, start_encounter};
pub use equip::{EquipChange, toggle_equip, unequip};
pub use tiles::{CLEARED_MESSAGE, EXPLORING_MESSAGE};

use crate::engine::CommandError;
use crate::env::{NpcTemplate, Oracles, TileKind};
use crate::state::{EnemyId, KeyItemId, Mode, NpcId, Position, SessionState, ZoneId};

/// A single-step move with the destination already looked up by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveProposal {
    pub dx: i32,
    pub dy: i32,
    pub passable: bool,
    /// Destination tile. `None` is a plain tile.
    pub tile: Option<TileKind>,
    /// Shown instead of "Blocked." when the move is refused, e.g. NPC dialogue.
    pub message_override: Option<String>,
}

impl MoveProposal {
    pub fn new(dx: i32, dy: i32, passable: bool, tile: Option<TileKind>) -> Self {
        Self {
            dx,
            dy,
            passable,
            tile,
            message_override: None,
        }
    }

    /// An unobstructed step onto a plain tile.
    pub fn plain(dx: i32, dy: i32) -> Self {
        Self::new(dx, dy, true, None)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message_override = Some(message.into());
        self
    }
}

/// What an accepted step did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveReport {
    Moved { position: Position },
    Encounter { enemy: EnemyId, scale: f64 },
    ZoneChanged { zone: ZoneId, position: Position },
    Healed { hp: u32 },
    GaugeCharged { burst: u32 },
    Talked {
        npc: NpcId,
        granted: Option<KeyItemId>,
    },
}

/// Validates and applies one step.
///
/// Refused moves leave the position unchanged. Out-of-bounds and blocked
/// moves are narrated through the returned [`CommandError`].
pub fn propose_move(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    proposal: MoveProposal,
) -> Result<MoveReport, CommandError> {
    let destination = destination(state, oracles, proposal.dx, proposal.dy)?;
    if !proposal.passable {
        return Err(match proposal.message_override {
            Some(line) => CommandError::NpcBlocking { line },
            None => CommandError::Blocked,
        });
    }
    tiles::enter(
        state,
        oracles,
        destination,
        proposal.tile.unwrap_or(TileKind::Grass),
    )
}

/// Looks up the destination tile and NPC, then moves.
///
/// Bumping into an NPC is an interaction rather than a refusal: the line is
/// narrated, the dialogue advances and a one-time key item may be handed over.
pub fn step(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    dx: i32,
    dy: i32,
) -> Result<MoveReport, CommandError> {
    let destination = destination(state, oracles, dx, dy)?;
    if let Some(npc) = oracles.npcs.npc_at(state.zone, destination) {
        return Ok(talk(state, oracles, npc));
    }
    let tile = oracles.zones.tile_or_sentinel(state.zone, destination);
    propose_move(
        state,
        oracles,
        MoveProposal::new(dx, dy, tile.is_passable(), Some(tile)),
    )
}

fn destination(
    state: &SessionState,
    oracles: &Oracles<'_>,
    dx: i32,
    dy: i32,
) -> Result<Position, CommandError> {
    if state.mode != Mode::Exploring {
        return Err(CommandError::NotExploring);
    }
    if dx == 0 && dy == 0 {
        return Err(CommandError::NoMovement);
    }
    let destination = state.player.position.offset(dx, dy);
    if !oracles.zones.contains(state.zone, destination) {
        return Err(CommandError::OutOfBounds);
    }
    Ok(destination)
}

fn talk(state: &mut SessionState, oracles: &Oracles<'_>, npc: &NpcTemplate) -> MoveReport {
    let spoken = state.run.dialogue.entry(npc.id.clone()).or_insert(0);
    let line = npc.line(*spoken).unwrap_or("...");
    *spoken += 1;
    let mut message = format!("{}: {}", npc.name, line);

    let mut granted = None;
    if let Some(key) = &npc.grants {
        let already = match &npc.flag {
            Some(flag) => state.run.flags.is_set(flag),
            None => state.run.has_key_item(key),
        };
        if !already {
            state.run.key_items.insert(key.clone());
            if let Some(flag) = &npc.flag {
                state.run.flags.set(flag.as_str());
            }
            let name = oracles
                .items
                .key_item(key)
                .map_or(key.as_str(), |item| item.name.as_str());
            message.push_str(&format!(" Received {name}."));
            granted = Some(key.clone());
        }
    }

    state.set_message(message);
    MoveReport::Talked {
        npc: npc.id.clone(),
        granted,
    }
}
