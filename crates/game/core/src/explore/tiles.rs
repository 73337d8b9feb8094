//! Effects of stepping onto a tile.

use crate::engine::CommandError;
use crate::env::{Oracles, TileKind};
use crate::state::{BURST_MAX, Position, SessionState, ZoneId};

use super::encounter::{available_enemies, roll_encounter, start_encounter};
use super::MoveReport;

pub const EXPLORING_MESSAGE: &str = "Exploring...";
pub const CLEARED_MESSAGE: &str = "All foes cleared.";

/// Applies the destination tile. Every rejection happens before any mutation.
pub(super) fn enter(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    destination: Position,
    tile: TileKind,
) -> Result<MoveReport, CommandError> {
    match tile {
        TileKind::Gate(zone) => enter_gate(state, oracles, zone),
        TileKind::Exit if !state.zone.is_overworld() => Ok(exit_to_field(state, oracles)),
        TileKind::Spring => {
            state.player.position = destination;
            state.player.heal_full();
            state.set_message("The spring restores your strength.");
            Ok(MoveReport::Healed {
                hp: state.player.hp,
            })
        }
        TileKind::Shrine => {
            state.player.position = destination;
            state.run.bank_burst(oracles.config.gauge_tile_gain);
            state.set_message(format!(
                "The shrine hums. Burst {}/{BURST_MAX}.",
                state.run.field_burst
            ));
            Ok(MoveReport::GaugeCharged {
                burst: state.run.field_burst,
            })
        }
        TileKind::Seal => pass_seal(state, oracles, destination),
        _ => Ok(plain_step(state, oracles, destination)),
    }
}

fn enter_gate(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    zone: ZoneId,
) -> Result<MoveReport, CommandError> {
    let gate = oracles.zones.gate(zone).ok_or(CommandError::Blocked)?;
    if let Some(key) = &gate.required_key
        && !state.run.has_key_item(key)
    {
        return Err(CommandError::GateLocked {
            message: gate.rejection.clone(),
        });
    }
    if !oracles.zones.contains(zone, gate.entry) {
        return Err(CommandError::Blocked);
    }

    if state.zone.is_overworld() {
        state.run.field_return = state.player.position;
    }
    state.zone = zone;
    state.player.position = gate.entry;
    state.run.advance_story(gate.story_stage, &gate.quest);
    state.run.flags.set(zone.visited_flag());
    state.set_message(format!("Entered the {zone}."));

    Ok(MoveReport::ZoneChanged {
        zone,
        position: gate.entry,
    })
}

fn exit_to_field(state: &mut SessionState, oracles: &Oracles<'_>) -> MoveReport {
    let target = if oracles.zones.contains(ZoneId::Field, state.run.field_return) {
        state.run.field_return
    } else {
        oracles.config.spawn
    };
    state.zone = ZoneId::Field;
    state.player.position = target;
    state.set_message("Back on the field.");
    MoveReport::ZoneChanged {
        zone: ZoneId::Field,
        position: target,
    }
}

fn pass_seal(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    destination: Position,
) -> Result<MoveReport, CommandError> {
    let Some(seal) = oracles.zones.seal(state.zone, destination) else {
        return Ok(plain_step(state, oracles, destination));
    };
    if !state.run.has_key_item(&seal.required_key) {
        return Err(CommandError::SealLocked {
            message: seal.rejection.clone(),
        });
    }
    state.player.position = destination;
    state.set_message("The seal yields.");
    Ok(MoveReport::Moved {
        position: destination,
    })
}

/// A step with no tile effect. The only kind of step that may start a fight.
fn plain_step(state: &mut SessionState, oracles: &Oracles<'_>, destination: Position) -> MoveReport {
    state.player.position = destination;

    if let Some(index) = roll_encounter(state, oracles)
        && let Some((enemy, scale)) = start_encounter(state, oracles, index)
    {
        return MoveReport::Encounter { enemy, scale };
    }

    let cleared =
        state.zone.is_overworld() && available_enemies(oracles.roster, state).is_empty();
    state.set_message(if cleared {
        CLEARED_MESSAGE
    } else {
        EXPLORING_MESSAGE
    });
    MoveReport::Moved {
        position: destination,
    }
}
