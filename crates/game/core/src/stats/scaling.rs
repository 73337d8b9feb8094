//! Distance-based enemy scaling, fixed at encounter creation.

use crate::config::EncounterScaling;
use crate::env::EnemyTemplate;
use crate::state::{Position, StatTriple};

use super::loadout::Loadout;
use super::round_half_up;

/// `1 + min(distance / divisor, cap) * step`, measured from the spawn point.
pub fn encounter_scale(position: Position, spawn: Position, scaling: &EncounterScaling) -> f64 {
    let distance = position.distance_to(spawn);
    let reach = if scaling.distance_divisor > 0.0 {
        (distance / scaling.distance_divisor).min(scaling.distance_cap)
    } else {
        scaling.distance_cap
    };
    1.0 + reach.max(0.0) * scaling.step
}

/// Enemy stats after scaling. Every stat is rounded on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaledEnemy {
    pub max_hp: u32,
    pub loadout: Loadout,
}

pub fn scale_enemy(template: &EnemyTemplate, scale: f64) -> ScaledEnemy {
    let scale_stat = |value: i32| round_half_up(f64::from(value) * scale) as i32;
    let scale_triple = |triple: StatTriple| triple.map(scale_stat);

    let max_hp = round_half_up(f64::from(template.base_hp) * scale).max(1) as u32;

    ScaledEnemy {
        max_hp,
        loadout: Loadout::new(scale_triple(template.attack), scale_triple(template.defense)),
    }
}
