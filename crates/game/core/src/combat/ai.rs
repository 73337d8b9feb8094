//! Enemy move selection.

use crate::env::Roller;
use crate::state::MoveType;

/// Uniform weights over the three moves.
const UNIFORM: [(MoveType, f64); 3] = [
    (MoveType::Rock, 1.0),
    (MoveType::Scissors, 1.0),
    (MoveType::Paper, 1.0),
];

/// Weight table for the enemy's next move.
///
/// The telegraphed move gets `telegraph_weight` (out of 10); the other two
/// split the remainder, each at least 1.
pub fn move_weights(telegraph: Option<MoveType>, telegraph_weight: f64) -> [(MoveType, f64); 3] {
    let Some(hinted) = telegraph else {
        return UNIFORM;
    };
    let other = ((10.0 - telegraph_weight) / 2.0).max(1.0);
    let [first, second] = hinted.others();
    [(hinted, telegraph_weight), (first, other), (second, other)]
}

pub fn pick_enemy_move(
    roller: &mut Roller<'_>,
    telegraph: Option<MoveType>,
    telegraph_weight: f64,
) -> MoveType {
    let weights = move_weights(telegraph, telegraph_weight);
    roller.pick_weighted(&weights).unwrap_or(MoveType::Rock)
}

/// Hint for the enemy's next move, drawn uniformly.
pub fn roll_telegraph(roller: &mut Roller<'_>) -> MoveType {
    roller.pick_weighted(&UNIFORM).unwrap_or(MoveType::Rock)
}
