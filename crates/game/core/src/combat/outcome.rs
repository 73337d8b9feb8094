use crate::state::{MoveType, Outcome};

/// Rock beats scissors, scissors beats paper, paper beats rock.
pub fn resolve(player: MoveType, enemy: MoveType) -> Outcome {
    if player == enemy {
        Outcome::Draw
    } else if player.beats() == enemy {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}
