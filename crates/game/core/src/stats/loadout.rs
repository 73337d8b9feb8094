use crate::env::{CharacterTemplate, ItemOracle};
use crate::state::{MoveType, PlayerState, StatTriple};

/// Aggregated per-move attack and defense of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Loadout {
    pub attack: StatTriple,
    pub defense: StatTriple,
}

impl Loadout {
    pub const fn new(attack: StatTriple, defense: StatTriple) -> Self {
        Self { attack, defense }
    }

    pub fn attack(&self, kind: MoveType) -> i32 {
        self.attack.get(kind)
    }

    pub fn defense(&self, kind: MoveType) -> i32 {
        self.defense.get(kind)
    }
}

/// Character base + level-up bonuses + every equipped item.
///
/// Items contribute only the move types they define. Ids the oracle does not
/// know contribute nothing.
pub fn player_loadout(
    character: &CharacterTemplate,
    player: &PlayerState,
    items: &dyn ItemOracle,
) -> Loadout {
    let mut attack = character.attack + player.bonus_attack;
    let mut defense = character.defense + player.bonus_defense;

    for item in player.equipped.iter().filter_map(|id| items.item(id)) {
        attack += &item.attack;
        defense += &item.defense;
    }

    Loadout::new(attack, defense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RosterOracle;
    use crate::state::{ItemId, Position};
    use crate::testing::fixtures;

    #[test]
    fn base_character_without_gear() {
        let roster = fixtures::roster();
        let items = fixtures::items();
        let player = PlayerState::new(Position::ORIGIN, 100, 50);

        let loadout = player_loadout(roster.player_character(), &player, &items);
        assert_eq!(loadout.attack, StatTriple::new(8, 5, 6));
        assert_eq!(loadout.defense, StatTriple::new(6, 5, 6));
    }

    #[test]
    fn sums_bonuses_and_sparse_item_contributions() {
        let roster = fixtures::roster();
        let items = fixtures::items();
        let mut player = PlayerState::new(Position::ORIGIN, 100, 50);
        player.bonus_attack = StatTriple::splat(1);
        player.equipped.insert(ItemId::from("gu-bracer"));
        player.equipped.insert(ItemId::from("trinity-band"));
        player.equipped.insert(ItemId::from("missing"));

        let loadout = player_loadout(roster.player_character(), &player, &items);
        // base {8,5,6} + level {1,1,1} + bracer rock+4 + band all+2
        assert_eq!(loadout.attack, StatTriple::new(15, 8, 9));
        // base {6,5,6} + band all+1
        assert_eq!(loadout.defense, StatTriple::new(7, 6, 7));
    }
}
