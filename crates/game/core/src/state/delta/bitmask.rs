use bitflags::bitflags;

bitflags! {
    /// Top-level fields of a [`SessionState`](crate::state::SessionState) that changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SessionFields: u8 {
        const MODE       = 1 << 0;
        const PHASE      = 1 << 1;
        const ZONE       = 1 << 2;
        const MESSAGE    = 1 << 3;
        const TURN_TOKEN = 1 << 4;
        const NONCE      = 1 << 5;
    }
}

bitflags! {
    /// Tracks which fields of a [`PlayerState`](crate::state::PlayerState) changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct PlayerFields: u8 {
        const POSITION    = 1 << 0;
        const HP          = 1 << 1;
        const MAX_HP      = 1 << 2;
        const LEVEL       = 1 << 3;
        const EXP         = 1 << 4;
        const BONUSES     = 1 << 5;
        const EQUIPMENT   = 1 << 6;
    }
}

bitflags! {
    /// Tracks which fields of a [`CombatState`](crate::state::CombatState) changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CombatFields: u8 {
        const ENEMY     = 1 << 0;
        const ENEMY_HP  = 1 << 1;
        const MOVES     = 1 << 2;
        const OUTCOME   = 1 << 3;
        const TELEGRAPH = 1 << 4;
        const BURST     = 1 << 5;
        const VERDICT   = 1 << 6;
    }
}

bitflags! {
    /// Tracks which fields of a [`RunState`](crate::state::RunState) changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct RunFields: u8 {
        const DEFEATED     = 1 << 0;
        const KEY_ITEMS    = 1 << 1;
        const FLAGS        = 1 << 2;
        const STORY        = 1 << 3;
        const ENCOUNTERS   = 1 << 4;
        const FIELD_RETURN = 1 << 5;
        const DIALOGUE     = 1 << 6;
        const FIELD_BURST  = 1 << 7;
    }
}
