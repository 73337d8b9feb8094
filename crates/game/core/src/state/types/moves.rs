use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

/// The three combat commands. Each beats exactly one other.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MoveType {
    Rock,
    Scissors,
    Paper,
}

impl MoveType {
    pub const ALL: [MoveType; 3] = [MoveType::Rock, MoveType::Scissors, MoveType::Paper];

    /// The move this one defeats.
    pub const fn beats(self) -> MoveType {
        match self {
            MoveType::Rock => MoveType::Scissors,
            MoveType::Scissors => MoveType::Paper,
            MoveType::Paper => MoveType::Rock,
        }
    }

    /// The move that defeats this one.
    pub const fn beaten_by(self) -> MoveType {
        match self {
            MoveType::Rock => MoveType::Paper,
            MoveType::Scissors => MoveType::Rock,
            MoveType::Paper => MoveType::Scissors,
        }
    }

    /// The two moves other than `self`, in canonical order.
    pub fn others(self) -> [MoveType; 2] {
        match self {
            MoveType::Rock => [MoveType::Scissors, MoveType::Paper],
            MoveType::Scissors => [MoveType::Rock, MoveType::Paper],
            MoveType::Paper => [MoveType::Rock, MoveType::Scissors],
        }
    }
}

/// Result of a clash from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

/// One integer per move type (attack or defense values).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTriple {
    pub rock: i32,
    pub scissors: i32,
    pub paper: i32,
}

impl StatTriple {
    pub const ZERO: Self = Self::splat(0);

    pub const fn new(rock: i32, scissors: i32, paper: i32) -> Self {
        Self {
            rock,
            scissors,
            paper,
        }
    }

    pub const fn splat(value: i32) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, kind: MoveType) -> i32 {
        match kind {
            MoveType::Rock => self.rock,
            MoveType::Scissors => self.scissors,
            MoveType::Paper => self.paper,
        }
    }

    pub fn get_mut(&mut self, kind: MoveType) -> &mut i32 {
        match kind {
            MoveType::Rock => &mut self.rock,
            MoveType::Scissors => &mut self.scissors,
            MoveType::Paper => &mut self.paper,
        }
    }

    pub fn map(self, mut f: impl FnMut(i32) -> i32) -> Self {
        Self::new(f(self.rock), f(self.scissors), f(self.paper))
    }
}

impl Add for StatTriple {
    type Output = StatTriple;

    fn add(self, rhs: StatTriple) -> StatTriple {
        StatTriple::new(
            self.rock + rhs.rock,
            self.scissors + rhs.scissors,
            self.paper + rhs.paper,
        )
    }
}

impl AddAssign for StatTriple {
    fn add_assign(&mut self, rhs: StatTriple) {
        *self = *self + rhs;
    }
}

impl AddAssign<&PartialTriple> for StatTriple {
    fn add_assign(&mut self, rhs: &PartialTriple) {
        for (kind, delta) in rhs.iter() {
            *self.get_mut(kind) += delta;
        }
    }
}

/// Sparse per-move bonus. Absent move types contribute zero.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PartialTriple(BTreeMap<MoveType, i32>);

impl PartialTriple {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: MoveType, delta: i32) -> Self {
        self.0.insert(kind, delta);
        self
    }

    pub fn get(&self, kind: MoveType) -> i32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MoveType, i32)> + '_ {
        self.0.iter().map(|(kind, delta)| (*kind, *delta))
    }

    /// Expands to a dense triple.
    pub fn to_triple(&self) -> StatTriple {
        let mut triple = StatTriple::ZERO;
        triple += self;
        triple
    }
}

impl FromIterator<(MoveType, i32)> for PartialTriple {
    fn from_iter<I: IntoIterator<Item = (MoveType, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
