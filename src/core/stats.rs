//! Ability scores and the point-buy allocation used at character creation.

use serde::{Deserialize, Serialize};

/// Points that must be spent across all five abilities before creation.
pub const TOTAL_STAT_POINTS: i32 = 8;
/// Lowest value an ability can be allocated.
pub const MIN_STAT: i32 = 1;
/// Highest value an ability can be allocated.
pub const MAX_STAT: i32 = 3;

/// The five fixed abilities, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Strength,
    Agility,
    Intelligence,
    Senses,
    Willpower,
}

impl StatKey {
    pub const ALL: [StatKey; 5] = [
        StatKey::Strength,
        StatKey::Agility,
        StatKey::Intelligence,
        StatKey::Senses,
        StatKey::Willpower,
    ];

    /// Wire identifier, as used in `stats` objects and `modifier_stat`.
    pub fn key(self) -> &'static str {
        match self {
            StatKey::Strength => "strength",
            StatKey::Agility => "agility",
            StatKey::Intelligence => "intelligence",
            StatKey::Senses => "senses",
            StatKey::Willpower => "willpower",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKey::Strength => "Strength",
            StatKey::Agility => "Agility",
            StatKey::Intelligence => "Intelligence",
            StatKey::Senses => "Senses",
            StatKey::Willpower => "Willpower",
        }
    }
}

/// Ability values as they travel over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub senses: i32,
    pub willpower: i32,
}

impl Stats {
    /// Every ability at the same value.
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            agility: value,
            intelligence: value,
            senses: value,
            willpower: value,
        }
    }

    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Strength => self.strength,
            StatKey::Agility => self.agility,
            StatKey::Intelligence => self.intelligence,
            StatKey::Senses => self.senses,
            StatKey::Willpower => self.willpower,
        }
    }

    fn get_mut(&mut self, key: StatKey) -> &mut i32 {
        match key {
            StatKey::Strength => &mut self.strength,
            StatKey::Agility => &mut self.agility,
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::Senses => &mut self.senses,
            StatKey::Willpower => &mut self.willpower,
        }
    }

    pub fn total(&self) -> i32 {
        StatKey::ALL.iter().map(|&k| self.get(k)).sum()
    }
}

/// Roll modifier the backend applies for an ability value.
pub fn modifier(value: i32) -> i32 {
    if value >= 3 {
        1
    } else if value >= 2 {
        0
    } else {
        -1
    }
}

/// Maximum HP the backend derives from a fresh allocation.
pub fn projected_max_hp(stats: &Stats) -> i32 {
    8 + stats.strength * 2
}

/// Maximum SP the backend derives from a fresh allocation.
pub fn projected_max_sp(stats: &Stats) -> i32 {
    3 + stats.willpower * 2
}

/// Creation-time draft allocation.
///
/// Every accepted operation keeps each ability within `[MIN_STAT, MAX_STAT]`
/// and the total at or below [`TOTAL_STAT_POINTS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatAllocation {
    stats: Stats,
}

impl StatAllocation {
    pub fn new() -> Self {
        Self {
            stats: Stats::uniform(MIN_STAT),
        }
    }

    pub fn value(&self, key: StatKey) -> i32 {
        self.stats.get(key)
    }

    pub fn remaining(&self) -> i32 {
        TOTAL_STAT_POINTS - self.stats.total()
    }

    pub fn can_increment(&self, key: StatKey) -> bool {
        self.value(key) < MAX_STAT && self.remaining() > 0
    }

    pub fn can_decrement(&self, key: StatKey) -> bool {
        self.value(key) > MIN_STAT
    }

    /// Returns `false` (and changes nothing) when the step is not allowed.
    pub fn increment(&mut self, key: StatKey) -> bool {
        if !self.can_increment(key) {
            return false;
        }
        *self.stats.get_mut(key) += 1;
        true
    }

    /// Returns `false` (and changes nothing) when the step is not allowed.
    pub fn decrement(&mut self, key: StatKey) -> bool {
        if !self.can_decrement(key) {
            return false;
        }
        *self.stats.get_mut(key) -= 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

impl Default for StatAllocation {
    fn default() -> Self {
        Self::new()
    }
}
