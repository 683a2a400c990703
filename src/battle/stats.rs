//! Stat keys and stat blocks shared by combatants, timed effects, and passives.

use std::fmt;

/// The integer stats a timed effect or growth multiplier can address.
/// Dodge rate is deliberately absent: it is a probability, only moved by
/// permanent passive bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatKind {
    MaxHp,
    MaxMp,
    PhysicalAttack,
    PhysicalDefense,
    MagicAttack,
    MagicDefense,
    Speed,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxHp => "max HP",
            Self::MaxMp => "max MP",
            Self::PhysicalAttack => "physical attack",
            Self::PhysicalDefense => "physical defense",
            Self::MagicAttack => "magic attack",
            Self::MagicDefense => "magic defense",
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One signed stat adjustment inside a buff/debuff descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDelta {
    pub stat: StatKind,
    pub amount: i32,
}

impl StatDelta {
    pub const fn new(stat: StatKind, amount: i32) -> Self {
        Self { stat, amount }
    }
}

/// The seven integer stats of a combatant. Kept twice per combatant: a base
/// block (permanent, growth-mutated) and a current block (base plus active
/// effect deltas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatBlock {
    pub max_hp: i32,
    pub max_mp: i32,
    pub physical_attack: i32,
    pub physical_defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
}

impl StatBlock {
    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::MaxHp => self.max_hp,
            StatKind::MaxMp => self.max_mp,
            StatKind::PhysicalAttack => self.physical_attack,
            StatKind::PhysicalDefense => self.physical_defense,
            StatKind::MagicAttack => self.magic_attack,
            StatKind::MagicDefense => self.magic_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: StatKind, value: i32) {
        match stat {
            StatKind::MaxHp => self.max_hp = value,
            StatKind::MaxMp => self.max_mp = value,
            StatKind::PhysicalAttack => self.physical_attack = value,
            StatKind::PhysicalDefense => self.physical_defense = value,
            StatKind::MagicAttack => self.magic_attack = value,
            StatKind::MagicDefense => self.magic_defense = value,
            StatKind::Speed => self.speed = value,
        }
    }

    pub fn add(&mut self, stat: StatKind, delta: i32) {
        self.set(stat, self.get(stat) + delta);
    }
}

/// Flat permanent bonuses granted by learning a passive skill. Applied to
/// both the base and current blocks, plus the dodge probability.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PassiveBonuses {
    pub max_hp: i32,
    pub max_mp: i32,
    pub physical_attack: i32,
    pub physical_defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
    pub dodge_rate: f64,
}

impl PassiveBonuses {
    /// The integer-stat part as (stat, amount) pairs, skipping zeros.
    pub fn stat_deltas(&self) -> Vec<StatDelta> {
        let pairs = [
            (StatKind::MaxHp, self.max_hp),
            (StatKind::MaxMp, self.max_mp),
            (StatKind::PhysicalAttack, self.physical_attack),
            (StatKind::PhysicalDefense, self.physical_defense),
            (StatKind::MagicAttack, self.magic_attack),
            (StatKind::MagicDefense, self.magic_defense),
            (StatKind::Speed, self.speed),
        ];
        pairs
            .into_iter()
            .filter(|(_, amount)| *amount != 0)
            .map(|(stat, amount)| StatDelta::new(stat, amount))
            .collect()
    }
}
