//! Timed status effects: stat buffs/debuffs and ailments.
//!
//! Each combatant owns one [`StatusTracker`]. The tracker is a keyed record
//! collection only; the numeric stat and health mutations it implies are
//! carried out by the combatant, which keeps all mutation primitives in one
//! place.

use std::collections::BTreeMap;

use crate::battle::stats::{StatDelta, StatKind};

/// Discriminant of an ailment, used as its tracker key. At most one ailment
/// of each kind is active at a time; re-application refreshes the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AilmentKind {
    Poison,
    Burn,
    Confusion,
    Stun,
}

impl AilmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poison => "poison",
            Self::Burn => "burn",
            Self::Confusion => "confusion",
            Self::Stun => "stun",
        }
    }
}

/// An ailment with its kind-specific payload. Poison scales with the
/// victim's max HP, burn is a flat per-turn amount, confusion and stun
/// track and expire without per-turn damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ailment {
    Poison { damage_percent: f64 },
    Burn { damage: i32 },
    Confusion,
    Stun,
}

impl Ailment {
    pub fn kind(&self) -> AilmentKind {
        match self {
            Self::Poison { .. } => AilmentKind::Poison,
            Self::Burn { .. } => AilmentKind::Burn,
            Self::Confusion => AilmentKind::Confusion,
            Self::Stun => AilmentKind::Stun,
        }
    }

    /// Damage this ailment deals on an end-of-turn tick, if any.
    pub fn tick_damage(&self, max_hp: i32) -> Option<i32> {
        match self {
            Self::Poison { damage_percent } => {
                Some(((max_hp as f64 * damage_percent) as i32).max(1))
            }
            Self::Burn { damage } => Some(*damage),
            Self::Confusion | Self::Stun => None,
        }
    }
}

/// Tracker key: one slot per stat for buffs/debuffs, one slot per ailment
/// kind. Re-application to an occupied slot refreshes, never stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EffectKey {
    Stat(StatKind),
    Ailment(AilmentKind),
}

/// One tracked effect. A modifier remembers the signed delta it applied so
/// expiry can reverse exactly that delta, which stays correct when several
/// effects overlap on the same combatant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusEffect {
    Modifier { delta: i32, remaining_turns: u32 },
    Afflicted { ailment: Ailment, remaining_turns: u32 },
}

impl StatusEffect {
    pub fn remaining_turns(&self) -> u32 {
        match self {
            Self::Modifier { remaining_turns, .. } | Self::Afflicted { remaining_turns, .. } => {
                *remaining_turns
            }
        }
    }
}

/// Outcome of registering a modifier or ailment: whether the slot was empty
/// (the caller must apply the numeric delta now) or already occupied (the
/// duration was refreshed and no delta may be re-applied).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    Applied,
    Refreshed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTracker {
    effects: BTreeMap<EffectKey, StatusEffect>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stat modifier. An occupied slot only has its duration
    /// refreshed; repeated casts never stack the delta.
    pub fn apply_modifier(&mut self, delta: StatDelta, duration: u32) -> Application {
        match self.effects.get_mut(&EffectKey::Stat(delta.stat)) {
            Some(StatusEffect::Modifier { remaining_turns, .. }) => {
                *remaining_turns = duration;
                Application::Refreshed
            }
            _ => {
                self.effects.insert(
                    EffectKey::Stat(delta.stat),
                    StatusEffect::Modifier {
                        delta: delta.amount,
                        remaining_turns: duration,
                    },
                );
                Application::Applied
            }
        }
    }

    /// Register an ailment, refreshing the duration if the kind is already
    /// active.
    pub fn apply_ailment(&mut self, ailment: Ailment, duration: u32) -> Application {
        match self.effects.get_mut(&EffectKey::Ailment(ailment.kind())) {
            Some(StatusEffect::Afflicted { remaining_turns, .. }) => {
                *remaining_turns = duration;
                Application::Refreshed
            }
            _ => {
                self.effects.insert(
                    EffectKey::Ailment(ailment.kind()),
                    StatusEffect::Afflicted {
                        ailment,
                        remaining_turns: duration,
                    },
                );
                Application::Applied
            }
        }
    }

    /// Per-tick ailment damage, in key order. Resolved for every ailment
    /// before any duration countdown happens.
    pub fn ailment_damage(&self, max_hp: i32) -> Vec<(AilmentKind, i32)> {
        self.effects
            .values()
            .filter_map(|effect| match effect {
                StatusEffect::Afflicted { ailment, .. } => ailment
                    .tick_damage(max_hp)
                    .map(|damage| (ailment.kind(), damage)),
                StatusEffect::Modifier { .. } => None,
            })
            .collect()
    }

    /// Decrement every tracked effect and remove the ones that reached zero,
    /// returning them in key order so the caller can reverse modifier deltas
    /// and narrate expiries.
    pub fn count_down(&mut self) -> Vec<(EffectKey, StatusEffect)> {
        let mut expired = Vec::new();
        for (key, effect) in self.effects.iter_mut() {
            let remaining = match effect {
                StatusEffect::Modifier { remaining_turns, .. }
                | StatusEffect::Afflicted { remaining_turns, .. } => {
                    *remaining_turns = remaining_turns.saturating_sub(1);
                    *remaining_turns
                }
            };
            if remaining == 0 {
                expired.push((*key, *effect));
            }
        }
        for (key, _) in &expired {
            self.effects.remove(key);
        }
        expired
    }

    pub fn get(&self, key: EffectKey) -> Option<&StatusEffect> {
        self.effects.get(&key)
    }

    pub fn contains(&self, key: EffectKey) -> bool {
        self.effects.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}
