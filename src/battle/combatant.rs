//! The combatant entity: one creature with stats, resources, timed effects,
//! and progression. Everything here is a mutation primitive; turn policy
//! lives in the engine.

use crate::battle::rng::Dice;
use crate::battle::skill::{DamageKind, LearnError, PassiveEffect, Skill, SkillTree};
use crate::battle::stats::{PassiveBonuses, StatBlock, StatDelta, StatKind};
use crate::battle::status::{Ailment, AilmentKind, Application, EffectKey, StatusEffect, StatusTracker};
use crate::data::species::{GrowthRates, Species};

/// What defeating (or scouting) this combatant is worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardProfile {
    pub experience: u32,
    pub gold: u32,
    pub scout_rate: f64,
}

/// Geometric experience requirement: `base_requirement * ratio^(level-1)`.
/// Constructed fresh per combatant; never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceCurve {
    pub base_requirement: f64,
    pub ratio: f64,
    pub points_per_level: u32,
}

impl Default for ExperienceCurve {
    fn default() -> Self {
        Self {
            base_requirement: 10.0,
            ratio: 1.5,
            points_per_level: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub species: Species,
    /// Permanent stats, mutated only by growth and learned passives.
    pub base: StatBlock,
    /// Base plus the deltas of currently active timed effects.
    pub current: StatBlock,
    pub current_hp: i32,
    pub current_mp: i32,
    pub dodge_rate: f64,
    pub alive: bool,
    /// Halves the next incoming hit, then clears.
    pub guarding: bool,
    pub level: u32,
    pub experience: f64,
    pub skill_points: u32,
    pub skills: Vec<Skill>,
    pub tree: SkillTree,
    pub status: StatusTracker,
    pub growth: GrowthRates,
    pub curve: ExperienceCurve,
    pub reward: RewardProfile,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        species: Species,
        stats: StatBlock,
        dodge_rate: f64,
        growth: GrowthRates,
        reward: RewardProfile,
        curve: ExperienceCurve,
        tree: SkillTree,
    ) -> Self {
        Self {
            name: name.into(),
            species,
            base: stats,
            current: stats,
            current_hp: stats.max_hp,
            current_mp: stats.max_mp,
            dodge_rate,
            alive: true,
            guarding: false,
            level: 1,
            experience: 0.0,
            skill_points: 0,
            skills: Vec::new(),
            tree,
            status: StatusTracker::new(),
            growth,
            curve,
            reward,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn stat(&self, stat: StatKind) -> i32 {
        self.current.get(stat)
    }

    pub fn attack_stat(&self, kind: DamageKind) -> i32 {
        match kind {
            DamageKind::Physical => self.current.physical_attack,
            DamageKind::Magic => self.current.magic_attack,
        }
    }

    pub fn defense_stat(&self, kind: DamageKind) -> i32 {
        match kind {
            DamageKind::Physical => self.current.physical_defense,
            DamageKind::Magic => self.current.magic_defense,
        }
    }

    /// Reduce health, clamped at zero. Reaching zero faints the combatant;
    /// fainting never reverts except through [`Combatant::restore_full`].
    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp = (self.current_hp - amount).max(0);
        if self.current_hp == 0 {
            self.alive = false;
        }
    }

    /// Raise health, clamped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount).min(self.current.max_hp);
        self.current_hp - before
    }

    /// Deduct mana. The caller checks affordability first; a skill is
    /// rejected before any mutation when mana is short.
    pub fn spend_mana(&mut self, cost: i32) {
        self.current_mp = (self.current_mp - cost).max(0);
    }

    /// Full heal and revive. Used by the capture path and by level-ups.
    pub fn restore_full(&mut self) {
        self.current_hp = self.current.max_hp;
        self.current_mp = self.current.max_mp;
        self.alive = true;
    }

    // --- timed effects -----------------------------------------------------

    /// Apply a buff descriptor: each delta raises the live stat and is
    /// tracked for reversal. A stat already under a timed effect only has
    /// its duration refreshed.
    pub fn apply_buff(&mut self, deltas: &[StatDelta], duration: u32) -> Vec<String> {
        self.apply_modifiers(deltas, duration, 1)
    }

    /// Apply a debuff descriptor; magnitudes are positive and lower the stat.
    pub fn apply_debuff(&mut self, deltas: &[StatDelta], duration: u32) -> Vec<String> {
        self.apply_modifiers(deltas, duration, -1)
    }

    fn apply_modifiers(&mut self, deltas: &[StatDelta], duration: u32, sign: i32) -> Vec<String> {
        let mut lines = Vec::new();
        if duration == 0 {
            return lines;
        }
        for delta in deltas {
            let signed = StatDelta::new(delta.stat, delta.amount * sign);
            match self.status.apply_modifier(signed, duration) {
                Application::Applied => {
                    self.current.add(signed.stat, signed.amount);
                    if sign > 0 {
                        lines.push(format!(
                            "{}'s {} rose by {}!",
                            self.name, signed.stat, delta.amount
                        ));
                    } else {
                        lines.push(format!(
                            "{}'s {} fell by {}!",
                            self.name, signed.stat, delta.amount
                        ));
                    }
                }
                Application::Refreshed => {
                    lines.push(format!(
                        "The effect on {}'s {} was prolonged.",
                        self.name, signed.stat
                    ));
                }
            }
        }
        lines
    }

    /// Register an ailment that already passed its application trial.
    pub fn apply_ailment(&mut self, ailment: Ailment, duration: u32) -> Vec<String> {
        let mut lines = Vec::new();
        if duration == 0 {
            return lines;
        }
        match self.status.apply_ailment(ailment, duration) {
            Application::Applied => {
                lines.push(format!(
                    "{} is afflicted with {}!",
                    self.name,
                    ailment.kind().as_str()
                ));
            }
            Application::Refreshed => {
                lines.push(format!(
                    "{}'s {} was prolonged.",
                    self.name,
                    ailment.kind().as_str()
                ));
            }
        }
        lines
    }

    /// End-of-turn tick: ailment damage for every ailment first, then one
    /// countdown step for every tracked effect. Expired modifiers reverse
    /// their recorded delta; expired ailments narrate a recovery unless the
    /// combatant fainted from tick damage this very turn.
    pub fn tick_end_of_turn(&mut self) -> (Vec<String>, bool) {
        let mut lines = Vec::new();
        let mut fainted = false;

        for (kind, damage) in self.status.ailment_damage(self.current.max_hp) {
            self.take_damage(damage);
            match kind {
                AilmentKind::Poison => {
                    lines.push(format!("{} suffers {} poison damage!", self.name, damage))
                }
                AilmentKind::Burn => {
                    lines.push(format!("{} is seared for {} burn damage!", self.name, damage))
                }
                AilmentKind::Confusion | AilmentKind::Stun => {}
            }
            if !self.alive && !fainted {
                fainted = true;
                lines.push(format!("{} collapses from its wounds...", self.name));
            }
        }

        for (key, effect) in self.status.count_down() {
            match effect {
                StatusEffect::Modifier { delta, .. } => {
                    if let EffectKey::Stat(stat) = key {
                        self.current.add(stat, -delta);
                        self.current_hp = self.current_hp.min(self.current.max_hp);
                        self.current_mp = self.current_mp.min(self.current.max_mp);
                        if delta > 0 {
                            lines.push(format!("{}'s {} boost wore off.", self.name, stat));
                        } else {
                            lines.push(format!("{}'s {} recovered.", self.name, stat));
                        }
                    }
                }
                StatusEffect::Afflicted { ailment, .. } => {
                    if !fainted {
                        lines.push(format!(
                            "{} recovered from {}.",
                            self.name,
                            ailment.kind().as_str()
                        ));
                    }
                }
            }
        }

        (lines, fainted)
    }

    // --- skills ------------------------------------------------------------

    pub fn active_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(|skill| !skill.is_passive())
    }

    pub fn passive_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(|skill| skill.is_passive())
    }

    pub fn known_skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    /// Ratio of the first life-steal passive, if any is learned.
    pub fn life_steal_ratio(&self) -> Option<f64> {
        self.passive_skills()
            .flat_map(Skill::passive_effects)
            .find_map(|effect| match effect {
                PassiveEffect::LifeSteal { ratio } => Some(*ratio),
                _ => None,
            })
    }

    /// Chance of the first extra-attack passive, if any is learned.
    pub fn extra_attack_chance(&self) -> Option<f64> {
        self.passive_skills()
            .flat_map(Skill::passive_effects)
            .find_map(|effect| match effect {
                PassiveEffect::ExtraAttack { chance } => Some(*chance),
                _ => None,
            })
    }

    /// The leadership buff this combatant contributes at battle start.
    pub fn leadership(&self) -> Option<(&[StatDelta], u32)> {
        self.passive_skills()
            .flat_map(Skill::passive_effects)
            .find_map(|effect| match effect {
                PassiveEffect::Leadership { stats, duration } => {
                    Some((stats.as_slice(), *duration))
                }
                _ => None,
            })
    }

    /// Learn a skill from this combatant's tree, spending skill points.
    /// Passive flat bonuses take effect immediately and permanently.
    pub fn learn_skill(&mut self, skill_name: &str) -> Result<Vec<String>, LearnError> {
        let skill = self.tree.learn(skill_name, self.skill_points)?.clone();
        self.skill_points -= skill.point_cost;

        let mut lines = vec![format!("{} learned {}!", self.name, skill.name)];
        for effect in skill.passive_effects() {
            if let PassiveEffect::StatBonus(bonuses) = effect {
                lines.extend(self.apply_passive_bonuses(bonuses));
            }
        }
        self.skills.push(skill);
        Ok(lines)
    }

    fn apply_passive_bonuses(&mut self, bonuses: &PassiveBonuses) -> Vec<String> {
        let mut lines = Vec::new();
        for delta in bonuses.stat_deltas() {
            self.base.add(delta.stat, delta.amount);
            self.current.add(delta.stat, delta.amount);
            lines.push(format!("{} {:+}", delta.stat, delta.amount));
        }
        if bonuses.dodge_rate != 0.0 {
            self.dodge_rate += bonuses.dodge_rate;
            lines.push(format!("dodge rate {:+}%", (bonuses.dodge_rate * 100.0) as i32));
        }
        lines
    }

    // --- progression -------------------------------------------------------

    /// Experience needed to go from the current level to the next.
    pub fn next_level_requirement(&self) -> f64 {
        self.curve.base_requirement * self.curve.ratio.powi(self.level as i32 - 1)
    }

    /// Add experience and resolve any number of level-ups.
    pub fn gain_experience(&mut self, amount: u32, dice: &mut dyn Dice) -> Vec<String> {
        let mut lines = vec![format!("{} gained {} experience.", self.name, amount)];
        self.experience += f64::from(amount);
        while self.experience >= self.next_level_requirement() {
            self.experience -= self.next_level_requirement();
            lines.extend(self.level_up(dice));
        }
        lines
    }

    /// One level: every base stat grows by its species multiplier plus a
    /// small random bump, resources refill, skill points accrue.
    fn level_up(&mut self, dice: &mut dyn Dice) -> Vec<String> {
        self.level += 1;

        let growth = [
            (StatKind::MaxHp, self.growth.hp),
            (StatKind::MaxMp, self.growth.mp),
            (StatKind::PhysicalAttack, self.growth.physical_attack),
            (StatKind::PhysicalDefense, self.growth.physical_defense),
            (StatKind::MagicAttack, self.growth.magic_attack),
            (StatKind::MagicDefense, self.growth.magic_defense),
            (StatKind::Speed, self.growth.speed),
        ];
        for (stat, factor) in growth {
            let grown = (self.base.get(stat) as f64 * factor) as i32 + dice.roll_range(1, 3);
            self.base.set(stat, grown);
            self.current.set(stat, grown);
        }
        self.restore_full();
        self.skill_points += self.curve.points_per_level;

        vec![
            format!("{} grew to level {}!", self.name, self.level),
            format!(
                "{} gained {} skill points. (total: {})",
                self.name, self.curve.points_per_level, self.skill_points
            ),
        ]
    }
}
