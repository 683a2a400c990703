//! Skill definitions and per-species skill trees.
//!
//! Every effect a skill can have is one case of a closed union; the resolver
//! matches exhaustively, so a new effect shape is a compile error until it is
//! handled everywhere. A skill carries an ordered list of effect shapes and
//! the resolver applies them in order.

use thiserror::Error;

use crate::battle::stats::{PassiveBonuses, StatDelta};
use crate::battle::status::Ailment;

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    Physical,
    Magic,
}

/// One effect shape of an active skill.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Damage {
        kind: DamageKind,
        multiplier: f64,
        hits: u32,
    },
    Heal {
        amount: i32,
    },
    SelfDamage {
        amount: i32,
    },
    /// Positive deltas raising the user's stats for `duration` turns.
    Buff {
        stats: Vec<StatDelta>,
        duration: u32,
    },
    /// Positive magnitudes lowering the target's stats for `duration` turns.
    Debuff {
        stats: Vec<StatDelta>,
        duration: u32,
    },
    /// One Bernoulli trial; on success a uniformly chosen candidate is
    /// registered on the target.
    Ailment {
        candidates: Vec<Ailment>,
        chance: f64,
        duration: u32,
    },
}

/// Standing effect of a learned passive skill.
#[derive(Debug, Clone, PartialEq)]
pub enum PassiveEffect {
    /// Heal the user for `ratio` of the total damage a skill's hit sequence
    /// dealt.
    LifeSteal { ratio: f64 },
    /// After the user attacks, a chance of one bonus plain physical hit.
    ExtraAttack { chance: f64 },
    /// Flat permanent stat bonuses applied once, when the skill is learned.
    StatBonus(PassiveBonuses),
    /// Fires once at battle start: buffs every living roster member.
    Leadership { stats: Vec<StatDelta>, duration: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillKind {
    Active { effects: Vec<Effect> },
    Passive { effects: Vec<PassiveEffect> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    pub description: &'static str,
    pub mp_cost: i32,
    pub point_cost: u32,
    pub kind: SkillKind,
}

impl Skill {
    pub fn active(
        name: &'static str,
        description: &'static str,
        mp_cost: i32,
        point_cost: u32,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            name,
            description,
            mp_cost,
            point_cost,
            kind: SkillKind::Active { effects },
        }
    }

    pub fn passive(
        name: &'static str,
        description: &'static str,
        point_cost: u32,
        effects: Vec<PassiveEffect>,
    ) -> Self {
        Self {
            name,
            description,
            mp_cost: 0,
            point_cost,
            kind: SkillKind::Passive { effects },
        }
    }

    pub fn is_passive(&self) -> bool {
        matches!(self.kind, SkillKind::Passive { .. })
    }

    pub fn active_effects(&self) -> &[Effect] {
        match &self.kind {
            SkillKind::Active { effects } => effects,
            SkillKind::Passive { .. } => &[],
        }
    }

    pub fn passive_effects(&self) -> &[PassiveEffect] {
        match &self.kind {
            SkillKind::Passive { effects } => effects,
            SkillKind::Active { .. } => &[],
        }
    }
}

/// Why a learn attempt was rejected. All checks run before any mutation, so
/// a rejection leaves the tree and the learner untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LearnError {
    #[error("no skill named '{0}' in this tree")]
    UnknownSkill(String),
    #[error("'{0}' is already learned")]
    AlreadyUnlocked(String),
    #[error("'{0}' still has locked prerequisites")]
    PrerequisitesNotMet(String),
    #[error("'{name}' needs {required} skill points (have {available})")]
    InsufficientPoints {
        name: String,
        required: u32,
        available: u32,
    },
}

/// One node of a species tree: a skill plus the names of the nodes that must
/// be unlocked first. Unlocking is monotonic.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    pub skill: Skill,
    pub prerequisites: Vec<&'static str>,
    pub unlocked: bool,
}

impl SkillNode {
    pub fn new(skill: Skill, prerequisites: Vec<&'static str>) -> Self {
        Self {
            skill,
            prerequisites,
            unlocked: false,
        }
    }
}

/// A species' acyclic prerequisite graph, keyed by skill name.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillTree {
    pub name: &'static str,
    nodes: BTreeMap<&'static str, SkillNode>,
}

impl SkillTree {
    pub fn new(name: &'static str, nodes: Vec<SkillNode>) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|node| (node.skill.name, node))
            .collect();
        Self { name, nodes }
    }

    pub fn node(&self, skill_name: &str) -> Option<&SkillNode> {
        self.nodes.get(skill_name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SkillNode> {
        self.nodes.values()
    }

    fn prerequisites_met(&self, node: &SkillNode) -> bool {
        node.prerequisites
            .iter()
            .all(|name| self.nodes.get(name).is_some_and(|prereq| prereq.unlocked))
    }

    /// Skills that could be learned right now with the given point balance.
    pub fn learnable(&self, available_points: u32) -> Vec<&Skill> {
        self.nodes
            .values()
            .filter(|node| {
                !node.unlocked
                    && self.prerequisites_met(node)
                    && node.skill.point_cost <= available_points
            })
            .map(|node| &node.skill)
            .collect()
    }

    /// Unlock a skill. Checks run to completion before the node is touched:
    /// a rejected learn mutates nothing.
    pub fn learn(&mut self, skill_name: &str, available_points: u32) -> Result<&Skill, LearnError> {
        let node = self
            .nodes
            .get(skill_name)
            .ok_or_else(|| LearnError::UnknownSkill(skill_name.to_string()))?;
        if node.unlocked {
            return Err(LearnError::AlreadyUnlocked(skill_name.to_string()));
        }
        if !self.prerequisites_met(node) {
            return Err(LearnError::PrerequisitesNotMet(skill_name.to_string()));
        }
        if node.skill.point_cost > available_points {
            return Err(LearnError::InsufficientPoints {
                name: skill_name.to_string(),
                required: node.skill.point_cost,
                available: available_points,
            });
        }

        match self.nodes.get_mut(skill_name) {
            Some(node) => {
                node.unlocked = true;
                Ok(&node.skill)
            }
            None => Err(LearnError::UnknownSkill(skill_name.to_string())),
        }
    }
}
