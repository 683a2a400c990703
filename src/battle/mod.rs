pub mod combatant;
pub mod engine;
pub mod resolver;
pub mod rng;
pub mod skill;
pub mod stats;
pub mod status;
pub mod tamer;

pub use combatant::{Combatant, ExperienceCurve, RewardProfile};
pub use engine::{scout_success_chance, Battle, Outcome, Spoils, TurnReport};
pub use resolver::apply_skill_effects;
pub use rng::{Dice, Rng, ScriptedDice};
pub use skill::{
    DamageKind, Effect, LearnError, PassiveEffect, Skill, SkillKind, SkillNode, SkillTree,
};
pub use stats::{PassiveBonuses, StatBlock, StatDelta, StatKind};
pub use status::{
    Ailment, AilmentKind, Application, EffectKey, StatusEffect, StatusTracker,
};
pub use tamer::Tamer;
