//! Static skill-tree registry: one builder per species variant, resolved at
//! spawn time. Trees are code rather than data so an effect shape that the
//! resolver does not handle cannot exist.

use crate::battle::skill::{DamageKind, Effect, PassiveEffect, Skill, SkillNode, SkillTree};
use crate::battle::stats::{PassiveBonuses, StatDelta, StatKind};
use crate::battle::status::Ailment;
use crate::data::species::Species;

/// The skill tree for a species. Every combatant gets its own copy with all
/// nodes locked.
pub fn tree_for(species: Species) -> SkillTree {
    match species {
        Species::Slime => slime_tree(),
        Species::Goblin => goblin_tree(),
        Species::Wolf => wolf_tree(),
        Species::Bat => bat_tree(),
    }
}

fn slime_tree() -> SkillTree {
    SkillTree::new(
        "Gel Arts",
        vec![
            SkillNode::new(
                Skill::passive(
                    "Jelly Body",
                    "Softens physical blows",
                    1,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        physical_defense: 5,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec![],
            ),
            SkillNode::new(
                Skill::passive(
                    "Liquefy",
                    "Chance to slip away from attacks",
                    2,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        dodge_rate: 0.1,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec!["Jelly Body"],
            ),
            SkillNode::new(
                Skill::active(
                    "Mend",
                    "Restores own HP",
                    10,
                    3,
                    vec![Effect::Heal { amount: 30 }],
                ),
                vec!["Liquefy"],
            ),
            SkillNode::new(
                Skill::active(
                    "Acid Spray",
                    "Corrosive spray that may poison",
                    15,
                    5,
                    vec![
                        Effect::Damage {
                            kind: DamageKind::Magic,
                            multiplier: 0.6,
                            hits: 1,
                        },
                        Effect::Ailment {
                            candidates: vec![Ailment::Poison {
                                damage_percent: 0.1,
                            }],
                            chance: 0.7,
                            duration: 3,
                        },
                    ],
                ),
                vec!["Mend"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Metal Body",
                    "Hardens at the cost of speed",
                    7,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        physical_defense: 15,
                        speed: -5,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec!["Liquefy"],
            ),
            SkillNode::new(
                Skill::active(
                    "Fusion",
                    "Briefly surges every combat stat",
                    30,
                    10,
                    vec![Effect::Buff {
                        stats: vec![
                            StatDelta::new(StatKind::PhysicalAttack, 10),
                            StatDelta::new(StatKind::PhysicalDefense, 10),
                            StatDelta::new(StatKind::Speed, 10),
                        ],
                        duration: 3,
                    }],
                ),
                vec!["Acid Spray", "Metal Body"],
            ),
        ],
    )
}

fn goblin_tree() -> SkillTree {
    SkillTree::new(
        "Goblin Cunning",
        vec![
            SkillNode::new(
                Skill::active(
                    "Knife Toss",
                    "Thrown blade",
                    5,
                    1,
                    vec![Effect::Damage {
                        kind: DamageKind::Physical,
                        multiplier: 1.2,
                        hits: 1,
                    }],
                ),
                vec![],
            ),
            SkillNode::new(
                Skill::active(
                    "Dirty Trick",
                    "May leave the foe reeling",
                    8,
                    2,
                    vec![Effect::Ailment {
                        candidates: vec![Ailment::Confusion, Ailment::Stun],
                        chance: 0.8,
                        duration: 2,
                    }],
                ),
                vec!["Knife Toss"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Pack Tactics",
                    "Chance of a follow-up attack",
                    3,
                    vec![PassiveEffect::ExtraAttack { chance: 0.3 }],
                ),
                vec!["Knife Toss"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Lurk",
                    "Moves unseen",
                    4,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        speed: 4,
                        dodge_rate: 0.05,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec!["Dirty Trick"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Leadership",
                    "Rallies the pack's attack at battle start",
                    5,
                    vec![PassiveEffect::Leadership {
                        stats: vec![StatDelta::new(StatKind::PhysicalAttack, 5)],
                        duration: 3,
                    }],
                ),
                vec!["Pack Tactics"],
            ),
            SkillNode::new(
                Skill::active(
                    "Reckless Charge",
                    "All-out slam that hurts the user too",
                    15,
                    7,
                    vec![
                        Effect::Damage {
                            kind: DamageKind::Physical,
                            multiplier: 2.0,
                            hits: 1,
                        },
                        Effect::SelfDamage { amount: 30 },
                    ],
                ),
                vec!["Lurk", "Leadership"],
            ),
        ],
    )
}

fn wolf_tree() -> SkillTree {
    SkillTree::new(
        "Wild Hunt",
        vec![
            SkillNode::new(
                Skill::passive(
                    "Fleet Foot",
                    "Faster on its feet",
                    1,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        speed: 5,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec![],
            ),
            SkillNode::new(
                Skill::active(
                    "Bite",
                    "Savage single bite",
                    5,
                    2,
                    vec![Effect::Damage {
                        kind: DamageKind::Physical,
                        multiplier: 1.2,
                        hits: 1,
                    }],
                ),
                vec!["Fleet Foot"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Pursuit",
                    "Chance of a follow-up attack",
                    3,
                    vec![PassiveEffect::ExtraAttack { chance: 0.3 }],
                ),
                vec!["Bite"],
            ),
            SkillNode::new(
                Skill::active(
                    "Triple Fang",
                    "Three rapid bites",
                    15,
                    5,
                    vec![Effect::Damage {
                        kind: DamageKind::Physical,
                        multiplier: 0.5,
                        hits: 3,
                    }],
                ),
                vec!["Pursuit"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Blood Scent",
                    "Sharper fangs",
                    4,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        physical_attack: 5,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec!["Bite"],
            ),
            SkillNode::new(
                Skill::active(
                    "Howl",
                    "A rousing howl that sharpens its attack",
                    20,
                    8,
                    vec![Effect::Buff {
                        stats: vec![StatDelta::new(StatKind::PhysicalAttack, 10)],
                        duration: 3,
                    }],
                ),
                vec!["Triple Fang", "Blood Scent"],
            ),
        ],
    )
}

fn bat_tree() -> SkillTree {
    SkillTree::new(
        "Night Wings",
        vec![
            SkillNode::new(
                Skill::active(
                    "Gust",
                    "Cutting blast of wind",
                    8,
                    1,
                    vec![Effect::Damage {
                        kind: DamageKind::Magic,
                        multiplier: 1.1,
                        hits: 1,
                    }],
                ),
                vec![],
            ),
            SkillNode::new(
                Skill::passive(
                    "Leech Fang",
                    "Drains a share of damage dealt",
                    2,
                    vec![PassiveEffect::LifeSteal { ratio: 0.2 }],
                ),
                vec!["Gust"],
            ),
            SkillNode::new(
                Skill::active(
                    "Screech",
                    "Rattles the foe's defenses",
                    10,
                    3,
                    vec![Effect::Debuff {
                        stats: vec![
                            StatDelta::new(StatKind::PhysicalDefense, 5),
                            StatDelta::new(StatKind::MagicDefense, 5),
                        ],
                        duration: 2,
                    }],
                ),
                vec!["Leech Fang"],
            ),
            SkillNode::new(
                Skill::active(
                    "Dark Mist",
                    "Shrouds the foe, sapping its offense",
                    12,
                    4,
                    vec![Effect::Debuff {
                        stats: vec![
                            StatDelta::new(StatKind::PhysicalAttack, 6),
                            StatDelta::new(StatKind::MagicAttack, 6),
                        ],
                        duration: 2,
                    }],
                ),
                vec!["Screech"],
            ),
            SkillNode::new(
                Skill::passive(
                    "Night Sense",
                    "Sees what others cannot",
                    5,
                    vec![PassiveEffect::StatBonus(PassiveBonuses {
                        speed: 10,
                        ..PassiveBonuses::default()
                    })],
                ),
                vec!["Leech Fang"],
            ),
            SkillNode::new(
                Skill::active(
                    "Sonic Storm",
                    "Piercing soundwave that may stun",
                    25,
                    8,
                    vec![
                        Effect::Damage {
                            kind: DamageKind::Magic,
                            multiplier: 1.5,
                            hits: 1,
                        },
                        Effect::Ailment {
                            candidates: vec![Ailment::Stun],
                            chance: 0.5,
                            duration: 2,
                        },
                    ],
                ),
                vec!["Dark Mist", "Night Sense"],
            ),
        ],
    )
}
