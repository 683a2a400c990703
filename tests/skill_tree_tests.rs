use menagerie::battle::{
    Combatant, ExperienceCurve, LearnError, RewardProfile, ScriptedDice, StatBlock,
};
use menagerie::data::{tree_for, GrowthRates, Species};

fn wolf() -> Combatant {
    Combatant::new(
        "Wolf",
        Species::Wolf,
        StatBlock {
            max_hp: 110,
            max_mp: 40,
            physical_attack: 25,
            physical_defense: 14,
            magic_attack: 6,
            magic_defense: 10,
            speed: 20,
        },
        0.05,
        GrowthRates::default(),
        RewardProfile {
            experience: 25,
            gold: 18,
            scout_rate: 0.1,
        },
        ExperienceCurve::default(),
        tree_for(Species::Wolf),
    )
}

#[test]
fn learning_requires_unlocked_prerequisites() {
    let mut creature = wolf();
    creature.skill_points = 10;

    let err = creature.learn_skill("Bite").unwrap_err();
    assert_eq!(err, LearnError::PrerequisitesNotMet("Bite".to_string()));

    creature.learn_skill("Fleet Foot").expect("root is learnable");
    creature.learn_skill("Bite").expect("prerequisite now met");
}

#[test]
fn learning_requires_enough_skill_points() {
    let mut creature = wolf();
    creature.skill_points = 0;

    let err = creature.learn_skill("Fleet Foot").unwrap_err();
    assert_eq!(
        err,
        LearnError::InsufficientPoints {
            name: "Fleet Foot".to_string(),
            required: 1,
            available: 0,
        }
    );
}

#[test]
fn learning_deducts_exactly_the_point_cost() {
    let mut creature = wolf();
    creature.skill_points = 5;

    creature.learn_skill("Fleet Foot").expect("learnable");
    assert_eq!(creature.skill_points, 4);
    creature.learn_skill("Bite").expect("learnable");
    assert_eq!(creature.skill_points, 2);
}

#[test]
fn a_skill_cannot_be_learned_twice() {
    let mut creature = wolf();
    creature.skill_points = 10;
    creature.learn_skill("Fleet Foot").expect("learnable");

    let err = creature.learn_skill("Fleet Foot").unwrap_err();
    assert_eq!(err, LearnError::AlreadyUnlocked("Fleet Foot".to_string()));
    // the failed attempt spent nothing
    assert_eq!(creature.skill_points, 9);
}

#[test]
fn unknown_skills_are_rejected() {
    let mut creature = wolf();
    creature.skill_points = 10;
    let err = creature.learn_skill("Meteor").unwrap_err();
    assert_eq!(err, LearnError::UnknownSkill("Meteor".to_string()));
}

#[test]
fn rejected_learn_leaves_the_combatant_untouched() {
    let mut creature = wolf();
    creature.skill_points = 1;
    let snapshot = creature.clone();

    // Bite costs 2 and its prerequisite is locked; either check rejects
    assert!(creature.learn_skill("Bite").is_err());
    assert_eq!(creature, snapshot);
}

#[test]
fn learnable_lists_only_affordable_unlocked_frontier() {
    let mut creature = wolf();
    creature.skill_points = 1;

    let learnable: Vec<&str> = creature
        .tree
        .learnable(creature.skill_points)
        .iter()
        .map(|skill| skill.name)
        .collect();
    assert_eq!(learnable, vec!["Fleet Foot"]);

    creature.learn_skill("Fleet Foot").expect("learnable");
    let learnable = creature.tree.learnable(10);
    assert!(learnable.iter().any(|skill| skill.name == "Bite"));
    assert!(learnable.iter().all(|skill| skill.name != "Fleet Foot"));
}

#[test]
fn whole_tree_is_reachable_with_enough_points() {
    let mut creature = wolf();
    creature.skill_points = 100;
    for name in ["Fleet Foot", "Bite", "Pursuit", "Triple Fang", "Blood Scent", "Howl"] {
        creature.learn_skill(name).expect("tree order is learnable");
    }
    assert_eq!(creature.skills.len(), 6);
    assert!(creature.tree.learnable(100).is_empty());
}

#[test]
fn experience_requirement_grows_geometrically() {
    let creature = wolf();
    assert!((creature.next_level_requirement() - 10.0).abs() < 1e-9);

    let mut leveled = wolf();
    let mut dice = ScriptedDice::new(vec![0.0; 16]);
    leveled.gain_experience(10, &mut dice);
    assert_eq!(leveled.level, 2);
    assert!((leveled.next_level_requirement() - 15.0).abs() < 1e-9);
}

#[test]
fn level_up_applies_growth_restores_resources_and_grants_points() {
    let mut creature = wolf();
    creature.current_hp = 40;
    creature.current_mp = 5;

    // every jitter draw is 0.0, so each stat gains exactly +1 on top of
    // its growth multiplier
    let mut dice = ScriptedDice::new(vec![0.0; 8]);
    let lines = creature.gain_experience(10, &mut dice);

    assert_eq!(creature.level, 2);
    // floor(110 * 1.2) + 1
    assert_eq!(creature.base.max_hp, 133);
    // floor(25 * 1.1) + 1
    assert_eq!(creature.base.physical_attack, 28);
    assert_eq!(creature.current_hp, creature.current.max_hp);
    assert_eq!(creature.current_mp, creature.current.max_mp);
    assert_eq!(creature.skill_points, 30);
    assert!(lines.iter().any(|line| line.contains("grew to level 2")));
}

#[test]
fn surplus_experience_cascades_through_multiple_levels() {
    let mut creature = wolf();
    let mut dice = ScriptedDice::new(vec![0.0; 32]);
    // 10 for level 2, 15 for level 3, 3 left over
    creature.gain_experience(28, &mut dice);

    assert_eq!(creature.level, 3);
    assert!((creature.experience - 3.0).abs() < 1e-9);
    assert_eq!(creature.skill_points, 60);
}
