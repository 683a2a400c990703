use menagerie::battle::{
    Ailment, AilmentKind, Combatant, EffectKey, ExperienceCurve, PassiveBonuses, PassiveEffect,
    RewardProfile, Skill, StatBlock, StatDelta, StatKind,
};
use menagerie::data::{tree_for, GrowthRates, Species};

fn slime() -> Combatant {
    Combatant::new(
        "Slime",
        Species::Slime,
        StatBlock {
            max_hp: 100,
            max_mp: 30,
            physical_attack: 20,
            physical_defense: 15,
            magic_attack: 10,
            magic_defense: 12,
            speed: 10,
        },
        0.05,
        GrowthRates::default(),
        RewardProfile {
            experience: 15,
            gold: 10,
            scout_rate: 0.2,
        },
        ExperienceCurve::default(),
        tree_for(Species::Slime),
    )
}

#[test]
fn buff_raises_the_stat_and_expiry_reverses_it_exactly() {
    let mut creature = slime();
    let lines = creature.apply_buff(&[StatDelta::new(StatKind::PhysicalAttack, 5)], 2);

    assert_eq!(creature.current.physical_attack, 25);
    assert_eq!(creature.base.physical_attack, 20);
    assert!(lines[0].contains("rose by 5"));

    let (_, fainted) = creature.tick_end_of_turn();
    assert!(!fainted);
    assert_eq!(creature.current.physical_attack, 25);

    let (lines, _) = creature.tick_end_of_turn();
    assert_eq!(creature.current.physical_attack, 20);
    assert!(lines.iter().any(|line| line.contains("wore off")));
    assert!(creature.status.is_empty());
}

#[test]
fn reapplying_a_buff_refreshes_duration_without_stacking() {
    let mut creature = slime();
    creature.apply_buff(&[StatDelta::new(StatKind::PhysicalAttack, 5)], 2);
    let after_first = creature.current.physical_attack;

    creature.apply_buff(&[StatDelta::new(StatKind::PhysicalAttack, 5)], 3);
    assert_eq!(creature.current.physical_attack, after_first);

    // the refreshed duration holds for three ticks, not two
    creature.tick_end_of_turn();
    creature.tick_end_of_turn();
    assert_eq!(creature.current.physical_attack, 25);
    creature.tick_end_of_turn();
    assert_eq!(creature.current.physical_attack, 20);
}

#[test]
fn one_turn_effect_expires_on_its_first_tick() {
    let mut creature = slime();
    creature.apply_debuff(&[StatDelta::new(StatKind::Speed, 4)], 1);
    assert_eq!(creature.current.speed, 6);

    let (lines, _) = creature.tick_end_of_turn();
    assert_eq!(creature.current.speed, 10);
    assert!(lines.iter().any(|line| line.contains("recovered")));
}

#[test]
fn debuff_lowers_and_restores_with_additive_reversal() {
    let mut creature = slime();
    creature.apply_debuff(&[StatDelta::new(StatKind::PhysicalDefense, 5)], 2);
    assert_eq!(creature.current.physical_defense, 10);

    // a permanent bonus lands while the debuff is live
    creature.base.add(StatKind::PhysicalDefense, 3);
    creature.current.add(StatKind::PhysicalDefense, 3);

    creature.tick_end_of_turn();
    creature.tick_end_of_turn();

    // additive reversal returns exactly the debuff delta, keeping the
    // permanent bonus intact
    assert_eq!(creature.current.physical_defense, 18);
    assert_eq!(creature.base.physical_defense, 18);
}

#[test]
fn max_hp_buff_expiry_clamps_current_health() {
    let mut creature = slime();
    creature.apply_buff(&[StatDelta::new(StatKind::MaxHp, 20)], 1);
    assert_eq!(creature.current.max_hp, 120);
    creature.heal(20);
    assert_eq!(creature.current_hp, 120);

    creature.tick_end_of_turn();
    assert_eq!(creature.current.max_hp, 100);
    assert_eq!(creature.current_hp, 100);
}

#[test]
fn zero_duration_modifiers_are_no_ops() {
    let mut creature = slime();
    let lines = creature.apply_buff(&[StatDelta::new(StatKind::PhysicalAttack, 5)], 0);
    assert!(lines.is_empty());
    assert_eq!(creature.current.physical_attack, 20);
    assert!(creature.status.is_empty());
}

#[test]
fn poison_scales_with_max_health_and_floors_at_one() {
    let mut creature = slime();
    creature.apply_ailment(Ailment::Poison { damage_percent: 0.1 }, 3);

    let (lines, fainted) = creature.tick_end_of_turn();
    assert!(!fainted);
    assert_eq!(creature.current_hp, 90);
    assert!(lines.iter().any(|line| line.contains("10 poison damage")));

    // a tiny creature still takes at least 1
    let mut runt = slime();
    runt.base.max_hp = 5;
    runt.current.max_hp = 5;
    runt.current_hp = 5;
    runt.apply_ailment(Ailment::Poison { damage_percent: 0.1 }, 3);
    runt.tick_end_of_turn();
    assert_eq!(runt.current_hp, 4);
}

#[test]
fn burn_deals_its_flat_amount_each_tick() {
    let mut creature = slime();
    creature.apply_ailment(Ailment::Burn { damage: 5 }, 2);

    creature.tick_end_of_turn();
    assert_eq!(creature.current_hp, 95);
    creature.tick_end_of_turn();
    assert_eq!(creature.current_hp, 90);
    // expired after its second tick
    assert!(!creature.status.contains(EffectKey::Ailment(AilmentKind::Burn)));
}

#[test]
fn reapplying_an_ailment_refreshes_its_duration() {
    let mut creature = slime();
    let lines = creature.apply_ailment(Ailment::Burn { damage: 5 }, 1);
    assert!(lines[0].contains("afflicted with burn"));

    let lines = creature.apply_ailment(Ailment::Burn { damage: 5 }, 3);
    assert!(lines[0].contains("prolonged"));

    creature.tick_end_of_turn();
    assert!(creature.status.contains(EffectKey::Ailment(AilmentKind::Burn)));
}

#[test]
fn confusion_and_stun_track_without_tick_damage() {
    let mut creature = slime();
    creature.apply_ailment(Ailment::Confusion, 1);

    let (lines, fainted) = creature.tick_end_of_turn();
    assert!(!fainted);
    assert_eq!(creature.current_hp, 100);
    assert!(lines.iter().any(|line| line.contains("recovered from confusion")));
}

#[test]
fn faint_from_tick_damage_suppresses_the_cure_narration() {
    let mut creature = slime();
    creature.current_hp = 5;
    creature.apply_ailment(Ailment::Poison { damage_percent: 0.1 }, 1);

    let (lines, fainted) = creature.tick_end_of_turn();

    assert!(fainted);
    assert!(!creature.is_alive());
    assert_eq!(creature.current_hp, 0);
    assert!(lines.iter().any(|line| line.contains("collapses")));
    assert!(lines.iter().all(|line| !line.contains("recovered from poison")));
    assert!(creature.status.is_empty());
}

#[test]
fn ailment_damage_resolves_before_any_effect_counts_down() {
    // a 1-turn buff and a lethal 1-turn poison expire on the same tick: the
    // poison kill happens first, and the buff still reverses cleanly
    let mut creature = slime();
    creature.current_hp = 5;
    creature.apply_buff(&[StatDelta::new(StatKind::PhysicalAttack, 5)], 1);
    creature.apply_ailment(Ailment::Poison { damage_percent: 0.1 }, 1);

    let (lines, fainted) = creature.tick_end_of_turn();

    assert!(fainted);
    assert_eq!(creature.current.physical_attack, 20);
    assert!(lines.iter().any(|line| line.contains("wore off")));
}

#[test]
fn learning_a_passive_raises_base_and_current_together() {
    let mut creature = slime();
    creature.skill_points = 1;
    let lines = creature.learn_skill("Jelly Body").expect("learnable");

    assert_eq!(creature.base.physical_defense, 20);
    assert_eq!(creature.current.physical_defense, 20);
    assert_eq!(creature.skill_points, 0);
    assert!(lines.iter().any(|line| line.contains("physical defense +5")));
}

#[test]
fn passive_dodge_bonus_moves_the_dodge_probability() {
    let mut creature = slime();
    creature.skills.push(Skill::passive(
        "Slippery",
        "test passive",
        0,
        vec![PassiveEffect::StatBonus(PassiveBonuses {
            dodge_rate: 0.1,
            ..PassiveBonuses::default()
        })],
    ));
    // pushing the skill directly does not apply bonuses; learning does
    assert!((creature.dodge_rate - 0.05).abs() < 1e-12);

    let mut learner = slime();
    learner.skill_points = 3;
    learner.learn_skill("Jelly Body").expect("learnable");
    learner.learn_skill("Liquefy").expect("learnable");
    assert!((learner.dodge_rate - 0.15).abs() < 1e-12);
}
