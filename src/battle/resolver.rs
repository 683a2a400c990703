//! Skill effect resolution. Pure policy over combatant mutation primitives:
//! interprets each effect shape of a skill against the user and the target
//! and returns the narration, never printing.

use crate::battle::combatant::Combatant;
use crate::battle::rng::Dice;
use crate::battle::skill::{Effect, Skill};

/// Apply every effect shape of an active skill, in definition order.
/// Mana has already been paid by the turn controller.
pub fn apply_skill_effects(
    user: &mut Combatant,
    target: &mut Combatant,
    skill: &Skill,
    dice: &mut dyn Dice,
) -> Vec<String> {
    let mut lines = Vec::new();

    for effect in skill.active_effects() {
        match effect {
            Effect::Heal { amount } => {
                user.heal(*amount);
                lines.push(format!("{} recovers {} HP!", user.name, amount));
            }
            Effect::Damage {
                kind,
                multiplier,
                hits,
            } => {
                let base_attack = user.attack_stat(*kind);
                let defense = target.defense_stat(*kind);
                let mut total_damage = 0;

                for hit in 1..=*hits {
                    let raw_damage = (base_attack as f64 * multiplier) as i32;
                    let damage = (raw_damage - defense).max(1);
                    target.take_damage(damage);
                    total_damage += damage;

                    if *hits > 1 {
                        lines.push(format!(
                            "{} takes {} damage! (hit {}/{})",
                            target.name, damage, hit, hits
                        ));
                    } else {
                        lines.push(format!("{} takes {} damage!", target.name, damage));
                    }

                    // A multi-hit sequence stops once the target is down;
                    // damage already dealt still counts below.
                    if !target.is_alive() {
                        break;
                    }
                }

                if *hits > 1 && total_damage > 0 && target.is_alive() {
                    lines.push(format!("(total: {} damage)", total_damage));
                }

                if let Some(ratio) = user.life_steal_ratio() {
                    let drained = (total_damage as f64 * ratio) as i32;
                    if drained > 0 {
                        user.heal(drained);
                        lines.push(format!("{} drains {} HP!", user.name, drained));
                    }
                }
            }
            Effect::SelfDamage { amount } => {
                user.take_damage(*amount);
                lines.push(format!("{} takes {} recoil damage!", user.name, amount));
            }
            Effect::Buff { stats, duration } => {
                lines.extend(user.apply_buff(stats, *duration));
            }
            Effect::Debuff { stats, duration } => {
                lines.extend(target.apply_debuff(stats, *duration));
            }
            Effect::Ailment {
                candidates,
                chance,
                duration,
            } => {
                if candidates.is_empty() || *duration == 0 {
                    continue;
                }
                if dice.chance(*chance) {
                    let ailment = candidates[dice.pick(candidates.len())];
                    lines.extend(target.apply_ailment(ailment, *duration));
                } else {
                    lines.push(format!("{} resists the affliction.", target.name));
                }
            }
        }
    }

    lines
}
