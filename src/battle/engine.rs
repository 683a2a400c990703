//! The battle turn controller. One [`Battle`] lives for one encounter and
//! owns the tamer, the wild opponent, and the dice for its duration. Every
//! player intent is one synchronous method returning a [`TurnReport`]; the
//! presentation layer decides what to do with the narration and outcome.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::battle::combatant::Combatant;
use crate::battle::resolver::apply_skill_effects;
use crate::battle::rng::Dice;
use crate::battle::stats::StatDelta;
use crate::battle::tamer::Tamer;
use crate::data::config::EngineConfig;

/// How the encounter stands after a command. `Undecided` means the battle
/// continues; every other value is terminal except `SwitchNeeded`, which
/// demands a forced switch before anything else happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Undecided,
    Win,
    Lose,
    Escaped,
    Scouted,
    SwitchNeeded,
}

/// What one command produced. A rejected command (precondition failure)
/// reports `turn_consumed: false` and mutates nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub narration: Vec<String>,
    pub outcome: Outcome,
    pub turn_consumed: bool,
}

impl TurnReport {
    fn resolved(narration: Vec<String>, outcome: Outcome) -> Self {
        Self {
            narration,
            outcome,
            turn_consumed: true,
        }
    }

    fn rejected(line: String) -> Self {
        Self {
            narration: vec![line],
            outcome: Outcome::Undecided,
            turn_consumed: false,
        }
    }
}

/// Victory rewards, read off the defeated opponent's template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spoils {
    pub experience: u32,
    pub gold: u32,
}

/// Scout success probability. The base rate is amplified by how much health
/// the target is missing, capped at certainty.
pub fn scout_success_chance(
    scout_rate: f64,
    current_hp: i32,
    max_hp: i32,
    health_weight: f64,
) -> f64 {
    let missing = 1.0 - current_hp as f64 / max_hp as f64;
    (scout_rate * (1.0 + missing * health_weight)).min(1.0)
}

pub struct Battle {
    tamer: Tamer,
    active: usize,
    enemy: Combatant,
    participants: BTreeSet<usize>,
    config: EngineConfig,
    dice: Box<dyn Dice>,
    opening: Vec<String>,
}

impl Battle {
    /// Start an encounter. The first roster creature steps out, and every
    /// leadership passive on the roster fires once, buffing all living
    /// members including the leader. This is the only moment a non-active
    /// roster member is touched during combat.
    pub fn new(mut tamer: Tamer, enemy: Combatant, config: EngineConfig, dice: Box<dyn Dice>) -> Self {
        let rallies: Vec<(String, Vec<StatDelta>, u32)> = tamer
            .creatures
            .iter()
            .filter(|creature| creature.is_alive())
            .filter_map(|creature| {
                creature
                    .leadership()
                    .map(|(stats, duration)| (creature.name.clone(), stats.to_vec(), duration))
            })
            .collect();

        let mut opening = vec![format!("A wild {} appears!", enemy.name)];
        for (leader, stats, duration) in rallies {
            opening.push(format!("{leader}'s leadership rallies the pack!"));
            for creature in tamer.creatures.iter_mut() {
                if creature.is_alive() {
                    opening.extend(creature.apply_buff(&stats, duration));
                }
            }
        }

        let mut participants = BTreeSet::new();
        participants.insert(0);

        Self {
            tamer,
            active: 0,
            enemy,
            participants,
            config,
            dice,
            opening,
        }
    }

    /// Narration produced at construction (encounter opening, leadership).
    pub fn opening_narration(&self) -> &[String] {
        &self.opening
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Combatant {
        &self.tamer.creatures[self.active]
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn tamer(&self) -> &Tamer {
        &self.tamer
    }

    pub fn participants(&self) -> &BTreeSet<usize> {
        &self.participants
    }

    /// What winning this encounter is worth.
    pub fn spoils(&self) -> Spoils {
        Spoils {
            experience: self.enemy.reward.experience,
            gold: self.enemy.reward.gold,
        }
    }

    /// Dissolve the encounter and hand back the tamer and the opponent.
    /// After a scout success the caller typically restores the opponent and
    /// adds it to the roster.
    pub fn into_parts(self) -> (Tamer, Combatant) {
        (self.tamer, self.enemy)
    }

    /// Pay out victory rewards: gold to the tamer, experience to the whole
    /// roster. Returns the narration (experience gains, level-ups).
    pub fn award_spoils(&mut self) -> Vec<String> {
        let spoils = self.spoils();
        self.tamer.gain_gold(spoils.gold);
        let mut lines = vec![format!("Got {} gold!", spoils.gold)];
        for creature in self.tamer.creatures.iter_mut() {
            lines.extend(creature.gain_experience(spoils.experience, self.dice.as_mut()));
        }
        lines
    }

    // --- player commands ---------------------------------------------------

    /// Plain physical attack: `max(1, attack - floor(defense / 2))`, fully
    /// negated when the opponent's dodge trial succeeds.
    pub fn attack(&mut self) -> TurnReport {
        let user = &self.tamer.creatures[self.active];
        let user_name = user.name.clone();
        let damage = (user.current.physical_attack - self.enemy.current.physical_defense / 2).max(1);

        let mut narration = Vec::new();
        if self.dice.chance(self.enemy.dodge_rate) {
            narration.push(format!(
                "{} nimbly dodges {}'s attack!",
                self.enemy.name, user_name
            ));
        } else {
            self.enemy.take_damage(damage);
            narration.push(format!(
                "{} hits {} for {} damage!",
                user_name, self.enemy.name, damage
            ));
        }

        let mut outcome = self.evaluate_outcome();
        if outcome != Outcome::Win {
            outcome = self.follow_up_attack(&mut narration);
        }
        TurnReport::resolved(narration, outcome)
    }

    /// Brace: the next incoming hit is halved (minimum 1), then the flag
    /// clears.
    pub fn guard(&mut self) -> TurnReport {
        let user = &mut self.tamer.creatures[self.active];
        user.guarding = true;
        TurnReport::resolved(
            vec![format!("{} braces for the next blow.", user.name)],
            Outcome::Undecided,
        )
    }

    /// Attempt to recruit the opponent. Success ends the encounter with
    /// [`Outcome::Scouted`]; failure consumes the turn.
    pub fn scout(&mut self) -> TurnReport {
        let chance = scout_success_chance(
            self.enemy.reward.scout_rate,
            self.enemy.current_hp,
            self.enemy.current.max_hp,
            self.config.scout_health_weight,
        );
        if self.dice.chance(chance) {
            TurnReport::resolved(
                vec![format!(
                    "Scout succeeded! The wild {} wants to join you!",
                    self.enemy.name
                )],
                Outcome::Scouted,
            )
        } else {
            TurnReport::resolved(
                vec![format!("The wild {} stays wary...", self.enemy.name)],
                Outcome::Undecided,
            )
        }
    }

    /// Attempt to flee at the configured rate.
    pub fn escape(&mut self) -> TurnReport {
        if self.dice.chance(self.config.escape_rate) {
            TurnReport::resolved(
                vec!["You slipped away from the fight.".to_string()],
                Outcome::Escaped,
            )
        } else {
            TurnReport::resolved(vec!["Couldn't get away!".to_string()], Outcome::Undecided)
        }
    }

    /// Use a learned active skill. Unknown, passive, or unaffordable skills
    /// are rejected without consuming the turn or mutating anyone.
    pub fn use_skill(&mut self, skill_name: &str) -> TurnReport {
        let user = &self.tamer.creatures[self.active];
        let skill = match user.known_skill(skill_name) {
            Some(skill) => skill,
            None => {
                return TurnReport::rejected(format!(
                    "{} doesn't know {}.",
                    user.name, skill_name
                ))
            }
        };
        if skill.is_passive() {
            return TurnReport::rejected(format!("{} is a passive skill.", skill.name));
        }
        if user.current_mp < skill.mp_cost {
            return TurnReport::rejected(format!(
                "Not enough MP for {}. (needs {})",
                skill.name, skill.mp_cost
            ));
        }

        let skill = skill.clone();
        let user = &mut self.tamer.creatures[self.active];
        user.spend_mana(skill.mp_cost);
        let mut narration = vec![format!(
            "{} uses {}! (MP -{})",
            user.name, skill.name, skill.mp_cost
        )];
        narration.extend(apply_skill_effects(
            &mut self.tamer.creatures[self.active],
            &mut self.enemy,
            &skill,
            self.dice.as_mut(),
        ));

        let mut outcome = self.evaluate_outcome();
        if outcome != Outcome::Win {
            outcome = self.follow_up_attack(&mut narration);
        }
        TurnReport::resolved(narration, outcome)
    }

    /// Swap the active creature for a living reserve. Fainted targets are
    /// rejected without a state change.
    pub fn switch_to(&mut self, index: usize) -> TurnReport {
        if index >= self.tamer.creatures.len() {
            return TurnReport::rejected("There is no such creature in the roster.".to_string());
        }
        if index == self.active {
            return TurnReport::rejected(format!(
                "{} is already out front.",
                self.tamer.creatures[index].name
            ));
        }
        if !self.tamer.creatures[index].is_alive() {
            return TurnReport::rejected(format!(
                "{} is down and cannot fight.",
                self.tamer.creatures[index].name
            ));
        }

        let old_name = self.tamer.creatures[self.active].name.clone();
        self.active = index;
        self.participants.insert(index);
        TurnReport::resolved(
            vec![
                format!("{} falls back!", old_name),
                format!("{} leaps into battle!", self.tamer.creatures[index].name),
            ],
            Outcome::Undecided,
        )
    }

    // --- opponent + turn boundary ------------------------------------------

    /// The opponent's response: always a plain attack, mirrored formula.
    /// Guarding halves the incoming damage and is consumed even when the
    /// hit is then dodged.
    pub fn enemy_turn(&mut self) -> TurnReport {
        let active = &mut self.tamer.creatures[self.active];
        let mut damage =
            (self.enemy.current.physical_attack - active.current.physical_defense / 2).max(1);
        if active.guarding {
            damage = (damage / 2).max(1);
            active.guarding = false;
        }

        let mut narration = Vec::new();
        if self.dice.chance(active.dodge_rate) {
            narration.push(format!(
                "{} nimbly dodges {}'s attack!",
                active.name, self.enemy.name
            ));
        } else {
            let active_name = active.name.clone();
            active.take_damage(damage);
            narration.push(format!(
                "{} hits {} for {} damage!",
                self.enemy.name, active_name, damage
            ));
        }

        let outcome = self.evaluate_outcome();
        TurnReport::resolved(narration, outcome)
    }

    /// End-of-turn status resolution, in fixed order: the opponent ticks
    /// first (a tick kill is an immediate win), then the active creature.
    pub fn end_of_turn(&mut self) -> TurnReport {
        let mut narration = Vec::new();

        let (enemy_lines, enemy_fainted) = self.enemy.tick_end_of_turn();
        narration.extend(enemy_lines);
        if enemy_fainted {
            return TurnReport::resolved(narration, Outcome::Win);
        }

        let (active_lines, active_fainted) =
            self.tamer.creatures[self.active].tick_end_of_turn();
        narration.extend(active_lines);
        if active_fainted {
            return TurnReport::resolved(narration, self.downed_outcome());
        }

        TurnReport::resolved(narration, Outcome::Undecided)
    }

    // --- internals ---------------------------------------------------------

    /// After an ally attacks, an extra-attack passive may grant one bonus
    /// plain physical hit. Fires for both the Attack command and skill use,
    /// and can end the battle on its own.
    fn follow_up_attack(&mut self, narration: &mut Vec<String>) -> Outcome {
        let user = &self.tamer.creatures[self.active];
        if !user.is_alive() {
            return self.evaluate_outcome();
        }
        let chance = match user.extra_attack_chance() {
            Some(chance) => chance,
            None => return self.evaluate_outcome(),
        };
        if !self.dice.chance(chance) {
            return self.evaluate_outcome();
        }

        let user_name = user.name.clone();
        let damage = (user.current.physical_attack - self.enemy.current.physical_defense / 2).max(1);
        self.enemy.take_damage(damage);
        narration.push(format!("{}'s follow-up attack lashes out!", user_name));
        narration.push(format!(
            "{} hits {} for {} damage!",
            user_name, self.enemy.name, damage
        ));
        self.evaluate_outcome()
    }

    fn downed_outcome(&self) -> Outcome {
        if self.tamer.has_living_reserve(self.active) {
            Outcome::SwitchNeeded
        } else {
            Outcome::Lose
        }
    }

    /// Win takes precedence over the active creature going down.
    fn evaluate_outcome(&self) -> Outcome {
        if !self.enemy.is_alive() {
            Outcome::Win
        } else if !self.tamer.creatures[self.active].is_alive() {
            self.downed_outcome()
        } else {
            Outcome::Undecided
        }
    }
}
