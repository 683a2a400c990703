//! Command dispatch for the `menagerie` binary. The CLI is a thin
//! presentation layer: it spawns combatants from the data registry, drives
//! the battle engine with a fixed policy, and emits the collected turn
//! reports as JSON.

use serde::Serialize;

use crate::battle::engine::{Battle, Outcome, TurnReport};
use crate::battle::rng::Rng;
use crate::battle::tamer::Tamer;
use crate::data::registry::DataRegistry;
use crate::data::species::{Species, DEFAULT_SPECIES_PATH};
use crate::data::trees::tree_for;
use crate::data::validate::{validate_skill_trees, validate_species_dataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Validate,
    Trees,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("validate") => Some(Command::Validate),
        Some("trees") => Some(Command::Trees),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Trees) => handle_trees(args),
        None => {
            eprintln!("usage: menagerie <simulate|validate|trees>");
            2
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationTrace {
    seed: u64,
    opening: Vec<String>,
    turns: Vec<TurnReport>,
    result: Outcome,
    aftermath: Vec<String>,
}

fn handle_simulate(args: &[String]) -> i32 {
    let seed = match args.get(2) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("invalid seed '{raw}'");
                return 2;
            }
        },
        None => entropy_seed(),
    };

    let registry = match DataRegistry::load() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("data error: {err}");
            return 1;
        }
    };

    match run_simulation(&registry, seed) {
        Ok(trace) => match serde_json::to_string_pretty(&trace) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("serialization error: {err}");
                1
            }
        },
        Err(err) => {
            eprintln!("data error: {err}");
            1
        }
    }
}

/// Play one scripted encounter: a slime and a wolf against a wild goblin.
/// The wolf knows its first two tree skills so the trace shows skill use.
fn run_simulation(registry: &DataRegistry, seed: u64) -> Result<SimulationTrace, crate::data::DataError> {
    let mut rng = Rng::new(seed);

    let mut tamer = Tamer::new("Rookie");
    let slime = registry.spawn(Species::Slime)?;
    let mut wolf = registry.spawn(Species::Wolf)?;
    wolf.skill_points = 3;
    let _ = wolf.learn_skill("Fleet Foot");
    let _ = wolf.learn_skill("Bite");
    tamer.add_creature(slime);
    tamer.add_creature(wolf);

    let enemy = registry.spawn_wild(Species::Goblin, &mut rng)?;
    let mut battle = Battle::new(tamer, enemy, registry.config(), Box::new(rng));

    let mut turns = Vec::new();
    let mut result = Outcome::Undecided;

    for _ in 0..50 {
        let report = player_action(&mut battle);
        let outcome = report.outcome;
        turns.push(report);
        if !advance(&mut battle, outcome, &mut turns, &mut result) {
            break;
        }

        let report = battle.enemy_turn();
        let outcome = report.outcome;
        turns.push(report);
        if !advance(&mut battle, outcome, &mut turns, &mut result) {
            break;
        }

        let report = battle.end_of_turn();
        let outcome = report.outcome;
        turns.push(report);
        if !advance(&mut battle, outcome, &mut turns, &mut result) {
            break;
        }
    }

    let aftermath = if result == Outcome::Win {
        battle.award_spoils()
    } else {
        Vec::new()
    };

    Ok(SimulationTrace {
        seed,
        opening: battle.opening_narration().to_vec(),
        turns,
        result,
        aftermath,
    })
}

fn player_action(battle: &mut Battle) -> TurnReport {
    let active = battle.active();
    let use_bite = active
        .known_skill("Bite")
        .is_some_and(|skill| active.current_mp >= skill.mp_cost);
    if use_bite {
        battle.use_skill("Bite")
    } else {
        battle.attack()
    }
}

/// Handle a report's outcome: resolve forced switches, record terminal
/// results. Returns false once the encounter is over.
fn advance(
    battle: &mut Battle,
    outcome: Outcome,
    turns: &mut Vec<TurnReport>,
    result: &mut Outcome,
) -> bool {
    match outcome {
        Outcome::Undecided => true,
        Outcome::SwitchNeeded => {
            let reserves = battle.tamer().living_reserves(battle.active_index());
            match reserves.first() {
                Some(&index) => {
                    turns.push(battle.switch_to(index));
                    true
                }
                None => {
                    *result = Outcome::Lose;
                    false
                }
            }
        }
        terminal => {
            *result = terminal;
            false
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_SPECIES_PATH);

    let mut report = match validate_species_dataset(path) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    report.merge(validate_skill_trees());

    for diag in &report.diagnostics {
        println!("[{}] {}: {}", diag.severity, diag.context, diag.message);
    }
    if report.has_errors() {
        eprintln!("validation failed");
        1
    } else {
        println!("validation passed");
        0
    }
}

fn handle_trees(args: &[String]) -> i32 {
    let species = match args.get(2).and_then(|key| Species::from_key(key)) {
        Some(species) => species,
        None => {
            eprintln!("usage: menagerie trees <slime|goblin|wolf|bat>");
            return 2;
        }
    };

    let tree = tree_for(species);
    println!("{}: {}", species.display_name(), tree.name);
    for node in tree.nodes() {
        let kind = if node.skill.is_passive() {
            "passive"
        } else {
            "active"
        };
        print!(
            "  {} [{kind}, SP {}",
            node.skill.name, node.skill.point_cost
        );
        if node.skill.mp_cost > 0 {
            print!(", MP {}", node.skill.mp_cost);
        }
        print!("] {}", node.skill.description);
        if !node.prerequisites.is_empty() {
            print!(" (requires {})", node.prerequisites.join(", "));
        }
        println!();
    }
    0
}

/// Seed from OS entropy when the user does not pass one. The library itself
/// never touches ambient randomness.
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => 0x5eed,
    }
}
