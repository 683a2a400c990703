//! The tamer: a named roster of creatures and a gold purse. The battle
//! engine owns the tamer for the duration of one encounter and hands it
//! back when the encounter dissolves.

use crate::battle::combatant::Combatant;

#[derive(Debug, Clone, PartialEq)]
pub struct Tamer {
    pub name: String,
    pub gold: u32,
    pub creatures: Vec<Combatant>,
}

impl Tamer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gold: 0,
            creatures: Vec::new(),
        }
    }

    pub fn add_creature(&mut self, creature: Combatant) {
        self.creatures.push(creature);
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    /// Indices of living creatures other than `except`.
    pub fn living_reserves(&self, except: usize) -> Vec<usize> {
        self.creatures
            .iter()
            .enumerate()
            .filter(|(index, creature)| *index != except && creature.is_alive())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_living_reserve(&self, except: usize) -> bool {
        !self.living_reserves(except).is_empty()
    }
}
