//! Species templates: base stats, growth multipliers, and reward fields,
//! keyed by species. Loaded once from `data/species.json`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::battle::stats::StatBlock;
use crate::data::DataError;

/// The closed set of species. Each variant maps to one skill-tree builder
/// in [`crate::data::trees`], resolved at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Slime,
    Goblin,
    Wolf,
    Bat,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Slime, Species::Goblin, Species::Wolf, Species::Bat];

    /// The dataset key for this species.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Slime => "slime",
            Self::Goblin => "goblin",
            Self::Wolf => "wolf",
            Self::Bat => "bat",
        }
    }

    pub fn from_key(key: &str) -> Option<Species> {
        Species::ALL.into_iter().find(|species| species.key() == key)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Slime => "Slime",
            Self::Goblin => "Goblin",
            Self::Wolf => "Wolf",
            Self::Bat => "Bat",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-stat level-up multipliers. Owned by value in every combatant; there
/// is no shared growth table to mutate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub hp: f64,
    pub mp: f64,
    pub physical_attack: f64,
    pub physical_defense: f64,
    pub magic_attack: f64,
    pub magic_defense: f64,
    pub speed: f64,
}

impl Default for GrowthRates {
    fn default() -> Self {
        Self {
            hp: 1.2,
            mp: 1.1,
            physical_attack: 1.1,
            physical_defense: 1.1,
            magic_attack: 1.1,
            magic_defense: 1.1,
            speed: 1.1,
        }
    }
}

/// One species template as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub max_hp: i32,
    pub max_mp: i32,
    pub physical_attack: i32,
    pub physical_defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
    pub reward_experience: u32,
    pub reward_gold: u32,
    pub scout_rate: f64,
    #[serde(default)]
    pub growth: GrowthRates,
}

impl SpeciesRecord {
    pub fn stat_block(&self) -> StatBlock {
        StatBlock {
            max_hp: self.max_hp,
            max_mp: self.max_mp,
            physical_attack: self.physical_attack,
            physical_defense: self.physical_defense,
            magic_attack: self.magic_attack,
            magic_defense: self.magic_defense,
            speed: self.speed,
        }
    }
}

/// The whole species dataset. Keys are species dataset keys; unknown keys
/// are tolerated at load time and flagged by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesIndex {
    #[serde(default)]
    pub data_version: Option<String>,
    pub species: BTreeMap<String, SpeciesRecord>,
}

impl SpeciesIndex {
    pub fn record(&self, species: Species) -> Option<&SpeciesRecord> {
        self.species.get(species.key())
    }
}

pub const DEFAULT_SPECIES_PATH: &str = "data/species.json";

/// Load the species dataset. Missing or malformed data is a fatal
/// configuration error, not a combat-turn failure.
pub fn load_species_index(path: &str) -> Result<SpeciesIndex, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::DatasetUnreadable {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::DatasetMalformed {
        path: path.to_string(),
        source,
    })
}
