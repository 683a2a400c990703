//! Startup-loaded data registry. Load the species dataset and tuning once,
//! then spawn combatants from it for the rest of the session.

use crate::battle::combatant::{Combatant, RewardProfile};
use crate::battle::rng::Dice;
use crate::battle::stats::StatKind;
use crate::data::config::{load_engine_config, EngineConfig, DEFAULT_CONFIG_PATH};
use crate::data::species::{
    load_species_index, Species, SpeciesIndex, SpeciesRecord, DEFAULT_SPECIES_PATH,
};
use crate::data::trees::tree_for;
use crate::data::DataError;

/// Read-only registry of static game data, loaded once.
#[derive(Debug, Clone)]
pub struct DataRegistry {
    species: SpeciesIndex,
    config: EngineConfig,
}

impl DataRegistry {
    /// Load from the default data paths. The species dataset is required;
    /// tuning falls back to compiled defaults.
    pub fn load() -> Result<DataRegistry, DataError> {
        Self::load_from(DEFAULT_SPECIES_PATH, DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(species_path: &str, config_path: &str) -> Result<DataRegistry, DataError> {
        Ok(DataRegistry {
            species: load_species_index(species_path)?,
            config: load_engine_config(config_path),
        })
    }

    /// Build a registry from already-loaded data (tests, embedded data).
    pub fn from_parts(species: SpeciesIndex, config: EngineConfig) -> DataRegistry {
        DataRegistry { species, config }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn species_index(&self) -> &SpeciesIndex {
        &self.species
    }

    pub fn record(&self, species: Species) -> Result<&SpeciesRecord, DataError> {
        self.species
            .record(species)
            .ok_or_else(|| DataError::UnknownSpecies(species.key().to_string()))
    }

    /// Spawn a fresh level-1 combatant from its species template, with its
    /// skill tree resolved from the static registry.
    pub fn spawn(&self, species: Species) -> Result<Combatant, DataError> {
        let record = self.record(species)?;
        Ok(Combatant::new(
            species.display_name(),
            species,
            record.stat_block(),
            self.config.base_dodge_rate,
            record.growth,
            RewardProfile {
                experience: record.reward_experience,
                gold: record.reward_gold,
                scout_rate: record.scout_rate,
            },
            self.config.experience_curve(),
            tree_for(species),
        ))
    }

    /// Spawn a wild encounter: every stat jittered within [80%, 120%) of
    /// the template, level drawn from 1..=3, rewards scaled up with level,
    /// scout rate scaled down with it.
    pub fn spawn_wild(&self, species: Species, dice: &mut dyn Dice) -> Result<Combatant, DataError> {
        let mut wild = self.spawn(species)?;
        for stat in [
            StatKind::MaxHp,
            StatKind::MaxMp,
            StatKind::PhysicalAttack,
            StatKind::PhysicalDefense,
            StatKind::MagicAttack,
            StatKind::MagicDefense,
            StatKind::Speed,
        ] {
            let jitter = 0.8 + dice.uniform() * 0.4;
            let value = ((wild.base.get(stat) as f64 * jitter) as i32).max(1);
            wild.base.set(stat, value);
            wild.current.set(stat, value);
        }
        wild.current_hp = wild.current.max_hp;
        wild.current_mp = wild.current.max_mp;

        let level = dice.roll_range(1, 3) as u32;
        wild.level = level;
        let level_scale = 1.0 + level as f64 * 0.1;
        wild.reward.experience = (wild.reward.experience as f64 * level_scale) as u32;
        wild.reward.gold = (wild.reward.gold as f64 * level_scale) as u32;
        wild.reward.scout_rate *= 1.0 - level as f64 * 0.05;

        Ok(wild)
    }
}
