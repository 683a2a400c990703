//! Data collaborators around the engine: species templates, engine tuning,
//! the static skill-tree registry, and dataset validation.

use thiserror::Error;

pub mod config;
pub mod registry;
pub mod species;
pub mod trees;
pub mod validate;

pub use config::{load_engine_config, EngineConfig, DEFAULT_CONFIG_PATH};
pub use registry::DataRegistry;
pub use species::{
    load_species_index, GrowthRates, Species, SpeciesIndex, SpeciesRecord, DEFAULT_SPECIES_PATH,
};
pub use trees::tree_for;
pub use validate::{
    validate_skill_trees, validate_species_dataset, ValidationDiagnostic, ValidationReport,
    ValidationSeverity,
};

/// Unrecoverable configuration failures. These surface at load/spawn time,
/// never mid-battle.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unable to read dataset '{path}': {source}")]
    DatasetUnreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset '{path}' is malformed: {source}")]
    DatasetMalformed {
        path: String,
        source: serde_json::Error,
    },
    #[error("species '{0}' is not present in the dataset")]
    UnknownSpecies(String),
}
