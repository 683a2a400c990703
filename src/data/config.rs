//! Engine tuning values. Loaded from `data/engine_config.json` when present;
//! a missing or unreadable file falls back to the compiled defaults so the
//! engine always has a usable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::combatant::ExperienceCurve;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Flat escape success probability.
    pub escape_rate: f64,
    /// How strongly missing health amplifies the scout rate.
    pub scout_health_weight: f64,
    /// Dodge probability every freshly spawned combatant starts with.
    pub base_dodge_rate: f64,
    /// Experience needed for level 2; later levels scale geometrically.
    pub experience_base: f64,
    pub experience_ratio: f64,
    pub skill_points_per_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            escape_rate: 0.5,
            scout_health_weight: 1.5,
            base_dodge_rate: 0.05,
            experience_base: 10.0,
            experience_ratio: 1.5,
            skill_points_per_level: 30,
        }
    }
}

impl EngineConfig {
    pub fn experience_curve(&self) -> ExperienceCurve {
        ExperienceCurve {
            base_requirement: self.experience_base,
            ratio: self.experience_ratio,
            points_per_level: self.skill_points_per_level,
        }
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "data/engine_config.json";

/// Load tuning values, defaulting when the file is missing or invalid.
pub fn load_engine_config(path: &str) -> EngineConfig {
    let path = Path::new(path);
    if !path.exists() {
        return EngineConfig::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return EngineConfig::default(),
    };
    serde_json::from_str(&raw).unwrap_or_default()
}
