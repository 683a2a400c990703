//! Dataset and skill-graph validation. Used by the `validate` CLI command
//! and by the shipped-data tests.

use std::collections::BTreeMap;
use std::fmt;

use crate::battle::skill::{SkillKind, SkillTree};
use crate::data::species::{load_species_index, Species, SpeciesRecord};
use crate::data::trees::tree_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Validate the species dataset at `path`. An unreadable or unparsable file
/// is a hard failure; everything else becomes a diagnostic.
pub fn validate_species_dataset(path: &str) -> Result<ValidationReport, String> {
    let index = load_species_index(path).map_err(|err| err.to_string())?;

    let mut report = ValidationReport::default();
    for (key, record) in &index.species {
        validate_record(&mut report, key, record);
        if Species::from_key(key).is_none() {
            report.push(
                ValidationSeverity::Warning,
                key.clone(),
                "no skill tree registered for this species",
            );
        }
    }
    for species in Species::ALL {
        if !index.species.contains_key(species.key()) {
            report.push(
                ValidationSeverity::Error,
                species.key(),
                "species missing from dataset; spawning it will fail",
            );
        }
    }
    Ok(report)
}

fn validate_record(report: &mut ValidationReport, key: &str, record: &SpeciesRecord) {
    if record.max_hp <= 0 {
        report.push(ValidationSeverity::Error, key, "max_hp must be positive");
    }
    if record.max_mp < 0 {
        report.push(ValidationSeverity::Error, key, "max_mp must not be negative");
    }
    let stats = [
        ("physical_attack", record.physical_attack),
        ("physical_defense", record.physical_defense),
        ("magic_attack", record.magic_attack),
        ("magic_defense", record.magic_defense),
        ("speed", record.speed),
    ];
    for (name, value) in stats {
        if value < 0 {
            report.push(
                ValidationSeverity::Error,
                key,
                format!("{name} must not be negative"),
            );
        }
    }
    if !(0.0..=1.0).contains(&record.scout_rate) {
        report.push(
            ValidationSeverity::Error,
            key,
            "scout_rate must be within [0, 1]",
        );
    }
    let growth = [
        ("hp", record.growth.hp),
        ("mp", record.growth.mp),
        ("physical_attack", record.growth.physical_attack),
        ("physical_defense", record.growth.physical_defense),
        ("magic_attack", record.growth.magic_attack),
        ("magic_defense", record.growth.magic_defense),
        ("speed", record.growth.speed),
    ];
    for (name, factor) in growth {
        if factor <= 0.0 {
            report.push(
                ValidationSeverity::Error,
                key,
                format!("growth.{name} must be positive"),
            );
        } else if factor < 1.0 {
            report.push(
                ValidationSeverity::Warning,
                key,
                format!("growth.{name} below 1.0 shrinks the stat on level-up"),
            );
        }
    }
}

/// Validate every registered skill tree: prerequisite references must name
/// existing nodes and the prerequisite graph must be acyclic.
pub fn validate_skill_trees() -> ValidationReport {
    let mut report = ValidationReport::default();
    for species in Species::ALL {
        validate_tree(&mut report, species.key(), &tree_for(species));
    }
    report
}

fn validate_tree(report: &mut ValidationReport, context: &str, tree: &SkillTree) {
    for node in tree.nodes() {
        for prerequisite in &node.prerequisites {
            if tree.node(prerequisite).is_none() {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}/{}", node.skill.name),
                    format!("prerequisite '{prerequisite}' does not exist in the tree"),
                );
            }
        }
        if node.skill.point_cost == 0 {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}/{}", node.skill.name),
                "skill is free to learn",
            );
        }
        if let SkillKind::Active { effects } = &node.skill.kind {
            if effects.is_empty() {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}/{}", node.skill.name),
                    "active skill has no effects",
                );
            }
        }
    }

    for node in tree.nodes() {
        let mut visiting = BTreeMap::new();
        if has_cycle(tree, node.skill.name, &mut visiting) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}/{}", node.skill.name),
                "prerequisite cycle detected",
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

fn has_cycle(
    tree: &SkillTree,
    name: &'static str,
    states: &mut BTreeMap<&'static str, VisitState>,
) -> bool {
    match states.get(name) {
        Some(VisitState::Done) => return false,
        Some(VisitState::InProgress) => return true,
        None => {}
    }
    states.insert(name, VisitState::InProgress);
    if let Some(node) = tree.node(name) {
        for prerequisite in &node.prerequisites {
            if has_cycle(tree, *prerequisite, states) {
                return true;
            }
        }
    }
    states.insert(name, VisitState::Done);
    false
}
