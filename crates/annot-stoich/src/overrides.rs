//! Manual overrides for notations the grammar cannot handle.
//!
//! The table is plain configuration data. In TOML:
//!
//! ```toml
//! [[override]]
//! notation = "1Na+:1HCO3-(out)or1Na:CO32*"
//! drop = true
//!
//! [[override]]
//! notation = "2Na+(in):1HPO42-(in)"
//! [[override.entries]]
//! carried_solute = "Na+"
//! direction = "in"
//! stoichiometry_count = 2
//! net_charge = 0
//! [[override.entries]]
//! carried_solute = "HPO42-"
//! direction = "in"
//! stoichiometry_count = 1
//! net_charge = 0
//! ```

use std::collections::HashMap;
use std::path::Path;

use annot_core::entities::{NetCharge, StoichiometryEntry};
use annot_core::enums::Direction;
use serde::{Deserialize, Serialize};

use crate::error::StoichError;
use crate::notation::normalize;

/// A stoichiometry entry with no gene attached yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideEntry {
    pub carried_solute: String,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub stoichiometry_count: Option<u32>,
    #[serde(default)]
    pub net_charge: NetCharge,
    #[serde(default)]
    pub mode_index: Option<u32>,
}

impl OverrideEntry {
    /// Attach the entry to the gene whose notation matched.
    #[must_use]
    pub fn bind(&self, gene_id: &str) -> StoichiometryEntry {
        StoichiometryEntry::builder(gene_id, self.carried_solute.as_str())
            .direction(self.direction)
            .count(self.stoichiometry_count)
            .net_charge(self.net_charge)
            .mode_index(self.mode_index)
            .build()
    }
}

/// What to do with a notation that has an override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideAction {
    /// Yield no entries.
    Drop,
    /// Yield exactly these entries.
    Entries(Vec<OverrideEntry>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    #[serde(default, rename = "override")]
    overrides: Vec<OverrideSpec>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideSpec {
    notation: String,
    #[serde(default)]
    drop: bool,
    #[serde(default)]
    entries: Vec<OverrideEntry>,
}

/// Normalized notation string to override action.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    actions: HashMap<String, OverrideAction>,
}

impl OverrideTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override. The key is normalized the same way notations are.
    pub fn insert(&mut self, notation: &str, action: OverrideAction) -> Result<(), StoichError> {
        if matches!(&action, OverrideAction::Entries(entries) if entries.is_empty()) {
            return Err(StoichError::InvalidOverride {
                notation: notation.to_string(),
                reason: "lists no entries and is not a drop".into(),
            });
        }

        let key = normalize(notation);
        if self.actions.contains_key(&key) {
            return Err(StoichError::DuplicateOverride(key));
        }
        self.actions.insert(key, action);
        Ok(())
    }

    pub fn from_toml_str(source: &str) -> Result<Self, StoichError> {
        let file: OverrideFile = toml::from_str(source)?;
        let mut table = Self::new();

        for spec in file.overrides {
            let action = match (spec.drop, spec.entries.is_empty()) {
                (true, true) => OverrideAction::Drop,
                (true, false) => {
                    return Err(StoichError::InvalidOverride {
                        notation: spec.notation,
                        reason: "both drops and lists entries".into(),
                    });
                }
                (false, _) => OverrideAction::Entries(spec.entries),
            };
            table.insert(&spec.notation, action)?;
        }

        tracing::debug!(overrides = table.len(), "loaded notation overrides");
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, StoichError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Look up an already-normalized notation.
    #[must_use]
    pub fn get(&self, normalized: &str) -> Option<&OverrideAction> {
        self.actions.get(normalized)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
