use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::GatingMechanism;

/// Reconciled conductance for one (gene, solute) pair.
///
/// `absolute_conductance` is only ever set together with
/// `relative_conductance`; use the constructors to keep that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConductanceRecord {
    pub gene_id: String,
    /// Canonical solute name. `None` for channel genes with no known permeability.
    pub solute: Option<String>,
    pub absolute_conductance: Option<f64>,
    /// In `(0, 1]` when present.
    pub relative_conductance: Option<f64>,
    pub gating_mechanisms: BTreeSet<GatingMechanism>,
}

impl ConductanceRecord {
    /// A record derived from at least one measurement.
    #[must_use]
    pub fn measured(
        gene_id: impl Into<String>,
        solute: impl Into<String>,
        absolute: Option<f64>,
        relative: f64,
    ) -> Self {
        Self {
            gene_id: gene_id.into(),
            solute: Some(solute.into()),
            absolute_conductance: absolute,
            relative_conductance: Some(relative),
            gating_mechanisms: BTreeSet::new(),
        }
    }

    /// A permeability known only by group membership; no numeric values.
    #[must_use]
    pub fn implied(gene_id: impl Into<String>, solute: Option<String>) -> Self {
        Self {
            gene_id: gene_id.into(),
            solute,
            absolute_conductance: None,
            relative_conductance: None,
            gating_mechanisms: BTreeSet::new(),
        }
    }

    /// `absolute != None ⇒ relative != None`, and relative lies in `(0, 1]`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let relative_ok = self
            .relative_conductance
            .is_none_or(|r| r > 0.0 && r <= 1.0);
        let pairing_ok =
            self.absolute_conductance.is_none() || self.relative_conductance.is_some();
        relative_ok && pairing_ok
    }

    /// Add a mechanism; returns `false` if it was already present.
    pub fn add_mechanism(&mut self, mechanism: GatingMechanism) -> bool {
        self.gating_mechanisms.insert(mechanism)
    }
}
