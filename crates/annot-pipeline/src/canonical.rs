//! Canonical output rows and the tables they land in.

use std::collections::BTreeMap;

use annot_core::entities::{ConductanceRecord, NetCharge, StoichiometryEntry};
use annot_core::enums::{CarrierType, Direction, GatingMechanism};
use annot_core::{Cell, Row, Table, Tabular};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::raw::datasets;

// ---------------------------------------------------------------------------
// channels
// ---------------------------------------------------------------------------

/// One row of the `channels` table: a (gene, solute, mechanism) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChannelRow {
    pub ensg: String,
    pub carried_solute: Option<String>,
    pub absolute_conductance: Option<f64>,
    pub relative_conductance: Option<f64>,
    pub gating_mechanism: Option<GatingMechanism>,
}

impl ChannelRow {
    /// One row per gating mechanism of `record`, or a single row without one.
    #[must_use]
    pub fn from_record(record: &ConductanceRecord) -> Vec<Self> {
        let row = |gating_mechanism: Option<GatingMechanism>| Self {
            ensg: record.gene_id.clone(),
            carried_solute: record.solute.clone(),
            absolute_conductance: record.absolute_conductance,
            relative_conductance: record.relative_conductance,
            gating_mechanism,
        };

        if record.gating_mechanisms.is_empty() {
            return vec![row(None)];
        }
        record
            .gating_mechanisms
            .iter()
            .map(|mechanism| row(Some(mechanism.clone())))
            .collect()
    }
}

impl Tabular for ChannelRow {
    const COLUMNS: &'static [&'static str] = &[
        "ensg",
        "carried_solute",
        "absolute_conductance",
        "relative_conductance",
        "gating_mechanism",
    ];

    fn cells(&self) -> Row {
        vec![
            Cell::from(self.ensg.as_str()),
            Cell::from(self.carried_solute.clone()),
            Cell::from(self.absolute_conductance),
            Cell::from(self.relative_conductance),
            Cell::from(self.gating_mechanism.as_ref().map(GatingMechanism::as_str)),
        ]
    }
}

// ---------------------------------------------------------------------------
// solute_carriers
// ---------------------------------------------------------------------------

/// One row of the `solute_carriers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SoluteCarrierRow {
    pub ensg: String,
    pub carried_solute: Option<String>,
    pub direction: Option<Direction>,
    pub stoichiometry: Option<u32>,
    pub net_charge: Option<NetCharge>,
    pub mode_index: Option<u32>,
    pub port_type: Option<CarrierType>,
}

impl SoluteCarrierRow {
    #[must_use]
    pub fn new(gene_id: &str, entry: Option<&StoichiometryEntry>, port_type: Option<CarrierType>) -> Self {
        Self {
            ensg: gene_id.to_string(),
            carried_solute: entry.map(|e| e.carried_solute.clone()),
            direction: entry.and_then(|e| e.direction),
            stoichiometry: entry.and_then(|e| e.stoichiometry_count),
            net_charge: entry.map(|e| e.net_charge),
            mode_index: entry.and_then(|e| e.mode_index),
            port_type,
        }
    }
}

impl Tabular for SoluteCarrierRow {
    const COLUMNS: &'static [&'static str] = &[
        "ensg",
        "carried_solute",
        "direction",
        "stoichiometry",
        "net_charge",
        "mode_index",
        "port_type",
    ];

    fn cells(&self) -> Row {
        let net_charge = match self.net_charge {
            None => Cell::Null,
            Some(NetCharge::Known(n)) => Cell::from(i64::from(n)),
            Some(NetCharge::Unknown) => Cell::Bool(false),
        };
        vec![
            Cell::from(self.ensg.as_str()),
            Cell::from(self.carried_solute.clone()),
            Cell::from(self.direction.map(Direction::as_str)),
            Cell::from(self.stoichiometry),
            net_charge,
            Cell::from(self.mode_index),
            Cell::from(self.port_type.map(CarrierType::as_str)),
        ]
    }
}

// ---------------------------------------------------------------------------
// CanonicalTables
// ---------------------------------------------------------------------------

/// Output tables keyed by logical target name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalTables {
    tables: BTreeMap<String, Table>,
}

impl CanonicalTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table under its own name, dropping all-null and duplicate rows.
    pub fn insert(&mut self, mut table: Table) {
        table.drop_null_rows();
        table.dedup();
        self.tables.insert(table.name.clone(), table);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    #[must_use]
    pub fn channels(&self) -> Option<&Table> {
        self.get(datasets::CHANNELS)
    }

    #[must_use]
    pub fn solute_carriers(&self) -> Option<&Table> {
        self.get(datasets::SOLUTE_CARRIERS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Table> {
        self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_without_mechanisms_is_one_row() {
        let record = ConductanceRecord::implied("ENSG00000080709", None);
        let rows = ChannelRow::from_record(&record);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].cells(),
            vec![Cell::from("ENSG00000080709"), Cell::Null, Cell::Null, Cell::Null, Cell::Null]
        );
    }

    #[test]
    fn record_expands_per_mechanism() {
        let mut record = ConductanceRecord::measured("ENSG00000080709", "K+", Some(9.7), 1.0);
        record.add_mechanism(GatingMechanism::Voltage);
        record.add_mechanism(GatingMechanism::Ligand);
        let rows = ChannelRow::from_record(&record);
        let mechanisms: Vec<Cell> = rows.iter().map(|r| r.cells()[4].clone()).collect();
        assert_eq!(mechanisms, vec![Cell::from("voltage"), Cell::from("ligand")]);
    }

    #[test]
    fn unknown_net_charge_is_false_not_null() {
        let entry = StoichiometryEntry::builder("ENSG00000091138", "Na").build();
        let row = SoluteCarrierRow::new("ENSG00000091138", Some(&entry), Some(CarrierType::Symporter));
        let cells = row.cells();
        assert_eq!(cells[4], Cell::Bool(false));
        assert_eq!(cells[6], Cell::from("symporter"));

        let bare = SoluteCarrierRow::new("ENSG00000091138", None, None);
        assert_eq!(bare.cells()[4], Cell::Null);
    }

    #[test]
    fn inserted_tables_lose_null_and_duplicate_rows() {
        let mut table = Table::new(datasets::CHANNELS, &["ensg", "carried_solute"]);
        table.push_row(vec!["G1".into(), "K+".into()]).unwrap();
        table.push_row(vec![Cell::Null, Cell::Null]).unwrap();
        table.push_row(vec!["G1".into(), "K+".into()]).unwrap();

        let mut tables = CanonicalTables::new();
        tables.insert(table);
        assert_eq!(tables.channels().unwrap().len(), 1);
        assert!(tables.solute_carriers().is_none());
    }
}
