//! Raw tables as supplied by the retrieval layer, and their validation
//! into typed rows.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use annot_core::{Cell, Diagnostic, DiagnosticSink, Table};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// Logical dataset names.
pub mod datasets {
    pub const SELECTIVITY: &str = "selectivity";
    pub const DATABASE_LINK: &str = "database_link";
    pub const TRANSPORTER: &str = "transporter";
    pub const TARGETS_FAMILIES: &str = "targets_families";
    pub const SLC: &str = "slc";
    pub const ION_CHANNELS: &str = "ion_channels";
    pub const PORINS: &str = "porins";
    pub const SOLUTE_CARRIERS: &str = "solute_carriers";

    /// HGNC groups that imply permeability to one ion.
    pub const PERMEABILITY_GROUPS: &[(&str, &str)] = &[
        ("sodium_ion_channels", "Na+"),
        ("calcium_ion_channels", "Ca2+"),
        ("potassium_ion_channels", "K+"),
        ("chloride_ion_channels", "Cl-"),
    ];

    /// HGNC groups that imply a gating mechanism.
    pub const GATING_GROUPS: &[(&str, &str)] = &[
        ("voltage_gated_ion_channels", "voltage"),
        ("ligand_gated_ion_channels", "ligand"),
        ("ph_sensing_ion_channels", "pH"),
        ("volume_regulated_ion_channels", "stretch"),
    ];

    /// Output tables.
    pub const CHANNELS: &str = "channels";
}

/// A typed row that a raw table validates into.
pub trait RawRecord: DeserializeOwned {
    /// Columns whose absence makes the whole table unusable.
    const REQUIRED_COLUMNS: &'static [&'static str];
}

/// Raw tables keyed by logical dataset name.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    tables: HashMap<String, Table>,
}

impl RawTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table under its own name, replacing any previous one.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    #[must_use]
    pub fn with(mut self, table: Table) -> Self {
        self.insert(table);
        self
    }

    /// Read a CSV file into a table named `name`.
    pub fn load_csv(&mut self, name: &str, path: &Path) -> Result<(), PipelineError> {
        let file = std::fs::File::open(path)?;
        self.insert(table_from_csv(name, file)?);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&Table, PipelineError> {
        self.get(name)
            .ok_or_else(|| PipelineError::MissingTable(name.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Validate a required table into typed rows.
    pub fn records<T: RawRecord>(
        &self,
        name: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<T>, PipelineError> {
        parse_records(self.require(name)?, sink)
    }

    /// Validate a table that may be absent. Absent means no rows.
    pub fn optional_records<T: RawRecord>(
        &self,
        name: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<T>, PipelineError> {
        match self.get(name) {
            Some(table) => parse_records(table, sink),
            None => {
                tracing::debug!(table = name, "optional table not supplied");
                Ok(Vec::new())
            }
        }
    }
}

/// Read CSV with a header row. Empty fields become null cells.
pub fn table_from_csv<R: Read>(name: &str, reader: R) -> Result<Table, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();
    let mut table = Table {
        name: name.to_string(),
        columns: headers,
        rows: Vec::new(),
    };

    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Null
                } else {
                    Cell::from(field)
                }
            })
            .collect();
        table.push_row(row)?;
    }
    Ok(table)
}

/// Check required columns, then deserialize row by row.
///
/// Missing columns are fatal. A row that does not validate is reported as
/// [`Diagnostic::InvalidRow`] and skipped.
pub fn parse_records<T: RawRecord>(
    table: &Table,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<T>, PipelineError> {
    for column in T::REQUIRED_COLUMNS {
        table.require_column(column)?;
    }

    let mut records = Vec::with_capacity(table.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let object: Map<String, Value> = table
            .columns
            .iter()
            .cloned()
            .zip(row.iter().map(cell_to_json))
            .collect();
        match serde_json::from_value::<T>(Value::Object(object)) {
            Ok(record) => records.push(record),
            Err(err) => sink.record(Diagnostic::InvalidRow {
                table: table.name.clone(),
                row: idx,
                reason: err.to_string(),
            }),
        }
    }

    tracing::debug!(
        table = %table.name,
        rows = table.len(),
        valid = records.len(),
        "validated raw table"
    );
    Ok(records)
}

fn cell_to_json(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Bool(b) => Value::Bool(*b),
        Cell::Int(i) => Value::from(*i),
        Cell::Float(x) => Value::from(x.0),
        Cell::Text(s) => Value::String(s.clone()),
    }
}

/// Lenient field deserializers for source data that types everything as text.
pub(crate) mod de {
    use annot_core::Cell;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    /// A number, a numeric string, or null/empty for none.
    pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Cell::deserialize(deserializer)? {
            Cell::Null => Ok(None),
            Cell::Text(s) if is_blank(&s) => Ok(None),
            Cell::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("'{s}' is not a number"))),
            cell => Ok(cell.as_float()),
        }
    }

    /// Text or an integer, rendered as text. Null is an error.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        opt_text(deserializer)?.ok_or_else(|| D::Error::custom("value is missing"))
    }

    /// Text or an integer, rendered as text; null/empty for none.
    pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match Cell::deserialize(deserializer)? {
            Cell::Null => Ok(None),
            Cell::Text(s) if is_blank(&s) => Ok(None),
            Cell::Text(s) => Ok(Some(s)),
            Cell::Int(i) => Ok(Some(i.to_string())),
            other => Err(D::Error::custom(format!("expected text, found {other}"))),
        }
    }

    /// A boolean flag, accepting `t`/`f`, `true`/`false` and `1`/`0`.
    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Cell::deserialize(deserializer)? {
            Cell::Bool(b) => Ok(b),
            Cell::Int(1) => Ok(true),
            Cell::Int(0) => Ok(false),
            Cell::Text(s) => match s.trim() {
                "t" | "true" | "1" => Ok(true),
                "f" | "false" | "0" => Ok(false),
                other => Err(D::Error::custom(format!("'{other}' is not a flag"))),
            },
            other => Err(D::Error::custom(format!("'{other}' is not a flag"))),
        }
    }

    fn is_blank(s: &str) -> bool {
        matches!(s.trim(), "" | "None" | "nan" | "NaN")
    }
}
