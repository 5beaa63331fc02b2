//! Generic column-named tables.
//!
//! Typed record structs enter and leave the core through [`Tabular`]; the
//! operations that have to work on any logical table (exploding, thesaurus
//! canonicalization, deduplication) work on [`Table`].

use std::collections::HashSet;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One cell of a [`Table`].
///
/// Floats are wrapped in `OrderedFloat` so whole rows can be hashed and
/// compared for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl Cell {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(f.0),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{}", x.0),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(OrderedFloat(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A table row, aligned with [`Table::columns`].
pub type Row = Vec<Cell>;

/// A record type with a fixed column schema.
pub trait Tabular {
    /// Column names, in cell order.
    const COLUMNS: &'static [&'static str];

    /// The record's cells, aligned with [`Self::COLUMNS`].
    fn cells(&self) -> Row;
}

/// An in-memory table with named columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from typed records.
    #[must_use]
    pub fn from_records<T: Tabular>(name: impl Into<String>, records: &[T]) -> Self {
        let mut table = Self::new(name, T::COLUMNS);
        table.rows = records.iter().map(Tabular::cells).collect();
        table
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Index of `column`, or a structural error naming the table.
    pub fn require_column(&self, column: &str) -> Result<usize, CoreError> {
        self.column_index(column).ok_or_else(|| CoreError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
        })
    }

    /// Append a row, checking its width.
    pub fn push_row(&mut self, row: Row) -> Result<(), CoreError> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Iterate over the cells of one column.
    pub fn column_values(&self, column: &str) -> Result<impl Iterator<Item = &Cell>, CoreError> {
        let idx = self.require_column(column)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Remove a column and its cells.
    pub fn drop_column(&mut self, column: &str) -> Result<(), CoreError> {
        let idx = self.require_column(column)?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }

    /// Remove duplicate rows, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        let mut seen = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Remove rows in which every cell is null.
    pub fn drop_null_rows(&mut self) {
        self.rows.retain(|row| !row.iter().all(Cell::is_null));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        let mut table = Table::new("channels", &["ensg", "carried_solute"]);
        table.push_row(vec!["ENSG1".into(), "K+".into()]).unwrap();
        table.push_row(vec!["ENSG1".into(), "K+".into()]).unwrap();
        table.push_row(vec!["ENSG2".into(), Cell::Null]).unwrap();
        table.push_row(vec![Cell::Null, Cell::Null]).unwrap();
        table
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let mut table = sample();
        table.dedup();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0], vec![Cell::from("ENSG1"), Cell::from("K+")]);
        assert_eq!(table.rows[1][0], Cell::from("ENSG2"));
    }

    #[test]
    fn null_rows_are_dropped() {
        let mut table = sample();
        table.drop_null_rows();
        assert_eq!(table.len(), 3);
        assert!(table.rows.iter().all(|r| !r[0].is_null()));
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut table = sample();
        let err = table.push_row(vec!["only-one".into()]).unwrap_err();
        assert!(matches!(err, CoreError::RowWidth { expected: 2, found: 1 }));
    }

    #[test]
    fn missing_column_names_the_table() {
        let table = sample();
        let err = table.require_column("gating_mechanism").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing column 'gating_mechanism' in table 'channels'"
        );
    }

    #[test]
    fn drop_column_removes_cells() {
        let mut table = sample();
        table.drop_column("ensg").unwrap();
        assert_eq!(table.columns, vec!["carried_solute".to_string()]);
        assert!(table.rows.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn float_cells_hash_for_dedup() {
        let mut table = Table::new("t", &["x"]);
        table.push_row(vec![Cell::from(0.5)]).unwrap();
        table.push_row(vec![Cell::from(0.5)]).unwrap();
        table.dedup();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn option_cells_map_none_to_null() {
        assert_eq!(Cell::from(None::<f64>), Cell::Null);
        assert_eq!(Cell::from(Some(2_u32)), Cell::Int(2));
    }
}
