//! Cross-cutting error types for annotation reconciliation.
//!
//! `CoreError` covers structural problems that abort a run (bad table shape,
//! invalid identifiers). `ReconError` is the per-row/per-gene taxonomy: every
//! variant is isolated to the row or gene it names and is normally reported
//! through a [`DiagnosticSink`](crate::DiagnosticSink) rather than returned.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors that can be raised by any `annot-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required column is absent from a table.
    #[error("Missing column '{column}' in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// A row does not have as many cells as the table has columns.
    #[error("Row width mismatch: expected {expected} cells, found {found}")]
    RowWidth { expected: usize, found: usize },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// How a set of conflicting observations for one (gene, solute) was collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    /// A visible observation was kept and the hidden ones were discarded.
    VisibilityPrecedence,
    /// Several observations with the same visibility were averaged.
    Averaged,
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VisibilityPrecedence => f.write_str("visibility precedence"),
            Self::Averaged => f.write_str("averaged"),
        }
    }
}

/// Per-row and per-gene reconciliation failures.
///
/// None of these abort a run. `NoPositiveDenominator` aborts the conductance
/// derivation of a single gene and is surfaced to the caller in the
/// aggregation outcome; the others are logged and the row is dropped or kept
/// as documented on each variant.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconError {
    /// An observation has no usable numeric value. The row is dropped.
    #[error("Missing conductance value for gene {gene_id} ({solute})")]
    MissingValue { gene_id: String, solute: String },

    /// Duplicate or contradictory observations were merged.
    #[error("Resolved conflicting conductances for gene {gene_id} ({solute}) by {resolution}: {values:?}")]
    ConflictResolved {
        gene_id: String,
        solute: String,
        resolution: ConflictResolution,
        values: Vec<f64>,
    },

    /// A gene has no positive value to normalize against.
    #[error("No positive conductance to normalize gene {gene_id} against (max: {max:?})")]
    NoPositiveDenominator { gene_id: String, max: Option<f64> },

    /// A solute's normalized value falls outside `(0, 1]`. The solute is dropped.
    #[error("Relative conductance {relative} for gene {gene_id} ({solute}) is outside (0, 1]")]
    RelativeOutOfRange {
        gene_id: String,
        solute: String,
        relative: f64,
    },

    /// A stoichiometry notation could not be parsed. No entries are produced.
    #[error("Cannot parse notation '{notation}' for gene {gene_id}: {reason}")]
    NotationParse {
        gene_id: String,
        notation: String,
        reason: String,
    },

    /// A row's multi-valued cells cannot be aligned for exploding. The row is dropped.
    #[error("Incompatible split lengths {lengths:?} in row {row:?}")]
    IncompatibleExplodeLengths { row: Vec<String>, lengths: Vec<usize> },
}
