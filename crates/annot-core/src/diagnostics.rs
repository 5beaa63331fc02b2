//! Diagnostics port.
//!
//! Reconciliation functions never log through a global of their own: they
//! take a `&mut dyn DiagnosticSink` and report every fallback, drop, or
//! parse failure to it. [`Diagnostics`] collects the events for an audit
//! report; [`TracingSink`] only forwards them to `tracing`. Both emit a
//! `tracing` event, so the caller's subscriber sees everything either way.

use std::fmt;

use serde::Serialize;

use crate::errors::ReconError;

/// A non-fatal event raised while reconciling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Diagnostic {
    /// One of the per-row/per-gene reconciliation errors.
    Recon { error: ReconError },
    /// A source object id has no gene mapping; its rows were dropped.
    UnmappedIdentifier { table: String, object_id: String },
    /// A vocabulary term is not covered by the thesaurus.
    UnknownTerm { term: String },
    /// A substrate cell carried more than one carrier-type code.
    ConflictingCarrierType { gene_symbol: String, codes: Vec<String> },
    /// A raw row failed boundary validation and was skipped.
    InvalidRow {
        table: String,
        row: usize,
        reason: String,
    },
}

impl Diagnostic {
    /// Whether the event is an anomaly (`warn`) rather than an audit trail entry (`debug`).
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        match self {
            Self::Recon { error } => !matches!(error, ReconError::ConflictResolved { .. }),
            Self::ConflictingCarrierType { .. } | Self::InvalidRow { .. } => true,
            Self::UnmappedIdentifier { .. } | Self::UnknownTerm { .. } => false,
        }
    }

    /// Forward the event to `tracing` at its level.
    pub fn emit(&self) {
        if self.is_warning() {
            tracing::warn!(diagnostic = %self, "reconciliation warning");
        } else {
            tracing::debug!(diagnostic = %self, "reconciliation event");
        }
    }
}

impl From<ReconError> for Diagnostic {
    fn from(error: ReconError) -> Self {
        Self::Recon { error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recon { error } => write!(f, "{error}"),
            Self::UnmappedIdentifier { table, object_id } => {
                write!(f, "No gene mapping for object {object_id} in '{table}'")
            }
            Self::UnknownTerm { term } => write!(f, "Term '{term}' is not in the thesaurus"),
            Self::ConflictingCarrierType { gene_symbol, codes } => {
                write!(f, "Conflicting carrier types {codes:?} for {gene_symbol}")
            }
            Self::InvalidRow { table, row, reason } => {
                write!(f, "Skipped row {row} of '{table}': {reason}")
            }
        }
    }
}

/// Receiver for reconciliation diagnostics.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);

    /// Convenience for reporting a [`ReconError`].
    fn recon(&mut self, error: ReconError) {
        self.record(Diagnostic::from(error));
    }
}

/// Sink that forwards to `tracing` and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
    }
}

/// Sink that forwards to `tracing` and collects every event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    #[must_use]
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Reconciliation errors only, in the order they were recorded.
    pub fn recon_errors(&self) -> impl Iterator<Item = &ReconError> {
        self.events.iter().filter_map(|d| match d {
            Diagnostic::Recon { error } => Some(error),
            _ => None,
        })
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}

impl DiagnosticSink for Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.events.push(diagnostic);
    }
}
