use annot_core::errors::ConflictResolution;
use annot_core::{Diagnostic, ReconError};
use serde::Serialize;

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconReport {
    pub observations_in: usize,
    pub channel_rows: usize,
    pub notations_in: usize,
    pub stoichiometry_entries: usize,
    pub solute_carrier_rows: usize,
    pub missing_values: usize,
    pub averaged_conflicts: usize,
    pub visibility_conflicts: usize,
    pub parse_failures: usize,
    pub dropped_rows: usize,
    pub unknown_terms: usize,
    /// Genes whose conductances could not be normalized.
    pub failed_genes: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReconReport {
    /// Tally `diagnostics` into the counters and keep them.
    pub fn absorb(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::Recon { error } => self.count(error),
                Diagnostic::InvalidRow { .. } | Diagnostic::UnmappedIdentifier { .. } => {
                    self.dropped_rows += 1;
                }
                Diagnostic::UnknownTerm { .. } => self.unknown_terms += 1,
                Diagnostic::ConflictingCarrierType { .. } => {}
            }
        }
        self.diagnostics.extend(diagnostics);
    }

    fn count(&mut self, error: &ReconError) {
        match error {
            ReconError::MissingValue { .. } => self.missing_values += 1,
            ReconError::ConflictResolved { resolution, .. } => match resolution {
                ConflictResolution::Averaged => self.averaged_conflicts += 1,
                ConflictResolution::VisibilityPrecedence => self.visibility_conflicts += 1,
            },
            ReconError::NotationParse { .. } => self.parse_failures += 1,
            ReconError::IncompatibleExplodeLengths { .. } | ReconError::RelativeOutOfRange { .. } => {
                self.dropped_rows += 1;
            }
            ReconError::NoPositiveDenominator { .. } => {}
        }
    }

    /// Whether anything was dropped or failed outright.
    #[must_use]
    pub fn has_losses(&self) -> bool {
        self.missing_values + self.parse_failures + self.dropped_rows > 0 || !self.failed_genes.is_empty()
    }
}
