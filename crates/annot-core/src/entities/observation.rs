use serde::{Deserialize, Serialize};

use crate::enums::Visibility;

/// One source-database row describing a candidate conductance measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub gene_id: String,
    pub solute_symbol: String,
    pub value_high: Option<f64>,
    pub value_low: Option<f64>,
    pub value_median: Option<f64>,
    pub is_hidden: bool,
    /// Provenance species tag from the source database.
    pub species: String,
}

impl RawObservation {
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        Visibility::from_hidden(self.is_hidden)
    }
}
