//! Record structs for raw inputs and reconciled entities.
//!
//! Raw records (`RawObservation`, `StoichiometryNotation`) are created by the
//! caller once per run and consumed once. Reconciled records
//! (`ConductanceRecord`, `StoichiometryEntry`) are produced by the core and
//! handed back; nothing here is held between runs.

mod conductance;
mod observation;
mod stoichiometry;
mod thesaurus;

pub use conductance::ConductanceRecord;
pub use observation::RawObservation;
pub use stoichiometry::{NetCharge, StoichiometryEntry, StoichiometryEntryBuilder, StoichiometryNotation};
pub use thesaurus::ThesaurusRule;
