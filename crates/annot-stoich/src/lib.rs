//! # annot-stoich
//!
//! Turns free-text GRAC transporter stoichiometry notations into structured,
//! charge-balanced [`StoichiometryEntry`](annot_core::entities::StoichiometryEntry)
//! pairs, and tokenizes the free-text substrate columns of SLC tables.
//!
//! Notations the grammar cannot handle are routed through an injectable
//! [`OverrideTable`]; anything else that fails to parse is reported and
//! yields no entries.

pub mod charge;
pub mod error;
pub mod notation;
pub mod overrides;
pub mod substrates;

pub use charge::{charge_to_int, net_charge};
pub use error::StoichError;
pub use notation::{NotationParser, Side, normalize};
pub use overrides::{OverrideAction, OverrideEntry, OverrideTable};
pub use substrates::{SlcSubstrates, extract_carrier_type, purge_parentheticals, tokenize_substrates};
