//! # annot-vocab
//!
//! Controlled-vocabulary normalization for reconciled tables.
//!
//! - [`explode_on`]: split delimiter-joined cells and explode rows positionally,
//!   broadcasting single-valued cells, then deduplicate.
//! - [`Thesaurus`]: rename and synonym rules, loadable from CSV.
//! - [`canonicalize`]: rename, then synonym expansion, then explode on the
//!   target column, so every vocabulary cell holds exactly one term.

mod canonicalize;
mod error;
mod explode;
mod thesaurus;

pub use canonicalize::{apply_rename, apply_synonym_expansion, canonicalize, report_unknown_terms};
pub use error::VocabError;
pub use explode::explode_on;
pub use thesaurus::Thesaurus;
