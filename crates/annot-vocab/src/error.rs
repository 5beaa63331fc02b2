//! Vocabulary error types for annot-vocab.

use annot_core::CoreError;

/// Structural errors that abort canonicalization of a table.
///
/// Per-row problems (misaligned explode lengths) are reported through a
/// `DiagnosticSink` instead.
#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Thesaurus is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Thesaurus renames '{term}' more than once")]
    DuplicateRename { term: String },

    #[error("Explode delimiter must not be empty")]
    EmptyDelimiter,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
