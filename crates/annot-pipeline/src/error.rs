//! Error types for annot-pipeline.

use annot_config::ConfigError;
use annot_core::CoreError;
use annot_stoich::StoichError;
use annot_vocab::VocabError;

/// Run-aborting failures. Per-row and per-gene problems are diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Required table '{0}' was not supplied")]
    MissingTable(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error(transparent)]
    Stoich(#[from] StoichError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
