//! Error types for annot-stoich.

/// Structural failures loading stoichiometry configuration.
///
/// Per-notation parse failures are not errors; they are reported as
/// diagnostics and yield no entries.
#[derive(Debug, thiserror::Error)]
pub enum StoichError {
    #[error("Invalid override table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Override for '{notation}' {reason}")]
    InvalidOverride { notation: String, reason: String },

    #[error("Duplicate override for '{0}'")]
    DuplicateOverride(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
