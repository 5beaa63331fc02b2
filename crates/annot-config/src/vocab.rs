//! Thesaurus and explode settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_target_column() -> String {
    "carried_solute".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabConfig {
    /// Thesaurus CSV with `original`, `change_to` and `synonyms` columns.
    #[serde(default)]
    pub thesaurus_path: Option<PathBuf>,

    /// Delimiter joining multiple terms in one cell.
    #[serde(default = "default_delimiter")]
    pub explode_delimiter: String,

    /// Column the thesaurus is applied to.
    #[serde(default = "default_target_column")]
    pub target_column: String,
}

impl VocabConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.thesaurus_path.is_some()
    }
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            thesaurus_path: None,
            explode_delimiter: default_delimiter(),
            target_column: default_target_column(),
        }
    }
}
