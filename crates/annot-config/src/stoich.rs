//! Stoichiometry parser settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Substrate terms that carry no information and are removed from SLC tables.
pub const DEFAULT_DROP_TERMS: &[&str] = &[
    "possibly proton-linked",
    "Uncertain",
    "+",
    "?Ch",
    "H+ ?",
    "polyamines?",
    "probably organic anions",
    "E?",
    "not specific",
    "inconclusive",
    "glycine ?",
    "C ?",
    "nan",
    "?",
    "",
];

fn default_drop_terms() -> Vec<String> {
    DEFAULT_DROP_TERMS.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoichConfig {
    /// TOML table of manual notation overrides.
    #[serde(default)]
    pub overrides_path: Option<PathBuf>,

    /// NA-like substrate terms to drop.
    #[serde(default = "default_drop_terms")]
    pub drop_terms: Vec<String>,
}

impl Default for StoichConfig {
    fn default() -> Self {
        Self {
            overrides_path: None,
            drop_terms: default_drop_terms(),
        }
    }
}
