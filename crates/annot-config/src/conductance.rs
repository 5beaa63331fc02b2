//! Conductance aggregation settings.

use serde::{Deserialize, Serialize};

fn default_species() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_ensembl_database_id() -> String {
    "15".to_string()
}

fn default_ensembl_species() -> String {
    "1".to_string()
}

fn default_channel_target_types() -> Vec<String> {
    ["lgic", "vgic", "other_ic"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConductanceConfig {
    /// Species tags whose selectivity rows are aggregated (`1` is human).
    #[serde(default = "default_species")]
    pub species: Vec<String>,

    /// Database id of Ensembl in the database-link table.
    #[serde(default = "default_ensembl_database_id")]
    pub ensembl_database_id: String,

    /// Species tag of the database links to keep.
    #[serde(default = "default_ensembl_species")]
    pub ensembl_species: String,

    /// Target-family types that denote ion channels.
    #[serde(default = "default_channel_target_types")]
    pub channel_target_types: Vec<String>,
}

impl Default for ConductanceConfig {
    fn default() -> Self {
        Self {
            species: default_species(),
            ensembl_database_id: default_ensembl_database_id(),
            ensembl_species: default_ensembl_species(),
            channel_target_types: default_channel_target_types(),
        }
    }
}
