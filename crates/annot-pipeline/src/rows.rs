//! Typed rows of the raw source tables.
//!
//! Column names follow the source files; the lenient deserializers in
//! [`crate::raw`] absorb the text-typed cells.

use serde::Deserialize;

use crate::raw::{RawRecord, de};

/// One conductance observation for a source object and ion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectivityRow {
    #[serde(deserialize_with = "de::text")]
    pub object_id: String,
    #[serde(deserialize_with = "de::text")]
    pub ion: String,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub conductance_high: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub conductance_low: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub conductance_median: Option<f64>,
    #[serde(deserialize_with = "de::flag")]
    pub hide_conductance: bool,
    #[serde(deserialize_with = "de::text")]
    pub species_id: String,
}

impl RawRecord for SelectivityRow {
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "object_id",
        "ion",
        "conductance_high",
        "conductance_low",
        "conductance_median",
        "hide_conductance",
        "species_id",
    ];
}

/// Link from a source object to an external database record.
///
/// For Ensembl links, `placeholder` holds the gene id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseLinkRow {
    #[serde(deserialize_with = "de::text")]
    pub object_id: String,
    #[serde(deserialize_with = "de::text")]
    pub database_id: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub species_id: Option<String>,
}

impl RawRecord for DatabaseLinkRow {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["object_id", "database_id", "placeholder", "species_id"];
}

/// A transporter object and its free-text stoichiometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransporterRow {
    #[serde(deserialize_with = "de::text")]
    pub object_id: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub grac_stoichiometry: Option<String>,
}

impl RawRecord for TransporterRow {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["object_id", "grac_stoichiometry"];
}

/// A drug target and its family type (`lgic`, `vgic`, `gpcr`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetFamilyRow {
    #[serde(rename = "Target id", deserialize_with = "de::text")]
    pub target_id: String,
    #[serde(rename = "Type", default, deserialize_with = "de::opt_text")]
    pub target_type: Option<String>,
}

impl RawRecord for TargetFamilyRow {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["Target id", "Type"];
}

/// A member of an HGNC gene group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HgncGeneRow {
    #[serde(rename = "Ensembl gene ID", default, deserialize_with = "de::opt_text")]
    pub ensembl_gene_id: Option<String>,
    #[serde(rename = "Approved symbol", default, deserialize_with = "de::opt_text")]
    pub approved_symbol: Option<String>,
}

impl RawRecord for HgncGeneRow {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["Ensembl gene ID"];
}

/// One row of the SLC tables: substrates and transport type by gene symbol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlcRow {
    #[serde(rename = "SLC name", deserialize_with = "de::text")]
    pub symbol: String,
    #[serde(rename = "Transport type*", default, deserialize_with = "de::opt_text")]
    pub transport_type: Option<String>,
    #[serde(rename = "Substrates", default, deserialize_with = "de::opt_text")]
    pub substrates: Option<String>,
}

impl RawRecord for SlcRow {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["SLC name", "Transport type*", "Substrates"];
}
