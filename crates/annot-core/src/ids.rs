//! Ensembl identifier parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::errors::CoreError;

static ENSEMBL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ENS(FM|GT|[EGPRT])([0-9]{11})(?:\.([0-9]+))?$").unwrap());

/// What kind of object an Ensembl identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsemblKind {
    Exon,
    ProteinFamily,
    Gene,
    GeneTree,
    Protein,
    RegulatoryFeature,
    Transcript,
}

impl EnsemblKind {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "E" => Some(Self::Exon),
            "FM" => Some(Self::ProteinFamily),
            "G" => Some(Self::Gene),
            "GT" => Some(Self::GeneTree),
            "P" => Some(Self::Protein),
            "R" => Some(Self::RegulatoryFeature),
            "T" => Some(Self::Transcript),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exon => "exon",
            Self::ProteinFamily => "protein family",
            Self::Gene => "gene",
            Self::GeneTree => "gene tree",
            Self::Protein => "protein",
            Self::RegulatoryFeature => "regulatory feature",
            Self::Transcript => "transcript",
        }
    }
}

impl fmt::Display for EnsemblKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deconstructed Ensembl identifier, e.g. `ENSG00000141510.17`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnsemblId {
    pub full_id: String,
    pub kind: EnsemblKind,
    pub identifier: u64,
    pub version: Option<u32>,
}

impl EnsemblId {
    /// Parse a full identifier, with or without a version suffix.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Validation(format!("invalid Ensembl id '{raw}'"));

        let caps = ENSEMBL_ID_RE.captures(raw).ok_or_else(invalid)?;
        let kind = EnsemblKind::from_prefix(&caps[1]).ok_or_else(invalid)?;
        let identifier = caps[2].parse().map_err(|_| invalid())?;
        let version = caps
            .get(3)
            .map(|m| m.as_str().parse())
            .transpose()
            .map_err(|_| invalid())?;

        Ok(Self {
            full_id: raw.to_string(),
            kind,
            identifier,
            version,
        })
    }

    /// The identifier without its version suffix.
    #[must_use]
    pub fn unversioned(&self) -> &str {
        self.full_id
            .split_once('.')
            .map_or(self.full_id.as_str(), |(head, _)| head)
    }

    #[must_use]
    pub fn is_gene(&self) -> bool {
        self.kind == EnsemblKind::Gene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ENSG00000141510", EnsemblKind::Gene, None)]
    #[case("ENSG00000141510.17", EnsemblKind::Gene, Some(17))]
    #[case("ENST00000269305.9", EnsemblKind::Transcript, Some(9))]
    #[case("ENSP00000269305", EnsemblKind::Protein, None)]
    #[case("ENSFM00250000002", EnsemblKind::ProteinFamily, None)]
    #[case("ENSGT00940000153", EnsemblKind::GeneTree, None)]
    fn parses_kinds(#[case] raw: &str, #[case] kind: EnsemblKind, #[case] version: Option<u32>) {
        let id = EnsemblId::parse(raw).unwrap();
        assert_eq!(id.kind, kind);
        assert_eq!(id.version, version);
    }

    #[test]
    fn strips_version() {
        let id = EnsemblId::parse("ENSG00000141510.17").unwrap();
        assert_eq!(id.unversioned(), "ENSG00000141510");
        assert_eq!(id.identifier, 141_510);
        assert!(id.is_gene());
    }

    #[rstest]
    #[case("")]
    #[case("ENSX00000141510")]
    #[case("ENSG0000014151")]
    #[case("ENSG000001415100")]
    #[case("NM_000546.6")]
    fn rejects_invalid(#[case] raw: &str) {
        assert!(matches!(EnsemblId::parse(raw), Err(CoreError::Validation(_))));
    }
}
