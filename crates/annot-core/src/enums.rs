//! Controlled-vocabulary enums shared by the reconciliation crates.
//!
//! All enums use `snake_case`-style string forms via `as_str()`, which is also
//! what they serialize to and what ends up in canonical table cells.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction a solute is carried across the membrane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Parse the direction tag used in notation strings (`in` / `out`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Whether a source conductance is shown at face value or only usable for ranking.
///
/// Ordered so that `Visible` sorts before `Hidden`; grouping by
/// (gene, solute, visibility) therefore meets the authoritative row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    #[must_use]
    pub const fn from_hidden(is_hidden: bool) -> Self {
        if is_hidden { Self::Hidden } else { Self::Visible }
    }

    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GatingMechanism
// ---------------------------------------------------------------------------

/// A channel's activation modality.
///
/// The four HGNC-derived mechanisms are named variants; ontology-derived sets
/// supply free labels through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GatingMechanism {
    Voltage,
    Ligand,
    Ph,
    Stretch,
    Other(String),
}

impl GatingMechanism {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Voltage => "voltage",
            Self::Ligand => "ligand",
            Self::Ph => "pH",
            Self::Stretch => "stretch",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for GatingMechanism {
    fn from(value: String) -> Self {
        match value.as_str() {
            "voltage" => Self::Voltage,
            "ligand" => Self::Ligand,
            "pH" => Self::Ph,
            "stretch" => Self::Stretch,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for GatingMechanism {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<GatingMechanism> for String {
    fn from(value: GatingMechanism) -> Self {
        match value {
            GatingMechanism::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GatingMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for GatingMechanism {
    fn schema_name() -> Cow<'static, str> {
        "GatingMechanism".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({ "type": "string" })
    }
}

// ---------------------------------------------------------------------------
// CarrierType
// ---------------------------------------------------------------------------

/// Transport mode of a solute carrier, from the single-letter SLC table codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CarrierType {
    Symporter,
    Antiporter,
    Uniporter,
}

impl CarrierType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symporter => "symporter",
            Self::Antiporter => "antiporter",
            Self::Uniporter => "uniporter",
        }
    }
}

impl fmt::Display for CarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_sorts_before_hidden() {
        let mut v = vec![Visibility::Hidden, Visibility::Visible];
        v.sort();
        assert_eq!(v, vec![Visibility::Visible, Visibility::Hidden]);
    }

    #[test]
    fn gating_mechanism_string_roundtrip() {
        for label in ["voltage", "ligand", "pH", "stretch", "GO:0005216"] {
            let mechanism = GatingMechanism::from(label);
            assert_eq!(String::from(mechanism), label);
        }
        assert_eq!(GatingMechanism::from("pH"), GatingMechanism::Ph);
    }

    #[test]
    fn gating_mechanism_serializes_as_plain_string() {
        let json = serde_json::to_string(&GatingMechanism::Ph).unwrap();
        assert_eq!(json, "\"pH\"");
        let back: GatingMechanism = serde_json::from_str("\"cold\"").unwrap();
        assert_eq!(back, GatingMechanism::Other("cold".into()));
    }

    #[test]
    fn direction_tags() {
        assert_eq!(Direction::from_tag("in"), Some(Direction::In));
        assert_eq!(Direction::from_tag("out"), Some(Direction::Out));
        assert_eq!(Direction::from_tag("inout"), None);
    }
}
