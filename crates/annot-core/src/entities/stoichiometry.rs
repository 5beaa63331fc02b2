use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::enums::Direction;

/// A free-text transporter stoichiometry string and the gene that owns it.
///
/// `notation` is `None` when the source cell was empty or not text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoichiometryNotation {
    pub gene_id: String,
    pub notation: Option<String>,
}

impl StoichiometryNotation {
    #[must_use]
    pub fn new(gene_id: impl Into<String>, notation: impl Into<String>) -> Self {
        Self {
            gene_id: gene_id.into(),
            notation: Some(notation.into()),
        }
    }
}

/// Net charge moved per transport cycle.
///
/// `Unknown` is distinct from `Known(0)`: it means at least one side of the
/// notation did not state count, charge, and direction. Serializes as an
/// integer or as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetCharge {
    Known(i32),
    #[default]
    Unknown,
}

impl NetCharge {
    #[must_use]
    pub const fn value(self) -> Option<i32> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for NetCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v}"),
            Self::Unknown => f.write_str("false"),
        }
    }
}

impl Serialize for NetCharge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.serialize_i32(*v),
            Self::Unknown => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for NetCharge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i32),
            Bool(bool),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(Self::Known(v)),
            Repr::Bool(false) => Ok(Self::Unknown),
            Repr::Bool(true) => Err(serde::de::Error::custom(
                "net charge must be an integer or false",
            )),
        }
    }
}

impl JsonSchema for NetCharge {
    fn schema_name() -> Cow<'static, str> {
        "NetCharge".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "oneOf": [
                { "type": "integer" },
                { "const": false }
            ]
        })
    }
}

/// One side of a parsed stoichiometry notation.
///
/// Entries come in pairs sharing `gene_id`, `net_charge` and `mode_index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct StoichiometryEntry {
    pub gene_id: String,
    pub carried_solute: String,
    pub direction: Option<Direction>,
    pub stoichiometry_count: Option<u32>,
    pub net_charge: NetCharge,
    /// 1-based position of the transport mode when the notation listed alternatives.
    pub mode_index: Option<u32>,
}

impl StoichiometryEntry {
    #[must_use]
    pub fn builder(gene_id: impl Into<String>, carried_solute: impl Into<String>) -> StoichiometryEntryBuilder {
        StoichiometryEntryBuilder {
            gene_id: gene_id.into(),
            carried_solute: carried_solute.into(),
            direction: None,
            stoichiometry_count: None,
            net_charge: NetCharge::Unknown,
            mode_index: None,
        }
    }

    /// Copy of this entry tagged with a transport mode.
    #[must_use]
    pub fn with_mode(self, mode_index: u32) -> Self {
        Self {
            mode_index: Some(mode_index),
            ..self
        }
    }
}

/// Builder for [`StoichiometryEntry`].
#[derive(Debug, Clone)]
#[must_use]
pub struct StoichiometryEntryBuilder {
    gene_id: String,
    carried_solute: String,
    direction: Option<Direction>,
    stoichiometry_count: Option<u32>,
    net_charge: NetCharge,
    mode_index: Option<u32>,
}

impl StoichiometryEntryBuilder {
    pub const fn direction(mut self, direction: Option<Direction>) -> Self {
        self.direction = direction;
        self
    }

    pub const fn count(mut self, count: Option<u32>) -> Self {
        self.stoichiometry_count = count;
        self
    }

    pub const fn net_charge(mut self, net_charge: NetCharge) -> Self {
        self.net_charge = net_charge;
        self
    }

    pub const fn mode_index(mut self, mode_index: Option<u32>) -> Self {
        self.mode_index = mode_index;
        self
    }

    #[must_use]
    pub fn build(self) -> StoichiometryEntry {
        StoichiometryEntry {
            gene_id: self.gene_id,
            carried_solute: self.carried_solute,
            direction: self.direction,
            stoichiometry_count: self.stoichiometry_count,
            net_charge: self.net_charge,
            mode_index: self.mode_index,
        }
    }
}
