//! GRAC notation grammar.
//!
//! ```text
//! notation := mode (";" mode)*
//! mode     := side ":" side
//! side     := count? solute charge? ("(in)" | "(out)")?
//! count    := [0-9]{0,2}
//! charge   := [0-9]? ("+" | "-" | "*")
//! ```
//!
//! Parsing is a pure function of the normalized string and the override table.

use std::collections::HashSet;
use std::sync::LazyLock;

use annot_core::entities::{NetCharge, StoichiometryEntry, StoichiometryNotation};
use annot_core::enums::Direction;
use annot_core::{DiagnosticSink, ReconError};
use regex::Regex;

use crate::charge::{charge_to_int, net_charge};
use crate::overrides::{OverrideAction, OverrideTable};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.+?>").unwrap());

static PROBABLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Probably").unwrap());

static SIDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{0,2})(.+?)([0-9]?[+\-*]?)(?:\((in|out)\))?$").unwrap()
});

static PARENTHETICAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

/// Strip whitespace, markup tags, the qualifier "Probably", and one trailing period.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let untagged = TAG_RE.replace_all(&compact, "");
    let unqualified = PROBABLY_RE.replace_all(&untagged, "");
    unqualified
        .strip_suffix('.')
        .unwrap_or(unqualified.as_ref())
        .to_string()
}

/// One side of a `count solute charge (direction)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub count: Option<u32>,
    pub solute: String,
    pub charge: Option<i32>,
    pub direction: Option<Direction>,
}

impl Side {
    /// Parse one side. The error is a human-readable reason.
    pub fn parse(text: &str) -> Result<Self, String> {
        let caps = SIDE_RE
            .captures(text)
            .ok_or_else(|| format!("side '{text}' does not name a solute"))?;

        let count = caps
            .get(1)
            .filter(|m| !m.as_str().is_empty())
            .and_then(|m| m.as_str().parse().ok());
        let solute = caps
            .get(2)
            .map(|m| PARENTHETICAL_RE.replace_all(m.as_str(), "").into_owned())
            .unwrap_or_default();
        if solute.is_empty() {
            return Err(format!("side '{text}' has an empty solute"));
        }
        let charge = caps.get(3).and_then(|m| charge_to_int(m.as_str()));
        let direction = caps.get(4).and_then(|m| Direction::from_tag(m.as_str()));

        Ok(Self {
            count,
            solute,
            charge,
            direction,
        })
    }

    /// Count, charge and direction are all stated.
    #[must_use]
    pub const fn is_fully_specified(&self) -> bool {
        self.count.is_some() && self.charge.is_some() && self.direction.is_some()
    }

    fn entry(&self, gene_id: &str, net_charge: NetCharge) -> StoichiometryEntry {
        StoichiometryEntry::builder(gene_id, self.solute.as_str())
            .direction(self.direction)
            .count(self.count)
            .net_charge(net_charge)
            .build()
    }
}

/// Stoichiometry parser bound to an override table.
#[derive(Debug, Clone, Default)]
pub struct NotationParser {
    overrides: OverrideTable,
}

impl NotationParser {
    #[must_use]
    pub const fn new(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    #[must_use]
    pub const fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Parse one notation into zero or more entries.
    ///
    /// Entries come in pairs, one per side of each transport mode. Failures
    /// are reported to `sink` and yield nothing.
    pub fn parse(
        &self,
        notation: &StoichiometryNotation,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<StoichiometryEntry> {
        let gene_id = notation.gene_id.as_str();
        let Some(raw) = notation.notation.as_deref() else {
            return Vec::new();
        };
        if raw.contains("Unknown") {
            tracing::debug!(gene_id, notation = raw, "notation marked unknown; skipping");
            return Vec::new();
        }

        self.parse_normalized(gene_id, &normalize(raw), sink)
    }

    /// Parse every notation, dropping duplicate entries and keeping first occurrences.
    pub fn parse_all<'a>(
        &self,
        notations: impl IntoIterator<Item = &'a StoichiometryNotation>,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<StoichiometryEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut parsed = 0usize;

        for notation in notations {
            parsed += 1;
            for entry in self.parse(notation, sink) {
                if seen.insert(entry.clone()) {
                    entries.push(entry);
                }
            }
        }

        tracing::info!(notations = parsed, entries = entries.len(), "parsed stoichiometries");
        entries
    }

    fn parse_normalized(
        &self,
        gene_id: &str,
        normalized: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<StoichiometryEntry> {
        match self.overrides.get(normalized) {
            Some(OverrideAction::Drop) => {
                tracing::debug!(gene_id, notation = normalized, "override drops notation");
                return Vec::new();
            }
            Some(OverrideAction::Entries(entries)) => {
                tracing::debug!(gene_id, notation = normalized, "override supplies entries");
                return entries.iter().map(|e| e.bind(gene_id)).collect();
            }
            None => {}
        }

        if normalized.contains(';') {
            let mut entries = Vec::new();
            for (mode, segment) in (1u32..).zip(normalized.split(';')) {
                if segment.is_empty() {
                    continue;
                }
                entries.extend(
                    self.parse_normalized(gene_id, segment, sink)
                        .into_iter()
                        .map(|entry| entry.with_mode(mode)),
                );
            }
            return entries;
        }

        parse_mode(gene_id, normalized, sink)
    }
}

fn parse_mode(gene_id: &str, notation: &str, sink: &mut dyn DiagnosticSink) -> Vec<StoichiometryEntry> {
    let fail = |reason: String| ReconError::NotationParse {
        gene_id: gene_id.to_string(),
        notation: notation.to_string(),
        reason,
    };

    let parts: Vec<&str> = notation.split(':').collect();
    let [first, second] = parts.as_slice() else {
        sink.recon(fail(format!("expected two sides, found {}", parts.len())));
        return Vec::new();
    };

    let sides = Side::parse(first).and_then(|a| Side::parse(second).map(|b| (a, b)));
    let (first, second) = match sides {
        Ok(sides) => sides,
        Err(reason) => {
            sink.recon(fail(reason));
            return Vec::new();
        }
    };

    let net = net_charge(&first, &second);
    tracing::debug!(
        gene_id,
        notation,
        first = %first.solute,
        second = %second.solute,
        net_charge = %net,
        "parsed notation"
    );

    vec![first.entry(gene_id, net), second.entry(gene_id, net)]
}
