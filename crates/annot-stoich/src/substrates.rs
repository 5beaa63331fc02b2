//! Tokenizer for the free-text substrate columns of SLC tables.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use annot_core::enums::CarrierType;
use annot_core::{Diagnostic, DiagnosticSink};
use regex::Regex;

static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());

/// Split points, applied in order. The spaces around `and`/`or` matter.
const SEPARATORS: &[&str] = &["/", ",", ";", " and ", " or "];

/// Single-letter transport-type codes; `O` means "other" and maps to nothing.
const CARRIER_CODES: &[(&str, Option<CarrierType>)] = &[
    ("C", Some(CarrierType::Symporter)),
    ("E", Some(CarrierType::Antiporter)),
    ("F", Some(CarrierType::Uniporter)),
    ("O", None),
];

/// Tokenized substrates and transport mode of one SLC row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlcSubstrates {
    pub carrier_type: Option<CarrierType>,
    pub solutes: BTreeSet<String>,
}

/// Remove `(...)` and `[...]` annotations until none are left.
#[must_use]
pub fn purge_parentheticals(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = BRACKET_RE
            .replace_all(&PAREN_RE.replace_all(&current, ""), "")
            .trim()
            .to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Tokenize the substrate and transport-type cells of one SLC row.
///
/// Both cells are joined and split together, because the source mixes the
/// single-letter carrier codes in with solute names. Codes are pulled out
/// into `carrier_type`; `drop_terms` are removed from the solutes. Returns
/// `None` when both cells are empty.
pub fn tokenize_substrates(
    gene_symbol: &str,
    substrates: Option<&str>,
    transport_type: Option<&str>,
    drop_terms: &[String],
    sink: &mut dyn DiagnosticSink,
) -> Option<SlcSubstrates> {
    let joined = [substrates, transport_type]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(",");
    if joined.is_empty() {
        return None;
    }

    let purged = purge_parentheticals(&joined);
    let mut pieces = vec![purged];
    for separator in SEPARATORS {
        pieces = pieces
            .iter()
            .flat_map(|piece| piece.split(separator))
            .map(ToString::to_string)
            .collect();
    }
    let mut tokens: BTreeSet<String> = pieces.iter().map(|p| p.trim().to_string()).collect();

    let carrier_type = extract_carrier_type(gene_symbol, &tokens, sink);
    for (code, _) in CARRIER_CODES {
        tokens.remove(*code);
    }
    tokens.retain(|token| !drop_terms.iter().any(|term| term == token));

    Some(SlcSubstrates {
        carrier_type,
        solutes: tokens,
    })
}

/// The carrier type named by the single-letter codes among `tokens`.
///
/// More than one code is a conflict: it is reported and the type is unknown.
pub fn extract_carrier_type(
    gene_symbol: &str,
    tokens: &BTreeSet<String>,
    sink: &mut dyn DiagnosticSink,
) -> Option<CarrierType> {
    let found: Vec<&(&str, Option<CarrierType>)> = CARRIER_CODES
        .iter()
        .filter(|(code, _)| tokens.contains(*code))
        .collect();

    match found.as_slice() {
        [] => None,
        [(_, carrier)] => *carrier,
        conflicting => {
            sink.record(Diagnostic::ConflictingCarrierType {
                gene_symbol: gene_symbol.to_string(),
                codes: conflicting.iter().map(|(code, _)| (*code).to_string()).collect(),
            });
            None
        }
    }
}
