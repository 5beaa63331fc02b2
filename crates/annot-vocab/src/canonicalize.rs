//! Term canonicalization: rename, synonym expansion, explode.

use std::collections::BTreeSet;

use annot_core::{Cell, Diagnostic, DiagnosticSink, Table};

use crate::error::VocabError;
use crate::explode::explode_on;
use crate::thesaurus::Thesaurus;

/// Replace renamed terms in `column` with their canonical form.
///
/// One lookup per cell; renames do not chain. Returns the number of cells changed.
pub fn apply_rename(table: &mut Table, column: &str, thesaurus: &Thesaurus) -> Result<usize, VocabError> {
    let idx = table.require_column(column)?;
    let mut changed = 0;

    for row in &mut table.rows {
        let Cell::Text(term) = &row[idx] else {
            continue;
        };
        if let Some(target) = thesaurus.rename_of(term) {
            if target != term {
                row[idx] = Cell::from(target);
                changed += 1;
            }
        }
    }

    tracing::debug!(table = %table.name, column, changed, "applied thesaurus renames");
    Ok(changed)
}

/// Replace terms that have synonyms with `term<d>syn1<d>syn2...`.
///
/// The original term stays first, so exploding afterwards keeps the
/// original row alongside one row per synonym. Returns the number of cells
/// marked for exploding.
pub fn apply_synonym_expansion(
    table: &mut Table,
    column: &str,
    thesaurus: &Thesaurus,
    delimiter: &str,
) -> Result<usize, VocabError> {
    let idx = table.require_column(column)?;
    let mut expanded = 0;

    for row in &mut table.rows {
        let Cell::Text(term) = &row[idx] else {
            continue;
        };
        if let Some(synonyms) = thesaurus.synonyms_of(term).filter(|s| !s.is_empty()) {
            let mut joined = term.clone();
            for synonym in synonyms {
                joined.push_str(delimiter);
                joined.push_str(synonym);
            }
            row[idx] = Cell::Text(joined);
            expanded += 1;
        }
    }

    tracing::debug!(table = %table.name, column, expanded, "applied thesaurus synonyms");
    Ok(expanded)
}

/// Canonicalize `column`: rename, expand synonyms, explode on `delimiter`.
///
/// Cells that already arrive delimiter-joined are split first so that each
/// term meets the rules on its own. The result holds a single term per cell
/// in `column` and no duplicate rows.
pub fn canonicalize(
    table: Table,
    column: &str,
    thesaurus: &Thesaurus,
    delimiter: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<Table, VocabError> {
    if delimiter.is_empty() {
        return Err(VocabError::EmptyDelimiter);
    }

    let rows_in = table.len();
    let mut table = explode_on(&table, delimiter, &[column], sink)?;
    apply_rename(&mut table, column, thesaurus)?;
    apply_synonym_expansion(&mut table, column, thesaurus, delimiter)?;
    let table = explode_on(&table, delimiter, &[column], sink)?;

    tracing::info!(
        table = %table.name,
        rows_in,
        rows_out = table.len(),
        "canonicalized vocabulary column"
    );
    Ok(table)
}

/// Report every distinct text term in `column` the thesaurus does not know.
///
/// Terms are reported in sorted order; nothing is removed.
pub fn report_unknown_terms(
    table: &Table,
    column: &str,
    thesaurus: &Thesaurus,
    sink: &mut dyn DiagnosticSink,
) -> Result<usize, VocabError> {
    let known = thesaurus.known_terms();
    let unknown: BTreeSet<&str> = table
        .column_values(column)?
        .filter_map(Cell::as_text)
        .filter(|term| !known.contains(term))
        .collect();

    for term in &unknown {
        sink.record(Diagnostic::UnknownTerm {
            term: (*term).to_string(),
        });
    }
    Ok(unknown.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot_core::Diagnostics;
    use annot_core::entities::ThesaurusRule;
    use pretty_assertions::assert_eq;

    fn solutes(table: &Table) -> Vec<String> {
        table
            .column_values("carried_solute")
            .unwrap()
            .map(ToString::to_string)
            .collect()
    }

    fn one_column(values: &[&str]) -> Table {
        let mut table = Table::new("channels", &["ensg", "carried_solute"]);
        for value in values {
            table.push_row(vec!["G1".into(), (*value).into()]).unwrap();
        }
        table
    }

    #[test]
    fn synonym_rule_adds_a_row_per_synonym() {
        let thesaurus = Thesaurus::new(vec![ThesaurusRule::synonyms("Na+", ["cation"])]).unwrap();
        let mut sink = Diagnostics::new();
        let out = canonicalize(one_column(&["Na+"]), "carried_solute", &thesaurus, ",", &mut sink)
            .unwrap();
        assert_eq!(solutes(&out), vec!["Na+", "cation"]);
    }

    #[test]
    fn rename_then_synonyms() {
        let thesaurus = Thesaurus::new(vec![
            ThesaurusRule::rename("sodium", "Na+"),
            ThesaurusRule::synonyms("Na+", ["cation"]),
        ])
        .unwrap();
        let mut sink = Diagnostics::new();
        let out = canonicalize(
            one_column(&["sodium", "K+"]),
            "carried_solute",
            &thesaurus,
            ",",
            &mut sink,
        )
        .unwrap();
        assert_eq!(solutes(&out), vec!["Na+", "cation", "K+"]);
    }

    #[test]
    fn chained_renames_take_one_step_per_pass() {
        let thesaurus = Thesaurus::new(vec![
            ThesaurusRule::rename("sodium", "Na"),
            ThesaurusRule::rename("Na", "Na+"),
        ])
        .unwrap();
        let mut table = one_column(&["sodium", "Na"]);
        assert_eq!(apply_rename(&mut table, "carried_solute", &thesaurus).unwrap(), 2);
        assert_eq!(solutes(&table), vec!["Na", "Na+"]);
    }

    #[test]
    fn rename_is_idempotent_on_canonical_targets() {
        let thesaurus = Thesaurus::new(vec![
            ThesaurusRule::rename("sodium", "Na+"),
            ThesaurusRule::rename("potassium", "K+"),
        ])
        .unwrap();
        let mut table = one_column(&["sodium", "potassium", "Cl-"]);
        assert_eq!(apply_rename(&mut table, "carried_solute", &thesaurus).unwrap(), 2);
        let snapshot = table.clone();
        assert_eq!(apply_rename(&mut table, "carried_solute", &thesaurus).unwrap(), 0);
        assert_eq!(table, snapshot);
    }

    #[test]
    fn null_cells_are_left_alone() {
        let thesaurus = Thesaurus::new(vec![ThesaurusRule::synonyms("Na+", ["cation"])]).unwrap();
        let mut table = Table::new("channels", &["ensg", "carried_solute"]);
        table.push_row(vec!["G1".into(), Cell::Null]).unwrap();
        let mut sink = Diagnostics::new();
        let out = canonicalize(table, "carried_solute", &thesaurus, ",", &mut sink).unwrap();
        assert_eq!(out.rows, vec![vec![Cell::from("G1"), Cell::Null]]);
    }

    #[test]
    fn compound_cells_are_split_even_without_rules() {
        let thesaurus = Thesaurus::default();
        let mut sink = Diagnostics::new();
        let out = canonicalize(one_column(&["Na+,K+"]), "carried_solute", &thesaurus, ",", &mut sink)
            .unwrap();
        assert_eq!(solutes(&out), vec!["Na+", "K+"]);
    }

    #[test]
    fn precombined_cells_are_renamed_term_by_term() {
        let thesaurus = Thesaurus::new(vec![ThesaurusRule::rename("potassium", "K+")]).unwrap();
        let mut sink = Diagnostics::new();
        let out = canonicalize(
            one_column(&["Na+,potassium"]),
            "carried_solute",
            &thesaurus,
            ",",
            &mut sink,
        )
        .unwrap();
        assert_eq!(solutes(&out), vec!["Na+", "K+"]);
    }

    #[test]
    fn unknown_terms_are_reported_once_each() {
        let thesaurus = Thesaurus::new(vec![ThesaurusRule::synonyms("Na+", ["cation"])]).unwrap();
        let table = one_column(&["Na+", "glycine", "glycine", "betaine"]);
        let mut sink = Diagnostics::new();
        let count = report_unknown_terms(&table, "carried_solute", &thesaurus, &mut sink).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            sink.events(),
            &[
                Diagnostic::UnknownTerm { term: "betaine".into() },
                Diagnostic::UnknownTerm { term: "glycine".into() },
            ]
        );
    }

    #[test]
    fn missing_target_column_is_structural() {
        let thesaurus = Thesaurus::default();
        let mut sink = Diagnostics::new();
        let err = canonicalize(one_column(&[]), "ion", &thesaurus, ",", &mut sink).unwrap_err();
        assert!(matches!(err, VocabError::Core(_)));
    }
}
