//! Split-broadcast-explode over delimiter-joined cells.

use annot_core::{Cell, DiagnosticSink, ReconError, Row, Table};

use crate::error::VocabError;

/// Explode `table` on `delimiter` across `columns` (all columns when empty).
///
/// Every text cell in the chosen columns is split into a list; anything else
/// is a one-element list. Within a row, each list must have length 1 or the
/// row's maximum length. Length-1 lists are broadcast and the row expands
/// positionally: output row `i` takes element `i` of every list. Rows that
/// cannot be aligned are reported and dropped. Duplicate rows are removed,
/// keeping first occurrences.
pub fn explode_on(
    table: &Table,
    delimiter: &str,
    columns: &[&str],
    sink: &mut dyn DiagnosticSink,
) -> Result<Table, VocabError> {
    if delimiter.is_empty() {
        return Err(VocabError::EmptyDelimiter);
    }

    let targets: Vec<usize> = if columns.is_empty() {
        (0..table.columns.len()).collect()
    } else {
        columns
            .iter()
            .map(|column| table.require_column(column))
            .collect::<Result<_, _>>()?
    };

    let mut exploded = Table {
        name: table.name.clone(),
        columns: table.columns.clone(),
        rows: Vec::with_capacity(table.len()),
    };

    for row in &table.rows {
        let split: Vec<Vec<Cell>> = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                if targets.contains(&idx) {
                    split_cell(cell, delimiter)
                } else {
                    vec![cell.clone()]
                }
            })
            .collect();

        let lengths: Vec<usize> = split.iter().map(Vec::len).collect();
        let max_len = lengths.iter().copied().max().unwrap_or(1);

        if lengths.iter().any(|&len| len != 1 && len != max_len) {
            sink.recon(ReconError::IncompatibleExplodeLengths {
                row: row.iter().map(ToString::to_string).collect(),
                lengths,
            });
            continue;
        }

        for i in 0..max_len {
            let new_row: Row = split
                .iter()
                .map(|values| {
                    if values.len() == 1 {
                        values[0].clone()
                    } else {
                        values[i].clone()
                    }
                })
                .collect();
            exploded.rows.push(new_row);
        }
    }

    let before = exploded.len();
    exploded.dedup();
    tracing::debug!(
        table = %exploded.name,
        rows_in = table.len(),
        rows_out = exploded.len(),
        duplicates = before - exploded.len(),
        "exploded table"
    );

    Ok(exploded)
}

fn split_cell(cell: &Cell, delimiter: &str) -> Vec<Cell> {
    match cell {
        Cell::Text(text) => text.split(delimiter).map(Cell::from).collect(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot_core::Diagnostics;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn table(rows: Vec<Row>) -> Table {
        let mut table = Table::new("t", &["ensg", "solute", "direction"]);
        for row in rows {
            table.push_row(row).unwrap();
        }
        table
    }

    fn text_rows(table: &Table) -> Vec<Vec<String>> {
        table
            .rows
            .iter()
            .map(|r| r.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn singleton_columns_are_broadcast() {
        let input = table(vec![vec!["G1".into(), "Na+,K+".into(), "in".into()]]);
        let mut sink = Diagnostics::new();
        let out = explode_on(&input, ",", &["solute", "direction"], &mut sink).unwrap();
        assert_eq!(
            text_rows(&out),
            vec![vec!["G1", "Na+", "in"], vec!["G1", "K+", "in"]]
        );
        assert!(sink.is_empty());
    }

    #[rstest]
    #[case(",", "Na+,K+,Cl-", 3)]
    #[case("|", "Na+|K+", 2)]
    #[case("|", "Na+,K+", 1)]
    #[case(",", "Na+", 1)]
    fn splits_only_on_the_given_delimiter(
        #[case] delimiter: &str,
        #[case] solutes: &str,
        #[case] expected: usize,
    ) {
        let input = table(vec![vec!["G1".into(), solutes.into(), "in".into()]]);
        let mut sink = Diagnostics::new();
        let out = explode_on(&input, delimiter, &["solute"], &mut sink).unwrap();
        assert_eq!(out.len(), expected);
    }

    #[test]
    fn equal_lengths_explode_positionally_not_cartesian() {
        let input = table(vec![vec!["G1".into(), "Na+,K+".into(), "in,out".into()]]);
        let mut sink = Diagnostics::new();
        let out = explode_on(&input, ",", &["solute", "direction"], &mut sink).unwrap();
        assert_eq!(
            text_rows(&out),
            vec![vec!["G1", "Na+", "in"], vec!["G1", "K+", "out"]]
        );
    }

    #[test]
    fn incompatible_lengths_drop_only_that_row() {
        let input = table(vec![
            vec!["G1".into(), "Na+,K+,Cl-".into(), "in,out".into()],
            vec!["G2".into(), "Ca2+".into(), "out".into()],
        ]);
        let mut sink = Diagnostics::new();
        let out = explode_on(&input, ",", &["solute", "direction"], &mut sink).unwrap();
        assert_eq!(text_rows(&out), vec![vec!["G2", "Ca2+", "out"]]);

        let errors: Vec<_> = sink.recon_errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ReconError::IncompatibleExplodeLengths { lengths, .. } if lengths == &vec![1, 3, 2]
        ));
    }

    #[test]
    fn non_text_cells_are_singletons() {
        let mut input = Table::new("t", &["ensg", "count"]);
        input.push_row(vec!["G1,G2".into(), Cell::Int(2)]).unwrap();
        input.push_row(vec![Cell::Null, Cell::Null]).unwrap();
        let mut sink = Diagnostics::new();
        let out = explode_on(&input, ",", &[], &mut sink).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.rows[1], vec![Cell::from("G2"), Cell::Int(2)]);
        assert_eq!(out.rows[2], vec![Cell::Null, Cell::Null]);
    }

    #[test]
    fn duplicates_are_removed_after_exploding() {
        let input = table(vec![
            vec!["G1".into(), "Na+,Na+".into(), "in".into()],
            vec!["G1".into(), "Na+".into(), "in".into()],
        ]);
        let mut sink = Diagnostics::new();
        let out = explode_on(&input, ",", &["solute"], &mut sink).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn unknown_column_is_structural() {
        let input = table(vec![]);
        let mut sink = Diagnostics::new();
        let err = explode_on(&input, ",", &["gating"], &mut sink).unwrap_err();
        assert!(matches!(err, VocabError::Core(_)));
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let input = table(vec![]);
        let mut sink = Diagnostics::new();
        assert!(matches!(
            explode_on(&input, "", &[], &mut sink),
            Err(VocabError::EmptyDelimiter)
        ));
    }
}
