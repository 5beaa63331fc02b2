//! Aggregation scenarios over realistic observation batches.

use annot_conductance::{aggregate, fill_in_permeability, merge_gating, sort_records};
use annot_core::entities::RawObservation;
use annot_core::enums::GatingMechanism;
use annot_core::{Diagnostics, ReconError};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn obs(
    gene: &str,
    solute: &str,
    high: Option<f64>,
    low: Option<f64>,
    median: Option<f64>,
    hidden: bool,
) -> RawObservation {
    RawObservation {
        gene_id: gene.into(),
        solute_symbol: solute.into(),
        value_high: high,
        value_low: low,
        value_median: median,
        is_hidden: hidden,
        species: "1".into(),
    }
}

#[test]
fn hidden_ratio_is_superseded_by_visible_conductance() {
    let batch = [
        obs("ENSG00000080709", "K+", None, None, Some(1.0), true),
        obs("ENSG00000080709", "K+", None, None, Some(272.0), false),
    ];
    let mut sink = Diagnostics::new();
    let outcome = aggregate(&batch, &mut sink);

    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.absolute_conductance, Some(272.0));
    assert_eq!(record.relative_conductance, Some(1.0));
    assert!(outcome.failures.is_empty());
}

#[rstest]
#[case::mixed(vec![
    obs("G1", "K+", Some(300.0), Some(100.0), None, false),
    obs("G1", "Na+", None, None, Some(12.0), false),
    obs("G1", "Li+", None, None, Some(0.2), true),
    obs("G2", "Ca2+", None, None, Some(3.0), true),
    obs("G2", "Ba2+", None, None, Some(1.5), true),
])]
#[case::duplicates(vec![
    obs("G3", "Cl-", None, None, Some(4.0), false),
    obs("G3", "Cl-", None, None, Some(8.0), false),
    obs("G3", "I-", Some(9.0), None, None, false),
])]
fn relative_values_stay_in_unit_interval(#[case] batch: Vec<RawObservation>) {
    let mut sink = Diagnostics::new();
    let outcome = aggregate(&batch, &mut sink);
    assert!(!outcome.records.is_empty());
    for record in &outcome.records {
        assert!(record.is_consistent(), "{record:?}");
        let relative = record.relative_conductance.unwrap();
        assert!(relative > 0.0 && relative <= 1.0);
    }
}

#[test]
fn aggregation_is_independent_of_input_order() {
    let batch = vec![
        obs("G1", "K+", None, None, Some(10.0), false),
        obs("G1", "K+", None, None, Some(20.0), false),
        obs("G2", "Na+", Some(4.0), Some(2.0), None, true),
        obs("G1", "Na+", None, None, Some(5.0), false),
    ];
    let mut reversed = batch.clone();
    reversed.reverse();

    let forward = aggregate(&batch, &mut Diagnostics::new());
    let backward = aggregate(&reversed, &mut Diagnostics::new());
    assert_eq!(forward, backward);
}

#[test]
fn full_annotation_pass() {
    let batch = [
        obs("G1", "K+", None, None, Some(50.0), false),
        obs("G2", "K+", None, None, None, false),
    ];
    let mut sink = Diagnostics::new();
    let mut records = aggregate(&batch, &mut sink).records;

    fill_in_permeability(&mut records, &[("Na+".into(), vec!["G1".into(), "G2".into()])]);
    merge_gating(&mut records, &[(GatingMechanism::Voltage, vec!["G2".into()])]);
    sort_records(&mut records);

    let summary: Vec<(String, Option<String>, Option<f64>, usize)> = records
        .iter()
        .map(|r| {
            (
                r.gene_id.clone(),
                r.solute.clone(),
                r.relative_conductance,
                r.gating_mechanisms.len(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("G1".into(), Some("K+".into()), Some(1.0), 0),
            ("G1".into(), Some("Na+".into()), None, 0),
            ("G2".into(), Some("Na+".into()), None, 1),
        ]
    );
    assert!(matches!(
        sink.recon_errors().next(),
        Some(ReconError::MissingValue { gene_id, .. }) if gene_id == "G2"
    ));
}
