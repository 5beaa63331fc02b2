use std::collections::BTreeMap;

use annot_core::entities::{ConductanceRecord, RawObservation};
use annot_core::enums::Visibility;
use annot_core::{DiagnosticSink, ReconError};
use serde::Serialize;

use crate::dedup::{ResolvedConductance, deduplicate_visibility};
use crate::median::resolve_pseudo_median;
use crate::relative::compute_relative;

/// Result of aggregating a batch of observations.
///
/// `failures` holds the genes that could not be normalized; their solutes are
/// absent from `records`. Every failure has also been sent to the sink.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationOutcome {
    pub records: Vec<ConductanceRecord>,
    pub failures: Vec<ReconError>,
}

/// Resolve, deduplicate and normalize `observations`.
///
/// Output order is gene, then solute, independent of input order.
pub fn aggregate(observations: &[RawObservation], sink: &mut dyn DiagnosticSink) -> AggregationOutcome {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<(Visibility, f64)>>> = BTreeMap::new();

    for obs in observations {
        match resolve_pseudo_median(obs) {
            Ok(value) => grouped
                .entry(obs.gene_id.as_str())
                .or_default()
                .entry(obs.solute_symbol.as_str())
                .or_default()
                .push((obs.visibility(), value)),
            Err(err) => sink.recon(err),
        }
    }

    let mut outcome = AggregationOutcome::default();
    for (gene_id, solutes) in grouped {
        let resolved: Vec<ResolvedConductance> = solutes
            .iter()
            .filter_map(|(solute, values)| deduplicate_visibility(gene_id, solute, values, sink))
            .collect();

        match compute_relative(gene_id, &resolved, sink) {
            Ok(records) => outcome.records.extend(records),
            Err(err) => {
                sink.recon(err.clone());
                outcome.failures.push(err);
            }
        }
    }

    tracing::info!(
        observations = observations.len(),
        records = outcome.records.len(),
        failed_genes = outcome.failures.len(),
        "aggregated conductances"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot_core::Diagnostics;
    use pretty_assertions::assert_eq;

    fn obs(gene: &str, solute: &str, median: Option<f64>, hidden: bool) -> RawObservation {
        RawObservation {
            gene_id: gene.into(),
            solute_symbol: solute.into(),
            value_high: None,
            value_low: None,
            value_median: median,
            is_hidden: hidden,
            species: "1".into(),
        }
    }

    #[test]
    fn missing_values_are_dropped_and_reported() {
        let mut sink = Diagnostics::new();
        let outcome = aggregate(
            &[obs("G1", "K+", Some(10.0), false), obs("G1", "Na+", None, false)],
            &mut sink,
        );
        assert_eq!(outcome.records.len(), 1);
        assert!(matches!(
            sink.recon_errors().next(),
            Some(ReconError::MissingValue { solute, .. }) if solute == "Na+"
        ));
    }

    #[test]
    fn failing_gene_does_not_affect_others() {
        let mut sink = Diagnostics::new();
        let outcome = aggregate(
            &[obs("G1", "K+", Some(0.0), false), obs("G2", "K+", Some(5.0), false)],
            &mut sink,
        );
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].gene_id, "G2");
        assert_eq!(
            outcome.failures,
            vec![ReconError::NoPositiveDenominator {
                gene_id: "G1".into(),
                max: Some(0.0),
            }]
        );
    }

    #[test]
    fn output_is_sorted_by_gene_then_solute() {
        let mut sink = Diagnostics::new();
        let outcome = aggregate(
            &[
                obs("G2", "Na+", Some(1.0), false),
                obs("G1", "Na+", Some(1.0), false),
                obs("G1", "K+", Some(2.0), false),
            ],
            &mut sink,
        );
        let keys: Vec<(&str, Option<&str>)> = outcome
            .records
            .iter()
            .map(|r| (r.gene_id.as_str(), r.solute.as_deref()))
            .collect();
        assert_eq!(
            keys,
            vec![("G1", Some("K+")), ("G1", Some("Na+")), ("G2", Some("Na+"))]
        );
    }
}
