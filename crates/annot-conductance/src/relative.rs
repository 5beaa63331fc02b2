use annot_core::entities::ConductanceRecord;
use annot_core::enums::Visibility;
use annot_core::{DiagnosticSink, ReconError};

use crate::dedup::ResolvedConductance;

/// Normalize one gene's resolved values against that gene's maximum.
///
/// The denominator is the largest visible (absolute) value, or the largest
/// hidden value when the gene has no visible ones. A gene whose denominator
/// is not positive fails as a whole. Individual solutes whose ratio falls
/// outside `(0, 1]` are reported and dropped.
pub fn compute_relative(
    gene_id: &str,
    values: &[ResolvedConductance],
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<ConductanceRecord>, ReconError> {
    let max_of = |visibility: Visibility| {
        values
            .iter()
            .filter(|r| r.visibility == visibility)
            .map(|r| r.value)
            .max_by(f64::total_cmp)
    };
    let denominator = max_of(Visibility::Visible).or_else(|| max_of(Visibility::Hidden));

    let denominator = match denominator {
        Some(max) if max > 0.0 => max,
        max => {
            return Err(ReconError::NoPositiveDenominator {
                gene_id: gene_id.to_string(),
                max,
            });
        }
    };

    let mut records = Vec::with_capacity(values.len());
    for resolved in values {
        let relative = resolved.value / denominator;
        if !(relative > 0.0 && relative <= 1.0) {
            sink.recon(ReconError::RelativeOutOfRange {
                gene_id: gene_id.to_string(),
                solute: resolved.solute.clone(),
                relative,
            });
            continue;
        }
        let absolute = (resolved.visibility == Visibility::Visible).then_some(resolved.value);
        records.push(ConductanceRecord::measured(
            gene_id,
            resolved.solute.clone(),
            absolute,
            relative,
        ));
    }

    tracing::debug!(gene_id, denominator, solutes = records.len(), "normalized gene");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot_core::Diagnostics;
    use pretty_assertions::assert_eq;

    fn resolved(solute: &str, visibility: Visibility, value: f64) -> ResolvedConductance {
        ResolvedConductance {
            gene_id: "G1".into(),
            solute: solute.into(),
            visibility,
            value,
        }
    }

    #[test]
    fn visible_values_set_the_scale() {
        let mut sink = Diagnostics::new();
        let records = compute_relative(
            "G1",
            &[
                resolved("K+", Visibility::Visible, 200.0),
                resolved("Na+", Visibility::Visible, 50.0),
                resolved("Rb+", Visibility::Hidden, 20.0),
            ],
            &mut sink,
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].relative_conductance, Some(1.0));
        assert_eq!(records[0].absolute_conductance, Some(200.0));
        assert_eq!(records[1].relative_conductance, Some(0.25));
        assert_eq!(records[2].relative_conductance, Some(0.1));
        assert_eq!(records[2].absolute_conductance, None);
        assert!(records.iter().all(ConductanceRecord::is_consistent));
    }

    #[test]
    fn hidden_only_gene_normalizes_on_hidden_max() {
        let mut sink = Diagnostics::new();
        let records = compute_relative(
            "G1",
            &[
                resolved("K+", Visibility::Hidden, 1.0),
                resolved("Na+", Visibility::Hidden, 0.5),
            ],
            &mut sink,
        )
        .unwrap();
        assert_eq!(records[0].relative_conductance, Some(1.0));
        assert_eq!(records[1].relative_conductance, Some(0.5));
        assert!(records.iter().all(|r| r.absolute_conductance.is_none()));
    }

    #[test]
    fn zero_maximum_fails_the_gene() {
        let mut sink = Diagnostics::new();
        let err = compute_relative("G1", &[resolved("K+", Visibility::Visible, 0.0)], &mut sink)
            .unwrap_err();
        assert_eq!(
            err,
            ReconError::NoPositiveDenominator {
                gene_id: "G1".into(),
                max: Some(0.0),
            }
        );
    }

    #[test]
    fn hidden_value_above_visible_scale_is_dropped() {
        let mut sink = Diagnostics::new();
        let records = compute_relative(
            "G1",
            &[
                resolved("K+", Visibility::Visible, 10.0),
                resolved("Na+", Visibility::Hidden, 40.0),
            ],
            &mut sink,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!(matches!(
            sink.recon_errors().next(),
            Some(ReconError::RelativeOutOfRange { solute, .. }) if solute == "Na+"
        ));
    }
}
