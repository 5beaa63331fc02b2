use annot_core::enums::Visibility;
use annot_core::errors::ConflictResolution;
use annot_core::{DiagnosticSink, ReconError};

/// One conductance value per (gene, solute), after visibility resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConductance {
    pub gene_id: String,
    pub solute: String,
    pub visibility: Visibility,
    pub value: f64,
}

/// Collapse all values observed for one (gene, solute) into one.
///
/// Visible values beat hidden ones. Whatever remains at the winning
/// visibility is averaged. Each conflict is reported as
/// [`ReconError::ConflictResolved`]. Returns `None` for an empty input.
pub fn deduplicate_visibility(
    gene_id: &str,
    solute: &str,
    values: &[(Visibility, f64)],
    sink: &mut dyn DiagnosticSink,
) -> Option<ResolvedConductance> {
    let winner = values.iter().map(|(v, _)| *v).min()?;

    let mut kept: Vec<f64> = values
        .iter()
        .filter(|(v, _)| *v == winner)
        .map(|(_, x)| *x)
        .collect();
    kept.sort_by(f64::total_cmp);

    if kept.len() < values.len() {
        let mut discarded: Vec<f64> = values
            .iter()
            .filter(|(v, _)| *v != winner)
            .map(|(_, x)| *x)
            .collect();
        discarded.sort_by(f64::total_cmp);
        sink.recon(ReconError::ConflictResolved {
            gene_id: gene_id.to_string(),
            solute: solute.to_string(),
            resolution: ConflictResolution::VisibilityPrecedence,
            values: discarded,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let value = kept.iter().sum::<f64>() / kept.len() as f64;

    if kept.len() > 1 {
        sink.recon(ReconError::ConflictResolved {
            gene_id: gene_id.to_string(),
            solute: solute.to_string(),
            resolution: ConflictResolution::Averaged,
            values: kept,
        });
    }

    Some(ResolvedConductance {
        gene_id: gene_id.to_string(),
        solute: solute.to_string(),
        visibility: winner,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot_core::Diagnostics;
    use pretty_assertions::assert_eq;

    #[test]
    fn visible_beats_hidden() {
        let mut sink = Diagnostics::new();
        let resolved = deduplicate_visibility(
            "ENSG00000080709",
            "K+",
            &[(Visibility::Hidden, 1.0), (Visibility::Visible, 272.0)],
            &mut sink,
        )
        .unwrap();
        assert_eq!(resolved.visibility, Visibility::Visible);
        assert_eq!(resolved.value, 272.0);

        let errors: Vec<_> = sink.recon_errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ReconError::ConflictResolved {
                resolution: ConflictResolution::VisibilityPrecedence,
                values,
                ..
            } if values == &vec![1.0]
        ));
    }

    #[test]
    fn same_visibility_is_averaged() {
        let mut sink = Diagnostics::new();
        let resolved = deduplicate_visibility(
            "G1",
            "Na+",
            &[(Visibility::Visible, 10.0), (Visibility::Visible, 20.0)],
            &mut sink,
        )
        .unwrap();
        assert_eq!(resolved.value, 15.0);
        assert!(matches!(
            sink.recon_errors().next(),
            Some(ReconError::ConflictResolved {
                resolution: ConflictResolution::Averaged,
                ..
            })
        ));
    }

    #[test]
    fn only_hidden_values_survive_as_hidden() {
        let mut sink = Diagnostics::new();
        let resolved =
            deduplicate_visibility("G1", "Ca2+", &[(Visibility::Hidden, 0.4)], &mut sink).unwrap();
        assert_eq!(resolved.visibility, Visibility::Hidden);
        assert!(sink.is_empty());
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        let mut sink = Diagnostics::new();
        assert!(deduplicate_visibility("G1", "K+", &[], &mut sink).is_none());
    }
}
