use annot_core::ReconError;
use annot_core::entities::RawObservation;

/// Collapse an observation's high/low/median values into one number.
///
/// The median wins when present. Otherwise the mean of high and low, or
/// whichever of the two exists. Non-finite values count as absent.
pub fn resolve_pseudo_median(obs: &RawObservation) -> Result<f64, ReconError> {
    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

    if let Some(median) = finite(obs.value_median) {
        return Ok(median);
    }

    let value = match (finite(obs.value_high), finite(obs.value_low)) {
        (Some(high), Some(low)) => (high + low) / 2.0,
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => {
            return Err(ReconError::MissingValue {
                gene_id: obs.gene_id.clone(),
                solute: obs.solute_symbol.clone(),
            });
        }
    };

    tracing::debug!(
        gene_id = %obs.gene_id,
        solute = %obs.solute_symbol,
        high = ?obs.value_high,
        low = ?obs.value_low,
        value,
        "no median; using pseudo-median"
    );
    Ok(value)
}
