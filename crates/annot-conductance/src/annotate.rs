//! Membership-derived annotations layered onto aggregated records.

use std::collections::{HashMap, HashSet};

use annot_core::entities::ConductanceRecord;
use annot_core::enums::GatingMechanism;

/// Add implied (gene, solute) records from permeability group memberships.
///
/// `groups` maps a canonical solute to its member genes. Existing pairs are
/// never touched, so measured values always win. Returns the number of
/// records added.
pub fn fill_in_permeability(
    records: &mut Vec<ConductanceRecord>,
    groups: &[(String, Vec<String>)],
) -> usize {
    let mut present: HashSet<(String, Option<String>)> = records
        .iter()
        .map(|r| (r.gene_id.clone(), r.solute.clone()))
        .collect();

    let before = records.len();
    for (solute, genes) in groups {
        for gene in genes {
            if present.insert((gene.clone(), Some(solute.clone()))) {
                records.push(ConductanceRecord::implied(gene, Some(solute.clone())));
            }
        }
    }

    let added = records.len() - before;
    tracing::debug!(added, "filled in permeabilities from group membership");
    added
}

/// Add a solute-less record for every gene in `genes` that has none at all.
pub fn ensure_genes<'a>(
    records: &mut Vec<ConductanceRecord>,
    genes: impl IntoIterator<Item = &'a str>,
) -> usize {
    let mut present: HashSet<String> = records.iter().map(|r| r.gene_id.clone()).collect();
    let before = records.len();
    for gene in genes {
        if present.insert(gene.to_string()) {
            records.push(ConductanceRecord::implied(gene, None));
        }
    }
    records.len() - before
}

/// Union gating mechanisms from group memberships into every record of each
/// member gene. Genes without records are ignored. Returns the number of
/// mechanisms newly attached.
pub fn merge_gating(
    records: &mut [ConductanceRecord],
    groups: &[(GatingMechanism, Vec<String>)],
) -> usize {
    let mut by_gene: HashMap<&str, Vec<&GatingMechanism>> = HashMap::new();
    for (mechanism, genes) in groups {
        for gene in genes {
            by_gene.entry(gene.as_str()).or_default().push(mechanism);
        }
    }

    let mut attached = 0;
    for record in records.iter_mut() {
        let Some(mechanisms) = by_gene.get(record.gene_id.as_str()) else {
            continue;
        };
        for mechanism in mechanisms {
            if record.add_mechanism((*mechanism).clone()) {
                attached += 1;
            }
        }
    }

    tracing::debug!(attached, "merged gating mechanisms");
    attached
}

/// Order records by gene, then solute (solute-less first).
pub fn sort_records(records: &mut [ConductanceRecord]) {
    records.sort_by(|a, b| (&a.gene_id, &a.solute).cmp(&(&b.gene_id, &b.solute)));
}
