//! Assembly of the `channels` table.

use std::collections::BTreeSet;

use annot_conductance::{aggregate, ensure_genes, fill_in_permeability, merge_gating, sort_records};
use annot_core::entities::RawObservation;
use annot_core::enums::GatingMechanism;
use annot_core::{Diagnostic, DiagnosticSink, ReconError, Table};

use crate::canonical::ChannelRow;
use crate::error::PipelineError;
use crate::links::GeneResolver;
use crate::raw::{RawTables, datasets};
use crate::reconciler::Reconciler;
use crate::rows::{HgncGeneRow, SelectivityRow, TargetFamilyRow};

/// The canonical `channels` table and what it cost.
#[derive(Debug, Clone)]
pub struct ChannelBuild {
    pub table: Table,
    /// Per-gene normalization failures; those genes carry no measured rows.
    pub failures: Vec<ReconError>,
    pub observations: usize,
}

impl Reconciler {
    /// Aggregate selectivity data and merge HGNC/IUPHAR memberships into `channels`.
    ///
    /// Required tables: `selectivity`, `ion_channels`. The porin,
    /// permeability, gating and target-family tables are optional.
    pub fn build_channels(
        &self,
        raw: &RawTables,
        resolver: &GeneResolver,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ChannelBuild, PipelineError> {
        let selectivity: Vec<SelectivityRow> = raw.records(datasets::SELECTIVITY, sink)?;
        let observations = observations(&selectivity, resolver, &self.config.conductance.species, sink);
        let outcome = aggregate(&observations, sink);
        let mut records = outcome.records;

        let universe = self.channel_universe(raw, resolver, sink)?;

        let mut permeability = Vec::new();
        for (group, ion) in datasets::PERMEABILITY_GROUPS {
            permeability.push(((*ion).to_string(), gene_list(raw, group, sink)?));
        }
        fill_in_permeability(&mut records, &permeability);
        let placeholders = ensure_genes(&mut records, universe.iter().map(String::as_str));

        let mut gating = Vec::new();
        for (group, label) in datasets::GATING_GROUPS {
            gating.push((GatingMechanism::from(*label), gene_list(raw, group, sink)?));
        }
        gating.extend(self.extra_gating.iter().cloned());
        merge_gating(&mut records, &gating);
        sort_records(&mut records);

        let rows: Vec<ChannelRow> = records.iter().flat_map(ChannelRow::from_record).collect();
        tracing::info!(
            records = records.len(),
            placeholders,
            rows = rows.len(),
            "assembled channel records"
        );

        let table = self.canonicalize(Table::from_records(datasets::CHANNELS, &rows), sink)?;
        Ok(ChannelBuild {
            table,
            failures: outcome.failures,
            observations: observations.len(),
        })
    }

    /// HGNC channel genes without porins, plus IUPHAR channel-family targets.
    fn channel_universe(
        &self,
        raw: &RawTables,
        resolver: &GeneResolver,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<BTreeSet<String>, PipelineError> {
        let channel_genes: Vec<HgncGeneRow> = raw.records(datasets::ION_CHANNELS, sink)?;
        let porins: BTreeSet<String> = gene_list(raw, datasets::PORINS, sink)?.into_iter().collect();

        let mut universe: BTreeSet<String> = channel_genes
            .into_iter()
            .filter_map(|row| row.ensembl_gene_id)
            .filter(|gene| !porins.contains(gene))
            .collect();

        let channel_types = &self.config.conductance.channel_target_types;
        let families: Vec<TargetFamilyRow> = raw.optional_records(datasets::TARGETS_FAMILIES, sink)?;
        for family in families {
            let is_channel = family
                .target_type
                .as_ref()
                .is_some_and(|t| channel_types.contains(t));
            if is_channel {
                universe.extend(resolver.resolve(&family.target_id).iter().cloned());
            }
        }

        tracing::debug!(genes = universe.len(), porins = porins.len(), "built channel universe");
        Ok(universe)
    }
}

/// Species-filtered selectivity rows, one observation per linked gene.
fn observations(
    rows: &[SelectivityRow],
    resolver: &GeneResolver,
    species: &[String],
    sink: &mut dyn DiagnosticSink,
) -> Vec<RawObservation> {
    let mut observations = Vec::with_capacity(rows.len());
    for row in rows.iter().filter(|row| species.contains(&row.species_id)) {
        let genes = resolver.resolve(&row.object_id);
        if genes.is_empty() {
            sink.record(Diagnostic::UnmappedIdentifier {
                table: datasets::SELECTIVITY.into(),
                object_id: row.object_id.clone(),
            });
            continue;
        }
        observations.extend(genes.iter().map(|gene| RawObservation {
            gene_id: gene.clone(),
            solute_symbol: row.ion.clone(),
            value_high: row.conductance_high,
            value_low: row.conductance_low,
            value_median: row.conductance_median,
            is_hidden: row.hide_conductance,
            species: row.species_id.clone(),
        }));
    }
    observations
}

/// Distinct gene ids of an optional HGNC group table, in table order.
fn gene_list(
    raw: &RawTables,
    group: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<String>, PipelineError> {
    let rows: Vec<HgncGeneRow> = raw.optional_records(group, sink)?;
    let mut seen = BTreeSet::new();
    Ok(rows
        .into_iter()
        .filter_map(|row| row.ensembl_gene_id)
        .filter(|gene| seen.insert(gene.clone()))
        .collect())
}
