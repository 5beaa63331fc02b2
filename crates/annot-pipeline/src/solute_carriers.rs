//! Assembly of the `solute_carriers` table.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use annot_core::entities::{StoichiometryEntry, StoichiometryNotation};
use annot_core::enums::CarrierType;
use annot_core::{Diagnostic, DiagnosticSink, Table};
use annot_stoich::tokenize_substrates;

use crate::canonical::SoluteCarrierRow;
use crate::error::PipelineError;
use crate::links::{GeneResolver, is_ensembl_gene};
use crate::raw::{RawTables, datasets};
use crate::reconciler::Reconciler;
use crate::rows::{HgncGeneRow, SlcRow, TransporterRow};

/// The canonical `solute_carriers` table and its parse counts.
#[derive(Debug, Clone)]
pub struct SoluteCarrierBuild {
    pub table: Table,
    pub notations: usize,
    pub entries: usize,
}

impl Reconciler {
    /// Join HGNC solute carriers with parsed stoichiometries and SLC port types.
    ///
    /// Required tables: `transporter`, `solute_carriers`. The `slc`
    /// substrate table is optional.
    pub fn build_solute_carriers(
        &self,
        raw: &RawTables,
        resolver: &GeneResolver,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<SoluteCarrierBuild, PipelineError> {
        let transporters: Vec<TransporterRow> = raw.records(datasets::TRANSPORTER, sink)?;
        let notations = notations(&transporters, resolver, sink);
        let entries = self.parser.parse_all(&notations, sink);

        let mut by_gene: HashMap<&str, Vec<&StoichiometryEntry>> = HashMap::new();
        for entry in &entries {
            by_gene.entry(entry.gene_id.as_str()).or_default().push(entry);
        }

        let port_types = self.port_types(raw, sink)?;

        let carriers: Vec<HgncGeneRow> = raw.records(datasets::SOLUTE_CARRIERS, sink)?;
        let members: BTreeSet<(String, Option<String>)> = carriers
            .into_iter()
            .filter_map(|row| Some((row.ensembl_gene_id?, row.approved_symbol)))
            .collect();

        let mut rows = Vec::new();
        for (gene_id, symbol) in &members {
            let port_type = symbol
                .as_deref()
                .and_then(|symbol| port_types.get(symbol).copied())
                .flatten();
            match by_gene.get(gene_id.as_str()) {
                Some(gene_entries) => rows.extend(
                    gene_entries
                        .iter()
                        .map(|&entry| SoluteCarrierRow::new(gene_id, Some(entry), port_type)),
                ),
                None => rows.push(SoluteCarrierRow::new(gene_id, None, port_type)),
            }
        }
        tracing::info!(
            genes = members.len(),
            with_stoichiometry = by_gene.len(),
            rows = rows.len(),
            "assembled solute carrier rows"
        );

        let table = self.canonicalize(Table::from_records(datasets::SOLUTE_CARRIERS, &rows), sink)?;
        Ok(SoluteCarrierBuild {
            table,
            notations: notations.len(),
            entries: entries.len(),
        })
    }

    /// Carrier type per SLC gene symbol; unknown substrate terms are reported.
    fn port_types(
        &self,
        raw: &RawTables,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<BTreeMap<String, Option<CarrierType>>, PipelineError> {
        let slc_rows: Vec<SlcRow> = raw.optional_records(datasets::SLC, sink)?;
        let drop_terms = &self.config.stoich.drop_terms;

        let mut port_types = BTreeMap::new();
        let mut solutes = BTreeSet::new();
        for row in &slc_rows {
            let Some(parsed) = tokenize_substrates(
                &row.symbol,
                row.substrates.as_deref(),
                row.transport_type.as_deref(),
                drop_terms,
                sink,
            ) else {
                continue;
            };
            solutes.extend(parsed.solutes);
            let slot = port_types.entry(row.symbol.clone()).or_insert(None);
            if slot.is_none() {
                *slot = parsed.carrier_type;
            }
        }

        let known = self.thesaurus.known_terms();
        for term in solutes.iter().filter(|term| !known.contains(term.as_str())) {
            sink.record(Diagnostic::UnknownTerm { term: term.clone() });
        }

        tracing::debug!(symbols = port_types.len(), solutes = solutes.len(), "tokenized slc substrates");
        Ok(port_types)
    }
}

/// One notation per (gene, notation) pair, in first-seen order.
fn notations(
    rows: &[TransporterRow],
    resolver: &GeneResolver,
    sink: &mut dyn DiagnosticSink,
) -> Vec<StoichiometryNotation> {
    let mut seen = BTreeSet::new();
    let mut notations = Vec::new();
    for row in rows {
        let genes = resolver.resolve(&row.object_id);
        if genes.is_empty() {
            sink.record(Diagnostic::UnmappedIdentifier {
                table: datasets::TRANSPORTER.into(),
                object_id: row.object_id.clone(),
            });
            continue;
        }
        for gene in genes {
            if !is_ensembl_gene(gene) {
                continue;
            }
            let notation = StoichiometryNotation {
                gene_id: gene.clone(),
                notation: row.grac_stoichiometry.clone(),
            };
            if seen.insert((notation.gene_id.clone(), notation.notation.clone())) {
                notations.push(notation);
            }
        }
    }
    notations
}
