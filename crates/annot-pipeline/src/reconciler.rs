use annot_config::AnnotConfig;
use annot_core::enums::GatingMechanism;
use annot_core::{DiagnosticSink, Diagnostics, ReconError, Table};
use annot_stoich::{NotationParser, OverrideTable};
use annot_vocab::Thesaurus;

use crate::canonical::CanonicalTables;
use crate::error::PipelineError;
use crate::links::GeneResolver;
use crate::raw::{RawTables, datasets};
use crate::report::ReconReport;
use crate::rows::DatabaseLinkRow;

/// A configured reconciliation run: raw tables in, canonical tables out.
///
/// Holds only configuration data (settings, thesaurus, overrides); each call
/// is independent of the previous one.
#[derive(Debug, Clone)]
pub struct Reconciler {
    pub(crate) config: AnnotConfig,
    pub(crate) thesaurus: Thesaurus,
    pub(crate) parser: NotationParser,
    pub(crate) extra_gating: Vec<(GatingMechanism, Vec<String>)>,
}

impl Reconciler {
    /// Validate `config` and bind it to already-loaded rule tables.
    pub fn new(
        config: AnnotConfig,
        thesaurus: Thesaurus,
        overrides: OverrideTable,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            thesaurus,
            parser: NotationParser::new(overrides),
            extra_gating: Vec::new(),
        })
    }

    /// Load the thesaurus and override table from the paths in `config`.
    ///
    /// The thesaurus is required; the override table is optional.
    pub fn from_config(config: AnnotConfig) -> Result<Self, PipelineError> {
        let thesaurus = Thesaurus::from_path(config.require_thesaurus_path()?)?;
        let overrides = match &config.stoich.overrides_path {
            Some(path) => OverrideTable::from_path(path)?,
            None => OverrideTable::new(),
        };
        tracing::info!(
            rules = thesaurus.rules().len(),
            overrides = overrides.len(),
            "loaded rule tables"
        );
        Self::new(config, thesaurus, overrides)
    }

    /// Add an extra gating-mechanism membership set, e.g. from an ontology.
    #[must_use]
    pub fn with_gating_group<I, S>(mut self, mechanism: GatingMechanism, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_gating
            .push((mechanism, genes.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &AnnotConfig {
        &self.config
    }

    /// Build every canonical table and a report of what happened.
    pub fn run(&self, raw: &RawTables) -> Result<(CanonicalTables, ReconReport), PipelineError> {
        let mut sink = Diagnostics::new();
        let resolver = self.gene_resolver(raw, &mut sink)?;
        let channels = self.build_channels(raw, &resolver, &mut sink)?;
        let carriers = self.build_solute_carriers(raw, &resolver, &mut sink)?;

        let mut report = ReconReport {
            observations_in: channels.observations,
            channel_rows: channels.table.len(),
            notations_in: carriers.notations,
            stoichiometry_entries: carriers.entries,
            solute_carrier_rows: carriers.table.len(),
            failed_genes: channels
                .failures
                .iter()
                .filter_map(|failure| match failure {
                    ReconError::NoPositiveDenominator { gene_id, .. } => {
                        Some(gene_id.clone())
                    }
                    _ => None,
                })
                .collect(),
            ..ReconReport::default()
        };
        report.absorb(sink.into_events());

        let mut tables = CanonicalTables::new();
        tables.insert(channels.table);
        tables.insert(carriers.table);

        tracing::info!(
            channels = report.channel_rows,
            solute_carriers = report.solute_carrier_rows,
            failed_genes = report.failed_genes.len(),
            diagnostics = report.diagnostics.len(),
            "reconciliation finished"
        );
        Ok((tables, report))
    }

    /// Index the `database_link` table for the configured Ensembl source.
    pub fn gene_resolver(
        &self,
        raw: &RawTables,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<GeneResolver, PipelineError> {
        let settings = &self.config.conductance;
        let links: Vec<DatabaseLinkRow> = raw.records(datasets::DATABASE_LINK, sink)?;
        Ok(GeneResolver::new(
            &links,
            &settings.ensembl_database_id,
            &settings.ensembl_species,
        ))
    }

    /// Thesaurus canonicalization of the configured vocabulary column.
    pub(crate) fn canonicalize(
        &self,
        table: Table,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Table, PipelineError> {
        let vocab = &self.config.vocab;
        let mut table = annot_vocab::canonicalize(
            table,
            &vocab.target_column,
            &self.thesaurus,
            &vocab.explode_delimiter,
            sink,
        )?;
        table.drop_null_rows();
        Ok(table)
    }
}
