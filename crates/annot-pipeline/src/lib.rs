//! # annot-pipeline
//!
//! Raw source tables in, canonical tables out.
//!
//! [`RawTables`] holds the per-source tables keyed by logical dataset name.
//! Each table is validated into typed rows at the boundary ([`rows`]): a
//! missing column fails the run, a malformed row is skipped and reported.
//! [`Reconciler`] then assembles the `channels` and `solute_carriers` tables
//! through the conductance, stoichiometry and vocabulary crates and returns
//! them as [`CanonicalTables`] alongside a [`ReconReport`].
//!
//! ```no_run
//! use annot_config::AnnotConfig;
//! use annot_pipeline::{RawTables, Reconciler};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = Reconciler::from_config(AnnotConfig::load()?)?;
//! let mut raw = RawTables::new();
//! raw.load_csv("selectivity", "data/selectivity.csv".as_ref())?;
//! let (tables, report) = reconciler.run(&raw)?;
//! println!("{} tables, {} diagnostics", tables.len(), report.diagnostics.len());
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod channels;
pub mod error;
pub mod links;
pub mod raw;
pub mod reconciler;
pub mod report;
pub mod rows;
pub mod solute_carriers;

pub use canonical::{CanonicalTables, ChannelRow, SoluteCarrierRow};
pub use channels::ChannelBuild;
pub use error::PipelineError;
pub use links::{GeneResolver, is_ensembl_gene};
pub use raw::{RawRecord, RawTables, datasets, parse_records, table_from_csv};
pub use reconciler::Reconciler;
pub use report::ReconReport;
pub use solute_carriers::SoluteCarrierBuild;
