//! # annot-conductance
//!
//! Turns noisy per-observation conductance data into one normalized
//! [`ConductanceRecord`](annot_core::entities::ConductanceRecord) per
//! (gene, solute).
//!
//! Pipeline, per run:
//! 1. [`resolve_pseudo_median`] collapses high/low/median into one value.
//! 2. [`deduplicate_visibility`] keeps visible values over hidden ones and
//!    averages what remains.
//! 3. [`compute_relative`] normalizes each gene against its own maximum.
//! 4. [`fill_in_permeability`], [`ensure_genes`] and [`merge_gating`] add
//!    membership-derived annotations without inventing numbers.

mod aggregate;
mod annotate;
mod dedup;
mod median;
mod relative;

pub use aggregate::{AggregationOutcome, aggregate};
pub use annotate::{ensure_genes, fill_in_permeability, merge_gating, sort_records};
pub use dedup::{ResolvedConductance, deduplicate_visibility};
pub use median::resolve_pseudo_median;
pub use relative::compute_relative;
