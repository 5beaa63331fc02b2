//! # annot-core
//!
//! Core types, tables, diagnostics, and error types for annotation reconciliation.
//!
//! This crate provides the foundational types shared across all `annot-*` crates:
//! - Record structs for raw observations and reconciled entities
//! - Vocabulary enums (direction, visibility, gating mechanism, carrier type)
//! - The generic `Table`/`Cell` representation that the explode engine and the
//!   canonicalizer operate on
//! - The reconciliation error taxonomy and the `DiagnosticSink` port
//! - Ensembl identifier parsing

pub mod diagnostics;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod table;

pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, TracingSink};
pub use errors::{CoreError, ReconError};
pub use table::{Cell, Row, Table, Tabular};
