//! pediq-core
//!
//! Pure domain types for pediatric clinical decision support: the clinical
//! input record, severity tiers, dose models, evaluation snapshots, and the
//! embedded protocol reference documents. No I/O: this is the shared
//! vocabulary of the Pediq system.

pub mod documents;
pub mod error;
pub mod input;
pub mod models;
