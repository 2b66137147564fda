//! Domain layer: entity records, enumerations, and invariants.

pub mod entities;
pub mod error;
pub mod identity;
pub mod insights;
pub mod types;
