//! Application layer: entity services, store traits, and operation events.

pub mod case_studies;
pub mod error;
pub mod events;
pub mod identity;
pub mod insights;
pub mod notify;
pub mod projects;
pub mod proposals;
pub mod stores;
