use thiserror::Error;

/// Raised when an operation names an entity row that does not exist.
///
/// Field validation is an application concern and reported there; the
/// domain layer only knows whether the record it was asked about is real.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no such {entity}")]
    NotFound { entity: &'static str },
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}
