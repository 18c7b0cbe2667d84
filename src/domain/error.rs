//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::PersonId;

/// Domain errors represent violations of the org structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no person without a manager found (missing CEO)")]
    MissingRoot,

    #[error("more than one person without a manager: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    #[error("person id used more than once: {0}")]
    DuplicatePerson(PersonId),

    #[error("person {name} ({id}) reports to more than one person")]
    MultipleManagers { id: PersonId, name: String },

    #[error("node not found in tree: {0}")]
    InvalidNode(String),
}
