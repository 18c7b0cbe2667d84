//! Domain entities: people and their identities

use std::fmt;

use uuid::Uuid;

/// Opaque identity of a person.
///
/// Names are not unique (an org can have two Toms), so all linking goes through ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Fresh random id (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PersonId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member of the organization.
///
/// Immutable once created. `manager` is `None` for the CEO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: String,
    manager: Option<PersonId>,
}

impl Person {
    /// Create a person with a freshly generated id.
    pub fn new(name: impl Into<String>, manager: Option<&Person>) -> Self {
        Self::with_id(PersonId::new(), name, manager.map(Person::id))
    }

    pub fn with_id(id: PersonId, name: impl Into<String>, manager: Option<PersonId>) -> Self {
        Self {
            id,
            name: name.into(),
            manager,
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manager(&self) -> Option<PersonId> {
        self.manager
    }

    pub fn is_ceo(&self) -> bool {
        self.manager.is_none()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
