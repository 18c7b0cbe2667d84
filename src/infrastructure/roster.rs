//! Roster files: people listed in TOML, linked by roster-local keys.
//!
//! ```toml
//! [[person]]
//! key = "kirk"
//! name = "Kirk"
//!
//! [[person]]
//! key = "mark"
//! name = "Mark"
//! manager = "kirk"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::{Person, PersonId};
use crate::infrastructure::error::{InfraError, InfraResult};

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default, rename = "person")]
    people: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    key: String,
    name: String,
    #[serde(default)]
    manager: Option<String>,
}

/// Read and parse a roster file.
#[instrument(level = "debug")]
pub fn load_roster(path: &Path) -> InfraResult<Vec<Person>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read roster {}", path.display()), e))?;
    parse_roster(&content, path)
}

/// Parse roster content. `path` is only used in error messages.
///
/// Every entry gets a fresh [`PersonId`]; people keep the file's order.
pub fn parse_roster(content: &str, path: &Path) -> InfraResult<Vec<Person>> {
    let roster: RosterFile =
        toml::from_str(content).map_err(|e| InfraError::roster(path, e.to_string()))?;

    let mut ids: HashMap<&str, PersonId> = HashMap::with_capacity(roster.people.len());
    for entry in &roster.people {
        if ids.insert(entry.key.as_str(), PersonId::new()).is_some() {
            return Err(InfraError::roster(
                path,
                format!("duplicate key: {}", entry.key),
            ));
        }
    }

    let mut people = Vec::with_capacity(roster.people.len());
    for entry in &roster.people {
        let manager = match entry.manager.as_deref() {
            Some(key) => Some(*ids.get(key).ok_or_else(|| {
                InfraError::roster(
                    path,
                    format!("unknown manager key '{}' for '{}'", key, entry.key),
                )
            })?),
            None => None,
        };
        people.push(Person::with_id(ids[entry.key.as_str()], &entry.name, manager));
    }

    debug!(count = people.len(), "roster parsed");
    Ok(people)
}
