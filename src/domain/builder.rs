//! Tree builder: links flat person records into an org chart.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::domain::arena::OrgTree;
use crate::domain::error::DomainError;
use crate::domain::{Person, PersonId};

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs org trees from person records.
///
/// Linking is O(n): one pass indexes people and groups them by manager,
/// a second pass walks down from the CEO with an explicit stack.
#[derive(Debug, Default)]
pub struct OrgTreeBuilder {
    people: HashMap<PersonId, Person>,
    reports_by_manager: HashMap<PersonId, Vec<PersonId>>,
}

impl OrgTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree rooted at the single person without a manager.
    #[instrument(level = "debug", skip_all, fields(employees = employees.len()))]
    pub fn build(&mut self, employees: &[Person]) -> TreeResult<OrgTree> {
        // Reset state for a fresh build
        self.people.clear();
        self.reports_by_manager.clear();

        let root = self.index(employees)?;
        debug!(ceo = %root, "found root");

        let mut tree = OrgTree::new();
        let mut stack = vec![(root, None)];

        while let Some((person_id, manager_idx)) = stack.pop() {
            let Some(person) = self.people.get(&person_id) else {
                continue;
            };
            let current_idx = tree.insert_node(person.clone(), manager_idx);

            if let Some(reports) = self.reports_by_manager.get(&person_id) {
                // Reverse so that reports are inserted in input order
                for report in reports.iter().rev() {
                    stack.push((*report, Some(current_idx)));
                }
            }
        }

        let detached: Vec<Person> = employees
            .iter()
            .filter(|p| tree.find(p.id()).is_none())
            .cloned()
            .collect();
        if !detached.is_empty() {
            warn!(
                count = detached.len(),
                "people not reachable from the CEO (unknown manager or cycle)"
            );
            for person in &detached {
                debug!(person = %person, manager = ?person.manager(), "detached");
            }
        }
        tree.set_detached(detached);

        Ok(tree)
    }

    /// Index people by id and by manager, returning the CEO's id.
    fn index(&mut self, employees: &[Person]) -> TreeResult<PersonId> {
        let mut roots: Vec<&Person> = Vec::new();

        for person in employees {
            if self.people.insert(person.id(), person.clone()).is_some() {
                return Err(DomainError::DuplicatePerson(person.id()));
            }
            match person.manager() {
                Some(manager) => self
                    .reports_by_manager
                    .entry(manager)
                    .or_default()
                    .push(person.id()),
                None => roots.push(person),
            }
        }

        match roots.as_slice() {
            [] => Err(DomainError::MissingRoot),
            [ceo] => Ok(ceo.id()),
            _ => {
                let mut names: Vec<String> = roots.iter().map(|p| p.name().to_string()).collect();
                names.sort();
                Err(DomainError::MultipleRoots(names))
            }
        }
    }
}

/// Build the org tree for `employees`. See [`OrgTreeBuilder::build`].
pub fn build_tree(employees: &[Person]) -> TreeResult<OrgTree> {
    OrgTreeBuilder::new().build(employees)
}
