use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::{DomainError, Person, PersonId};

/// Tree node in the arena-based org chart.
#[derive(Debug)]
pub struct OrgNode {
    /// Person wrapped by this node
    pub person: Person,
    /// Index of the manager's node, None for the root
    pub manager: Option<Index>,
    /// Indices of direct reports in insertion order
    pub direct_reports: Vec<Index>,
}

/// Arena-based org chart.
///
/// Nodes refer to each other by generational index, so the tree owns every node
/// exactly once even if a malformed link makes a node reachable twice.
#[derive(Debug, Default)]
pub struct OrgTree {
    arena: Arena<OrgNode>,
    root: Option<Index>,
    by_person: HashMap<PersonId, Index>,
    detached: Vec<Person>,
}

impl OrgTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node for `person`, attached under `manager` if given.
    ///
    /// The first node inserted without a manager becomes the root.
    #[instrument(level = "trace", skip(self, person), fields(person = %person))]
    pub fn insert_node(&mut self, person: Person, manager: Option<Index>) -> Index {
        let person_id = person.id();
        let node = OrgNode {
            person,
            manager,
            direct_reports: Vec::new(),
        };
        let node_idx = self.arena.insert(node);
        self.by_person.insert(person_id, node_idx);

        if let Some(manager_idx) = manager {
            if let Some(manager_node) = self.arena.get_mut(manager_idx) {
                manager_node.direct_reports.push(node_idx);
            }
        } else if self.root.is_none() {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Add `report` to the direct reports of `manager`.
    ///
    /// Does not detach `report` from a previous manager: the node then has two
    /// managers, which `stringify` reports as an error.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, manager: Index, report: Index) -> Result<(), DomainError> {
        if !self.arena.contains(report) {
            return Err(DomainError::InvalidNode(format!("{report:?}")));
        }
        let manager_node = self
            .arena
            .get_mut(manager)
            .ok_or_else(|| DomainError::InvalidNode(format!("{manager:?}")))?;
        manager_node.direct_reports.push(report);
        if let Some(report_node) = self.arena.get_mut(report) {
            report_node.manager = Some(manager);
        }
        Ok(())
    }

    pub fn get_node(&self, idx: Index) -> Option<&OrgNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_person(&self) -> Option<&Person> {
        self.root
            .and_then(|idx| self.get_node(idx))
            .map(|node| &node.person)
    }

    /// Node index of the given person, if the person is in the tree.
    pub fn find(&self, id: PersonId) -> Option<Index> {
        self.by_person.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// People from the input that could not be placed under the root.
    pub fn detached(&self) -> &[Person] {
        &self.detached
    }

    pub(crate) fn set_detached(&mut self, detached: Vec<Person>) {
        self.detached = detached;
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of levels below and including the root, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut seen = HashSet::new();
        let mut stack: Vec<(Index, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        let mut deepest = 0;

        while let Some((node_idx, level)) = stack.pop() {
            if !seen.insert(node_idx) {
                continue;
            }
            let Some(node) = self.get_node(node_idx) else {
                continue;
            };
            deepest = deepest.max(level);
            for &child in node.direct_reports.iter().rev() {
                stack.push((child, level + 1));
            }
        }
        deepest
    }

    /// Names of people with no direct reports, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.direct_reports.is_empty())
            .map(|(_, node)| node.person.name().to_string())
            .collect()
    }
}

/// Pre-order traversal from the root. Each node is yielded at most once.
pub struct TreeIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<Index>,
    seen: HashSet<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a OrgTree) -> Self {
        let stack = tree.root().into_iter().collect();
        Self {
            tree,
            stack,
            seen: HashSet::new(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if !self.seen.insert(current_idx) {
                continue;
            }
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.direct_reports.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order traversal: every report before its manager.
pub struct PostOrderIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<(Index, bool)>,
    seen: HashSet<Index>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a OrgTree) -> Self {
        let stack = tree.root().map(|root| (root, false)).into_iter().collect();
        Self {
            tree,
            stack,
            seen: HashSet::new(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, expanded)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if expanded {
                    return Some((current_idx, node));
                }
                if !self.seen.insert(current_idx) {
                    continue;
                }
                self.stack.push((current_idx, true));
                for &child in node.direct_reports.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
