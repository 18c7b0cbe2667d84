//! Canonical string form and human-readable display of org trees.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::vec;

use generational_arena::Index;
use icu_collator::{Collator, CollatorOptions, Strength};
use itertools::Itertools;
use termtree::Tree;
use tracing::{instrument, trace, warn};

use crate::domain::arena::{OrgNode, OrgTree};
use crate::domain::error::DomainError;

thread_local! {
    // Root locale, secondary strength: accents count, case does not
    static NAME_COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        Collator::try_new(&Default::default(), options)
            .map_err(|e| warn!(error = %e, "no collation data, comparing code points"))
            .ok()
    };
}

/// Sort key for names: case-insensitive collation first, exact spelling as tie-break.
fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_uppercase().cmp(&b.to_uppercase()),
        })
        .then_with(|| a.cmp(b))
}

fn sorted_reports<'a>(tree: &'a OrgTree, node: &OrgNode) -> Vec<(Index, &'a OrgNode)> {
    node.direct_reports
        .iter()
        .filter_map(|&idx| tree.get_node(idx).map(|n| (idx, n)))
        .sorted_by(|(_, a), (_, b)| compare_names(a.person.name(), b.person.name()))
        .collect()
}

/// Serialize the tree from its root.
///
/// `Kirk{Mark{Tom}}`: a leaf is its name, a manager is its name followed by the
/// direct reports in braces, sorted case-insensitively by name. Fails if any person
/// is reached twice. Each call tracks visits on its own, so repeated calls agree.
pub fn stringify(tree: &OrgTree) -> Result<String, DomainError> {
    let root = tree.root().ok_or(DomainError::MissingRoot)?;
    stringify_from(tree, root)
}

/// Node being serialized: reports still to visit and those already rendered.
struct Frame<'a> {
    node: &'a OrgNode,
    pending: vec::IntoIter<(Index, &'a OrgNode)>,
    rendered: Vec<(&'a str, String)>,
}

impl<'a> Frame<'a> {
    fn enter(
        tree: &'a OrgTree,
        idx: Index,
        visited: &mut HashSet<Index>,
    ) -> Result<Self, DomainError> {
        let node = tree
            .get_node(idx)
            .ok_or_else(|| DomainError::InvalidNode(format!("{idx:?}")))?;

        if !visited.insert(idx) {
            return Err(DomainError::MultipleManagers {
                id: node.person.id(),
                name: node.person.name().to_string(),
            });
        }
        trace!(person = %node.person, "visit");

        Ok(Self {
            node,
            pending: sorted_reports(tree, node).into_iter(),
            rendered: Vec::with_capacity(node.direct_reports.len()),
        })
    }

    fn finish(mut self) -> (&'a str, String) {
        let name = self.node.person.name();
        if self.node.direct_reports.is_empty() {
            return (name, name.to_string());
        }
        // Reports were visited in name order; settle ties between equal names by rendering
        self.rendered.sort_by(|(a_name, a_text), (b_name, b_text)| {
            compare_names(a_name, b_name).then_with(|| a_text.cmp(b_text))
        });
        let text = format!(
            "{}{{{}}}",
            name,
            self.rendered.into_iter().map(|(_, text)| text).join(",")
        );
        (name, text)
    }
}

/// Serialize the subtree below `start`.
///
/// Depth-first with an explicit stack, so long management chains do not
/// exhaust the call stack.
#[instrument(level = "debug", skip(tree))]
pub fn stringify_from(tree: &OrgTree, start: Index) -> Result<String, DomainError> {
    let mut visited = HashSet::new();
    let mut stack = vec![Frame::enter(tree, start, &mut visited)?];

    while let Some(frame) = stack.last_mut() {
        if let Some((child_idx, _)) = frame.pending.next() {
            let child = Frame::enter(tree, child_idx, &mut visited)?;
            stack.push(child);
            continue;
        }
        let Some(done) = stack.pop() else { break };
        let (name, text) = done.finish();
        match stack.last_mut() {
            Some(parent) => parent.rendered.push((name, text)),
            None => return Ok(text),
        }
    }
    Err(DomainError::InvalidNode(format!("{start:?}")))
}

/// Conversion into a printable `termtree`.
pub trait TreeDisplay {
    fn to_display_tree(&self) -> Tree<String>;
}

impl TreeDisplay for OrgTree {
    fn to_display_tree(&self) -> Tree<String> {
        let Some(root) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        let mut seen = HashSet::new();
        let enter = |idx: Index, seen: &mut HashSet<Index>| {
            let Some(node) = self.get_node(idx) else {
                return (Tree::new(String::new()), Vec::new().into_iter());
            };
            let display = Tree::new(node.person.name().to_string());
            // A node reached twice is shown but not expanded again
            let pending = if seen.insert(idx) {
                sorted_reports(self, node)
            } else {
                Vec::new()
            };
            (display, pending.into_iter())
        };

        let mut stack = vec![enter(root, &mut seen)];
        while let Some((_, pending)) = stack.last_mut() {
            if let Some((child_idx, _)) = pending.next() {
                let child = enter(child_idx, &mut seen);
                stack.push(child);
                continue;
            }
            let Some((done, _)) = stack.pop() else { break };
            match stack.last_mut() {
                Some((parent, _)) => {
                    parent.push(done);
                }
                None => return done,
            }
        }
        Tree::new(String::new())
    }
}
