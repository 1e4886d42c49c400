use crate::document::{Document, NodeId};
use ahash::AHashSet;

/// The result of walking a branch: nodes in first-visit order plus the same set for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    pub order: Vec<NodeId>,
    pub visited: AHashSet<NodeId>,
}

impl Walk {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.visited.contains(id)
    }
}

/// Depth-first walk of everything reachable from `start`.
///
/// A node is recorded on first visit; then its condition targets are walked in
/// list order, then its default. Ids that do not resolve to a node end their
/// path without being recorded. Each node appears exactly once, so cycles and
/// re-converging paths terminate.
///
/// Uses an explicit stack: children are pushed in reverse so they pop in list
/// order, and the visited check happens on pop. This reproduces the recursive
/// preorder exactly.
pub fn walk(doc: &Document, start: &str) -> Walk {
    let mut order = Vec::new();
    let mut visited: AHashSet<NodeId> = AHashSet::new();
    let mut stack: Vec<&NodeId> = Vec::new();

    let Some((start_id, _)) = doc.nodes.get_key_value(start) else {
        return Walk { order, visited };
    };
    stack.push(start_id);

    while let Some(id) = stack.pop() {
        if visited.contains(id) {
            continue;
        }
        let Some(node) = doc.get(id.as_str()) else {
            continue;
        };
        visited.insert(id.clone());
        order.push(id.clone());

        if let Some(next) = node.next.as_ref() {
            let targets: Vec<&NodeId> = next.targets().collect();
            stack.extend(targets.into_iter().rev());
        }
    }

    Walk { order, visited }
}
