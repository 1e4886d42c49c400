use super::walker::walk;
use crate::document::{Document, NodeId};
use crate::error::GraftError;
use indexmap::IndexMap;

/// What a clone produced: the copy's entry and the old -> new id table in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgraphClone {
    pub start: NodeId,
    pub mapping: IndexMap<NodeId, NodeId>,
}

/// Deep-copies every node reachable from `start` under fresh ids.
///
/// Ids are allocated from one past the document's largest numeric id, one per
/// node, strictly increasing in walk order. Edges that pointed into the copied
/// set are redirected to the copies; anything else is left as it was.
/// Existing nodes are never touched.
pub fn clone_subgraph(doc: &mut Document, start: &str) -> Result<SubgraphClone, GraftError> {
    if !doc.contains(start) {
        return Err(GraftError::NodeNotFound {
            node_id: NodeId::from(start),
            context: "a subgraph clone".to_string(),
        });
    }

    let order = walk(doc, start).order;
    let mut allocator = doc.id_allocator();
    // Every id is allocated before the first insert, so a failure leaves the document as it was.
    let mapping: IndexMap<NodeId, NodeId> = order
        .into_iter()
        .map(|old| allocator.allocate().map(|new| (old, new)))
        .collect::<Result<_, _>>()?;

    for (old_id, new_id) in &mapping {
        let Some(source) = doc.get(old_id.as_str()) else {
            continue;
        };
        let mut copy = source.clone();
        copy.id = new_id.clone();
        if let Some(next) = copy.next.as_mut() {
            next.remap_targets(|target| mapping.get(target).cloned());
        }
        doc.insert(copy);
    }

    let start = mapping
        .get(start)
        .cloned()
        .ok_or_else(|| GraftError::NodeNotFound {
            node_id: NodeId::from(start),
            context: "a subgraph clone".to_string(),
        })?;

    tracing::debug!(
        start = %start,
        nodes = mapping.len(),
        "Cloned subgraph"
    );

    Ok(SubgraphClone { start, mapping })
}
