//! Splicing the template branch onto existing branches, and labelling the result.
mod crumbs;

pub use crumbs::CrumbPropagator;

use crate::config::WorkflowSchema;
use crate::document::{Document, Next, NodeId, Nullable};
use crate::error::GraftError;
use crate::graph::{clone_subgraph, walk};
use ahash::AHashMap;
use indexmap::IndexMap;

/// The outcome of grafting the template onto one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraftOutcome {
    /// The branch entry; its id never changes.
    pub entry: NodeId,
    /// Template node id -> id of its mirror in the branch, in walk order.
    pub mapping: IndexMap<NodeId, NodeId>,
    /// Ids of nodes newly added to the document.
    pub created: Vec<NodeId>,
}

impl GraftOutcome {
    /// Every node of the grafted branch, entry first.
    pub fn branch_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.mapping.values()
    }
}

/// Makes an existing branch a structural mirror of the template branch.
///
/// The branch entry keeps its id, so the choice page routing and any other
/// reference into the branch stays valid. Routing is never rewired.
pub struct BranchGrafter<'a> {
    schema: &'a WorkflowSchema,
}

impl<'a> BranchGrafter<'a> {
    pub fn new(schema: &'a WorkflowSchema) -> Self {
        Self { schema }
    }

    pub fn graft(
        &self,
        doc: &mut Document,
        template_entry: &NodeId,
        branch_entry: &NodeId,
    ) -> Result<GraftOutcome, GraftError> {
        if !doc.contains(branch_entry.as_str()) {
            return Err(GraftError::NodeNotFound {
                node_id: branch_entry.clone(),
                context: "a branch graft".to_string(),
            });
        }

        let template_nodes = walk(doc, template_entry.as_str());
        if template_nodes.contains(branch_entry.as_str()) {
            return Err(GraftError::BranchOverlapsTemplate {
                entry: branch_entry.clone(),
            });
        }
        let template_defaults: AHashMap<NodeId, Option<NodeId>> = template_nodes
            .order
            .iter()
            .filter_map(|id| doc.get(id.as_str()))
            .map(|node| (node.id.clone(), node.default_target().cloned()))
            .collect();

        // 1. Clone the template branch.
        let clone = clone_subgraph(doc, template_entry.as_str())?;
        let discarded = clone.start.clone();

        // 2. Splice the cloned entry onto the existing entry, then drop the cloned entry.
        // The entry keeps its key and its own `id` field, even when the two disagree.
        let entry_id = doc
            .get(branch_entry.as_str())
            .map_or_else(|| branch_entry.clone(), |node| node.id.clone());
        let mut spliced = doc
            .remove(discarded.as_str())
            .ok_or_else(|| GraftError::NodeNotFound {
                node_id: discarded.clone(),
                context: "a branch graft".to_string(),
            })?;
        spliced.id = entry_id;
        doc.nodes.insert(branch_entry.clone(), spliced);

        let mapping: IndexMap<NodeId, NodeId> = clone
            .mapping
            .into_iter()
            .map(|(template_id, new_id)| {
                if new_id == discarded {
                    (template_id, branch_entry.clone())
                } else {
                    (template_id, new_id)
                }
            })
            .collect();
        let created: Vec<NodeId> = mapping
            .values()
            .filter(|id| *id != branch_entry)
            .cloned()
            .collect();

        for (template_id, mirror_id) in &mapping {
            let template_default = template_defaults.get(template_id).cloned().flatten();
            let Some(mirror) = doc.get_mut(mirror_id.as_str()) else {
                continue;
            };

            // 4. Terminal pages never continue, whatever they carried before.
            if self.schema.is_terminal(mirror.template()) {
                mirror.next = Nullable::Null;
                continue;
            }

            let Some(next) = mirror.next.as_mut() else {
                continue;
            };

            // 3. Nothing may point at the discarded clone entry.
            next.remap_targets(|target| (*target == discarded).then(|| branch_entry.clone()));

            // 5. The default is always the image of the template's own default.
            let mapped_default = template_default
                .as_ref()
                .map(|d| mapping.get(d).cloned().unwrap_or_else(|| d.clone()));
            if mapped_default.is_some() {
                next.default = mapped_default;
            }

            // 6. Reconverging shapes must not degrade into a self-loop.
            guard_cycle(next, mirror_id, branch_entry, template_default.as_ref(), &mapping);
        }

        tracing::debug!(
            entry = %branch_entry,
            template = %template_entry,
            created = created.len(),
            "Grafted template branch"
        );

        Ok(GraftOutcome {
            entry: branch_entry.clone(),
            mapping,
            created,
        })
    }
}

fn guard_cycle(
    next: &mut Next,
    own_id: &NodeId,
    branch_entry: &NodeId,
    template_default: Option<&NodeId>,
    mapping: &IndexMap<NodeId, NodeId>,
) {
    let loops_back = next
        .default
        .as_ref()
        .is_some_and(|d| d == own_id || d == branch_entry);
    if !loops_back {
        return;
    }
    if let Some(image) = template_default.and_then(|d| mapping.get(d)) {
        if next.default.as_ref() != Some(image) {
            tracing::debug!(
                node = %own_id,
                default = %image,
                "Default loops back; using template image"
            );
        }
        next.default = Some(image.clone());
    }
}
