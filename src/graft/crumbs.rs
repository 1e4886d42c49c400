use crate::config::WorkflowSchema;
use crate::document::{Document, NodeId, Nullable};
use ahash::{AHashMap, AHashSet};

/// Writes trail labels onto a freshly grafted branch.
///
/// The entry and every sub-choice page get the branch's selection label.
/// The page an option routes to gets that option's title outright. Beyond
/// that, nodes behind an option get its title and nodes behind the default
/// edge get the selection label, but only where they carry no crumb yet.
pub struct CrumbPropagator<'a> {
    schema: &'a WorkflowSchema,
    label: &'a str,
    branch: AHashSet<NodeId>,
}

impl<'a> CrumbPropagator<'a> {
    /// `branch` is the node set of the grafted branch; propagation never leaves it.
    pub fn new<'b, I>(schema: &'a WorkflowSchema, label: &'a str, branch: I) -> Self
    where
        I: IntoIterator<Item = &'b NodeId>,
    {
        Self {
            schema,
            label,
            branch: branch.into_iter().cloned().collect(),
        }
    }

    /// Labels the branch starting at `entry`. `order` fixes the order in which
    /// sub-choice pages are processed.
    pub fn propagate(&self, doc: &mut Document, entry: &NodeId, order: &[NodeId]) {
        if let Some(node) = doc.get_mut(entry.as_str()) {
            node.crumb = Nullable::Value(self.label.to_string());
        }

        for id in order {
            let Some(node) = doc.get_mut(id.as_str()) else {
                continue;
            };
            if !self.schema.is_sub_choice(node.template()) {
                continue;
            }
            node.crumb = Nullable::Value(self.label.to_string());

            let titles: AHashMap<i64, String> = node.reasons().into_iter().collect();
            let Some(next) = node.next.as_ref().cloned() else {
                continue;
            };

            let routes: Vec<(&NodeId, Option<&str>)> = next
                .conditions
                .iter()
                .filter_map(|condition| {
                    let target = condition.result.as_ref()?;
                    let title = condition.rval_as_i64().and_then(|rid| titles.get(&rid));
                    Some((target, title.map(String::as_str)))
                })
                .collect();

            // An option's own page always shows the option title, whatever it carried.
            for (target, title) in &routes {
                let Some(title) = title else {
                    continue;
                };
                if !self.branch.contains(*target) {
                    continue;
                }
                if let Some(node) = doc.get_mut(target.as_str()) {
                    node.crumb = Nullable::Value(title.to_string());
                }
            }

            for (target, title) in &routes {
                self.spread(doc, target, title.unwrap_or(self.label));
            }
            if let Some(target) = &next.default {
                self.spread(doc, target, self.label);
            }
        }
    }

    /// Worklist fill of `crumb` over everything reachable from `from` inside the branch.
    fn spread(&self, doc: &mut Document, from: &NodeId, crumb: &str) {
        let mut stack = vec![from.clone()];
        let mut seen: AHashSet<NodeId> = AHashSet::new();

        while let Some(id) = stack.pop() {
            if !self.branch.contains(&id) || !seen.insert(id.clone()) {
                continue;
            }
            let Some(node) = doc.get_mut(id.as_str()) else {
                continue;
            };
            // Sub-choice pages label their own children.
            let unlabeled = node.crumb.as_deref().is_none_or(str::is_empty);
            if unlabeled && !self.schema.is_sub_choice(node.template()) {
                node.crumb = Nullable::Value(crumb.to_string());
            }
            if let Some(next) = node.next.as_ref() {
                stack.extend(next.targets().cloned());
            }
        }
    }
}
