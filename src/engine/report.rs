use crate::document::{Document, NodeId};
use crate::translate::TranslatedField;
use crate::validator::ValidationReport;
use ahash::AHashSet;

/// What happened to one selection branch during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchReport {
    pub label: String,
    /// `None` when no locale could be resolved and the branch was skipped.
    pub locale: Option<String>,
    pub entry: Option<NodeId>,
    /// Every node the graft wrote, entry first.
    pub touched: Vec<NodeId>,
    pub translations: Vec<TranslatedField>,
    pub warnings: Vec<String>,
}

impl BranchReport {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// True when the branch was rewritten.
    pub fn grafted(&self) -> bool {
        !self.touched.is_empty()
    }
}

/// Counters and per-branch details of one mirroring run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub branches_processed: usize,
    pub nodes_created: usize,
    pub nodes_updated: usize,
    pub strings_translated: usize,
    pub branches: Vec<BranchReport>,
}

impl RunSummary {
    /// All branch warnings, in processing order.
    pub fn warnings(&self) -> Vec<&str> {
        self.branches
            .iter()
            .flat_map(|b| b.warnings.iter().map(String::as_str))
            .collect()
    }

    pub fn branch(&self, label: &str) -> Option<&BranchReport> {
        self.branches.iter().find(|b| b.label == label)
    }
}

/// Node-set difference between the document before and after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub total_nodes: usize,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

impl DiffSummary {
    pub fn between(before: &Document, after: &Document) -> Self {
        let old: AHashSet<&NodeId> = before.nodes.keys().collect();
        let new: AHashSet<&NodeId> = after.nodes.keys().collect();

        let mut added: Vec<NodeId> = new.difference(&old).map(|id| (*id).clone()).collect();
        let mut removed: Vec<NodeId> = old.difference(&new).map(|id| (*id).clone()).collect();
        added.sort_by(compare_ids);
        removed.sort_by(compare_ids);

        Self {
            total_nodes: after.len(),
            added,
            removed,
        }
    }
}

// Numeric ids sort by value, anything else after them by text.
fn compare_ids(a: &NodeId, b: &NodeId) -> std::cmp::Ordering {
    match (a.numeric(), b.numeric()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.as_str().cmp(b.as_str()),
    }
}

/// Everything `Engine::run_and_persist` produces.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub validation: ValidationReport,
    pub diff: DiffSummary,
    /// False on a dry run.
    pub persisted: bool,
    pub document: Document,
}
