use crate::config::WorkflowSchema;
use crate::document::{Document, NodeId};
use crate::graph::ShapeSignature;
use crate::router::ChoicePage;
use thiserror::Error;

/// Which kind of edge a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Condition(usize),
    Default,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::Condition(index) => write!(f, "condition {} result", index),
            EdgeKind::Default => write!(f, "default"),
        }
    }
}

/// A single finding of the validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Document has no nodes")]
    EmptyDocument,

    #[error("starting_node_id '{0}' not found in nodes")]
    MissingStartingNode(NodeId),

    #[error("Dangling reference: node {node} {edge} -> {target} not found")]
    DanglingReference {
        node: NodeId,
        edge: EdgeKind,
        target: NodeId,
    },

    #[error("Missing default: node {node} ({template_id}) must have a non-null next.default")]
    MissingDefault { node: NodeId, template_id: String },

    #[error("Node key/id mismatch: key={key} id={id}")]
    KeyIdMismatch { key: NodeId, id: NodeId },

    #[error("Choice page unusable: {0}")]
    ChoicePageMissing(String),

    #[error("Topology mismatch for '{label}' at step {position}: {template} vs {branch}")]
    ShapeMismatch {
        label: String,
        position: usize,
        template: String,
        branch: String,
    },
}

impl ValidationIssue {
    /// Fatal findings block persistence; the rest are reported only.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ValidationIssue::EmptyDocument
                | ValidationIssue::MissingStartingNode(_)
                | ValidationIssue::DanglingReference { .. }
                | ValidationIssue::MissingDefault { .. }
        )
    }
}

/// Everything the validator found, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, issue: ValidationIssue) {
        if issue.is_fatal() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }
}

/// Checks the referential and structural invariants of a whole document.
pub fn validate(doc: &Document, schema: &WorkflowSchema) -> ValidationReport {
    let mut report = ValidationReport::default();

    if doc.is_empty() {
        report.push(ValidationIssue::EmptyDocument);
        return report;
    }

    if let Some(start) = doc.starting_node_id.as_ref() {
        if !doc.contains(start.as_str()) {
            report.push(ValidationIssue::MissingStartingNode(start.clone()));
        }
    }

    for (key, node) in &doc.nodes {
        if node.id != *key {
            report.push(ValidationIssue::KeyIdMismatch {
                key: key.clone(),
                id: node.id.clone(),
            });
        }

        if let Some(next) = node.next.as_ref() {
            for (index, condition) in next.conditions.iter().enumerate() {
                if let Some(target) = &condition.result {
                    if !doc.contains(target.as_str()) {
                        report.push(ValidationIssue::DanglingReference {
                            node: key.clone(),
                            edge: EdgeKind::Condition(index),
                            target: target.clone(),
                        });
                    }
                }
            }
            if let Some(target) = &next.default {
                if !doc.contains(target.as_str()) {
                    report.push(ValidationIssue::DanglingReference {
                        node: key.clone(),
                        edge: EdgeKind::Default,
                        target: target.clone(),
                    });
                }
            }
        }

        if !schema.is_terminal(node.template()) && node.default_target().is_none() {
            report.push(ValidationIssue::MissingDefault {
                node: key.clone(),
                template_id: node.template().to_string(),
            });
        }
    }

    if let Err(e) = ChoicePage::locate(doc, schema) {
        report.push(ValidationIssue::ChoicePageMissing(e.to_string()));
    }

    report
}

/// Compares a processed branch against the template's shape.
///
/// Divergence is a warning only: the branch is still written.
pub fn check_branch_shape(
    doc: &Document,
    label: &str,
    entry: &str,
    template: &ShapeSignature,
) -> Option<ValidationIssue> {
    let branch = ShapeSignature::compute(doc, entry);
    let position = template.first_divergence(&branch)?;
    Some(ValidationIssue::ShapeMismatch {
        label: label.to_string(),
        position,
        template: template.to_string(),
        branch: branch.to_string(),
    })
}
