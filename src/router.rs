use crate::config::WorkflowSchema;
use crate::document::{Document, Node, NodeId};
use crate::error::GraftError;
use indexmap::IndexMap;

/// One selectable option of the choice page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: i64,
    pub label: String,
}

/// The top-level choice page and where each of its options leads.
#[derive(Debug, Clone)]
pub struct ChoicePage {
    pub node_id: NodeId,
    /// Options in the order the page lists them.
    pub options: Vec<ChoiceOption>,
    /// Label -> branch entry. Options without an explicit condition inherit the page default.
    pub routes: IndexMap<String, Option<NodeId>>,
    pub default: Option<NodeId>,
}

impl ChoicePage {
    /// Finds the page whose `configuration.data_name` carries the schema's choice marker.
    pub fn locate(doc: &Document, schema: &WorkflowSchema) -> Result<Self, GraftError> {
        let node = doc
            .nodes
            .values()
            .find(|node| is_choice_page(node, schema))
            .ok_or_else(|| GraftError::ChoicePageNotFound {
                marker: schema.choice_marker.clone(),
            })?;
        Self::from_node(node, schema)
    }

    fn from_node(node: &Node, schema: &WorkflowSchema) -> Result<Self, GraftError> {
        let mut options: Vec<ChoiceOption> = Vec::new();
        for (id, label) in node.reasons() {
            // A later duplicate id wins, like a dictionary keyed by id.
            options.retain(|o| o.id != id);
            options.push(ChoiceOption { id, label });
        }
        if options.is_empty() {
            return Err(GraftError::NoChoices {
                page_id: node.id.clone(),
            });
        }

        let default = node.default_target().cloned();
        let mut routes: IndexMap<String, Option<NodeId>> = IndexMap::new();
        if let Some(next) = node.next.as_ref() {
            for condition in next
                .conditions
                .iter()
                .filter(|c| c.compares(&schema.choice_field))
            {
                let Some(rval) = condition.rval_as_i64() else {
                    continue;
                };
                if let Some(option) = options.iter().find(|o| o.id == rval) {
                    routes.insert(option.label.clone(), condition.result.clone());
                }
            }
        }
        if default.is_some() {
            for option in &options {
                if !routes.contains_key(&option.label) {
                    routes.insert(option.label.clone(), default.clone());
                }
            }
        }

        tracing::debug!(page = %node.id, ?routes, ?default, "Choice routing resolved");

        Ok(Self {
            node_id: node.id.clone(),
            options,
            routes,
            default,
        })
    }

    pub fn option(&self, label: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// The branch entry a label routes to, explicit or inherited.
    pub fn entry_for(&self, label: &str) -> Option<&NodeId> {
        self.routes.get(label).and_then(Option::as_ref)
    }

    /// Entry of the template branch, falling back to the page default.
    pub fn template_entry(&self, label: &str) -> Result<NodeId, GraftError> {
        if self.option(label).is_none() {
            return Err(GraftError::SourceLabelNotFound {
                label: label.to_string(),
            });
        }
        if let Some(entry) = self.entry_for(label) {
            return Ok(entry.clone());
        }
        match &self.default {
            Some(default) => {
                tracing::warn!(
                    label,
                    default = %default,
                    "No explicit start for source selection; using page default"
                );
                Ok(default.clone())
            }
            None => Err(GraftError::TemplateEntryNotFound {
                label: label.to_string(),
            }),
        }
    }
}

fn is_choice_page(node: &Node, schema: &WorkflowSchema) -> bool {
    node.node_type.as_deref() == Some(schema.choice_page_type.as_str())
        && node
            .config_value("data_name")
            .and_then(|v| v.as_str())
            .is_some_and(|marker| marker == schema.choice_marker)
}
