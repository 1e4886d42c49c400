use super::model::Document;
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workflow as the API hands it out: metadata plus the graph, JSON-encoded in `body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `{"workflow": {...}}` wrapper used by both GET and PUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEnvelope {
    pub workflow: Workflow,
}

impl Workflow {
    pub fn new(id: impl Into<Value>, document: &Document) -> Result<Self, DocumentError> {
        let mut workflow = Self {
            id: id.into(),
            body: None,
            extra: Map::new(),
        };
        workflow.set_document(document)?;
        Ok(workflow)
    }

    /// Decodes the inner graph out of `body`.
    pub fn document(&self) -> Result<Document, DocumentError> {
        let body = self
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .ok_or(DocumentError::MissingBody)?;
        serde_json::from_str(body).map_err(|e| DocumentError::MalformedBody(e.to_string()))
    }

    /// Replaces `body` with the compact encoding of `document`.
    pub fn set_document(&mut self, document: &Document) -> Result<(), DocumentError> {
        self.body = Some(document.to_json()?);
        Ok(())
    }

    /// The workflow id as a plain string, whether it was stored as a number or a string.
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
