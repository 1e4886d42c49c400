//! Where documents come from and go to.
//!
//! Remote API clients implement `DocumentStore` outside this crate.
use crate::document::{Document, Workflow, WorkflowEnvelope};
use crate::error::{DocumentError, StoreError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Load/save capability the engine persists through.
pub trait DocumentStore {
    fn load(&mut self) -> Result<Document, StoreError>;
    fn save(&mut self, document: &Document) -> Result<(), StoreError>;
}

/// The shape a file was read in, reused when writing it back.
#[derive(Debug, Clone)]
enum FileLayout {
    Envelope(WorkflowEnvelope),
    Workflow(Workflow),
    Bare,
}

/// A JSON file holding either `{"workflow": {...}}`, a bare workflow with a
/// `body` string, or the document itself.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    input: PathBuf,
    output: PathBuf,
    layout: FileLayout,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let input = path.into();
        Self {
            output: input.clone(),
            input,
            layout: FileLayout::Bare,
        }
    }

    /// Writes to `path` instead of overwriting the input file.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn io_error(path: &Path, e: impl std::fmt::Display) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, DocumentError> {
    serde_json::from_value(value).map_err(|e| DocumentError::JsonParseError(e.to_string()))
}

impl DocumentStore for JsonFileStore {
    fn load(&mut self) -> Result<Document, StoreError> {
        let content = fs::read_to_string(&self.input).map_err(|e| Self::io_error(&self.input, e))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| DocumentError::JsonParseError(e.to_string()))?;

        let (layout, document) = if value.get("workflow").is_some() {
            let envelope: WorkflowEnvelope = parse(value)?;
            let document = envelope.workflow.document()?;
            (FileLayout::Envelope(envelope), document)
        } else if value.get("nodes").is_none() && value.get("body").is_some() {
            let workflow: Workflow = parse(value)?;
            let document = workflow.document()?;
            (FileLayout::Workflow(workflow), document)
        } else {
            (FileLayout::Bare, parse(value)?)
        };

        tracing::debug!(
            path = %self.input.display(),
            nodes = document.len(),
            "Loaded workflow document"
        );
        self.layout = layout;
        Ok(document)
    }

    fn save(&mut self, document: &Document) -> Result<(), StoreError> {
        let json = match &mut self.layout {
            FileLayout::Envelope(envelope) => {
                envelope.workflow.set_document(document)?;
                serde_json::to_string_pretty(envelope)
            }
            FileLayout::Workflow(workflow) => {
                workflow.set_document(document)?;
                serde_json::to_string_pretty(workflow)
            }
            FileLayout::Bare => serde_json::to_string_pretty(document),
        }
        .map_err(|e| DocumentError::SerializeError(e.to_string()))?;

        fs::write(&self.output, json).map_err(|e| Self::io_error(&self.output, e))?;
        tracing::info!(path = %self.output.display(), "Saved workflow document");
        Ok(())
    }
}

/// Keeps the document in memory; counts saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub document: Document,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new(document: Document) -> Self {
        Self { document, saves: 0 }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&mut self) -> Result<Document, StoreError> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &Document) -> Result<(), StoreError> {
        self.document = document.clone();
        self.saves += 1;
        Ok(())
    }
}
