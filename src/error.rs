use crate::document::NodeId;
use crate::validator::ValidationIssue;
use itertools::Itertools;
use thiserror::Error;

/// Errors that can occur while decoding or encoding a workflow document.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to serialize workflow: {0}")]
    SerializeError(String),

    #[error("Workflow 'body' is missing or not a non-empty string")]
    MissingBody,

    #[error("Workflow 'body' is not a valid document: {0}")]
    MalformedBody(String),
}

/// Errors raised by a `DocumentStore` implementation.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Fatal errors that abort a whole mirroring run before anything is persisted.
#[derive(Error, Debug, Clone)]
pub enum GraftError {
    #[error("Choice page with configuration.data_name == '{marker}' not found")]
    ChoicePageNotFound { marker: String },

    #[error("Choice page '{page_id}' has no selectable options")]
    NoChoices { page_id: NodeId },

    #[error("Source selection '{label}' not found among the choice page options")]
    SourceLabelNotFound { label: String },

    #[error("No entry node found for source selection '{label}'")]
    TemplateEntryNotFound { label: String },

    #[error("Node '{node_id}' not found, which is required by {context}")]
    NodeNotFound { node_id: NodeId, context: String },

    #[error("No numeric node id is left above the largest existing one")]
    IdSpaceExhausted,

    #[error("Branch entry '{entry}' is part of the template branch and cannot be grafted")]
    BranchOverlapsTemplate { entry: NodeId },

    #[error("Validation failed, refusing to persist: {}", .0.iter().join("; "))]
    ValidationFailed(Vec<ValidationIssue>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors a `TextTransform` may report for a single piece of text.
///
/// These never abort a run: the field keeps its original text.
#[derive(Error, Debug, Clone)]
pub enum TransformError {
    #[error("Translation backend failed: {0}")]
    Backend(String),

    #[error("Unsupported target locale '{0}'")]
    UnsupportedLocale(String),
}

/// Errors that can occur when reading run configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
