//! Prelude module for convenient imports
//!
//! Re-exports the types needed to run a mirroring pass end to end.
//!
//! # Example
//!
//! ```rust,no_run
//! use utsushi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut doc = Document::from_json(&std::fs::read_to_string("workflow.json")?)?;
//! let engine = Engine::builder(RunOptions::default()).build();
//! let summary = engine.run(&mut doc)?;
//! println!("{}", SummaryFormatter::format_summary(&summary));
//! # Ok(())
//! # }
//! ```

// Orchestration
pub use crate::config::{RunOptions, WorkflowSchema};
pub use crate::engine::{Engine, EngineBuilder, RunReport, RunSummary, SummaryFormatter};

// Document model
pub use crate::document::{
    Condition, Document, Next, Node, NodeId, Nullable, Workflow, WorkflowEnvelope,
};

// Persistence
pub use crate::store::{DocumentStore, JsonFileStore, MemoryStore};

// Text transforms
pub use crate::translate::{IdentityTransform, MockTranslator, TextTransform};

// Validation
pub use crate::validator::{ValidationIssue, ValidationReport, validate};

// Error types
pub use crate::error::{ConfigError, DocumentError, GraftError, StoreError, TransformError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
