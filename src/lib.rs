//! # Utsushi - Branch Mirroring for Node-Graph Workflows
//!
//! **Utsushi** rewrites a kiosk-style workflow document so that every
//! selection branch of its choice page becomes a structural copy of one
//! template branch. Existing branch entries keep their ids, so the routing of
//! the choice page stays valid while everything behind it is rebuilt.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Read a `Document` through a `DocumentStore` (a JSON file, an
//!     API envelope, or an in-memory value).
//! 2.  **Graft**: For every non-template selection, clone the template branch,
//!     splice the clone onto the existing entry and rewire its edges.
//! 3.  **Label**: Propagate breadcrumb labels through the new branch.
//! 4.  **Translate**: Pass user-visible text through a `TextTransform` for the
//!     branch's locale, leaving identifiers and placeholders untouched.
//! 5.  **Validate and Persist**: Refuse to save a document with dangling
//!     references or missing defaults; skip saving entirely on a dry run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use utsushi::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let options = RunOptions {
//!         dry_run: false,
//!         ..RunOptions::default()
//!     };
//!     let engine = Engine::builder(options)
//!         .with_transform(Box::new(MockTranslator))
//!         .build();
//!
//!     let mut store = JsonFileStore::new("workflow.json");
//!     let report = engine.run_and_persist(&mut store)?;
//!
//!     println!("{}", SummaryFormatter::format_summary(&report.summary));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod graft;
pub mod graph;
pub mod prelude;
pub mod router;
pub mod store;
pub mod translate;
pub mod validator;
