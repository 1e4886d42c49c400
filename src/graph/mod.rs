//! Read-only traversal and structural fingerprinting, plus subgraph cloning.
mod cloner;
mod signature;
mod walker;

pub use cloner::{SubgraphClone, clone_subgraph};
pub use signature::ShapeSignature;
pub use walker::{Walk, walk};
