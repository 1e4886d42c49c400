pub mod envelope;
pub mod id;
pub mod model;
pub mod nullable;
pub mod sample;

pub use envelope::*;
pub use id::*;
pub use model::*;
pub use nullable::Nullable;
