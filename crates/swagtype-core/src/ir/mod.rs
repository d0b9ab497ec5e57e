//! Resolved, reference-free model handed to emitters.

pub mod operations;
pub mod schemas;

pub use operations::*;
pub use schemas::*;
