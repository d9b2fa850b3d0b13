//! `tracelens-redact`: shape-preserving, value-opaque JSON rendering.
//!
//! A body is parsed into a [`RedactionTree`] and rendered back to JSON text in
//! which every object keeps every member name (in original order, repeats
//! included) and every array keeps its exact length, while scalar leaves are replaced by a canonical
//! placeholder for their type. Booleans are the only scalars whose value survives.

pub mod error;
pub mod render;
pub mod tree;

pub use error::{RedactError, RedactResult};
pub use render::{parse, redact, render};
pub use tree::RedactionTree;
