//! Module dependency resolution engine: graph construction, version
//! constraint validation, conflict detection, and depth-first load ordering
//! with cycle detection.
//!
//! Resolution is a pure, synchronous computation. Every call builds its own
//! [`graph::Graph`] and nothing is shared between calls.

pub mod conflict;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod validator;

pub use error::ResolveError;
pub use graph::{BuildOutcome, Graph, GraphBuilder};
pub use resolver::{resolve, DependencyResolver, LoadOrder};
pub use validator::VersionValidator;
