//! Core data types for modres.
//!
//! This crate defines the values the resolver works over: validated module
//! keys, lenient semantic versions, version constraint expressions, immutable
//! module descriptors, the caller-owned module registry with its interface
//! and tag indexes, the `Modules.toml` manifest used for discovery, and the
//! global configuration.
//!
//! This crate is intentionally free of resolution logic.

/// Default file name of the module manifest.
pub const DEFAULT_MANIFEST_NAME: &str = "Modules.toml";

pub mod config;
pub mod descriptor;
pub mod key;
pub mod manifest;
pub mod registry;
pub mod version;
