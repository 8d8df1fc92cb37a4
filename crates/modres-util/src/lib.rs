//! Shared utilities for modres.
//!
//! This crate provides cross-cutting concerns used by the other modres
//! crates: the unified error type, filesystem helpers for locating module
//! manifests, and Cargo-style terminal status lines.

pub mod errors;
pub mod fs;
pub mod progress;
