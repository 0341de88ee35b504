#![forbid(unsafe_code)]
//! modelmeta — static field-path metadata generator for plain data models.
//!
//! Scans packages of Java-style model classes and produces, per model, a flat
//! catalogue of every field reachable from it, including fields nested inside
//! other models and collections of models, bounded per field name by a
//! configurable depth limit. This crate wires the semantic core
//! (`modelmeta_core`) and the extraction frontend (`modelmeta_syntax`)
//! into a pipeline with pluggable class providers and artifact emitters.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod emit;
pub mod pipeline;
pub mod provider;
pub mod version;

pub use emit::{Emitter, OutputFormat};
pub use pipeline::{ModelExpansion, ScanConfig, ScanReport, scan};
pub use provider::{ClassProvider, InMemoryProvider, SourceDirProvider};

pub use modelmeta_core::{
    DepthLimit, Expansion, FieldDescriptor, MetadataEntry, ModelRegistry, RawClass, RawField,
    RawType, TypeIdentity, expand,
};
