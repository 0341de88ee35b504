//! Semantic core for the modelmeta generator.
//!
//! This crate contains the deterministic heart of the tool: canonical type
//! identities, the model registry, the type resolver, and the cycle-aware
//! path expansion engine that turns a graph of plain data models into a flat
//! catalogue of reachable field paths.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state. Everything
//!   operates over in-memory structures handed in by the caller.
//! - Extraction (parsing model sources into [`RawClass`] values) and emission
//!   (writing artifacts) live in other crates; this crate only defines the
//!   raw input shapes they exchange.
//! - All iteration orders are deterministic: for a fixed set of inputs and a
//!   fixed depth limit, every function in this crate yields identical output
//!   across runs.

pub mod error;
pub mod expand;
pub mod field;
pub mod identity;
pub mod registry;
pub mod resolve;

pub use error::ConfigurationError;
pub use expand::{DepthLimit, Expansion, MetadataEntry, expand};
pub use field::{FieldDescriptor, NamespaceInput, RawClass, RawField, RawType};
pub use identity::{DEFAULT_EXTERNAL_NAMESPACE, TypeIdentity};
pub use registry::{ModelEntry, ModelRegistry, RegistryBuilder};
pub use resolve::{DiscoveredClasses, ResolutionStats, Resolver};
