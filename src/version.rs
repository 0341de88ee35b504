//! modelmeta version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile
//! time; prefer this constant over repeating the `env!` invocation.

/// The modelmeta version string (for example, `0.2.0`).
pub const MODELMETA_VERSION: &str = env!("CARGO_PKG_VERSION");
