//! Configuration errors raised before any scanning starts.

use thiserror::Error as ThisError;

/// Invalid run configuration. Fatal: nothing is scanned when one of these is
/// raised.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigurationError {
    #[error("no namespaces were given to scan")]
    NoNamespaces,

    #[error("depth limit must be at least 1, got {0}")]
    InvalidDepthLimit(u32),
}
