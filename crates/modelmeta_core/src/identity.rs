//! Canonical type identities.
//!
//! Every declared field type is normalized to exactly one [`TypeIdentity`]
//! before traversal begins. Resolution is total: names that cannot be pinned
//! to a scanned model degrade to [`TypeIdentity::Opaque`] rather than erroring.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Namespace assumed for names that match neither an import nor a scanned
/// class (the original generator's `java.lang` fallback). Callers may
/// override it per run.
pub const DEFAULT_EXTERNAL_NAMESPACE: &str = "java.lang";

/// Canonical reference to a type.
///
/// Either a scanned, field-bearing model or an opaque leaf (built-ins,
/// third-party types, and anything resolution could not place). Equality,
/// ordering, and hashing all go through the canonical qualified name, so a
/// `Model` and an `Opaque` spelling of the same qualified name compare equal.
#[derive(Debug, Clone)]
pub enum TypeIdentity {
    /// A scanned type with a registered field list.
    Model {
        namespace: String,
        simple_name: String,
    },
    /// Anything else: treated as a traversal leaf.
    Opaque { qualified: String },
}

impl TypeIdentity {
    pub fn model(namespace: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self::Model {
            namespace: namespace.into(),
            simple_name: simple_name.into(),
        }
    }

    pub fn opaque(qualified: impl Into<String>) -> Self {
        Self::Opaque {
            qualified: qualified.into(),
        }
    }

    /// The canonical dotted name (`namespace.SimpleName` for models).
    pub fn qualified_name(&self) -> String {
        match self {
            Self::Model {
                namespace,
                simple_name,
            } => format!("{namespace}.{simple_name}"),
            Self::Opaque { qualified } => qualified.clone(),
        }
    }

    /// The last dotted segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Model { simple_name, .. } => simple_name,
            Self::Opaque { qualified } => qualified.rsplit('.').next().unwrap_or(qualified),
        }
    }

    /// Whether this identity was classified as a scanned model.
    ///
    /// Note that traversal eligibility is decided by the registry
    /// (`ModelRegistry::is_model`), not by this tag alone.
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model { .. })
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name() == other.qualified_name()
    }
}

impl Eq for TypeIdentity {}

impl Ord for TypeIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name().cmp(&other.qualified_name())
    }
}

impl PartialOrd for TypeIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name().hash(state);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}
