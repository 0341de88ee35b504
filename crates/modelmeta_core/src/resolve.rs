//! Type resolution: raw declared names to canonical identities.
//!
//! Resolution is a total function. In priority order, a name is matched
//! against the declaring class's imports, then against the set of classes
//! discovered anywhere in the scanned namespaces, and finally defaulted into
//! the configured external namespace. Nothing here ever fails; the cost of
//! that policy is that a genuinely unresolvable name is silently tagged as
//! external, which is why every fallback is counted and logged.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::field::{FieldDescriptor, RawField, RawType};
use crate::identity::TypeIdentity;

/// Set of classes discovered across all scanned namespaces, keyed by simple
/// name. The namespace set is ordered so ambiguity tie-breaks are stable.
pub type DiscoveredClasses = BTreeMap<String, BTreeSet<String>>;

/// Counts of how each name was resolved during a registry build.
///
/// `opaque_fallbacks` is the number worth auditing: it is how many names
/// were *assumed* external rather than matched confidently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Names matched against an import of the declaring class.
    pub via_import: usize,
    /// Bare names matched to a discovered class.
    pub via_discovery: usize,
    /// Names written fully qualified in the source.
    pub already_qualified: usize,
    /// Names defaulted into the external namespace.
    pub opaque_fallbacks: usize,
    /// Bare names that matched classes in more than one namespace.
    pub ambiguous: usize,
}

/// Resolves raw type names against a fixed discovery set.
///
/// Built by [`crate::registry::RegistryBuilder`] after its discovery phase,
/// so every scanned class is visible regardless of namespace scan order.
pub struct Resolver<'a> {
    default_namespace: &'a str,
    discovered: &'a DiscoveredClasses,
}

impl<'a> Resolver<'a> {
    pub fn new(default_namespace: &'a str, discovered: &'a DiscoveredClasses) -> Self {
        Self {
            default_namespace,
            discovered,
        }
    }

    /// Resolve one extracted field into an immutable descriptor.
    pub fn resolve_field(
        &self,
        raw: &RawField,
        imports: &[String],
        current_namespace: &str,
        stats: &mut ResolutionStats,
    ) -> FieldDescriptor {
        let (declared_type, element_type) =
            self.resolve_type(&raw.ty, imports, current_namespace, stats);
        FieldDescriptor {
            name: raw.name.clone(),
            declared_type,
            element_type,
            is_static: raw.is_static,
        }
    }

    /// Resolve a declared type and, for parameterized types, its element type.
    ///
    /// Every type argument is resolved (recursively, so nested arguments are
    /// accounted for in the stats), but only the first becomes the element
    /// type; the outer type keeps its own identity.
    pub fn resolve_type(
        &self,
        raw: &RawType,
        imports: &[String],
        current_namespace: &str,
        stats: &mut ResolutionStats,
    ) -> (TypeIdentity, Option<TypeIdentity>) {
        let outer = self.resolve_name(&raw.name, imports, current_namespace, stats);
        let mut element = None;
        for arg in &raw.args {
            let (resolved, _) = self.resolve_type(arg, imports, current_namespace, stats);
            if element.is_none() {
                element = Some(resolved);
            }
        }
        (outer, element)
    }

    /// The three-rule cascade, plus a shortcut for names written qualified.
    fn resolve_name(
        &self,
        name: &str,
        imports: &[String],
        current_namespace: &str,
        stats: &mut ResolutionStats,
    ) -> TypeIdentity {
        // Already-qualified names bypass the cascade.
        if let Some((namespace, simple)) = name.rsplit_once('.') {
            stats.already_qualified += 1;
            return self.classify_qualified(namespace, simple, name);
        }

        // Rule 1: exact match on the last segment of an import.
        if let Some(import) = imports
            .iter()
            .find(|i| i.rsplit('.').next() == Some(name))
        {
            stats.via_import += 1;
            if let Some((namespace, simple)) = import.rsplit_once('.') {
                return self.classify_qualified(namespace, simple, import);
            }
            return TypeIdentity::opaque(import.clone());
        }

        // Rule 2: a class discovered somewhere in the scanned namespaces.
        if let Some(namespaces) = self.discovered.get(name) {
            stats.via_discovery += 1;
            if namespaces.len() > 1 {
                stats.ambiguous += 1;
                warn!(
                    name,
                    candidates = ?namespaces,
                    "ambiguous simple name; preferring declaring namespace, then lexical order"
                );
            }
            let namespace = if namespaces.contains(current_namespace) {
                current_namespace
            } else {
                // BTreeSet iteration gives the lexically smallest namespace.
                namespaces
                    .iter()
                    .next()
                    .map(String::as_str)
                    .unwrap_or(current_namespace)
            };
            return TypeIdentity::model(namespace, name);
        }

        // Rule 3: assume external.
        stats.opaque_fallbacks += 1;
        debug!(
            name,
            assumed_namespace = self.default_namespace,
            "unresolved name defaulted to opaque"
        );
        TypeIdentity::opaque(format!("{}.{}", self.default_namespace, name))
    }

    fn classify_qualified(&self, namespace: &str, simple: &str, full: &str) -> TypeIdentity {
        let is_scanned = self
            .discovered
            .get(simple)
            .is_some_and(|namespaces| namespaces.contains(namespace));
        if is_scanned {
            TypeIdentity::model(namespace, simple)
        } else {
            TypeIdentity::opaque(full)
        }
    }
}
