//! The model registry and its two-phase builder.
//!
//! The registry maps a canonical [`TypeIdentity`] to the ordered field list
//! of a scanned model. It is populated once per run and read-only afterwards;
//! the expansion engine only ever reads it.
//!
//! The builder works in two explicit phases: first it discovers every class
//! across *all* added namespaces, then it resolves every field against that
//! complete discovery set. A type used in namespace A but declared in
//! namespace B therefore resolves the same way no matter which namespace was
//! added first.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::field::{FieldDescriptor, NamespaceInput};
use crate::identity::TypeIdentity;
use crate::resolve::{DiscoveredClasses, ResolutionStats, Resolver};

/// Registry value: the ordered field list of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub fields: Vec<FieldDescriptor>,
}

/// Read-only table mapping model identities to their field lists.
///
/// Backed by a `BTreeMap` so iteration order is the lexical order of
/// qualified names, which keeps downstream output deterministic.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: BTreeMap<TypeIdentity, ModelEntry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the field list for a type.
    pub fn register(&mut self, identity: TypeIdentity, fields: Vec<FieldDescriptor>) {
        self.entries.insert(identity, ModelEntry { fields });
    }

    /// The field list registered for a type, if any. Absence is a valid
    /// answer, not an error.
    pub fn lookup(&self, identity: &TypeIdentity) -> Option<&[FieldDescriptor]> {
        self.entries.get(identity).map(|e| e.fields.as_slice())
    }

    /// True iff a field list has been registered for this identity.
    pub fn is_model(&self, identity: &TypeIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// All registered model identities, in lexical qualified-name order.
    pub fn model_identities(&self) -> impl Iterator<Item = &TypeIdentity> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two-phase registry construction over one or more namespaces.
pub struct RegistryBuilder {
    default_namespace: String,
    namespaces: Vec<NamespaceInput>,
}

impl RegistryBuilder {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            namespaces: Vec::new(),
        }
    }

    pub fn add_namespace(&mut self, input: NamespaceInput) -> &mut Self {
        self.namespaces.push(input);
        self
    }

    /// Discover all classes, then resolve all fields, then build the registry.
    ///
    /// ## Errors
    /// [`ConfigurationError::NoNamespaces`] if nothing was added.
    pub fn build(mut self) -> Result<(ModelRegistry, ResolutionStats), ConfigurationError> {
        if self.namespaces.is_empty() {
            return Err(ConfigurationError::NoNamespaces);
        }

        // Classes are processed in lexical simple-name order within each
        // namespace so resolution tie-breaks stay reproducible regardless of
        // extraction order.
        for input in &mut self.namespaces {
            input
                .classes
                .sort_by(|a, b| a.simple_name.cmp(&b.simple_name));
        }

        // Phase 1: discovery across every namespace.
        let mut discovered = DiscoveredClasses::new();
        for input in &self.namespaces {
            for class in &input.classes {
                discovered
                    .entry(class.simple_name.clone())
                    .or_default()
                    .insert(input.namespace.clone());
            }
        }

        // Phase 2: resolve every field against the full discovery set.
        let resolver = Resolver::new(&self.default_namespace, &discovered);
        let mut registry = ModelRegistry::new();
        let mut stats = ResolutionStats::default();
        for input in &self.namespaces {
            for class in &input.classes {
                let fields: Vec<FieldDescriptor> = class
                    .fields
                    .iter()
                    .map(|raw| {
                        resolver.resolve_field(raw, &class.imports, &input.namespace, &mut stats)
                    })
                    .collect();
                debug!(
                    namespace = %input.namespace,
                    class = %class.simple_name,
                    fields = fields.len(),
                    "registered model"
                );
                registry.register(
                    TypeIdentity::model(&input.namespace, &class.simple_name),
                    fields,
                );
            }
        }

        info!(
            models = registry.len(),
            opaque_fallbacks = stats.opaque_fallbacks,
            ambiguous = stats.ambiguous,
            "registry built"
        );
        Ok((registry, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{RawClass, RawField, RawType};

    fn class(simple_name: &str, fields: Vec<RawField>) -> RawClass {
        RawClass {
            simple_name: simple_name.to_string(),
            imports: Vec::new(),
            fields,
        }
    }

    fn field(name: &str, ty: &str) -> RawField {
        RawField {
            name: name.to_string(),
            ty: RawType::simple(ty),
            is_static: false,
        }
    }

    #[test]
    fn build_requires_at_least_one_namespace() {
        let builder = RegistryBuilder::new("java.lang");
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigurationError::NoNamespaces
        );
    }

    #[test]
    fn sibling_reference_resolves_to_model() {
        let mut builder = RegistryBuilder::new("java.lang");
        builder.add_namespace(NamespaceInput {
            namespace: "com.example".to_string(),
            classes: vec![
                class("Person", vec![field("address", "Address")]),
                class("Address", vec![field("city", "String")]),
            ],
        });
        let (registry, _) = builder.build().unwrap();

        let person = TypeIdentity::model("com.example", "Person");
        let fields = registry.lookup(&person).unwrap();
        assert_eq!(
            fields[0].declared_type,
            TypeIdentity::model("com.example", "Address")
        );
        assert!(registry.is_model(&fields[0].declared_type));
    }

    #[test]
    fn cross_namespace_reference_is_order_independent() {
        // The namespace declaring Shared is added *after* the one using it;
        // two-phase discovery must still resolve it as a model.
        for flip in [false, true] {
            let user_ns = NamespaceInput {
                namespace: "app.models".to_string(),
                classes: vec![class("Order", vec![field("shared", "Shared")])],
            };
            let decl_ns = NamespaceInput {
                namespace: "app.common".to_string(),
                classes: vec![class("Shared", vec![field("id", "Long")])],
            };

            let mut builder = RegistryBuilder::new("java.lang");
            if flip {
                builder.add_namespace(decl_ns);
                builder.add_namespace(user_ns);
            } else {
                builder.add_namespace(user_ns);
                builder.add_namespace(decl_ns);
            }
            let (registry, _) = builder.build().unwrap();

            let order = TypeIdentity::model("app.models", "Order");
            let fields = registry.lookup(&order).unwrap();
            assert_eq!(
                fields[0].declared_type,
                TypeIdentity::model("app.common", "Shared"),
                "flip={flip}"
            );
        }
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut registry = ModelRegistry::new();
        let id = TypeIdentity::model("a", "B");
        registry.register(id.clone(), vec![]);
        registry.register(
            id.clone(),
            vec![FieldDescriptor {
                name: "x".to_string(),
                declared_type: TypeIdentity::opaque("java.lang.Long"),
                element_type: None,
                is_static: false,
            }],
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(&id).unwrap().len(), 1);
    }

    #[test]
    fn unresolvable_field_type_is_opaque_not_model() {
        let mut builder = RegistryBuilder::new("java.lang");
        builder.add_namespace(NamespaceInput {
            namespace: "com.example".to_string(),
            classes: vec![class("Person", vec![field("mystery", "Mystery")])],
        });
        let (registry, stats) = builder.build().unwrap();

        let person = TypeIdentity::model("com.example", "Person");
        let fields = registry.lookup(&person).unwrap();
        assert_eq!(fields[0].declared_type.qualified_name(), "java.lang.Mystery");
        assert!(!registry.is_model(&fields[0].declared_type));
        assert_eq!(stats.opaque_fallbacks, 1);
    }
}
