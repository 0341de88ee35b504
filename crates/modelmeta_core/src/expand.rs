//! The path expansion engine.
//!
//! For one root model at a time, walks the registry and emits one
//! [`MetadataEntry`] per reachable field path, in a deterministic pre-order:
//! a field's own entry is emitted immediately before the engine descends into
//! it, and fields are visited in declaration order within each model.
//!
//! Termination is guaranteed by the [`TraversalBudget`]: recursion into a
//! model-valued field named `f` is permitted only while `f` occurs fewer than
//! `depth_limit` times in the current path. The bound is per field *name*,
//! counted along the current path only; distinct field names recursing into
//! the same model type are each bounded independently.

use std::collections::HashMap;

use tracing::trace;

use crate::error::ConfigurationError;
use crate::identity::TypeIdentity;
use crate::registry::ModelRegistry;

/// Validated per-field-name recursion bound. Must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimit(u32);

impl DepthLimit {
    pub fn new(limit: u32) -> Result<Self, ConfigurationError> {
        if limit == 0 {
            return Err(ConfigurationError::InvalidDepthLimit(limit));
        }
        Ok(Self(limit))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        Self(1)
    }
}

/// One catalogue entry: a dotted path from the root model to a field,
/// together with the field's resolved types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// Chain of field names from the root; the last segment is the field's
    /// own name. Never empty.
    pub path: Vec<String>,
    pub value_type: TypeIdentity,
    pub element_type: Option<TypeIdentity>,
    /// Whether the engine found a registered model to recurse into for this
    /// field (through its element type or its declared type).
    pub model_valued: bool,
}

impl MetadataEntry {
    /// Dot-joined rendering, e.g. `address.city`.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }

    /// Underscore-joined rendering, usable as a generated identifier.
    pub fn identifier(&self) -> String {
        self.path.join("_")
    }

    /// True for fields declared directly on the root model.
    pub fn first_degree(&self) -> bool {
        self.path.len() == 1
    }
}

/// Result of expanding one root model.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub entries: Vec<MetadataEntry>,
}

impl Expansion {
    /// Whether anything was processed. Callers emit no artifact when false.
    pub fn processed(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Multiset of field names along the current path; the sole termination guard.
#[derive(Debug, Default)]
struct TraversalBudget {
    counts: HashMap<String, u32>,
}

impl TraversalBudget {
    fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    fn enter(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    fn exit(&mut self, name: &str) {
        if let Some(count) = self.counts.get_mut(name) {
            *count = count.saturating_sub(1);
        }
    }
}

/// Expand one root model into its flat field-path catalogue.
///
/// Deterministic for a fixed registry and depth limit. A root with no
/// non-static fields anywhere in its reachable subgraph yields an empty
/// expansion; that is "nothing to emit", not an error.
pub fn expand(root: &TypeIdentity, registry: &ModelRegistry, depth_limit: DepthLimit) -> Expansion {
    let mut expansion = Expansion::default();
    let mut prefix = Vec::new();
    let mut budget = TraversalBudget::default();
    walk(
        root,
        registry,
        depth_limit,
        &mut prefix,
        &mut budget,
        &mut expansion.entries,
    );
    expansion
}

fn walk(
    current: &TypeIdentity,
    registry: &ModelRegistry,
    depth_limit: DepthLimit,
    prefix: &mut Vec<String>,
    budget: &mut TraversalBudget,
    out: &mut Vec<MetadataEntry>,
) {
    let Some(fields) = registry.lookup(current) else {
        return;
    };

    for field in fields.iter().filter(|f| !f.is_static) {
        // Element type first: a collection of models recurses into the
        // element, not into the collection type itself.
        let candidate = field
            .element_type
            .as_ref()
            .filter(|t| registry.is_model(t))
            .or_else(|| Some(&field.declared_type).filter(|t| registry.is_model(t)));

        let mut path = prefix.clone();
        path.push(field.name.clone());
        out.push(MetadataEntry {
            path,
            value_type: field.declared_type.clone(),
            element_type: field.element_type.clone(),
            model_valued: candidate.is_some(),
        });

        if let Some(nested) = candidate {
            if budget.count(&field.name) < depth_limit.get() {
                budget.enter(&field.name);
                prefix.push(field.name.clone());
                walk(nested, registry, depth_limit, prefix, budget, out);
                prefix.pop();
                budget.exit(&field.name);
            } else {
                trace!(
                    field = %field.name,
                    prefix = prefix.join("."),
                    "depth limit reached; keeping shallow entry only"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;

    fn field(name: &str, declared: TypeIdentity) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            declared_type: declared,
            element_type: None,
            is_static: false,
        }
    }

    fn collection_field(
        name: &str,
        declared: TypeIdentity,
        element: TypeIdentity,
    ) -> FieldDescriptor {
        FieldDescriptor {
            element_type: Some(element),
            ..field(name, declared)
        }
    }

    fn opaque(name: &str) -> TypeIdentity {
        TypeIdentity::opaque(format!("java.lang.{name}"))
    }

    fn paths(expansion: &Expansion) -> Vec<String> {
        expansion.entries.iter().map(MetadataEntry::dotted).collect()
    }

    #[test]
    fn opaque_fields_yield_one_entry_each_without_recursion() {
        let mut registry = ModelRegistry::new();
        let person = TypeIdentity::model("m", "Person");
        registry.register(
            person.clone(),
            vec![field("age", opaque("Integer")), field("name", opaque("String"))],
        );

        let expansion = expand(&person, &registry, DepthLimit::default());
        assert_eq!(paths(&expansion), vec!["age", "name"]);
        assert!(expansion.entries.iter().all(|e| !e.model_valued));
    }

    #[test]
    fn self_reference_stops_at_depth_limit() {
        let mut registry = ModelRegistry::new();
        let node = TypeIdentity::model("m", "Node");
        registry.register(
            node.clone(),
            vec![field("name", opaque("String")), field("next", node.clone())],
        );

        let limit = DepthLimit::new(2).unwrap();
        let expansion = expand(&node, &registry, limit);
        assert_eq!(
            paths(&expansion),
            vec!["name", "next", "next.name", "next.next", "next.next.name", "next.next.next"]
        );
    }

    #[test]
    fn nested_model_expands_in_preorder() {
        let mut registry = ModelRegistry::new();
        let person = TypeIdentity::model("m", "Person");
        let address = TypeIdentity::model("m", "Address");
        registry.register(
            person.clone(),
            vec![
                field("name", opaque("String")),
                field("address", address.clone()),
                field("age", opaque("Integer")),
            ],
        );
        registry.register(
            address,
            vec![field("city", opaque("String")), field("zip", opaque("String"))],
        );

        let expansion = expand(&person, &registry, DepthLimit::default());
        assert_eq!(
            paths(&expansion),
            vec!["name", "address", "address.city", "address.zip", "age"]
        );
        assert!(expansion.entries[1].model_valued);
        assert!(expansion.entries[1].first_degree());
        assert!(!expansion.entries[2].first_degree());
    }

    #[test]
    fn collection_recurses_into_element_type() {
        let mut registry = ModelRegistry::new();
        let group = TypeIdentity::model("m", "Group");
        let person = TypeIdentity::model("m", "Person");
        registry.register(
            group.clone(),
            vec![collection_field(
                "members",
                opaque("List"),
                person.clone(),
            )],
        );
        registry.register(person.clone(), vec![field("name", opaque("String"))]);

        let expansion = expand(&group, &registry, DepthLimit::default());
        assert_eq!(paths(&expansion), vec!["members", "members.name"]);
        let members = &expansion.entries[0];
        assert_eq!(members.value_type.qualified_name(), "java.lang.List");
        assert_eq!(members.element_type, Some(person));
        assert!(members.model_valued);
    }

    #[test]
    fn distinct_field_names_are_bounded_independently() {
        let mut registry = ModelRegistry::new();
        let tree = TypeIdentity::model("m", "Tree");
        registry.register(
            tree.clone(),
            vec![
                field("parent", tree.clone()),
                collection_field("children", opaque("List"), tree.clone()),
            ],
        );

        let expansion = expand(&tree, &registry, DepthLimit::default());
        let got = paths(&expansion);
        // Each name gets its own one-hop budget: parent.* and children.* both
        // expand one level, including across each other.
        assert!(got.contains(&"parent".to_string()));
        assert!(got.contains(&"parent.children".to_string()));
        assert!(got.contains(&"children".to_string()));
        assert!(got.contains(&"children.parent".to_string()));
        // But no name repeats beyond the limit along one path.
        for path in &got {
            let segments: Vec<&str> = path.split('.').collect();
            for segment in &segments {
                let occurrences = segments.iter().filter(|s| *s == segment).count();
                assert!(occurrences <= 2, "path {path} overruns the budget");
            }
        }
    }

    #[test]
    fn static_fields_are_excluded() {
        let mut registry = ModelRegistry::new();
        let person = TypeIdentity::model("m", "Person");
        registry.register(
            person.clone(),
            vec![
                FieldDescriptor {
                    is_static: true,
                    ..field("SERIAL_VERSION", opaque("Long"))
                },
                field("name", opaque("String")),
            ],
        );

        let expansion = expand(&person, &registry, DepthLimit::default());
        assert_eq!(paths(&expansion), vec!["name"]);
    }

    #[test]
    fn empty_model_yields_nothing_processed() {
        let mut registry = ModelRegistry::new();
        let marker = TypeIdentity::model("m", "Marker");
        registry.register(marker.clone(), vec![]);

        let expansion = expand(&marker, &registry, DepthLimit::default());
        assert!(expansion.entries.is_empty());
        assert!(!expansion.processed());
    }

    #[test]
    fn expansion_is_deterministic() {
        let mut registry = ModelRegistry::new();
        let a = TypeIdentity::model("m", "A");
        let b = TypeIdentity::model("m", "B");
        registry.register(
            a.clone(),
            vec![field("b", b.clone()), field("x", opaque("String"))],
        );
        registry.register(b, vec![field("a", a.clone())]);

        let limit = DepthLimit::new(3).unwrap();
        let first = expand(&a, &registry, limit);
        let second = expand(&a, &registry, limit);
        assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn depth_limit_rejects_zero() {
        assert_eq!(
            DepthLimit::new(0).unwrap_err(),
            ConfigurationError::InvalidDepthLimit(0)
        );
    }

    #[test]
    fn dotted_rendering_round_trips() {
        let entry = MetadataEntry {
            path: vec!["address".to_string(), "city".to_string()],
            value_type: opaque("String"),
            element_type: None,
            model_valued: false,
        };
        let rendered = entry.dotted();
        let split: Vec<String> = rendered.split('.').map(str::to_string).collect();
        assert_eq!(split, entry.path);
        assert_eq!(entry.identifier(), "address_city");
    }
}
